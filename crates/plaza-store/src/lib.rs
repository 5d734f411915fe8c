//! # plaza-store: Session, Configuration and Invoice Stores
//!
//! This crate owns the mutable state of the Plaza parking lot and exposes
//! it through the same narrow contracts a database-backed implementation
//! would satisfy.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Plaza Parking Data Flow                            │
//! │                                                                         │
//! │  Booth front-end (entry form, exit form, reports)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    plaza-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌──────────────┐    │   │
//! │  │   │  ConfigStore  │   │ SessionStore  │   │ InvoiceStore │    │   │
//! │  │   │  (RwLock)     │   │  (Mutex)      │   │ (append-only)│    │   │
//! │  │   └───────┬───────┘   └───────┬───────┘   └──────┬───────┘    │   │
//! │  │           └─────────────┬─────┴──────────────────┘            │   │
//! │  │                         ▼                                      │   │
//! │  │                   ParkingLot facade                            │   │
//! │  │     register_entry / register_exit / reports / history         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                     plaza-core (pure logic)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Active price configuration with all-or-nothing updates
//! - [`sessions`] - Open sessions on the space grid
//! - [`invoices`] - Append-only invoice log with range queries
//! - [`lot`] - The facade the front-end talks to
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod invoices;
pub mod lot;
pub mod sessions;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigStore, ConfigUpdate};
pub use error::{StoreError, StoreResult};
pub use invoices::InvoiceStore;
pub use lot::{ExitPreview, ExitReceipt, ParkingLot};
pub use sessions::{SessionStore, SpaceStatus};
