//! # plaza-core: Pure Business Logic for the Plaza Parking Lot
//!
//! This crate is the **heart** of the parking system. It contains all
//! tariff and reporting logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Plaza Parking Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Booth Front-End (TypeScript)                    │   │
//! │  │   Space Grid ──► Entry Form ──► Exit Form ──► Reports UI        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                plaza-store (Session/Config/Invoice)             │   │
//! │  │    register_entry, register_exit, update_config, reports        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ plaza-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   plate   │  │   clock   │  │  tariff   │  │  report   │  │   │
//! │  │   │ normalize │  │ is_night  │  │  charges  │  │ aggregate │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PriceConfiguration, ParkingSession)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`plate`] - Plate normalization and interactive formatting
//! - [`clock`] - Night-window parsing and classification
//! - [`tariff`] - Charge computation (flat night rate / progressive)
//! - [`invoice`] - Invoice construction and duration display
//! - [`report`] - Daily/monthly revenue aggregation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Frozen Flag**: the nocturnal classification is decided at entry and
//!    stored with the session; the engine never re-derives it at exit
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use plaza_core::tariff::compute_charge;
//! use plaza_core::types::PriceConfiguration;
//!
//! let config = PriceConfiguration::default();
//! let entry = Utc.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap();
//! let exit = Utc.with_ymd_and_hms(2026, 3, 10, 10, 20, 0).unwrap();
//!
//! // A 20-minute daytime stay bills the half-hour rate
//! let charge = compute_charge(entry, exit, false, &config).unwrap();
//! assert_eq!(charge.total.cents(), 100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod invoice;
pub mod money;
pub mod plate;
pub mod report;
pub mod tariff;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use plaza_core::Money` instead of
// `use plaza_core::money::Money`

pub use clock::NightWindow;
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::Invoice;
pub use money::Money;
pub use report::{Period, ReportSummary};
pub use tariff::Charge;
pub use types::{ParkingSession, PriceConfiguration, SessionState};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minutes covered by the base half-hour charge.
pub const BASE_PERIOD_MINUTES: i64 = 30;

/// Minutes per extra-hour billing unit; any started unit bills in full.
pub const EXTRA_UNIT_MINUTES: i64 = 60;

/// Letters in a canonical plate (`LLL-DDD[D]`).
pub const PLATE_LETTERS: usize = 3;

/// Minimum digits in a canonical plate.
pub const PLATE_MIN_DIGITS: usize = 3;

/// Maximum digits in a canonical plate.
pub const PLATE_MAX_DIGITS: usize = 4;

/// Number of spaces in the lot.
///
/// ## Why a constant?
/// The hotel lot has a fixed painted grid. The session store takes an
/// explicit capacity, so a resized lot only touches its constructor;
/// this is the default it falls back to.
pub const DEFAULT_SPACE_COUNT: u32 = 15;
