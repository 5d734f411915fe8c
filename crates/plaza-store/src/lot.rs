//! # Parking Lot Facade
//!
//! Single entry point aggregating the three stores, the way the booth
//! front-end consumes them.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ParkingLot                                       │
//! │                                                                         │
//! │  register_entry ──► ConfigStore.current() ──► SessionStore.open        │
//! │                        (night window decides the frozen flag)          │
//! │                                                                         │
//! │  register_exit ───► ConfigStore.current() ──► SessionStore.close       │
//! │                        (fresh rates)            │                       │
//! │                                                 ▼                       │
//! │                     invoice::build ──► InvoiceStore.append             │
//! │                                                                         │
//! │  daily_report / monthly_report ──► report::aggregate over the log      │
//! │     (recomputed on demand; charges are summed, never recomputed)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use plaza_core::invoice::{self, Invoice};
use plaza_core::report::{aggregate, Period, ReportSummary};
use plaza_core::tariff::compute_charge;
use plaza_core::types::{ParkingSession, PriceConfiguration};
use plaza_core::DEFAULT_SPACE_COUNT;

use crate::config::{ConfigStore, ConfigUpdate};
use crate::error::StoreResult;
use crate::invoices::InvoiceStore;
use crate::sessions::{SessionStore, SpaceStatus};

// =============================================================================
// Response Objects
// =============================================================================

/// What the exit-search form shows before the operator confirms: the open
/// session plus a quote at the current instant. Nothing is closed yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitPreview {
    pub plate: String,
    pub space_number: u32,
    pub entry_time: DateTime<Utc>,
    pub nocturnal: bool,
    /// Estimated charge if the vehicle left right now, in cents.
    pub estimated_charge_cents: i64,
    /// Elapsed time so far, for display ("2h 5m").
    pub elapsed_display: String,
    /// Breakdown of the estimate.
    pub detail: String,
}

/// Result of a confirmed exit: the closed session and its invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitReceipt {
    pub session: ParkingSession,
    pub invoice: Invoice,
}

// =============================================================================
// Parking Lot
// =============================================================================

/// The lot: configuration, space grid and invoice log behind one facade.
#[derive(Debug, Clone, Default)]
pub struct ParkingLot {
    config: ConfigStore,
    sessions: SessionStore,
    invoices: InvoiceStore,
}

impl ParkingLot {
    /// Creates a lot with the default capacity and development tariff.
    pub fn new() -> Self {
        ParkingLot::with_config(PriceConfiguration::default(), DEFAULT_SPACE_COUNT)
    }

    /// Creates a lot with an explicit tariff and capacity.
    pub fn with_config(config: PriceConfiguration, capacity: u32) -> Self {
        ParkingLot {
            config: ConfigStore::new(config),
            sessions: SessionStore::new(capacity),
            invoices: InvoiceStore::new(),
        }
    }

    /// Access to the configuration store.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Access to the session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Access to the invoice log.
    pub fn invoices(&self) -> &InvoiceStore {
        &self.invoices
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Returns the current price configuration.
    pub fn current_config(&self) -> PriceConfiguration {
        self.config.current()
    }

    /// Applies a price-editor update (all-or-nothing).
    pub fn update_config(&self, update: &ConfigUpdate) -> StoreResult<PriceConfiguration> {
        self.config.update(update)
    }

    // -------------------------------------------------------------------------
    // Session Lifecycle
    // -------------------------------------------------------------------------

    /// Registers a vehicle entering the lot.
    ///
    /// Reads the configuration current at this instant to decide (and
    /// freeze) the session's nocturnal flag.
    pub fn register_entry(
        &self,
        raw_plate: &str,
        space_number: u32,
        entry_time: DateTime<Utc>,
    ) -> StoreResult<ParkingSession> {
        let config = self.config.current();
        self.sessions
            .open_session(raw_plate, space_number, entry_time, &config)
    }

    /// Registers a vehicle leaving the lot.
    ///
    /// Computes the charge (frozen flag, fresh rates), builds the invoice
    /// and appends it to the log before returning - a session is Closed and
    /// invoiced atomically from the caller's point of view.
    pub fn register_exit(
        &self,
        raw_plate: &str,
        exit_time: DateTime<Utc>,
    ) -> StoreResult<ExitReceipt> {
        let config = self.config.current();
        let (session, charge) = self.sessions.close_session(raw_plate, exit_time, &config)?;

        let invoice = invoice::build(&session, &charge, Utc::now())?;
        self.invoices.append(invoice.clone());

        info!(
            invoice_id = %invoice.id,
            plate = %invoice.plate,
            charge_cents = invoice.charge_cents,
            "Exit registered"
        );

        Ok(ExitReceipt { session, invoice })
    }

    /// Quotes an open session at `at` without closing it.
    ///
    /// Returns `Ok(None)` when the plate has no open session.
    pub fn exit_preview(
        &self,
        raw_plate: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<Option<ExitPreview>> {
        let Some(session) = self.sessions.find_open(raw_plate)? else {
            return Ok(None);
        };

        let config = self.config.current();
        let charge = compute_charge(session.entry_time, at, session.nocturnal, &config)?;

        debug!(plate = %session.plate, estimated_cents = charge.total.cents(), "Exit preview");

        Ok(Some(ExitPreview {
            plate: session.plate,
            space_number: session.space_number,
            entry_time: session.entry_time,
            nocturnal: session.nocturnal,
            estimated_charge_cents: charge.total.cents(),
            elapsed_display: invoice::format_elapsed(charge.elapsed_minutes),
            detail: charge.detail,
        }))
    }

    /// Renders the space grid.
    pub fn spaces(&self) -> Vec<SpaceStatus> {
        self.sessions.spaces()
    }

    // -------------------------------------------------------------------------
    // History & Reports
    // -------------------------------------------------------------------------

    /// History rows for the booth table: newest exits first, optional exit
    /// date filter, capped at `limit`.
    pub fn history(&self, date: Option<NaiveDate>, limit: usize) -> Vec<Invoice> {
        self.invoices.history(date, limit)
    }

    /// Revenue summary for one calendar day.
    pub fn daily_report(&self, date: NaiveDate) -> ReportSummary {
        aggregate(&self.invoices.all(), Period::day(date))
    }

    /// Revenue summary for one calendar month.
    pub fn monthly_report(&self, year: i32, month: u32) -> ReportSummary {
        aggregate(&self.invoices.all(), Period::month(year, month))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
