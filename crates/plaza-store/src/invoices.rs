//! # Invoice Store
//!
//! Append-only log of generated invoices.
//!
//! Invoices enter the log exactly once, when a session closes, and are
//! never mutated or deleted here. The log is the single source the report
//! aggregator and the history table read from; both query by the
//! invoice's `exit_time`.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use plaza_core::invoice::Invoice;

/// Shared append-only invoice log.
#[derive(Debug, Clone, Default)]
pub struct InvoiceStore {
    inner: Arc<Mutex<Vec<Invoice>>>,
}

impl InvoiceStore {
    /// Creates an empty log.
    pub fn new() -> Self {
        InvoiceStore::default()
    }

    /// Appends a freshly built invoice.
    pub fn append(&self, invoice: Invoice) {
        debug!(
            invoice_id = %invoice.id,
            plate = %invoice.plate,
            charge_cents = invoice.charge_cents,
            "Invoice recorded"
        );
        self.inner
            .lock()
            .expect("invoice store mutex poisoned")
            .push(invoice);
    }

    /// Returns every stored invoice, oldest first.
    pub fn all(&self) -> Vec<Invoice> {
        self.inner
            .lock()
            .expect("invoice store mutex poisoned")
            .clone()
    }

    /// Returns invoices whose exit falls in `[from, to)`.
    pub fn between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Invoice> {
        self.inner
            .lock()
            .expect("invoice store mutex poisoned")
            .iter()
            .filter(|inv| inv.exit_time >= from && inv.exit_time < to)
            .cloned()
            .collect()
    }

    /// History view: newest exits first, optionally filtered to one exit
    /// date, capped at `limit` rows.
    pub fn history(&self, date: Option<NaiveDate>, limit: usize) -> Vec<Invoice> {
        let guard = self.inner.lock().expect("invoice store mutex poisoned");

        let mut rows: Vec<Invoice> = guard
            .iter()
            .filter(|inv| match date {
                Some(d) => inv.exit_time.date_naive() == d,
                None => true,
            })
            .cloned()
            .collect();

        rows.sort_by(|a, b| b.exit_time.cmp(&a.exit_time));
        rows.truncate(limit);
        rows
    }

    /// Number of stored invoices.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("invoice store mutex poisoned")
            .len()
    }

    /// Checks whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
