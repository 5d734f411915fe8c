//! # Report Aggregation
//!
//! Re-aggregates stored invoices into daily/monthly revenue summaries.
//!
//! ## Aggregation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  invoices ──filter by exit_time in period──► partition by nocturnal    │
//! │                                                    │                    │
//! │                            ┌───────────────────────┴────────────┐      │
//! │                            ▼                                    ▼      │
//! │                      night invoices                      normal invoices│
//! │                      count + revenue                     count + revenue│
//! │                            └───────────────┬────────────────────┘      │
//! │                                            ▼                           │
//! │                             total = night + normal                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The aggregator never recomputes charges - it only sums what the tariff
//! engine already decided. Summaries are recomputed on demand and never
//! persisted. Aggregation is order-independent and associative: summaries
//! of disjoint subsets [`combine`](ReportSummary::combine) into the
//! whole-set summary, which is what makes incremental report caching safe.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::invoice::Invoice;
use crate::money::Money;

// =============================================================================
// Period
// =============================================================================

/// The reporting window: one calendar day or one calendar month.
///
/// An invoice belongs to the period containing its `exit_time` - the
/// session is reported where it departed, even if it entered the lot in a
/// different day or month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Period {
    /// A single calendar day.
    Day { date: NaiveDate },
    /// A calendar month.
    Month { year: i32, month: u32 },
}

impl Period {
    /// Convenience constructor for a day period.
    pub fn day(date: NaiveDate) -> Self {
        Period::Day { date }
    }

    /// Convenience constructor for a month period.
    pub fn month(year: i32, month: u32) -> Self {
        Period::Month { year, month }
    }

    /// Checks whether an instant falls inside the period.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        match *self {
            Period::Day { date } => instant.date_naive() == date,
            Period::Month { year, month } => {
                instant.year() == year && instant.month() == month
            }
        }
    }

    /// Human-readable label: `"2026-03-10"` for a day, `"2026-03"` for a
    /// month.
    pub fn label(&self) -> String {
        match *self {
            Period::Day { date } => date.format("%Y-%m-%d").to_string(),
            Period::Month { year, month } => format!("{:04}-{:02}", year, month),
        }
    }
}

// =============================================================================
// Report Summary
// =============================================================================

/// Per-period totals, split by night/normal classification.
///
/// A pure aggregate view - never persisted, recomputed on demand from the
/// invoice set for the requested window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Label of the aggregated period.
    pub period_label: String,

    /// Invoices in the period (night + normal).
    pub vehicle_count: u32,

    /// Invoices billed at the flat night rate.
    pub night_count: u32,

    /// Invoices billed progressively.
    pub normal_count: u32,

    /// Revenue from night-rate invoices, in cents.
    pub night_revenue_cents: i64,

    /// Revenue from progressive invoices, in cents.
    pub normal_revenue_cents: i64,

    /// `night_revenue + normal_revenue`, in cents.
    pub total_revenue_cents: i64,
}

impl ReportSummary {
    /// An all-zero summary for a period label.
    pub fn empty(period_label: impl Into<String>) -> Self {
        ReportSummary {
            period_label: period_label.into(),
            vehicle_count: 0,
            night_count: 0,
            normal_count: 0,
            night_revenue_cents: 0,
            normal_revenue_cents: 0,
            total_revenue_cents: 0,
        }
    }

    /// Folds one invoice into the summary.
    fn add(&mut self, invoice: &Invoice) {
        self.vehicle_count += 1;
        if invoice.nocturnal {
            self.night_count += 1;
            self.night_revenue_cents += invoice.charge_cents;
        } else {
            self.normal_count += 1;
            self.normal_revenue_cents += invoice.charge_cents;
        }
        self.total_revenue_cents = self.night_revenue_cents + self.normal_revenue_cents;
    }

    /// Sums two summaries of the *same* period, per classification.
    ///
    /// This is the associativity seam: aggregating disjoint invoice subsets
    /// and combining the results must equal aggregating the whole set. The
    /// label of `self` is kept.
    pub fn combine(mut self, other: &ReportSummary) -> ReportSummary {
        self.vehicle_count += other.vehicle_count;
        self.night_count += other.night_count;
        self.normal_count += other.normal_count;
        self.night_revenue_cents += other.night_revenue_cents;
        self.normal_revenue_cents += other.normal_revenue_cents;
        self.total_revenue_cents = self.night_revenue_cents + self.normal_revenue_cents;
        self
    }

    /// Returns the night revenue as Money.
    #[inline]
    pub fn night_revenue(&self) -> Money {
        Money::from_cents(self.night_revenue_cents)
    }

    /// Returns the normal revenue as Money.
    #[inline]
    pub fn normal_revenue(&self) -> Money {
        Money::from_cents(self.normal_revenue_cents)
    }

    /// Returns the total revenue as Money.
    #[inline]
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Aggregates the invoices whose exit falls inside `period`.
///
/// An empty filtered set yields an all-zero summary, not an error.
pub fn aggregate(invoices: &[Invoice], period: Period) -> ReportSummary {
    let mut summary = ReportSummary::empty(period.label());
    for invoice in invoices {
        if period.contains(invoice.exit_time) {
            summary.add(invoice);
        }
    }
    summary
}

// =============================================================================
// Unit Tests
// =============================================================================
