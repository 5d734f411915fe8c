//! # Invoice Construction
//!
//! Wraps a computed charge and its closed session into an immutable invoice
//! record. Invoices are created exactly once per session close and are
//! never mutated or deleted by this crate - archival is the store's
//! concern, deletion nobody's.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::tariff::Charge;
use crate::types::ParkingSession;

// =============================================================================
// Invoice
// =============================================================================

/// Immutable record of a closed session's computed charge.
///
/// Carries copies of the session fields the history table and the printed
/// receipt need, so a stored invoice renders without a session lookup.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The closed session this invoice bills.
    pub session_id: String,

    /// Canonical plate, copied from the session.
    pub plate: String,

    /// Space the vehicle occupied.
    pub space_number: u32,

    /// Entry timestamp, copied from the session.
    #[ts(as = "String")]
    pub entry_time: DateTime<Utc>,

    /// Exit timestamp. Reports bucket by this instant, not `generated_at`.
    #[ts(as = "String")]
    pub exit_time: DateTime<Utc>,

    /// Whole minutes between entry and exit.
    pub elapsed_minutes: i64,

    /// Total charged, in cents.
    pub charge_cents: i64,

    /// Whether the flat night rate applied, copied from the session.
    pub nocturnal: bool,

    /// Audit breakdown of the charge arithmetic.
    pub detail: String,

    /// When this invoice was generated.
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
}

impl Invoice {
    /// Returns the charge as Money.
    #[inline]
    pub fn charge(&self) -> Money {
        Money::from_cents(self.charge_cents)
    }

    /// Renders the elapsed time for display, e.g. `"2h 5m"`.
    #[inline]
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_minutes)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds the invoice for a closed session and its computed charge.
///
/// ## Errors
/// `CoreError::SessionNotClosed` when the session is still open - an open
/// session has no exit time to bill against.
pub fn build(
    session: &ParkingSession,
    charge: &Charge,
    generated_at: DateTime<Utc>,
) -> CoreResult<Invoice> {
    let not_closed = || CoreError::SessionNotClosed {
        session_id: session.id.clone(),
        plate: session.plate.clone(),
    };

    if !session.is_closed() {
        return Err(not_closed());
    }
    let exit_time = session.exit_time.ok_or_else(not_closed)?;

    Ok(Invoice {
        id: Uuid::new_v4().to_string(),
        session_id: session.id.clone(),
        plate: session.plate.clone(),
        space_number: session.space_number,
        entry_time: session.entry_time,
        exit_time,
        elapsed_minutes: charge.elapsed_minutes,
        charge_cents: charge.total.cents(),
        nocturnal: session.nocturnal,
        detail: charge.detail.clone(),
        generated_at,
    })
}

// =============================================================================
// Duration Display
// =============================================================================

/// Formats a minute count as `"XhYm"`-style display text, hours omitted
/// when zero: `125 -> "2h 5m"`, `20 -> "20m"`.
///
/// Presentation only - billing math never goes through this string.
pub fn format_elapsed(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tariff::compute_charge;
    use crate::types::PriceConfiguration;
    use chrono::TimeZone;

    fn closed_session() -> (ParkingSession, Charge) {
        let entry = Utc.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap();
        let exit = Utc.with_ymd_and_hms(2026, 3, 10, 12, 5, 0).unwrap();

        let mut session = ParkingSession::open("ABC-123", 7, entry, false);
        session.close(exit);

        let charge =
            compute_charge(entry, exit, session.nocturnal, &PriceConfiguration::default())
                .unwrap();
        (session, charge)
    }

    #[test]
    fn test_build_copies_session_and_charge() {
        let (session, charge) = closed_session();
        let generated_at = Utc.with_ymd_and_hms(2026, 3, 10, 12, 5, 30).unwrap();

        let invoice = build(&session, &charge, generated_at).unwrap();
        assert_eq!(invoice.session_id, session.id);
        assert_eq!(invoice.plate, "ABC-123");
        assert_eq!(invoice.space_number, 7);
        assert_eq!(invoice.entry_time, session.entry_time);
        assert_eq!(invoice.exit_time, session.exit_time.unwrap());
        assert_eq!(invoice.elapsed_minutes, 125);
        assert_eq!(invoice.charge(), Money::from_cents(250));
        assert!(!invoice.nocturnal);
        assert_eq!(invoice.detail, charge.detail);
        assert_eq!(invoice.generated_at, generated_at);
    }

    #[test]
    fn test_build_rejects_open_session() {
        let (session, charge) = closed_session();
        let open = ParkingSession::open("XYZ-987", 2, session.entry_time, false);

        let err = build(&open, &charge, session.entry_time).unwrap_err();
        assert!(matches!(err, CoreError::SessionNotClosed { .. }));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0m");
        assert_eq!(format_elapsed(20), "20m");
        assert_eq!(format_elapsed(60), "1h 0m");
        assert_eq!(format_elapsed(125), "2h 5m");
        assert_eq!(format_elapsed(720), "12h 0m");
    }
}
