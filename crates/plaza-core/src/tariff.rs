//! # Tariff Engine
//!
//! Computes the monetary charge for a completed parking session.
//!
//! ## Billing Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  nocturnal flag (frozen at entry)                                       │
//! │       │                                                                 │
//! │       ├── true ──► charge = night_rate, flat, regardless of duration   │
//! │       │                                                                 │
//! │       └── false ─► progressive:                                         │
//! │                      elapsed <= 30 min  ► half_hour_rate               │
//! │                      elapsed  > 30 min  ► half_hour_rate               │
//! │                                           + ceil((elapsed-30)/60)      │
//! │                                             × extra_hour_rate          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never consults the tariff clock: the nocturnal flag was
//! decided at entry and the session may have crossed the window boundary
//! since. The rate *values* come from the configuration passed in, which
//! the caller reads fresh at charge time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::PriceConfiguration;
use crate::{BASE_PERIOD_MINUTES, EXTRA_UNIT_MINUTES};

// =============================================================================
// Charge
// =============================================================================

/// The result of a tariff computation.
///
/// `detail` is the human-readable audit breakdown that ends up on the
/// invoice and the printed receipt; it carries enough of the arithmetic to
/// reconstruct the charge by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Charge {
    /// Total to collect.
    pub total: Money,

    /// Whole minutes between entry and exit, rounded to the nearest minute.
    pub elapsed_minutes: i64,

    /// Audit breakdown of the arithmetic.
    pub detail: String,
}

// =============================================================================
// Charge Computation
// =============================================================================

/// Computes the charge for a session spanning `entry` to `exit`.
///
/// ## Errors
/// `CoreError::InvalidDuration` when `exit` precedes `entry`. That is a
/// session-store consistency bug and is never billed as zero.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use plaza_core::tariff::compute_charge;
/// use plaza_core::types::PriceConfiguration;
///
/// let config = PriceConfiguration::default(); // $1.00 / $0.75 / $10.00
/// let entry = Utc.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap();
/// let exit = Utc.with_ymd_and_hms(2026, 3, 10, 12, 5, 0).unwrap();
///
/// let charge = compute_charge(entry, exit, false, &config).unwrap();
/// assert_eq!(charge.elapsed_minutes, 125);
/// assert_eq!(charge.total.cents(), 250); // $1.00 + 2 × $0.75
/// ```
pub fn compute_charge(
    entry: DateTime<Utc>,
    exit: DateTime<Utc>,
    nocturnal: bool,
    config: &PriceConfiguration,
) -> CoreResult<Charge> {
    let span_seconds = (exit - entry).num_seconds();
    if span_seconds < 0 {
        return Err(CoreError::InvalidDuration { entry, exit });
    }

    // Round to the nearest whole minute (30 s rounds up)
    let elapsed_minutes = (span_seconds + 30) / 60;

    if nocturnal {
        // The flat fee was locked in at entry; duration is irrelevant
        let total = config.night_rate();
        return Ok(Charge {
            total,
            elapsed_minutes,
            detail: format!("Fixed night rate ({})", total),
        });
    }

    if elapsed_minutes <= BASE_PERIOD_MINUTES {
        let total = config.half_hour_rate();
        return Ok(Charge {
            total,
            elapsed_minutes,
            detail: format!("Base half hour ({})", total),
        });
    }

    // Any started extra hour is billed in full
    let remaining = elapsed_minutes - BASE_PERIOD_MINUTES;
    let extra_units = (remaining + EXTRA_UNIT_MINUTES - 1) / EXTRA_UNIT_MINUTES;
    let total = config.half_hour_rate() + config.extra_hour_rate() * extra_units;

    Ok(Charge {
        total,
        elapsed_minutes,
        detail: format!(
            "Base half hour ({}) + {} extra hour(s) at {}",
            config.half_hour_rate(),
            extra_units,
            config.extra_hour_rate()
        ),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> PriceConfiguration {
        // $1.00 half hour, $0.75 extra hour, $10.00 night
        PriceConfiguration::default()
    }

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_short_stay_bills_half_hour_rate() {
        // Scenario A: 10:00 -> 10:20, non-nocturnal
        let charge = compute_charge(at(10, 10, 0), at(10, 10, 20), false, &config()).unwrap();
        assert_eq!(charge.elapsed_minutes, 20);
        assert_eq!(charge.total.cents(), 100);
        assert_eq!(charge.detail, "Base half hour ($1.00)");
    }

    #[test]
    fn test_half_hour_rate_covers_full_first_thirty_minutes() {
        for minutes in [0u32, 1, 15, 29, 30] {
            let charge =
                compute_charge(at(10, 10, 0), at(10, 10, minutes), false, &config()).unwrap();
            assert_eq!(charge.total.cents(), 100, "at {} minutes", minutes);
        }
    }

    #[test]
    fn test_progressive_stay_rounds_extra_hours_up() {
        // Scenario B: 10:00 -> 12:05 = 125 min, remaining 95, 2 units
        let charge = compute_charge(at(10, 10, 0), at(10, 12, 5), false, &config()).unwrap();
        assert_eq!(charge.elapsed_minutes, 125);
        assert_eq!(charge.total.cents(), 250);
        assert_eq!(
            charge.detail,
            "Base half hour ($1.00) + 2 extra hour(s) at $0.75"
        );
    }

    #[test]
    fn test_extra_unit_boundaries() {
        let cases = [
            (31, 1),  // first minute past the base period starts a unit
            (90, 1),  // exactly one full extra hour
            (91, 2),  // one minute into the second extra hour
            (150, 2), // exactly two full extra hours
            (151, 3),
        ];
        for (minutes, units) in cases {
            let exit = at(10, 10, 0) + chrono::Duration::minutes(minutes);
            let charge = compute_charge(at(10, 10, 0), exit, false, &config()).unwrap();
            assert_eq!(
                charge.total.cents(),
                100 + units * 75,
                "at {} minutes",
                minutes
            );
        }
    }

    #[test]
    fn test_nocturnal_charge_is_flat() {
        // Scenario C: 22:00 -> 05:00 next day, 7 hours, still $10.00
        let charge = compute_charge(at(10, 22, 0), at(11, 5, 0), true, &config()).unwrap();
        assert_eq!(charge.elapsed_minutes, 420);
        assert_eq!(charge.total.cents(), 1000);
        assert_eq!(charge.detail, "Fixed night rate ($10.00)");

        // Flat for any duration, including a zero-length stay
        for minutes in [0i64, 5, 30, 120, 720] {
            let exit = at(10, 22, 0) + chrono::Duration::minutes(minutes);
            let charge = compute_charge(at(10, 22, 0), exit, true, &config()).unwrap();
            assert_eq!(charge.total.cents(), 1000, "at {} minutes", minutes);
        }
    }

    #[test]
    fn test_elapsed_rounds_to_nearest_minute() {
        let entry = Utc.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap();

        let just_under = entry + chrono::Duration::seconds(29);
        assert_eq!(
            compute_charge(entry, just_under, false, &config())
                .unwrap()
                .elapsed_minutes,
            0
        );

        let just_over = entry + chrono::Duration::seconds(30);
        assert_eq!(
            compute_charge(entry, just_over, false, &config())
                .unwrap()
                .elapsed_minutes,
            1
        );
    }

    #[test]
    fn test_exit_before_entry_is_an_error() {
        let err = compute_charge(at(10, 12, 0), at(10, 11, 59), false, &config()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDuration { .. }));

        // Nocturnal sessions are no exception
        let err = compute_charge(at(10, 12, 0), at(10, 11, 0), true, &config()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDuration { .. }));
    }
}
