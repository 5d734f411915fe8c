//! # Tariff Clock
//!
//! Decides whether an instant falls inside the configured night window.
//!
//! ## The Midnight Wraparound
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Window 20:00-06:00 (crosses midnight)                                  │
//! │                                                                         │
//! │  00:00      06:00                        20:00               24:00     │
//! │    │  NIGHT   │          DAY               │       NIGHT       │       │
//! │    ▼──────────▼────────────────────────────▼───────────────────▼       │
//! │                                                                         │
//! │  Window 13:00-18:00 (plain interval)                                    │
//! │                                                                         │
//! │  00:00            13:00        18:00                         24:00     │
//! │    │      DAY       │   NIGHT    │            DAY               │      │
//! │    ▼────────────────▼────────────▼──────────────────────────────▼      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here works on minutes-since-midnight (0-1439); the calendar
//! date of the instant is never consulted.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::PriceConfiguration;

/// Minutes in a full day; `HH:MM` values live in `[0, MINUTES_PER_DAY)`.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

// =============================================================================
// HH:MM Parsing
// =============================================================================

/// Parses an `HH:MM` time-of-day string into minutes since midnight.
///
/// The configuration editor sends times that may carry stray whitespace, a
/// seconds component (`HH:MM:SS` from some time pickers), or single-digit
/// parts (`7:5`). Those are cleaned up before validation; anything else
/// fails with `CoreError::InvalidTimeWindow`.
///
/// ## Example
/// ```rust
/// use plaza_core::clock::parse_hhmm;
///
/// assert_eq!(parse_hhmm("20:00").unwrap(), 1200);
/// assert_eq!(parse_hhmm(" 7:5 ").unwrap(), 425);
/// assert_eq!(parse_hhmm("06:30:15").unwrap(), 390); // seconds dropped
/// assert!(parse_hhmm("24:00").is_err());
/// ```
pub fn parse_hhmm(raw: &str) -> CoreResult<u16> {
    // Strip all whitespace, including interior runs
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let mut parts = cleaned.split(':');
    let (hour_part, minute_part) = match (parts.next(), parts.next()) {
        (Some(h), Some(m)) => (h, m),
        _ => {
            return Err(CoreError::invalid_window(format!(
                "'{}' is not an HH:MM time",
                raw.trim()
            )))
        }
    };
    // A third component (seconds) is tolerated and ignored

    let hour = parse_two_digit_part(hour_part, raw)?;
    let minute = parse_two_digit_part(minute_part, raw)?;

    if hour > 23 || minute > 59 {
        return Err(CoreError::invalid_window(format!(
            "'{}' is out of range (hours 00-23, minutes 00-59)",
            raw.trim()
        )));
    }

    Ok(hour * 60 + minute)
}

/// Parses one `HH` or `MM` component: 1-2 ASCII digits.
fn parse_two_digit_part(part: &str, raw: &str) -> CoreResult<u16> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid_window(format!(
            "'{}' is not an HH:MM time",
            raw.trim()
        )));
    }
    // Unwrap-free: 1-2 digits always fit in u16
    part.parse::<u16>().map_err(|_| {
        CoreError::invalid_window(format!("'{}' is not an HH:MM time", raw.trim()))
    })
}

/// Renders minutes-since-midnight back to canonical `HH:MM`.
///
/// Round-trips with [`parse_hhmm`], so cleaned-up editor input (`"7:5"`)
/// can be stored in its canonical form (`"07:05"`).
#[inline]
pub fn to_hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Returns an instant's minute-of-day (0-1439).
#[inline]
pub fn minute_of_day(ts: DateTime<Utc>) -> u16 {
    (ts.hour() * 60 + ts.minute()) as u16
}

// =============================================================================
// Night Window
// =============================================================================

/// A validated night window in minutes-since-midnight.
///
/// Obtained from the configured `HH:MM` bounds via [`NightWindow::parse`]
/// or [`PriceConfiguration::night_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    /// Start bound, inclusive.
    pub start: u16,
    /// End bound, exclusive.
    pub end: u16,
}

impl NightWindow {
    /// Parses and validates a pair of `HH:MM` bounds.
    pub fn parse(start: &str, end: &str) -> CoreResult<NightWindow> {
        Ok(NightWindow {
            start: parse_hhmm(start)?,
            end: parse_hhmm(end)?,
        })
    }

    /// Checks whether a minute-of-day falls inside the window.
    ///
    /// ## Cases
    /// - `start < end`: plain interval, `start <= t < end`
    /// - `start > end`: crosses midnight, `t >= start || t < end`
    /// - `start == end`: no night window, always false
    pub fn contains(&self, minute: u16) -> bool {
        use std::cmp::Ordering;

        match self.start.cmp(&self.end) {
            Ordering::Less => self.start <= minute && minute < self.end,
            Ordering::Greater => minute >= self.start || minute < self.end,
            // Equal bounds denote "no night window" rather than a full-day
            // window; the upstream behavior here was undefined and this is
            // the documented resolution
            Ordering::Equal => false,
        }
    }
}

// =============================================================================
// Tariff Clock
// =============================================================================

/// Decides whether `timestamp` falls inside the configured night window.
///
/// Pure and total over valid configurations: only the time-of-day of the
/// instant is consulted, never its calendar date. Fails with
/// `CoreError::InvalidTimeWindow` when the configured bounds are malformed.
pub fn is_night(timestamp: DateTime<Utc>, config: &PriceConfiguration) -> CoreResult<bool> {
    let window = config.night_window()?;
    Ok(window.contains(minute_of_day(timestamp)))
}

// =============================================================================
// Unit Tests
// =============================================================================
