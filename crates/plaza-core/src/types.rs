//! # Domain Types
//!
//! Core domain types for the Plaza parking lot.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌──────────────────────┐                   │
//! │  │  PriceConfiguration  │   │    ParkingSession    │                   │
//! │  │  ──────────────────  │   │  ──────────────────  │                   │
//! │  │  half_hour_rate      │   │  id (UUID)           │                   │
//! │  │  extra_hour_rate     │   │  plate (business)    │                   │
//! │  │  night_rate          │   │  space_number        │                   │
//! │  │  night_start/end     │   │  entry/exit times    │                   │
//! │  │  version             │   │  nocturnal (frozen)  │                   │
//! │  └──────────────────────┘   │  state               │                   │
//! │                             └──────────────────────┘                   │
//! │                                                                         │
//! │  SessionState: Open ──────────────► Closed  (exactly once, on exit)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A session has:
//! - `id`: UUID v4 - immutable, used by the store and invoices
//! - `plate`: canonical business identifier, unique among *open* sessions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::clock::NightWindow;
use crate::error::CoreResult;
use crate::money::Money;

// =============================================================================
// Price Configuration
// =============================================================================

/// The active tariff configuration, one record per lot.
///
/// ## Mutation Discipline
/// Mutated only by an explicit update operation in the configuration store;
/// every update produces a new `version` with an `updated_at` stamp. The
/// tariff engine reads the configuration fresh at computation time - it is
/// never cached across a session's lifetime.
///
/// ## Night Window Bounds
/// `night_start` / `night_end` are `HH:MM` strings as they arrive from the
/// configuration editor. They are parsed (and thereby validated) on use via
/// [`PriceConfiguration::night_window`]; equal bounds denote "no night
/// window".
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceConfiguration {
    /// Rate for the first half hour, in cents.
    pub half_hour_rate_cents: i64,

    /// Rate per started extra hour beyond the first half hour, in cents.
    pub extra_hour_rate_cents: i64,

    /// Flat overnight rate, in cents.
    pub night_rate_cents: i64,

    /// Start of the night window, `HH:MM`.
    pub night_start: String,

    /// End of the night window, `HH:MM`. May be earlier than `night_start`,
    /// in which case the window crosses midnight.
    pub night_end: String,

    /// Monotonically increasing version, bumped on every update.
    pub version: i64,

    /// When the configuration was last updated (None for the factory default).
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PriceConfiguration {
    /// Returns the half-hour rate as Money.
    #[inline]
    pub fn half_hour_rate(&self) -> Money {
        Money::from_cents(self.half_hour_rate_cents)
    }

    /// Returns the extra-hour rate as Money.
    #[inline]
    pub fn extra_hour_rate(&self) -> Money {
        Money::from_cents(self.extra_hour_rate_cents)
    }

    /// Returns the flat night rate as Money.
    #[inline]
    pub fn night_rate(&self) -> Money {
        Money::from_cents(self.night_rate_cents)
    }

    /// Parses the configured bounds into a [`NightWindow`].
    ///
    /// Fails with `CoreError::InvalidTimeWindow` when either bound is not a
    /// valid `HH:MM` time.
    pub fn night_window(&self) -> CoreResult<NightWindow> {
        NightWindow::parse(&self.night_start, &self.night_end)
    }
}

impl Default for PriceConfiguration {
    /// Returns the development tariff: $1.00 first half hour, $0.75 per
    /// extra hour, $10.00 flat overnight, night window 19:00-07:00.
    fn default() -> Self {
        PriceConfiguration {
            half_hour_rate_cents: 100,
            extra_hour_rate_cents: 75,
            night_rate_cents: 1000,
            night_start: "19:00".to_string(),
            night_end: "07:00".to_string(),
            version: 1,
            updated_at: None,
        }
    }
}

// =============================================================================
// Session State
// =============================================================================

/// The lifecycle state of a parking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Vehicle is inside the lot (no exit time yet).
    Open,
    /// Vehicle has left; exit time and charge are immutable.
    Closed,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Open
    }
}

// =============================================================================
// Parking Session
// =============================================================================

/// A vehicle's stay in the lot, from entry registration to exit.
///
/// ## The Frozen Nocturnal Flag
/// `nocturnal` is decided exactly once, at entry registration, using the
/// night window configured *at that instant*, and stored with the session.
/// It is never recomputed at exit - the session may have crossed the window
/// boundary (or the window itself may have been reconfigured) by then. The
/// rate *values*, in contrast, are read fresh at charge time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParkingSession {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Canonical plate, `LLL-DDD` or `LLL-DDDD`.
    pub plate: String,

    /// Space the vehicle occupies (1-based).
    pub space_number: u32,

    /// When the vehicle entered.
    #[ts(as = "String")]
    pub entry_time: DateTime<Utc>,

    /// When the vehicle left (None while the session is open).
    #[ts(as = "Option<String>")]
    pub exit_time: Option<DateTime<Utc>>,

    /// Whether the flat night rate applies, frozen at entry.
    pub nocturnal: bool,

    /// Lifecycle state.
    pub state: SessionState,
}

impl ParkingSession {
    /// Opens a new session at `entry_time`.
    ///
    /// The caller (the session store) has already canonicalized the plate
    /// and decided the nocturnal flag via the tariff clock.
    pub fn open(
        plate: impl Into<String>,
        space_number: u32,
        entry_time: DateTime<Utc>,
        nocturnal: bool,
    ) -> Self {
        ParkingSession {
            id: Uuid::new_v4().to_string(),
            plate: plate.into(),
            space_number,
            entry_time,
            exit_time: None,
            nocturnal,
            state: SessionState::Open,
        }
    }

    /// Checks if the session is still open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Checks if the session is closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Marks the session closed at `exit_time`.
    ///
    /// The session store performs this transition exactly once, when the
    /// vehicle leaves; afterwards `exit_time` and the computed charge are
    /// immutable.
    pub fn close(&mut self, exit_time: DateTime<Utc>) {
        self.exit_time = Some(exit_time);
        self.state = SessionState::Closed;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_configuration() {
        let config = PriceConfiguration::default();
        assert_eq!(config.half_hour_rate(), Money::from_cents(100));
        assert_eq!(config.extra_hour_rate(), Money::from_cents(75));
        assert_eq!(config.night_rate(), Money::from_cents(1000));
        assert_eq!(config.version, 1);
        assert!(config.updated_at.is_none());
        assert!(config.night_window().is_ok());
    }

    #[test]
    fn test_night_window_rejects_malformed_bounds() {
        let config = PriceConfiguration {
            night_end: "25:00".to_string(),
            ..PriceConfiguration::default()
        };
        assert!(config.night_window().is_err());
    }

    #[test]
    fn test_session_lifecycle() {
        let entry = Utc.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap();
        let exit = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

        let mut session = ParkingSession::open("ABC-123", 4, entry, false);
        assert!(session.is_open());
        assert!(session.exit_time.is_none());

        session.close(exit);
        assert!(session.is_closed());
        assert_eq!(session.exit_time, Some(exit));
    }

    #[test]
    fn test_session_serializes_state_snake_case() {
        let entry = Utc.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap();
        let session = ParkingSession::open("ABC-123", 1, entry, true);

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["state"], "open");
        assert_eq!(json["nocturnal"], true);
        assert_eq!(json["plate"], "ABC-123");
    }
}
