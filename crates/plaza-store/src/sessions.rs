//! # Session Store
//!
//! Manages the open sessions on the space grid.
//!
//! ## Thread Safety
//! The open-session list is wrapped in `Arc<Mutex<T>>` because:
//! 1. Entry and exit registrations may arrive from concurrent callers
//! 2. Only one caller should mutate the grid at a time
//! 3. Operations are quick, so a Mutex beats RwLock complexity
//!
//! ## Lifecycle Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Session Store Operations                              │
//! │                                                                         │
//! │  Booth Action            Store Operation         Grid State Change      │
//! │  ────────────            ───────────────         ─────────────────      │
//! │                                                                         │
//! │  Click free space ──────► open_session() ──────► open.push(session)    │
//! │    (nocturnal flag decided HERE, from the config current at entry,     │
//! │     and frozen on the session)                                          │
//! │                                                                         │
//! │  Search plate ──────────► find_open() ─────────► (read only)           │
//! │                                                                         │
//! │  Register exit ─────────► close_session() ─────► open.remove(i)        │
//! │    (charge computed with the frozen flag + CURRENT rate values;        │
//! │     the Open→Closed transition happens exactly once, here)             │
//! │                                                                         │
//! │  Render grid ───────────► spaces() ────────────► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use plaza_core::clock;
use plaza_core::plate;
use plaza_core::tariff::{compute_charge, Charge};
use plaza_core::types::{ParkingSession, PriceConfiguration};
use plaza_core::validation::validate_space_number;
use plaza_core::DEFAULT_SPACE_COUNT;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Space Status
// =============================================================================

/// One cell of the space grid, as the booth front-end renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceStatus {
    /// Space number (1-based).
    pub number: u32,

    /// Whether a vehicle currently occupies the space.
    pub occupied: bool,

    /// Plate of the occupying vehicle, if any.
    pub plate: Option<String>,

    /// Entry time of the occupying vehicle, if any.
    pub entry_time: Option<DateTime<Utc>>,
}

// =============================================================================
// Session Store
// =============================================================================

/// Store for the open sessions of a fixed-capacity lot.
#[derive(Debug, Clone)]
pub struct SessionStore {
    capacity: u32,
    open: Arc<Mutex<Vec<ParkingSession>>>,
}

impl SessionStore {
    /// Creates a store for a lot with `capacity` numbered spaces.
    pub fn new(capacity: u32) -> Self {
        SessionStore {
            capacity,
            open: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the number of spaces in the lot.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Opens a session: the vehicle enters the lot.
    ///
    /// The plate is strictly normalized, the space checked against the grid,
    /// and the nocturnal flag decided from `config`'s night window at
    /// `entry_time` - then frozen on the session for its whole lifetime.
    pub fn open_session(
        &self,
        raw_plate: &str,
        space_number: u32,
        entry_time: DateTime<Utc>,
        config: &PriceConfiguration,
    ) -> StoreResult<ParkingSession> {
        let canonical = plate::normalize(raw_plate)?;
        validate_space_number(space_number)?;

        if space_number > self.capacity {
            return Err(StoreError::SpaceOutOfRange {
                space_number,
                capacity: self.capacity,
            });
        }

        let nocturnal = clock::is_night(entry_time, config)?;

        let mut open = self.open.lock().expect("session store mutex poisoned");

        if let Some(existing) = open.iter().find(|s| s.plate == canonical) {
            return Err(StoreError::VehicleAlreadyParked {
                plate: canonical,
                space_number: existing.space_number,
            });
        }

        if let Some(occupant) = open.iter().find(|s| s.space_number == space_number) {
            return Err(StoreError::SpaceOccupied {
                space_number,
                plate: occupant.plate.clone(),
            });
        }

        let session = ParkingSession::open(canonical, space_number, entry_time, nocturnal);
        info!(
            plate = %session.plate,
            space = space_number,
            nocturnal,
            "Vehicle entered"
        );
        open.push(session.clone());

        Ok(session)
    }

    /// Looks up the open session for a plate, if the vehicle is inside.
    pub fn find_open(&self, raw_plate: &str) -> StoreResult<Option<ParkingSession>> {
        let canonical = plate::normalize(raw_plate)?;
        let open = self.open.lock().expect("session store mutex poisoned");
        Ok(open.iter().find(|s| s.plate == canonical).cloned())
    }

    /// Closes a session: the vehicle leaves the lot.
    ///
    /// The charge is computed with the session's frozen nocturnal flag and
    /// the rate values from `config` - which the caller read fresh, not at
    /// entry time. The Open→Closed transition happens exactly once; the
    /// session leaves the grid and its space frees up.
    pub fn close_session(
        &self,
        raw_plate: &str,
        exit_time: DateTime<Utc>,
        config: &PriceConfiguration,
    ) -> StoreResult<(ParkingSession, Charge)> {
        let canonical = plate::normalize(raw_plate)?;

        let mut open = self.open.lock().expect("session store mutex poisoned");

        let index = open
            .iter()
            .position(|s| s.plate == canonical)
            .ok_or_else(|| StoreError::vehicle_not_found(&canonical))?;

        // Compute before mutating: a bad exit timestamp must leave the
        // session open on the grid
        let charge = compute_charge(
            open[index].entry_time,
            exit_time,
            open[index].nocturnal,
            config,
        )?;

        let mut session = open.remove(index);
        session.close(exit_time);

        info!(
            plate = %session.plate,
            space = session.space_number,
            charge_cents = charge.total.cents(),
            elapsed_minutes = charge.elapsed_minutes,
            "Vehicle exited"
        );

        Ok((session, charge))
    }

    /// Renders the full numbered grid, free spaces included.
    pub fn spaces(&self) -> Vec<SpaceStatus> {
        let open = self.open.lock().expect("session store mutex poisoned");
        debug!(occupied = open.len(), capacity = self.capacity, "Rendering grid");

        (1..=self.capacity)
            .map(|number| match open.iter().find(|s| s.space_number == number) {
                Some(session) => SpaceStatus {
                    number,
                    occupied: true,
                    plate: Some(session.plate.clone()),
                    entry_time: Some(session.entry_time),
                },
                None => SpaceStatus {
                    number,
                    occupied: false,
                    plate: None,
                    entry_time: None,
                },
            })
            .collect()
    }

    /// Returns how many spaces are currently occupied.
    pub fn occupied_count(&self) -> usize {
        self.open.lock().expect("session store mutex poisoned").len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::new(DEFAULT_SPACE_COUNT)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use plaza_core::error::CoreError;

    fn config() -> PriceConfiguration {
        // Night window 19:00-07:00
        PriceConfiguration::default()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_open_normalizes_plate_and_decides_flag() {
        let store = SessionStore::new(15);

        let daytime = store.open_session("abc1234", 3, at(10, 0), &config()).unwrap();
        assert_eq!(daytime.plate, "ABC-1234");
        assert!(!daytime.nocturnal);
        assert!(daytime.is_open());

        let evening = store.open_session("xyz-987", 4, at(21, 30), &config()).unwrap();
        assert!(evening.nocturnal);
    }

    #[test]
    fn test_open_rejects_bad_plate_and_bad_space() {
        let store = SessionStore::new(15);

        assert!(matches!(
            store.open_session("ab", 3, at(10, 0), &config()),
            Err(StoreError::Core(CoreError::InvalidPlateFormat { .. }))
        ));
        assert!(matches!(
            store.open_session("abc123", 0, at(10, 0), &config()),
            Err(StoreError::Core(CoreError::Validation(_)))
        ));
        assert!(matches!(
            store.open_session("abc123", 16, at(10, 0), &config()),
            Err(StoreError::SpaceOutOfRange { space_number: 16, capacity: 15 })
        ));
    }

    #[test]
    fn test_open_rejects_occupied_space_and_duplicate_plate() {
        let store = SessionStore::new(15);
        store.open_session("abc123", 3, at(10, 0), &config()).unwrap();

        assert!(matches!(
            store.open_session("xyz987", 3, at(10, 5), &config()),
            Err(StoreError::SpaceOccupied { space_number: 3, .. })
        ));
        assert!(matches!(
            store.open_session("ABC-123", 5, at(10, 5), &config()),
            Err(StoreError::VehicleAlreadyParked { space_number: 3, .. })
        ));
    }

    #[test]
    fn test_close_frees_space_and_returns_charge() {
        let store = SessionStore::new(15);
        store.open_session("abc123", 3, at(10, 0), &config()).unwrap();

        let (session, charge) = store.close_session("abc123", at(10, 20), &config()).unwrap();
        assert!(session.is_closed());
        assert_eq!(session.exit_time, Some(at(10, 20)));
        assert_eq!(charge.total.cents(), 100);
        assert_eq!(charge.elapsed_minutes, 20);

        assert_eq!(store.occupied_count(), 0);
        // Unknown afterwards
        assert!(matches!(
            store.close_session("abc123", at(11, 0), &config()),
            Err(StoreError::VehicleNotFound { .. })
        ));
    }

    #[test]
    fn test_close_with_bad_exit_keeps_session_open() {
        let store = SessionStore::new(15);
        store.open_session("abc123", 3, at(10, 0), &config()).unwrap();

        let err = store.close_session("abc123", at(9, 0), &config()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InvalidDuration { .. })
        ));

        // Still inside: the failed close must not eat the session
        assert_eq!(store.occupied_count(), 1);
        assert!(store.find_open("abc123").unwrap().is_some());
    }

    #[test]
    fn test_spaces_renders_full_grid() {
        let store = SessionStore::new(5);
        store.open_session("abc123", 2, at(10, 0), &config()).unwrap();

        let grid = store.spaces();
        assert_eq!(grid.len(), 5);
        assert!(!grid[0].occupied);
        assert!(grid[1].occupied);
        assert_eq!(grid[1].plate.as_deref(), Some("ABC-123"));
        assert_eq!(grid[1].entry_time, Some(at(10, 0)));
        assert!(grid[4].plate.is_none());
    }

    #[test]
    fn test_find_open_uses_canonical_plate() {
        let store = SessionStore::new(15);
        store.open_session("abc123", 3, at(10, 0), &config()).unwrap();

        // Any spelling that normalizes to the same canonical plate matches
        assert!(store.find_open("ABC-123").unwrap().is_some());
        assert!(store.find_open(" abc 123 ").unwrap().is_some());
        assert!(store.find_open("xyz987").unwrap().is_none());
    }
}
