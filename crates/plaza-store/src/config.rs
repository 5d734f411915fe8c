//! # Configuration Store
//!
//! Owns the lot's single mutable `PriceConfiguration`.
//!
//! ## Read/Write Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Tariff engine / clock ──► current() ──► snapshot clone                │
//! │        (read fresh at every computation, never cached)                  │
//! │                                                                         │
//! │  Price editor ──► update() ──► validate EVERY field first              │
//! │                                 │                                       │
//! │                                 ├── any invalid ──► reject, store      │
//! │                                 │                   untouched          │
//! │                                 │                                       │
//! │                                 └── all valid ──► apply whole batch,   │
//! │                                                   bump version, stamp  │
//! │                                                   updated_at           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Reads vastly outnumber writes (every charge computation reads, only the
//! price editor writes), so the configuration sits behind an `RwLock`.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use plaza_core::clock::{parse_hhmm, to_hhmm};
use plaza_core::money::Money;
use plaza_core::types::PriceConfiguration;
use plaza_core::validation::{validate_night_bounds, validate_rate_cents};

use crate::error::StoreResult;

// =============================================================================
// Config Update
// =============================================================================

/// A partial configuration update as typed into the price editor.
///
/// Fields left as `None` keep their current value. Amounts arrive as the
/// operator typed them (decimal point or comma); window bounds as `HH:MM`
/// with whatever noise the time picker added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    /// New rate for the first half hour, e.g. `"1.00"` or `"1,00"`.
    pub half_hour_rate: Option<String>,

    /// New rate per started extra hour.
    pub extra_hour_rate: Option<String>,

    /// New flat overnight rate.
    pub night_rate: Option<String>,

    /// New night-window start, `HH:MM`.
    pub night_start: Option<String>,

    /// New night-window end, `HH:MM`.
    pub night_end: Option<String>,
}

// =============================================================================
// Config Store
// =============================================================================

/// Shared, mutable holder for the active price configuration.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<PriceConfiguration>>,
}

impl ConfigStore {
    /// Creates a store holding the given configuration.
    pub fn new(initial: PriceConfiguration) -> Self {
        ConfigStore {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Returns a snapshot of the current configuration.
    ///
    /// Callers read this fresh for every computation; the snapshot is never
    /// held across a session's lifetime.
    pub fn current(&self) -> PriceConfiguration {
        self.inner.read().expect("config lock poisoned").clone()
    }

    /// Applies a validated update and returns the new configuration.
    ///
    /// Every provided field is validated before anything changes; a single
    /// invalid field rejects the whole update and leaves the stored
    /// configuration untouched (same version, same values). On success the
    /// version is bumped and `updated_at` stamped.
    pub fn update(&self, update: &ConfigUpdate) -> StoreResult<PriceConfiguration> {
        debug!(?update, "Applying configuration update");

        let mut guard = self.inner.write().expect("config lock poisoned");

        // Stage the candidate before touching the stored value
        let mut candidate = guard.clone();

        if let Some(raw) = &update.half_hour_rate {
            let rate = Money::parse_decimal(raw)?;
            validate_rate_cents("half hour rate", rate.cents())?;
            candidate.half_hour_rate_cents = rate.cents();
        }
        if let Some(raw) = &update.extra_hour_rate {
            let rate = Money::parse_decimal(raw)?;
            validate_rate_cents("extra hour rate", rate.cents())?;
            candidate.extra_hour_rate_cents = rate.cents();
        }
        if let Some(raw) = &update.night_rate {
            let rate = Money::parse_decimal(raw)?;
            validate_rate_cents("night rate", rate.cents())?;
            candidate.night_rate_cents = rate.cents();
        }
        if let Some(raw) = &update.night_start {
            candidate.night_start = to_hhmm(parse_hhmm(raw)?);
        }
        if let Some(raw) = &update.night_end {
            candidate.night_end = to_hhmm(parse_hhmm(raw)?);
        }

        // The resulting pair must still be a valid window, whichever half
        // the update touched
        validate_night_bounds(&candidate.night_start, &candidate.night_end)?;

        candidate.version = guard.version + 1;
        candidate.updated_at = Some(Utc::now());

        *guard = candidate.clone();

        info!(version = candidate.version, "Price configuration updated");
        Ok(candidate)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        ConfigStore::new(PriceConfiguration::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_applies_all_fields() {
        let store = ConfigStore::default();

        let updated = store
            .update(&ConfigUpdate {
                half_hour_rate: Some("1,25".to_string()),
                extra_hour_rate: Some("0.80".to_string()),
                night_rate: Some("12.00".to_string()),
                night_start: Some("20:00".to_string()),
                night_end: Some("6:0".to_string()),
            })
            .unwrap();

        assert_eq!(updated.half_hour_rate_cents, 125);
        assert_eq!(updated.extra_hour_rate_cents, 80);
        assert_eq!(updated.night_rate_cents, 1200);
        assert_eq!(updated.night_start, "20:00");
        assert_eq!(updated.night_end, "06:00"); // cleaned to canonical form
        assert_eq!(updated.version, 2);
        assert!(updated.updated_at.is_some());

        assert_eq!(store.current().version, 2);
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let store = ConfigStore::default();

        let updated = store
            .update(&ConfigUpdate {
                night_rate: Some("15".to_string()),
                ..ConfigUpdate::default()
            })
            .unwrap();

        assert_eq!(updated.night_rate_cents, 1500);
        assert_eq!(updated.half_hour_rate_cents, 100);
        assert_eq!(updated.night_start, "19:00");
    }

    #[test]
    fn test_rejected_update_changes_nothing() {
        let store = ConfigStore::default();
        let before = store.current();

        // Valid rate + invalid window bound: nothing may be applied
        let result = store.update(&ConfigUpdate {
            half_hour_rate: Some("2.00".to_string()),
            night_end: Some("25:00".to_string()),
            ..ConfigUpdate::default()
        });
        assert!(result.is_err());

        let after = store.current();
        assert_eq!(after.version, before.version);
        assert_eq!(after.half_hour_rate_cents, before.half_hour_rate_cents);
        assert_eq!(after.night_end, before.night_end);
        assert!(after.updated_at.is_none());
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let store = ConfigStore::default();
        let result = store.update(&ConfigUpdate {
            extra_hour_rate: Some("-0.75".to_string()),
            ..ConfigUpdate::default()
        });
        assert!(result.is_err());
        assert_eq!(store.current().extra_hour_rate_cents, 75);
    }

    #[test]
    fn test_equal_bounds_are_a_valid_configuration() {
        // Equal bounds disable the night window; the update itself is legal
        let store = ConfigStore::default();
        let updated = store
            .update(&ConfigUpdate {
                night_start: Some("08:00".to_string()),
                night_end: Some("08:00".to_string()),
                ..ConfigUpdate::default()
            })
            .unwrap();
        assert_eq!(updated.night_start, updated.night_end);
    }

    #[test]
    fn test_each_update_bumps_version() {
        let store = ConfigStore::default();
        for expected in 2..5 {
            let updated = store
                .update(&ConfigUpdate {
                    night_rate: Some(format!("{}.00", expected)),
                    ..ConfigUpdate::default()
                })
                .unwrap();
            assert_eq!(updated.version, expected);
        }
    }
}
