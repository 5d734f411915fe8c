//! # Store Error Types
//!
//! Error types for session, space and configuration store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (plaza-core)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds space/occupancy context               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  API layer serializes for the booth front-end                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Front-end displays user-friendly message                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use plaza_core::error::{CoreError, ValidationError};
use thiserror::Error;

/// Session/space/configuration store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entry registration targeted a space that already holds a vehicle.
    #[error("Space {space_number} is already occupied by {plate}")]
    SpaceOccupied { space_number: u32, plate: String },

    /// Entry registration targeted a space beyond the lot's grid.
    #[error("Space {space_number} is out of range (lot has {capacity} spaces)")]
    SpaceOutOfRange { space_number: u32, capacity: u32 },

    /// Exit registration (or a preview) found no open session for the plate.
    #[error("No open session for plate {plate}")]
    VehicleNotFound { plate: String },

    /// Entry registration for a plate that is already inside the lot.
    #[error("Plate {plate} is already parked in space {space_number}")]
    VehicleAlreadyParked { plate: String, space_number: u32 },

    /// Domain error from plaza-core (plate, window, duration, lifecycle).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a VehicleNotFound error for a canonical plate.
    pub fn vehicle_not_found(plate: impl Into<String>) -> Self {
        StoreError::VehicleNotFound {
            plate: plate.into(),
        }
    }
}

/// Validation errors bubble up through CoreError.
impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::SpaceOccupied {
            space_number: 4,
            plate: "ABC-123".to_string(),
        };
        assert_eq!(err.to_string(), "Space 4 is already occupied by ABC-123");

        let err = StoreError::vehicle_not_found("XYZ-987");
        assert_eq!(err.to_string(), "No open session for plate XYZ-987");
    }

    #[test]
    fn test_core_error_passes_through_transparently() {
        let core = CoreError::invalid_plate("??");
        let store: StoreError = core.into();
        assert_eq!(
            store.to_string(),
            "Invalid plate format: '??' does not canonicalize to LLL-DDD or LLL-DDDD"
        );
    }
}
