//! # Error Types
//!
//! Domain-specific error types for plaza-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  plaza-core errors (this file)                                         │
//! │  ├── CoreError        - Tariff/plate/invoice domain errors             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  plaza-store errors (separate crate)                                   │
//! │  └── StoreError       - Session/space/configuration store failures     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → API layer → UI       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (plate, timestamps, bounds)
//! 3. Errors are enum variants, never String
//! 4. Every variant is recoverable at the call site and never retried
//!    internally: these are deterministic logic errors, not transient faults

use chrono::{DateTime, Utc};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent tariff or lifecycle rule violations. They should
/// be caught and translated to user-friendly messages by the booth UI.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Raw text does not canonicalize to a `LLL-DDD` or `LLL-DDDD` plate.
    ///
    /// ## When This Occurs
    /// - More than 3 letters or more than 4 digits in the input
    /// - Missing letter or digit segment (partial interactive input)
    /// - Stray characters that survive stripping (a second hyphen, etc.)
    ///
    /// The caller must re-prompt; the input is never truncated further.
    #[error("Invalid plate format: '{raw}' does not canonicalize to LLL-DDD or LLL-DDDD")]
    InvalidPlateFormat { raw: String },

    /// Configured night-window bound is not a parseable `HH:MM` time.
    ///
    /// A configuration update carrying such a bound must be rejected as a
    /// whole, never partially applied.
    #[error("Invalid night window: {reason}")]
    InvalidTimeWindow { reason: String },

    /// Exit timestamp precedes the entry timestamp.
    ///
    /// This signals a session-store consistency bug. The charge is never
    /// silently clamped to zero.
    #[error("Invalid duration: exit {exit} precedes entry {entry}")]
    InvalidDuration {
        entry: DateTime<Utc>,
        exit: DateTime<Utc>,
    },

    /// Invoice construction attempted on a session that is still open.
    #[error("Session {session_id} for plate {plate} is not closed")]
    SessionNotClosed { session_id: String, plate: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidPlateFormat error from the offending raw input.
    pub fn invalid_plate(raw: impl Into<String>) -> Self {
        CoreError::InvalidPlateFormat { raw: raw.into() }
    }

    /// Creates an InvalidTimeWindow error with a reason.
    pub fn invalid_window(reason: impl Into<String>) -> Self {
        CoreError::InvalidTimeWindow {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before lifecycle logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (zero is allowed, e.g. a free tariff).
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed time, non-decimal amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::invalid_plate("a-b-1");
        assert_eq!(
            err.to_string(),
            "Invalid plate format: 'a-b-1' does not canonicalize to LLL-DDD or LLL-DDDD"
        );

        let err = CoreError::invalid_window("night start '25:00' is out of range");
        assert_eq!(
            err.to_string(),
            "Invalid night window: night start '25:00' is out of range"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBeNonNegative {
            field: "night rate".to_string(),
        };
        assert_eq!(err.to_string(), "night rate must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "plate".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
