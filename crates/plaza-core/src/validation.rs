//! # Validation Module
//!
//! Input validation utilities for the parking lot.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Booth front-end (TypeScript)                                 │
//! │  ├── Live plate formatting, numeric input fields                       │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (plus plate::normalize / clock::parse_hhmm)      │
//! │  ├── Business rule validation before any store mutation                │
//! │  └── Typed errors, never strings                                       │
//! │                                                                         │
//! │  Defense in depth: the store never trusts the front-end                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::clock::parse_hhmm;
use crate::error::{CoreResult, ValidationError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a tariff rate in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (a free tariff is a business decision, not an error)
///
/// ## Example
/// ```rust
/// use plaza_core::validation::validate_rate_cents;
///
/// assert!(validate_rate_cents("half hour rate", 100).is_ok());
/// assert!(validate_rate_cents("half hour rate", 0).is_ok());
/// assert!(validate_rate_cents("half hour rate", -50).is_err());
/// ```
pub fn validate_rate_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a space number.
///
/// ## Rules
/// - Must be positive (1-based numbering)
///
/// The upper bound is the lot's capacity, which the session store owns.
pub fn validate_space_number(space_number: u32) -> ValidationResult<()> {
    if space_number == 0 {
        return Err(ValidationError::MustBePositive {
            field: "space number".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Night Window Validators
// =============================================================================

/// Validates a pair of night-window bounds before a configuration update.
///
/// Both bounds must be parseable `HH:MM` times; a configuration update
/// carrying a malformed bound is rejected as a whole.
pub fn validate_night_bounds(start: &str, end: &str) -> CoreResult<()> {
    parse_hhmm(start)?;
    parse_hhmm(end)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rate_cents() {
        assert!(validate_rate_cents("night rate", 1000).is_ok());
        assert!(validate_rate_cents("night rate", 0).is_ok());
        assert!(validate_rate_cents("night rate", -1).is_err());
    }

    #[test]
    fn test_validate_space_number() {
        assert!(validate_space_number(1).is_ok());
        assert!(validate_space_number(15).is_ok());
        assert!(validate_space_number(0).is_err());
    }

    #[test]
    fn test_validate_night_bounds() {
        assert!(validate_night_bounds("19:00", "07:00").is_ok());
        assert!(validate_night_bounds("08:00", "08:00").is_ok()); // no window, still valid
        assert!(validate_night_bounds("25:00", "07:00").is_err());
        assert!(validate_night_bounds("19:00", "7pm").is_err());
    }
}
