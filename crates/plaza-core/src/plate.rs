//! # Plate Normalization
//!
//! Validates and canonicalizes free-text plate identifiers.
//!
//! ## Two Surfaces
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Booth input field (each keystroke)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  autoformat("abc12")  ──►  "ABC-12"     partial prefixes are fine      │
//! │                                                                         │
//! │  Entry / exit registration (before any session operation)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize("abc1234") ──►  "ABC-1234"   strict: LLL-DDD or LLL-DDDD    │
//! │  normalize("abc12")   ──►  InvalidPlateFormat (re-prompt, no truncate) │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::{PLATE_LETTERS, PLATE_MAX_DIGITS, PLATE_MIN_DIGITS};

// =============================================================================
// Strict Normalization
// =============================================================================

/// Canonicalizes a raw plate into `LLL-DDD` or `LLL-DDDD` form.
///
/// ## Algorithm
/// 1. Strip every character other than letters, digits and hyphen; uppercase.
/// 2. Split the letter segment from the digit segment (on the first hyphen
///    if one is present, otherwise at the letter/digit boundary).
/// 3. Require exactly 3 letters and 3-4 digits with nothing left over.
///
/// Inputs with more than 3 letters or more than 4 digits are rejected, not
/// truncated - the caller must re-prompt. Idempotent on every input it
/// accepts: `normalize(normalize(x)) == normalize(x)`.
///
/// ## Example
/// ```rust
/// use plaza_core::plate::normalize;
///
/// assert_eq!(normalize("abc1234").unwrap(), "ABC-1234");
/// assert_eq!(normalize("ABC-123").unwrap(), "ABC-123");
/// assert!(normalize("a-b-1").is_err());
/// ```
pub fn normalize(raw: &str) -> CoreResult<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_uppercase();

    let (letters, digits) = match cleaned.split_once('-') {
        Some((left, right)) => {
            // Explicit hyphen: left must be pure letters, right pure digits
            // (a second hyphen lands in `right` and fails the digit check)
            if left.is_empty()
                || right.is_empty()
                || !left.bytes().all(|b| b.is_ascii_alphabetic())
                || !right.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(CoreError::invalid_plate(raw));
            }
            (left.to_string(), right.to_string())
        }
        None => {
            // No hyphen: expect a letter run followed by a digit run,
            // consuming the whole input
            let letter_len = cleaned
                .bytes()
                .take_while(|b| b.is_ascii_alphabetic())
                .count();
            let (letters, rest) = cleaned.split_at(letter_len);
            if letters.is_empty() || rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(CoreError::invalid_plate(raw));
            }
            (letters.to_string(), rest.to_string())
        }
    };

    if letters.len() != PLATE_LETTERS
        || digits.len() < PLATE_MIN_DIGITS
        || digits.len() > PLATE_MAX_DIGITS
    {
        return Err(CoreError::invalid_plate(raw));
    }

    let canonical = format!("{}-{}", letters, digits);
    debug_assert!(is_canonical(&canonical));
    Ok(canonical)
}

/// Checks whether a string already has the canonical `LLL-DDD[D]` shape.
pub fn is_canonical(plate: &str) -> bool {
    let Some((letters, digits)) = plate.split_once('-') else {
        return false;
    };

    letters.len() == PLATE_LETTERS
        && letters.bytes().all(|b| b.is_ascii_uppercase())
        && digits.len() >= PLATE_MIN_DIGITS
        && digits.len() <= PLATE_MAX_DIGITS
        && digits.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Interactive Formatting
// =============================================================================

/// Progressive formatter for the booth input field.
///
/// Unlike [`normalize`], this never fails: it uppercases as the operator
/// types, caps the segments at 3 letters / 4 digits, and inserts the hyphen
/// once digits begin. Partial prefixes (`"AB"`, `"ABC-1"`) are valid
/// intermediate states; the strict validator still runs before any session
/// operation.
///
/// ## Example
/// ```rust
/// use plaza_core::plate::autoformat;
///
/// assert_eq!(autoformat("ab"), "AB");
/// assert_eq!(autoformat("abc1"), "ABC-1");
/// assert_eq!(autoformat("abcd-12345"), "ABC-1234");
/// ```
pub fn autoformat(raw: &str) -> String {
    let mut letters = String::new();
    let mut digits = String::new();

    for c in raw.chars() {
        if c.is_ascii_alphabetic() && digits.is_empty() && letters.len() < PLATE_LETTERS {
            letters.push(c.to_ascii_uppercase());
        } else if c.is_ascii_digit() && !letters.is_empty() && digits.len() < PLATE_MAX_DIGITS {
            digits.push(c);
        }
    }

    if digits.is_empty() {
        letters
    } else {
        format!("{}-{}", letters, digits)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_inserts_hyphen() {
        assert_eq!(normalize("abc1234").unwrap(), "ABC-1234");
        assert_eq!(normalize("abc123").unwrap(), "ABC-123");
        assert_eq!(normalize("GHP042").unwrap(), "GHP-042");
    }

    #[test]
    fn test_normalize_keeps_existing_hyphen() {
        assert_eq!(normalize("ABC-123").unwrap(), "ABC-123");
        assert_eq!(normalize("abc-1234").unwrap(), "ABC-1234");
    }

    #[test]
    fn test_normalize_strips_noise() {
        assert_eq!(normalize(" abc 123 ").unwrap(), "ABC-123");
        assert_eq!(normalize("abc.123").unwrap(), "ABC-123");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["abc1234", "ABC-123", " ab c-123 ", "xyz-9876"] {
            let once = normalize(raw).unwrap();
            let twice = normalize(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_normalize_rejects_oversized_segments() {
        // More than 3 letters or more than 4 digits is a rejection,
        // never a further truncation
        assert!(normalize("abcd123").is_err());
        assert!(normalize("abc12345").is_err());
        assert!(normalize("ABCD-1234").is_err());
    }

    #[test]
    fn test_normalize_rejects_partial_input() {
        assert!(normalize("").is_err());
        assert!(normalize("ab").is_err());
        assert!(normalize("abc").is_err());
        assert!(normalize("abc-12").is_err());
        assert!(normalize("123").is_err());
    }

    #[test]
    fn test_normalize_rejects_multiple_hyphens() {
        assert!(normalize("a-b-1").is_err());
        assert!(normalize("abc--123").is_err());
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("ABC-123"));
        assert!(is_canonical("ABC-1234"));
        assert!(!is_canonical("abc-123"));
        assert!(!is_canonical("ABC123"));
        assert!(!is_canonical("AB-123"));
        assert!(!is_canonical("ABC-12345"));
    }

    #[test]
    fn test_autoformat_progressive_typing() {
        assert_eq!(autoformat(""), "");
        assert_eq!(autoformat("a"), "A");
        assert_eq!(autoformat("ab"), "AB");
        assert_eq!(autoformat("abc"), "ABC");
        assert_eq!(autoformat("abc1"), "ABC-1");
        assert_eq!(autoformat("abc1234"), "ABC-1234");
    }

    #[test]
    fn test_autoformat_caps_segments() {
        assert_eq!(autoformat("abcdef"), "ABC");
        assert_eq!(autoformat("abcd-12345"), "ABC-1234");
        assert_eq!(autoformat("abc-123456789"), "ABC-1234");
    }

    #[test]
    fn test_autoformat_ignores_leading_digits() {
        // Digits before any letter cannot start a plate
        assert_eq!(autoformat("123abc"), "ABC");
    }
}
