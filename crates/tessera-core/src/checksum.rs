//! # Checksum Engine
//!
//! EAN-13 check digit computation.
//!
//! ## Weighting
//! ```text
//! position (0-based):  0  1  2  3  4  5  6  7  8  9 10 11 │ 12
//! weight:              1  3  1  3  1  3  1  3  1  3  1  3 │  1 (check)
//!
//! check = (10 - (Σ digit × weight) mod 10) mod 10
//!
//! "200000000001" → 2 + 1×3 = 5 → check 5 → "2000000000015"
//! ```
//!
//! Over all 13 digits (check digit weighted 1) the weighted sum of a valid
//! code is always divisible by 10.

use crate::error::{ValidationError, ValidationResult};

/// Number of data digits an EAN-13 check digit is computed over.
pub const DATA_LENGTH: usize = 12;

/// Total length of an EAN-13 code including the check digit.
pub const EAN13_LENGTH: usize = 13;

/// Computes the EAN-13 check digit for a 12-digit code.
///
/// ## Rules
/// - Input must be exactly 12 ASCII digits
/// - Anything else is rejected with `ValidationError::InvalidFormat`
///
/// ## Example
/// ```rust
/// use tessera_core::checksum::compute_check_digit;
///
/// assert_eq!(compute_check_digit("200000000001").unwrap(), 5);
/// assert!(compute_check_digit("20000000001").is_err());
/// assert!(compute_check_digit("20000000000A").is_err());
/// ```
pub fn compute_check_digit(code12: &str) -> ValidationResult<u8> {
    require_digits(code12, DATA_LENGTH)?;

    let sum = weighted_sum(code12.as_bytes());
    Ok(((10 - sum % 10) % 10) as u8)
}

/// Checks whether a 13-digit code carries a correct check digit.
///
/// ## Example
/// ```rust
/// use tessera_core::checksum::is_valid_ean13;
///
/// assert!(is_valid_ean13("2000000000015"));
/// assert!(!is_valid_ean13("2000000000016"));
/// assert!(!is_valid_ean13("200000000001"));
/// ```
pub fn is_valid_ean13(code: &str) -> bool {
    require_digits(code, EAN13_LENGTH).is_ok() && weighted_sum(code.as_bytes()) % 10 == 0
}

fn weighted_sum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 {
                digit
            } else {
                digit * 3
            }
        })
        .sum()
}

pub(crate) fn require_digits(code: &str, len: usize) -> ValidationResult<()> {
    if code.len() != len {
        return Err(ValidationError::invalid_format(
            "code",
            format!("expected {} digits, got {} characters", len, code.chars().count()),
        ));
    }

    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "code",
            "must contain only digits 0-9",
        ));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
