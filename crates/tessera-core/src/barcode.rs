//! # Code Allocator
//!
//! Mints internal-use EAN-13 barcodes from the catalog's item counter and
//! retries against a duplicate check.
//!
//! ## Allocation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Barcode Allocation                                 │
//! │                                                                         │
//! │  attempt = 0                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sequence = counter + 1 + attempt                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "200" + sequence (9 digits, zero padded) + check digit                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  exists(candidate)?                                                    │
//! │       │                                                                 │
//! │       ├── NotFound     → return candidate                              │
//! │       ├── CheckFailed  → return candidate (fail-open)                  │
//! │       └── Found        → attempt += 1, retry                           │
//! │                                                                         │
//! │  All attempts taken → return the last candidate anyway                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Limitation
//! Exhausting every attempt yields a candidate that may duplicate an
//! existing barcode. Allocation is best effort; the store's UNIQUE
//! constraint is the final arbiter.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::checksum::{compute_check_digit, is_valid_ean13, require_digits, EAN13_LENGTH};
use crate::error::{CoreResult, ValidationError, ValidationResult};
use crate::BARCODE_PREFIX;

/// Width of the zero-padded sequence between prefix and check digit.
pub const SEQUENCE_WIDTH: usize = 9;

/// Largest sequence number that fits in [`SEQUENCE_WIDTH`] digits.
pub const MAX_SEQUENCE: u64 = 999_999_999;

// =============================================================================
// Barcode Types
// =============================================================================

/// Barcode symbology stored alongside a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum BarcodeType {
    /// EAN-13 (every minted barcode).
    #[default]
    Ean,
    /// UPC-A, typically supplier-printed.
    #[serde(rename = "UPC-A")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "UPC-A"))]
    UpcA,
    /// Anything else a supplier attached.
    Other,
}

impl BarcodeType {
    /// Returns the stored label ("EAN", "UPC-A", "OTHER").
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeType::Ean => "EAN",
            BarcodeType::UpcA => "UPC-A",
            BarcodeType::Other => "OTHER",
        }
    }
}

impl fmt::Display for BarcodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated EAN-13 barcode.
///
/// The digits are always 13 ASCII digits whose last digit satisfies the
/// checksum over the first 12. Instances are immutable once minted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct Barcode {
    digits: String,
    #[serde(rename = "type")]
    barcode_type: BarcodeType,
}

impl Barcode {
    /// Parses and validates a 13-digit EAN code.
    ///
    /// ## Example
    /// ```rust
    /// use tessera_core::Barcode;
    ///
    /// assert!(Barcode::parse("2000000000015").is_ok());
    /// assert!(Barcode::parse("2000000000016").is_err());
    /// ```
    pub fn parse(text: &str) -> ValidationResult<Self> {
        let text = text.trim();
        require_digits(text, EAN13_LENGTH)?;

        if !is_valid_ean13(text) {
            return Err(ValidationError::invalid_format(
                "barcode",
                "check digit does not match",
            ));
        }

        Ok(Barcode {
            digits: text.to_string(),
            barcode_type: BarcodeType::Ean,
        })
    }

    /// Returns the 13 digits.
    #[inline]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Returns the symbology (always EAN).
    #[inline]
    pub fn barcode_type(&self) -> BarcodeType {
        self.barcode_type
    }

    /// Returns the trailing check digit.
    pub fn check_digit(&self) -> u8 {
        self.digits.as_bytes()[EAN13_LENGTH - 1] - b'0'
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl From<Barcode> for ItemBarcode {
    fn from(barcode: Barcode) -> Self {
        ItemBarcode {
            barcode: barcode.digits,
            barcode_type: barcode.barcode_type,
        }
    }
}

/// A barcode as attached to a stored item record.
///
/// Unlike [`Barcode`] this is not validated: supplier barcodes of any
/// family can sit on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemBarcode {
    pub barcode: String,
    pub barcode_type: BarcodeType,
}

// =============================================================================
// Existence Check
// =============================================================================

/// Result of asking a collaborator whether something already exists.
///
/// ## Fail-Open Policy
/// `CheckFailed` means the lookup itself failed (store missing, query
/// error). Allocation treats it exactly like `NotFound` so an unavailable
/// duplicate-check store never blocks item creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistenceCheck {
    Found,
    NotFound,
    CheckFailed,
}

impl ExistenceCheck {
    /// Converts a collaborator lookup into an existence check, logging
    /// the failure instead of propagating it.
    pub fn from_lookup<E: fmt::Display>(lookup: Result<bool, E>) -> Self {
        match lookup {
            Ok(true) => ExistenceCheck::Found,
            Ok(false) => ExistenceCheck::NotFound,
            Err(err) => {
                warn!(error = %err, "Existence check failed, treating as not found");
                ExistenceCheck::CheckFailed
            }
        }
    }

    /// Returns true only for a confirmed `Found`.
    #[inline]
    pub fn is_taken(&self) -> bool {
        matches!(self, ExistenceCheck::Found)
    }
}

impl From<bool> for ExistenceCheck {
    fn from(found: bool) -> Self {
        if found {
            ExistenceCheck::Found
        } else {
            ExistenceCheck::NotFound
        }
    }
}

// =============================================================================
// Allocation
// =============================================================================

/// Builds the barcode for a sequence number.
///
/// ## Rules
/// - `"200"` + sequence zero-padded to 9 digits + check digit
/// - Sequences above 999,999,999 do not fit and are rejected
///
/// ## Example
/// ```rust
/// use tessera_core::barcode::allocate_barcode;
///
/// assert_eq!(allocate_barcode(1).unwrap().digits(), "2000000000015");
/// assert!(allocate_barcode(1_000_000_000).is_err());
/// ```
pub fn allocate_barcode(sequence: u64) -> CoreResult<Barcode> {
    if sequence > MAX_SEQUENCE {
        return Err(ValidationError::OutOfRange {
            field: "sequence".to_string(),
            min: 0,
            max: MAX_SEQUENCE,
        }
        .into());
    }

    let code12 = format!("{}{:0width$}", BARCODE_PREFIX, sequence, width = SEQUENCE_WIDTH);
    let check = compute_check_digit(&code12)?;

    Ok(Barcode {
        digits: format!("{}{}", code12, check),
        barcode_type: BarcodeType::Ean,
    })
}

/// Candidate for the given attempt: the counter names the items that
/// already exist, so this allocation is `count + 1`, and every retry moves
/// one further along.
pub fn candidate_for(count: u64, attempt: u32) -> CoreResult<Barcode> {
    let sequence = count
        .checked_add(1 + u64::from(attempt))
        .ok_or(ValidationError::OutOfRange {
            field: "sequence".to_string(),
            min: 0,
            max: MAX_SEQUENCE,
        })?;
    allocate_barcode(sequence)
}

/// Number of attempts actually made for a configured `max_tries`.
#[inline]
pub fn effective_tries(max_tries: u32) -> u32 {
    max_tries.max(1)
}

/// Retry bookkeeping for one allocation.
///
/// Shared by [`allocate_unique_barcode`] and the async catalog path so both
/// apply the same candidate sequence and exhaustion policy.
#[derive(Debug)]
pub struct AllocationAttempts {
    tries: u32,
    attempt: u32,
}

impl AllocationAttempts {
    pub fn new(max_tries: u32) -> Self {
        AllocationAttempts {
            tries: effective_tries(max_tries),
            attempt: 0,
        }
    }

    /// Candidate for the current attempt given a fresh counter reading.
    pub fn candidate(&self, count: u64) -> CoreResult<Barcode> {
        candidate_for(count, self.attempt)
    }

    /// Records the duplicate check for `candidate`.
    ///
    /// Returns the barcode once allocation is settled: the candidate is
    /// free, or it was the last attempt.
    pub fn settle(&mut self, candidate: Barcode, check: ExistenceCheck) -> Option<Barcode> {
        self.attempt += 1;

        if !check.is_taken() {
            debug!(barcode = %candidate, attempt = self.attempt, "Barcode allocated");
            return Some(candidate);
        }

        if self.attempt >= self.tries {
            warn!(
                barcode = %candidate,
                tries = self.tries,
                "Barcode retries exhausted, returning possibly duplicate candidate"
            );
            return Some(candidate);
        }

        None
    }
}

/// Allocates a barcode that the duplicate check does not report as taken.
///
/// The counter is read again on every attempt, and each retry moves the
/// sequence one further, so a counter that has not changed still yields a
/// new candidate.
///
/// ## Arguments
/// * `sequence_source` - Returns the current total item count
/// * `exists` - Duplicate check for a candidate
/// * `max_tries` - Attempts before giving up (0 behaves like 1)
///
/// ## Returns
/// The first candidate not reported `Found`, or the last candidate when
/// every attempt collided.
///
/// ## Example
/// ```rust
/// use tessera_core::barcode::{allocate_unique_barcode, ExistenceCheck};
///
/// let barcode = allocate_unique_barcode(|| 0, |_| ExistenceCheck::NotFound, 20).unwrap();
/// assert_eq!(barcode.digits(), "2000000000015");
/// ```
pub fn allocate_unique_barcode<S, E>(
    mut sequence_source: S,
    mut exists: E,
    max_tries: u32,
) -> CoreResult<Barcode>
where
    S: FnMut() -> u64,
    E: FnMut(&Barcode) -> ExistenceCheck,
{
    let mut attempts = AllocationAttempts::new(max_tries);

    loop {
        let candidate = attempts.candidate(sequence_source())?;
        let check = exists(&candidate);

        if let Some(barcode) = attempts.settle(candidate, check) {
            return Ok(barcode);
        }
    }
}

/// Mints a barcode for an item that does not have one yet.
///
/// ## Rules
/// - Items that already carry any barcode keep them (returns `None`)
/// - Items without a code yet are skipped (returns `None`)
pub fn ensure_barcode<S, E>(
    existing: &[ItemBarcode],
    item_code: &str,
    sequence_source: S,
    exists: E,
    max_tries: u32,
) -> CoreResult<Option<Barcode>>
where
    S: FnMut() -> u64,
    E: FnMut(&Barcode) -> ExistenceCheck,
{
    if !existing.is_empty() || item_code.trim().is_empty() {
        return Ok(None);
    }

    allocate_unique_barcode(sequence_source, exists, max_tries).map(Some)
}

// =============================================================================
// Unit Tests
// =============================================================================
