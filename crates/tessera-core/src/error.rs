//! # Error Types
//!
//! Domain-specific error types for tessera-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tessera-core errors (this file)                                       │
//! │  ├── CoreError        - Operation failures                             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Not errors (plain values)                                             │
//! │  ├── Naming::NotApplicable     - naming preconditions unmet            │
//! │  └── ExistenceCheck::CheckFailed - lookup failed, treated as absent    │
//! │                                                                         │
//! │  tessera-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CLI (anyhow) → stderr             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inside a variant batch, per-item failures never surface as `CoreError`;
//! they are collected as strings in the batch result.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors that abort a single core operation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A collaborator read that has no fail-open policy failed.
    ///
    /// ## When This Occurs
    /// - The item counter could not be read while minting a barcode
    /// - The size preset store returned an error
    #[error("Catalog lookup failed: {0}")]
    Catalog(String),

    /// The collaborator rejected a record.
    ///
    /// ## When This Occurs
    /// - UNIQUE constraint on item code or barcode (concurrent creation)
    /// - Storage unavailable
    #[error("{0}")]
    Persistence(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A list input produced no usable entries.
    #[error("at least one {field} required")]
    AtLeastOne { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u64, max: u64 },

    /// Invalid format (e.g., non-digit characters in a code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
