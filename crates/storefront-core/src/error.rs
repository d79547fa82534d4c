//! # Violation Types
//!
//! Field-level validation outcomes for storefront-core.
//!
//! ## Error Flow
//! ```text
//! Violation (this module)  ──collected──►  ValidationFailure
//!        │                                        │
//!        ▼                                        ▼
//! one field, one rule              whole-record outcome, joined into
//!                                  the plain-text 400 body upstream
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. One variant per rule kind; the field name rides along
//! 3. Validation never throws: rules return a list, empty = valid

use std::fmt;

use thiserror::Error;

// =============================================================================
// Violation
// =============================================================================

/// A single field-level rule violation.
///
/// Field names use the wire spelling (camelCase) so the message matches
/// what the caller actually sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// Field content does not match the expected shape
    /// (charset, email syntax, phone digits, decimal syntax).
    #[error("{field} {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Field value exceeds the maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric or temporal value is outside the allowed range.
    #[error("{field} {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}

impl Violation {
    /// Returns the wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Violation::MissingField { field }
            | Violation::InvalidFormat { field, .. }
            | Violation::TooLong { field, .. }
            | Violation::OutOfRange { field, .. } => field,
        }
    }
}

// =============================================================================
// Validation Failure
// =============================================================================

/// The collected violations for one candidate record.
///
/// Produced by the `validation` module; always non-empty when it reaches
/// a caller (an empty violation list means the record was accepted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure(pub Vec<Violation>);

impl ValidationFailure {
    /// Number of violations carried.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no violations are carried.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Violation>> for ValidationFailure {
    fn from(violations: Vec<Violation>) -> Self {
        ValidationFailure(violations)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

// =============================================================================
// Unit Tests
// =============================================================================
