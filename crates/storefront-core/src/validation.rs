//! # Validation Rules
//!
//! Field-level business rules, one entry point per entity draft.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Layer 1: serde            shape/type of the JSON body          │
//! │  Layer 2: THIS MODULE      field rules, pure, before any store  │
//! │                            access                               │
//! │  Layer 3: SQLite           UNIQUE / FK constraints as backstop  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is total: given any draft it returns the full
//! list of violations (empty list = valid). Rules never touch a clock;
//! the sale-date rule takes the current instant as an argument.

use chrono::{DateTime, Utc};

use crate::error::Violation;
use crate::price::Price;
use crate::types::{CategoryDraft, CustomerDraft, ProductDraft, SaleDraft};
use crate::{MAX_TEXT_LEN, PHONE_DIGITS};

// =============================================================================
// Entity Rules
// =============================================================================

/// Rules for a category draft: name and description both required,
/// letters/spaces only, at most 50 characters.
pub fn validate_category(draft: &CategoryDraft) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_text("name", &draft.name, &mut violations);
    check_text("description", &draft.description, &mut violations);
    violations
}

/// Rules for a product draft. Stock of zero is rejected on purpose:
/// a product with nothing to sell is not accepted into the catalog.
pub fn validate_product(draft: &ProductDraft) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_text("name", &draft.name, &mut violations);
    if let Some(description) = draft.description.as_deref() {
        if !description.is_empty() {
            check_charset_and_length("description", description, &mut violations);
        }
    }
    check_decimal("price", &draft.price, &mut violations);
    check_at_least_one("stock", draft.stock, &mut violations);
    violations
}

/// Rules for a sale draft. Sales are only ever recorded for now or the
/// future; a date earlier than `now` is out of range.
pub fn validate_sale(draft: &SaleDraft, now: DateTime<Utc>) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_at_least_one("quantity", draft.quantity, &mut violations);
    match draft.sale_date {
        None => violations.push(Violation::MissingField { field: "saleDate" }),
        Some(date) if date < now => violations.push(Violation::OutOfRange {
            field: "saleDate",
            reason: "must not be earlier than the current time",
        }),
        Some(_) => {}
    }
    check_decimal("total", &draft.total, &mut violations);
    violations
}

/// Rules for a customer draft.
pub fn validate_customer(draft: &CustomerDraft) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_text("firstName", &draft.first_name, &mut violations);
    check_text("lastName", &draft.last_name, &mut violations);

    if draft.email.is_empty() {
        violations.push(Violation::MissingField { field: "email" });
    } else if !is_valid_email(&draft.email) {
        violations.push(Violation::InvalidFormat {
            field: "email",
            reason: "must be a valid email address",
        });
    }

    if draft.phone.is_empty() {
        violations.push(Violation::MissingField { field: "phone" });
    } else if draft.phone.len() != PHONE_DIGITS
        || !draft.phone.bytes().all(|b| b.is_ascii_digit())
    {
        violations.push(Violation::InvalidFormat {
            field: "phone",
            reason: "must be exactly 10 digits",
        });
    }

    violations
}

// =============================================================================
// Field Checks
// =============================================================================

/// Required text field: letters and spaces only, at most 50 characters.
fn check_text(field: &'static str, value: &str, out: &mut Vec<Violation>) {
    if value.is_empty() {
        out.push(Violation::MissingField { field });
        return;
    }
    check_charset_and_length(field, value, out);
}

fn check_charset_and_length(field: &'static str, value: &str, out: &mut Vec<Violation>) {
    if !value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        out.push(Violation::InvalidFormat {
            field,
            reason: "may only contain letters and spaces",
        });
    }
    if value.chars().count() > MAX_TEXT_LEN {
        out.push(Violation::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }
}

/// Required decimal field: digits with at most one `.`/`,` separator,
/// strictly positive.
fn check_decimal(field: &'static str, raw: &str, out: &mut Vec<Violation>) {
    if raw.trim().is_empty() {
        out.push(Violation::MissingField { field });
        return;
    }
    match Price::parse(raw) {
        Err(_) => out.push(Violation::InvalidFormat {
            field,
            reason: "must be a number with at most one decimal separator",
        }),
        Ok(value) if !value.is_positive() => out.push(Violation::OutOfRange {
            field,
            reason: "must be greater than zero",
        }),
        Ok(_) => {}
    }
}

fn check_at_least_one(field: &'static str, value: i64, out: &mut Vec<Violation>) {
    if value < 1 {
        out.push(Violation::OutOfRange {
            field,
            reason: "must be at least 1",
        });
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

// =============================================================================
// Unit Tests
// =============================================================================
