//! # storefront-core: Pure Business Logic for Storefront
//!
//! This crate is the heart of the Storefront API. It contains the domain
//! types and every business rule that can be expressed without I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Storefront Architecture                       │
//! │                                                                 │
//! │  HTTP client ──► axum routes (apps/server)                      │
//! │                        │                                        │
//! │                        ▼                                        │
//! │  integrity services (apps/server/src/service)                   │
//! │                        │                                        │
//! │        ┌───────────────┴───────────────┐                        │
//! │        ▼                               ▼                        │
//! │  ★ storefront-core (THIS CRATE) ★   storefront-db               │
//! │    types • validation • price        SQLite repositories        │
//! │                                                                 │
//! │    NO I/O • NO DATABASE • PURE FUNCTIONS                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records and their wire drafts (Category, Product,
//!   Sale, Customer)
//! - [`price`] - Decimal price type backed by integer cents
//! - [`error`] - Field violation types
//! - [`validation`] - Field-level business rules, run before any store
//!   access
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: validation depends only on its inputs (the
//!    current instant is passed in, never read from a clock)
//! 2. **Integer money**: prices are cents (i64), never floats
//! 3. **Explicit errors**: violations are enum variants, not strings

pub mod error;
pub mod price;
pub mod types;
pub mod validation;

pub use error::{ValidationFailure, Violation};
pub use price::Price;
pub use types::*;

/// Maximum length of name-like fields (name, description, first/last name).
pub const MAX_TEXT_LEN: usize = 50;

/// Exact number of digits a customer phone number must carry.
pub const PHONE_DIGITS: usize = 10;
