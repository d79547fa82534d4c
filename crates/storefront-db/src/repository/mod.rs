//! # Repository Modules
//!
//! One repository per entity collection. Repositories own the SQL and
//! the row ↔ domain mapping; they answer the query shapes the integrity
//! services need (id lookups, natural-key probes, existence checks) and
//! enforce no business rules of their own.

pub mod category;
pub mod customer;
pub mod product;
pub mod sale;
