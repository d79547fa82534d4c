//! # Integrity Services
//!
//! One module per entity, all with the same operation shape:
//!
//! ```text
//! create:  validate → natural-key uniqueness → referential check → insert
//! update:  id match → load (404) → validate → uniqueness minus self →
//!          overwrite mutable fields → persist
//! delete:  load (404) → dependency check → delete
//! ```
//!
//! Services take the database handle explicitly and never cache entity
//! state between requests: every operation re-reads current rows before
//! acting.

pub mod category;
pub mod customer;
pub mod product;
pub mod sale;

#[cfg(test)]
pub(crate) mod testing {
    use storefront_db::{Database, DbConfig};

    /// Fresh in-memory database for service tests.
    pub(crate) async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }
}

// =============================================================================
// Cross-Entity Scenario
// =============================================================================
