//! # storefront-server: HTTP API for Storefront
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  HTTP request                                                   │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  routes/      axum handlers: extract path/body, pick status     │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  service/     integrity services: validation rules → store      │
//! │               probes (uniqueness, references, dependents) →     │
//! │               persist; returns a tagged outcome                 │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  error.rs     outcome kind → status code, plain-text body       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Services re-read current state on every operation; nothing is cached
//! between requests.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;

pub use config::ServerConfig;
pub use error::{ServiceError, ServiceResult};

use storefront_db::Database;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}
