//! Cross-entity global search service for the back-office platform
//!
//! Parses free-text queries with embedded directives, fans out across the
//! nine entity collections with role-scoped visibility, and serves the
//! quick (bucketed, cached) and full (paginated, sortable) search endpoints
//! plus per-user search history.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod state;

pub use error::{AppError, Result};
