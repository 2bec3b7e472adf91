//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! shared helpers live here and each suite pulls in what it needs.

#![allow(dead_code, reason = "each integration crate uses a different subset")]

pub mod cluster_skip;
pub mod embedded_postgres;
pub mod pg_embed;
pub mod rides;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{migrate_schema, reset_database};
pub use pg_embed::test_cluster;

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// `postgres::Error`'s `Display` collapses database errors to `db error`,
/// which hides the SQLSTATE and message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}
