//! Database reset and migration helpers for embedded PostgreSQL suites.
//!
//! Resets go through `postgres` rather than Diesel because `DROP DATABASE`
//! cannot run inside a transaction block.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};

use super::format_postgres_error;

/// Embedded migrations from the backend/migrations directory.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Drop and recreate `name` on the cluster.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("DROP DATABASE IF EXISTS \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;
    Ok(())
}

/// Run all pending Diesel migrations against the database at `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}
