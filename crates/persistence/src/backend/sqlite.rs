// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup.
//!
//! Diesel has no DSL for pragmas or `last_insert_rowid()`, so the raw SQL
//! in the persistence crate is confined to this file.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Competition schema migrations, embedded at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits on a locked database before failing, in milliseconds.
///
/// Writers take the lock with `BEGIN IMMEDIATE`, so concurrent submitters
/// queue behind each other for up to this long.
pub const BUSY_TIMEOUT_MS: u32 = 5_000;

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

fn apply_pragma(conn: &mut SqliteConnection, pragma: &str) -> Result<(), PersistenceError> {
    debug!(pragma, "Applying SQLite pragma");
    diesel::sql_query(format!("PRAGMA {pragma}"))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("PRAGMA {pragma}: {e}")))?;
    Ok(())
}

/// Reads `last_insert_rowid()` for this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Fails unless foreign keys are enforced on this connection.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` when they are not.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma =
        diesel::sql_query("PRAGMA foreign_keys").get_result::<ForeignKeysPragma>(conn)?;

    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    Ok(())
}

/// Opens a connection, configures it, and brings the schema up to date.
///
/// Every connection gets the busy timeout and foreign key enforcement;
/// both are per-connection settings in `SQLite`.
///
/// # Arguments
///
/// * `database_url` - A file path or `file:` URI
///
/// # Errors
///
/// Returns an error if the database cannot be opened, configured or migrated.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, "Opening competition database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;
    apply_pragma(&mut conn, &format!("busy_timeout = {BUSY_TIMEOUT_MS}"))?;
    apply_pragma(&mut conn, "foreign_keys = ON")?;

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    info!(applied, "Schema migrations complete");

    Ok(conn)
}

/// Switches a file database to write-ahead logging so readers do not block
/// the writer.
///
/// # Errors
///
/// Returns an error if the pragma fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    apply_pragma(conn, "journal_mode = WAL")
}
