// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup and the few helpers Diesel has no DSL for.
//!
//! Queries and mutations never issue raw SQL; they reach these helpers
//! through the `SqliteBackend` trait on the connection.

pub mod sqlite;

use diesel::SqliteConnection;

use crate::error::PersistenceError;

/// Raw-SQL helpers available on a connection.
pub trait SqliteBackend {
    /// Returns the row id of the most recent insert on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Fails unless `PRAGMA foreign_keys` is on.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` when it is off.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;

    /// Switches a file database to write-ahead logging.
    ///
    /// # Errors
    ///
    /// Returns an error if the pragma fails.
    fn enable_wal_mode(&mut self) -> Result<(), PersistenceError>;
}

impl SqliteBackend for SqliteConnection {
    fn last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }

    fn enable_wal_mode(&mut self) -> Result<(), PersistenceError> {
        sqlite::enable_wal_mode(self)
    }
}
