// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use fsp_comp::CoreError;

/// Errors raised by the datastore adapter.
///
/// Storage failures carry the backend message. Rule failures found while a
/// transaction held the write lock are wrapped in `Rejected` so callers keep
/// their typed meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A statement failed for a reason other than a constraint.
    DatabaseError(String),
    /// The database could not be opened.
    DatabaseConnectionFailed(String),
    /// An embedded migration failed to apply.
    MigrationFailed(String),
    /// A configuration pragma or helper query failed.
    QueryFailed(String),
    /// A schema constraint or trigger refused a write.
    ///
    /// Rule checks run before every write, so reaching this means the
    /// stored state changed underneath the caller or a caller bypassed them.
    ConstraintViolation(String),
    /// A stored row could not be converted into a domain value.
    ReconstructionError(String),
    /// The adapter could not be set up (for example a non UTF-8 path).
    InitializationError(String),
    /// `PRAGMA foreign_keys` is off on this connection.
    ForeignKeyEnforcementNotEnabled,
    /// A row expected to exist was missing.
    NotFound(String),
    /// A competition rule refused the operation. Nothing was written.
    Rejected(CoreError),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Could not open the competition database: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Schema migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Backend query failed: {msg}"),
            Self::ConstraintViolation(msg) => write!(f, "Constraint violation: {msg}"),
            Self::ReconstructionError(msg) => write!(f, "Stored row is invalid: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "SQLite foreign key enforcement is off")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Rejected(err) => write!(f, "Rejected: {err}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound(String::from("row not found")),
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation,
                info,
            ) => Self::ConstraintViolation(info.message().to_string()),
            other => Self::DatabaseError(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::Rejected(err)
    }
}
