// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{UserRecord, UserRow};
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserRecord>, PersistenceError> {
    debug!(user_id, "Looking up user");

    users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first::<UserRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user: {e}")))?
        .map(UserRecord::try_from)
        .transpose()
}
