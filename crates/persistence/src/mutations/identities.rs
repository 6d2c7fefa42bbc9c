// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fsp_comp_domain::Role;
use time::OffsetDateTime;
use tracing::info;

use crate::backend::SqliteBackend;
use crate::data_models::encode_timestamp;
use crate::diesel_schema::{team_members, teams, users};
use crate::error::PersistenceError;

/// Inserts a user row.
///
/// # Returns
///
/// The assigned user ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_user(
    conn: &mut SqliteConnection,
    display_name: &str,
    role: Role,
    region_id: Option<i64>,
    created_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(users::table)
        .values((
            users::display_name.eq(display_name),
            users::role.eq(role.as_str()),
            users::region_id.eq(region_id),
            users::created_at.eq(encode_timestamp(created_at)?),
        ))
        .execute(conn)?;

    let user_id: i64 = conn.last_insert_rowid()?;
    info!(user_id, role = role.as_str(), "Created user");
    Ok(user_id)
}

/// Inserts a team row.
///
/// # Returns
///
/// The assigned team ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_team(
    conn: &mut SqliteConnection,
    name: &str,
    captain_user_id: i64,
    created_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(teams::table)
        .values((
            teams::name.eq(name),
            teams::captain_user_id.eq(captain_user_id),
            teams::created_at.eq(encode_timestamp(created_at)?),
        ))
        .execute(conn)?;

    let team_id: i64 = conn.last_insert_rowid()?;
    info!(team_id, captain_user_id, "Created team");
    Ok(team_id)
}

/// Adds a user to a team. Adding an existing member is a no-op.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_team_member(
    conn: &mut SqliteConnection,
    team_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_or_ignore_into(team_members::table)
        .values((
            team_members::team_id.eq(team_id),
            team_members::user_id.eq(user_id),
        ))
        .execute(conn)?;
    Ok(())
}
