// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fsp_comp_domain::Team;
use std::collections::BTreeSet;
use tracing::debug;

use crate::data_models::TeamRow;
use crate::diesel_schema::{team_members, teams};
use crate::error::PersistenceError;

fn load_members(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<BTreeSet<i64>, PersistenceError> {
    let members: Vec<i64> = team_members::table
        .filter(team_members::team_id.eq(team_id))
        .select(team_members::user_id)
        .load::<i64>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_members: {e}")))?;
    Ok(members.into_iter().collect())
}

fn assemble(conn: &mut SqliteConnection, row: TeamRow) -> Result<Team, PersistenceError> {
    let members: BTreeSet<i64> = load_members(conn, row.team_id)?;
    Ok(Team::new(row.team_id, row.name, row.captain_user_id, members))
}

/// Retrieves a team together with its member set.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the team is not found.
pub fn get_team(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Option<Team>, PersistenceError> {
    debug!(team_id, "Looking up team");

    let row: Option<TeamRow> = teams::table
        .filter(teams::team_id.eq(team_id))
        .select(TeamRow::as_select())
        .first::<TeamRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_team: {e}")))?;

    row.map(|row| assemble(conn, row)).transpose()
}

/// Lists the teams a user captains, ordered by team ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn teams_captained_by(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Team>, PersistenceError> {
    let rows: Vec<TeamRow> = teams::table
        .filter(teams::captain_user_id.eq(user_id))
        .order(teams::team_id.asc())
        .select(TeamRow::as_select())
        .load::<TeamRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("teams_captained_by: {e}")))?;

    rows.into_iter().map(|row| assemble(conn, row)).collect()
}
