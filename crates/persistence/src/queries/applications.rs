// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fsp_comp_domain::{Applicant, Application};
use tracing::debug;

use crate::data_models::ApplicationRow;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;

/// Retrieves an application by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
/// Returns `Ok(None)` if the application is not found.
pub fn get_application(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<Option<Application>, PersistenceError> {
    debug!(application_id, "Looking up application");

    applications::table
        .filter(applications::application_id.eq(application_id))
        .select(ApplicationRow::as_select())
        .first::<ApplicationRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_application: {e}")))?
        .map(Application::try_from)
        .transpose()
}

/// Lists the applications of a competition in submission order.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_applications_for_competition(
    conn: &mut SqliteConnection,
    competition_id: i64,
) -> Result<Vec<Application>, PersistenceError> {
    applications::table
        .filter(applications::competition_id.eq(competition_id))
        .order(applications::application_id.asc())
        .select(ApplicationRow::as_select())
        .load::<ApplicationRow>(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("list_applications_for_competition: {e}"))
        })?
        .into_iter()
        .map(Application::try_from)
        .collect()
}

/// Finds the application filed for an applicant identity on a competition.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn find_application(
    conn: &mut SqliteConnection,
    competition_id: i64,
    applicant: Applicant,
) -> Result<Option<Application>, PersistenceError> {
    let query = applications::table
        .filter(applications::competition_id.eq(competition_id))
        .select(ApplicationRow::as_select());

    let row: Option<ApplicationRow> = match applicant {
        Applicant::User(user_id) => query
            .filter(applications::applicant_user_id.eq(user_id))
            .first::<ApplicationRow>(conn)
            .optional(),
        Applicant::Team(team_id) => query
            .filter(applications::applicant_team_id.eq(team_id))
            .first::<ApplicationRow>(conn)
            .optional(),
    }
    .map_err(|e| PersistenceError::QueryFailed(format!("find_application: {e}")))?;

    row.map(Application::try_from).transpose()
}
