// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use fsp_comp::{CoreError, DecisionPlan, NewApplication};
use tracing::{debug, warn};

use crate::backend::SqliteBackend;
use crate::data_models::encode_timestamp;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;

/// Inserts a planned application.
///
/// The partial unique indexes on `(competition_id, applicant_*_id)` are the
/// final arbiter of uniqueness; a violation surfaces as
/// `CoreError::DuplicateApplication`.
///
/// # Returns
///
/// The assigned application ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_application(
    conn: &mut SqliteConnection,
    application: &NewApplication,
) -> Result<i64, PersistenceError> {
    let inserted: Result<usize, DieselError> = diesel::insert_into(applications::table)
        .values((
            applications::competition_id.eq(application.competition_id),
            applications::applicant_user_id.eq(application.applicant.user_id()),
            applications::applicant_team_id.eq(application.applicant.team_id()),
            applications::submitted_by_user_id.eq(application.submitted_by_user_id),
            applications::status.eq(application.status.as_str()),
            applications::notes.eq(&application.notes),
            applications::submitted_at.eq(encode_timestamp(application.submitted_at)?),
        ))
        .execute(conn);

    match inserted {
        Ok(_) => {}
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            warn!(
                competition_id = application.competition_id,
                applicant = %application.applicant,
                "Application rejected by uniqueness constraint"
            );
            return Err(PersistenceError::Rejected(
                CoreError::DuplicateApplication {
                    competition_id: application.competition_id,
                    applicant: application.applicant,
                },
            ));
        }
        Err(e) => return Err(e.into()),
    }

    let application_id: i64 = conn.last_insert_rowid()?;
    debug!(application_id, "Inserted application");
    Ok(application_id)
}

/// Applies a decision with compare-and-set on the expected status.
///
/// # Returns
///
/// The number of rows changed: 1 on success, 0 if the status moved.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn apply_decision(
    conn: &mut SqliteConnection,
    plan: &DecisionPlan,
) -> Result<usize, PersistenceError> {
    let changed: usize = diesel::update(
        applications::table
            .filter(applications::application_id.eq(plan.application_id))
            .filter(applications::status.eq(plan.expected_status.as_str())),
    )
    .set((
        applications::status.eq(plan.new_status.as_str()),
        applications::decided_at.eq(Some(encode_timestamp(plan.decided_at)?)),
        applications::decided_by_user_id.eq(Some(plan.decided_by_user_id)),
    ))
    .execute(conn)?;
    Ok(changed)
}
