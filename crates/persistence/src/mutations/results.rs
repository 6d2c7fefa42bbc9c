// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fsp_comp::{CoreError, FinalizationPlan};
use fsp_comp_domain::DomainError;
use tracing::debug;

use crate::data_models::encode_timestamp;
use crate::diesel_schema::{competition_results, competitions};
use crate::error::PersistenceError;

/// Inserts every result of a finalization plan.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_results(
    conn: &mut SqliteConnection,
    plan: &FinalizationPlan,
) -> Result<(), PersistenceError> {
    let recorded_at: String = encode_timestamp(plan.finalized_at)?;

    for result in &plan.results {
        let place: Option<i32> = result
            .place
            .map(|place| {
                i32::try_from(place).map_err(|_| {
                    PersistenceError::Rejected(CoreError::Validation(DomainError::InvalidPlace {
                        place,
                    }))
                })
            })
            .transpose()?;

        diesel::insert_into(competition_results::table)
            .values((
                competition_results::competition_id.eq(result.competition_id),
                competition_results::application_id.eq(result.application_id),
                competition_results::user_id.eq(result.applicant.user_id()),
                competition_results::team_id.eq(result.applicant.team_id()),
                competition_results::place.eq(place),
                competition_results::score.eq(result.score),
                competition_results::result_data.eq(&result.result_data),
                competition_results::recorded_at.eq(&recorded_at),
                competition_results::recorded_by_user_id.eq(plan.recorded_by_user_id),
            ))
            .execute(conn)?;

        debug!(
            competition_id = result.competition_id,
            application_id = result.application_id,
            "Inserted result"
        );
    }

    Ok(())
}

/// Sets the sticky terminal phase with compare-and-set on `NULL`.
///
/// # Returns
///
/// The number of rows changed: 1 on success, 0 if already finalized.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_finalized(
    conn: &mut SqliteConnection,
    plan: &FinalizationPlan,
) -> Result<usize, PersistenceError> {
    let changed: usize = diesel::update(
        competitions::table
            .filter(competitions::competition_id.eq(plan.competition_id))
            .filter(competitions::finalized_override.is_null()),
    )
    .set((
        competitions::finalized_override.eq(Some(plan.phase.as_str())),
        competitions::finalized_at.eq(Some(encode_timestamp(plan.finalized_at)?)),
    ))
    .execute(conn)?;
    Ok(changed)
}
