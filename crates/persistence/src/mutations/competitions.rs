// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fsp_comp::NewCompetition;
use fsp_comp_domain::CompetitionDraft;
use tracing::{debug, info};

use crate::backend::SqliteBackend;
use crate::data_models::encode_timestamp;
use crate::diesel_schema::competitions;
use crate::error::PersistenceError;

/// Inserts a competition.
///
/// # Returns
///
/// The assigned competition ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_competition(
    conn: &mut SqliteConnection,
    competition: &NewCompetition,
) -> Result<i64, PersistenceError> {
    let draft: &CompetitionDraft = &competition.draft;

    diesel::insert_into(competitions::table)
        .values((
            competitions::name.eq(&draft.name),
            competitions::description.eq(&draft.description),
            competitions::competition_type.eq(draft.competition_type.as_str()),
            competitions::region_id.eq(draft.region_id),
            competitions::registration_start
                .eq(encode_timestamp(draft.schedule.registration_start())?),
            competitions::registration_end.eq(encode_timestamp(draft.schedule.registration_end())?),
            competitions::competition_start
                .eq(encode_timestamp(draft.schedule.competition_start())?),
            competitions::competition_end.eq(encode_timestamp(draft.schedule.competition_end())?),
            competitions::max_applicants.eq(draft.max_applicants),
            competitions::organizer_user_id.eq(competition.organizer_id),
            competitions::published.eq(i32::from(competition.published)),
            competitions::created_at.eq(encode_timestamp(competition.created_at)?),
        ))
        .execute(conn)?;

    let competition_id: i64 = conn.last_insert_rowid()?;
    info!(
        competition_id,
        organizer_id = competition.organizer_id,
        published = competition.published,
        "Created competition"
    );
    Ok(competition_id)
}

/// Overwrites the editable fields of a competition.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_competition_fields(
    conn: &mut SqliteConnection,
    competition_id: i64,
    draft: &CompetitionDraft,
) -> Result<(), PersistenceError> {
    diesel::update(competitions::table.filter(competitions::competition_id.eq(competition_id)))
        .set((
            competitions::name.eq(&draft.name),
            competitions::description.eq(&draft.description),
            competitions::competition_type.eq(draft.competition_type.as_str()),
            competitions::region_id.eq(draft.region_id),
            competitions::registration_start
                .eq(encode_timestamp(draft.schedule.registration_start())?),
            competitions::registration_end.eq(encode_timestamp(draft.schedule.registration_end())?),
            competitions::competition_start
                .eq(encode_timestamp(draft.schedule.competition_start())?),
            competitions::competition_end.eq(encode_timestamp(draft.schedule.competition_end())?),
            competitions::max_applicants.eq(draft.max_applicants),
        ))
        .execute(conn)?;

    debug!(competition_id, "Updated competition fields");
    Ok(())
}

/// Marks a competition as published.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_published(
    conn: &mut SqliteConnection,
    competition_id: i64,
) -> Result<(), PersistenceError> {
    diesel::update(competitions::table.filter(competitions::competition_id.eq(competition_id)))
        .set(competitions::published.eq(1))
        .execute(conn)?;

    info!(competition_id, "Published competition");
    Ok(())
}
