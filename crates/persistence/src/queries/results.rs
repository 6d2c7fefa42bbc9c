// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fsp_comp_domain::CompetitionResult;

use crate::data_models::ResultRow;
use crate::diesel_schema::competition_results;
use crate::error::PersistenceError;

/// Lists the recorded results of a competition.
///
/// Results are ordered by place, with unplaced entries last, then by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_results(
    conn: &mut SqliteConnection,
    competition_id: i64,
) -> Result<Vec<CompetitionResult>, PersistenceError> {
    competition_results::table
        .filter(competition_results::competition_id.eq(competition_id))
        .order((
            competition_results::place.is_null().asc(),
            competition_results::place.asc(),
            competition_results::result_id.asc(),
        ))
        .select(ResultRow::as_select())
        .load::<ResultRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_results: {e}")))?
        .into_iter()
        .map(CompetitionResult::try_from)
        .collect()
}
