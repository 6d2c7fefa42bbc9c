// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fsp_comp_domain::{Competition, CompetitionType};
use tracing::debug;

use crate::data_models::CompetitionRow;
use crate::diesel_schema::competitions;
use crate::error::PersistenceError;

/// Retrieves a competition by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
/// Returns `Ok(None)` if the competition is not found.
pub fn get_competition(
    conn: &mut SqliteConnection,
    competition_id: i64,
) -> Result<Option<Competition>, PersistenceError> {
    debug!(competition_id, "Looking up competition");

    competitions::table
        .filter(competitions::competition_id.eq(competition_id))
        .select(CompetitionRow::as_select())
        .first::<CompetitionRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_competition: {e}")))?
        .map(Competition::try_from)
        .transpose()
}

/// Storage-level narrowing of a competition listing.
///
/// Both fields are optional; an empty filter matches every competition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetitionFilter {
    /// Only competitions of this type.
    pub competition_type: Option<CompetitionType>,
    /// Case-insensitive substring of the competition name.
    pub name: Option<String>,
}

fn like_pattern(fragment: &str) -> String {
    let mut pattern: String = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Lists competitions matching `filter`, ordered by registration start, then ID.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_competitions(
    conn: &mut SqliteConnection,
    filter: &CompetitionFilter,
) -> Result<Vec<Competition>, PersistenceError> {
    let mut query = competitions::table.into_boxed();

    if let Some(competition_type) = filter.competition_type {
        query = query.filter(competitions::competition_type.eq(competition_type.as_str()));
    }
    if let Some(name) = filter.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        query = query.filter(competitions::name.like(like_pattern(name)).escape('\\'));
    }

    query
        .order((
            competitions::registration_start.asc(),
            competitions::competition_id.asc(),
        ))
        .select(CompetitionRow::as_select())
        .load::<CompetitionRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_competitions: {e}")))?
        .into_iter()
        .map(Competition::try_from)
        .collect()
}
