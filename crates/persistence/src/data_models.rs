// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion into domain values.
//!
//! Timestamps are stored as RFC 3339 text in UTC and booleans as
//! `INTEGER` 0/1. Conversion failures on read surface as
//! `PersistenceError::ReconstructionError`.

use diesel::prelude::*;
use fsp_comp::CoreError;
use fsp_comp_domain::{
    Applicant, Application, ApplicationStatus, Competition, CompetitionResult, CompetitionSchedule,
    CompetitionType, Phase, Role, User, format_timestamp, parse_timestamp,
};
use std::str::FromStr;
use time::{OffsetDateTime, UtcOffset};

use crate::diesel_schema::{applications, competition_results, competitions, teams, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub user_id: i64,
    pub display_name: String,
    pub role: String,
    pub region_id: Option<i64>,
}

/// Diesel Queryable struct for team rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = teams)]
pub struct TeamRow {
    pub team_id: i64,
    pub name: String,
    pub captain_user_id: i64,
}

/// Diesel Queryable struct for competition rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = competitions)]
pub struct CompetitionRow {
    pub competition_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub competition_type: String,
    pub region_id: Option<i64>,
    pub registration_start: String,
    pub registration_end: String,
    pub competition_start: String,
    pub competition_end: String,
    pub max_applicants: Option<i64>,
    pub organizer_user_id: i64,
    pub published: i32,
    pub finalized_override: Option<String>,
}

/// Diesel Queryable struct for application rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = applications)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub competition_id: i64,
    pub applicant_user_id: Option<i64>,
    pub applicant_team_id: Option<i64>,
    pub submitted_by_user_id: i64,
    pub status: String,
    pub notes: Option<String>,
    pub submitted_at: String,
    pub decided_at: Option<String>,
    pub decided_by_user_id: Option<i64>,
}

/// Diesel Queryable struct for result rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = competition_results)]
pub struct ResultRow {
    pub result_id: i64,
    pub competition_id: i64,
    pub application_id: i64,
    pub user_id: Option<i64>,
    pub team_id: Option<i64>,
    pub place: Option<i32>,
    pub score: Option<f64>,
    pub result_data: Option<String>,
    pub recorded_at: String,
    pub recorded_by_user_id: i64,
}

/// A user as stored, including the display name the domain `User` omits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user: User,
    pub display_name: String,
}

/// Encodes an instant for storage.
///
/// Instants are normalized to UTC so stored text sorts chronologically.
///
/// # Errors
///
/// Returns `PersistenceError::Rejected` if the instant has no RFC 3339
/// representation.
pub fn encode_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    format_timestamp(value.to_offset(UtcOffset::UTC))
        .map_err(|e| PersistenceError::Rejected(CoreError::Validation(e)))
}

/// Decodes a stored instant.
///
/// # Errors
///
/// Returns `PersistenceError::ReconstructionError` if the text is not RFC 3339.
pub fn decode_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    parse_timestamp(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

fn decode_optional_timestamp(
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(decode_timestamp).transpose()
}

fn decode_enum<T>(value: &str) -> Result<T, PersistenceError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

impl TryFrom<UserRow> for UserRecord {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = decode_enum(&row.role)?;
        Ok(Self {
            user: User::new(row.user_id, role, row.region_id),
            display_name: row.display_name,
        })
    }
}

impl TryFrom<CompetitionRow> for Competition {
    type Error = PersistenceError;

    fn try_from(row: CompetitionRow) -> Result<Self, Self::Error> {
        let competition_type: CompetitionType = decode_enum(&row.competition_type)?;
        let schedule: CompetitionSchedule = CompetitionSchedule::new(
            decode_timestamp(&row.registration_start)?,
            decode_timestamp(&row.registration_end)?,
            decode_timestamp(&row.competition_start)?,
            decode_timestamp(&row.competition_end)?,
        )
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let finalized_override: Option<Phase> = row
            .finalized_override
            .as_deref()
            .map(decode_enum::<Phase>)
            .transpose()?;
        if let Some(phase) = finalized_override.filter(|phase| !phase.is_terminal()) {
            return Err(PersistenceError::ReconstructionError(format!(
                "competition {} has non-terminal override '{phase}'",
                row.competition_id
            )));
        }

        Ok(Self {
            id: row.competition_id,
            name: row.name,
            description: row.description,
            competition_type,
            region_id: row.region_id,
            schedule,
            max_applicants: row.max_applicants,
            organizer_id: row.organizer_user_id,
            published: row.published != 0,
            finalized_override,
        })
    }
}

impl TryFrom<ApplicationRow> for Application {
    type Error = PersistenceError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let applicant: Applicant =
            Applicant::from_columns(row.applicant_user_id, row.applicant_team_id).ok_or_else(
                || {
                    PersistenceError::ReconstructionError(format!(
                        "application {} must reference exactly one applicant",
                        row.application_id
                    ))
                },
            )?;
        let status: ApplicationStatus = decode_enum(&row.status)?;

        Ok(Self {
            id: row.application_id,
            competition_id: row.competition_id,
            applicant,
            submitted_by_user_id: row.submitted_by_user_id,
            status,
            notes: row.notes,
            submitted_at: decode_timestamp(&row.submitted_at)?,
            decided_at: decode_optional_timestamp(row.decided_at.as_deref())?,
            decided_by_user_id: row.decided_by_user_id,
        })
    }
}

impl TryFrom<ResultRow> for CompetitionResult {
    type Error = PersistenceError;

    fn try_from(row: ResultRow) -> Result<Self, Self::Error> {
        let applicant: Applicant = Applicant::from_columns(row.user_id, row.team_id)
            .ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "result {} must reference exactly one applicant",
                    row.result_id
                ))
            })?;

        Ok(Self {
            id: row.result_id,
            competition_id: row.competition_id,
            application_id: row.application_id,
            applicant,
            place: row.place.map(i64::from),
            score: row.score,
            result_data: row.result_data,
            recorded_at: decode_timestamp(&row.recorded_at)?,
            recorded_by_user_id: row.recorded_by_user_id,
        })
    }
}
