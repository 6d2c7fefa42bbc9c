// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::competition::CompetitionDraft;
use crate::error::DomainError;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Validates the organizer-supplied fields of a competition.
///
/// The schedule ordering is already guaranteed by `CompetitionSchedule`.
///
/// # Arguments
///
/// * `draft` - The draft to validate
///
/// # Returns
///
/// * `Ok(())` if the draft is valid
/// * `Err(DomainError)` if any field is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or whitespace
/// - A regional competition has no region
/// - A non-regional competition carries a region
/// - `max_applicants` is present and not positive
pub fn validate_competition_draft(draft: &CompetitionDraft) -> Result<(), DomainError> {
    // Rule: name must not be empty
    if draft.name.trim().is_empty() {
        return Err(DomainError::InvalidCompetitionName(String::from(
            "Name cannot be empty",
        )));
    }

    // Rule: region is present iff the competition is regional
    match (draft.competition_type.is_regional(), draft.region_id) {
        (true, None) => return Err(DomainError::MissingRegion),
        (false, Some(region_id)) => return Err(DomainError::UnexpectedRegion { region_id }),
        _ => {}
    }

    if let Some(count) = draft.max_applicants.filter(|count| *count < 1) {
        return Err(DomainError::InvalidMaxApplicants { count });
    }

    Ok(())
}

/// Validates a team name.
///
/// # Errors
///
/// Returns `DomainError::InvalidTeamName` if the name is empty or whitespace.
pub fn validate_team_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidTeamName(String::from(
            "Team name cannot be empty",
        )));
    }
    Ok(())
}

/// Parses an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not valid RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a timestamp as RFC 3339.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the instant cannot be represented
/// in RFC 3339 (for example, a year outside 0..=9999).
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, DomainError> {
    value
        .format(&Rfc3339)
        .map_err(|e| DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        })
}
