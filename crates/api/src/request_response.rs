// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Timestamps cross the boundary as RFC 3339 strings. Every request that
//! changes or reveals state carries the verified acting identity.

use fsp_comp_domain::{
    Applicant, Application, ApplicationStatus, Competition, CompetitionDraft, CompetitionResult,
    CompetitionSchedule, CompetitionType, Eligibility, Phase, ResultEntry, Role, Team, User,
    format_timestamp, parse_timestamp,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{ApiError, translate_domain_error};

/// Formats a stored instant for a response.
///
/// Stored instants are always representable, so a failure is internal.
fn render_timestamp(value: OffsetDateTime) -> Result<String, ApiError> {
    format_timestamp(value).map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })
}

fn render_optional_timestamp(value: Option<OffsetDateTime>) -> Result<Option<String>, ApiError> {
    value.map(render_timestamp).transpose()
}

fn read_timestamp(value: &str) -> Result<OffsetDateTime, ApiError> {
    parse_timestamp(value).map_err(translate_domain_error)
}

/// Organizer-supplied competition fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionFields {
    /// Display name.
    pub name: String,
    /// Optional long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Competition type.
    pub competition_type: CompetitionType,
    /// Region, required iff the competition is regional.
    #[serde(default)]
    pub region_id: Option<i64>,
    /// Registration window start (RFC 3339).
    pub registration_start: String,
    /// Registration window end (RFC 3339).
    pub registration_end: String,
    /// Competition start (RFC 3339).
    pub competition_start: String,
    /// Competition end (RFC 3339).
    pub competition_end: String,
    /// Displayed capacity. Not enforced.
    #[serde(default)]
    pub max_applicants: Option<i64>,
}

impl CompetitionFields {
    /// Parses the fields into a draft.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if a timestamp is malformed or the
    /// schedule is out of order.
    pub fn to_draft(&self) -> Result<CompetitionDraft, ApiError> {
        let schedule: CompetitionSchedule = CompetitionSchedule::new(
            read_timestamp(&self.registration_start)?,
            read_timestamp(&self.registration_end)?,
            read_timestamp(&self.competition_start)?,
            read_timestamp(&self.competition_end)?,
        )
        .map_err(translate_domain_error)?;

        Ok(CompetitionDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            competition_type: self.competition_type,
            region_id: self.region_id,
            schedule,
            max_applicants: self.max_applicants,
        })
    }
}

/// API request to create a competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCompetitionRequest {
    /// The acting identity.
    pub acting: User,
    /// The competition fields.
    #[serde(flatten)]
    pub fields: CompetitionFields,
    /// Publish immediately.
    #[serde(default)]
    pub publish: bool,
}

/// API request to replace the fields of an unpublished competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCompetitionRequest {
    /// The acting identity.
    pub acting: User,
    /// The replacement fields.
    #[serde(flatten)]
    pub fields: CompetitionFields,
}

/// API request carrying only the acting identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingRequest {
    /// The acting identity.
    pub acting: User,
}

/// A competition as shown to a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionInfo {
    pub competition_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub competition_type: CompetitionType,
    pub region_id: Option<i64>,
    pub registration_start: String,
    pub registration_end: String,
    pub competition_start: String,
    pub competition_end: String,
    pub max_applicants: Option<i64>,
    pub organizer_id: i64,
    pub published: bool,
    /// The phase resolved at the time of the request.
    pub phase: Phase,
}

impl CompetitionInfo {
    /// Builds the view of a competition at `now`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if a stored instant cannot be rendered.
    pub fn from_competition(
        competition: &Competition,
        now: OffsetDateTime,
    ) -> Result<Self, ApiError> {
        let schedule: &CompetitionSchedule = &competition.schedule;
        Ok(Self {
            competition_id: competition.id,
            name: competition.name.clone(),
            description: competition.description.clone(),
            competition_type: competition.competition_type,
            region_id: competition.region_id,
            registration_start: render_timestamp(schedule.registration_start())?,
            registration_end: render_timestamp(schedule.registration_end())?,
            competition_start: render_timestamp(schedule.competition_start())?,
            competition_end: render_timestamp(schedule.competition_end())?,
            max_applicants: competition.max_applicants,
            organizer_id: competition.organizer_id,
            published: competition.published,
            phase: competition.phase_at(now),
        })
    }
}

/// Optional narrowing of a competition listing.
///
/// Absent fields do not constrain the result. `phase` is compared with the
/// phase resolved at the time of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCompetitionsFilter {
    #[serde(default)]
    pub competition_type: Option<CompetitionType>,
    #[serde(default)]
    pub phase: Option<Phase>,
    /// Case-insensitive name fragment.
    #[serde(default)]
    pub name: Option<String>,
}

/// API response listing the competitions visible to a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCompetitionsResponse {
    pub competitions: Vec<CompetitionInfo>,
}

/// API response for a phase query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseResponse {
    pub competition_id: i64,
    pub phase: Phase,
    pub published: bool,
}

/// API request to submit an application.
///
/// With `team_id` absent the acting user applies as an individual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitApplicationRequest {
    /// The acting identity.
    pub acting: User,
    /// The team applied for, if any.
    #[serde(default)]
    pub team_id: Option<i64>,
    /// Optional free text for the organizer.
    #[serde(default)]
    pub notes: Option<String>,
}

/// API request for an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRequest {
    /// The acting identity.
    pub acting: User,
    /// The team to check, if any.
    #[serde(default)]
    pub team_id: Option<i64>,
}

/// API response for an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResponse {
    pub competition_id: i64,
    pub applicant: Applicant,
    pub phase: Phase,
    pub eligibility: Eligibility,
}

/// An application as shown to a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub application_id: i64,
    pub competition_id: i64,
    pub applicant: Applicant,
    pub submitted_by_user_id: i64,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub submitted_at: String,
    pub decided_at: Option<String>,
    pub decided_by_user_id: Option<i64>,
}

impl TryFrom<&Application> for ApplicationInfo {
    type Error = ApiError;

    fn try_from(application: &Application) -> Result<Self, Self::Error> {
        Ok(Self {
            application_id: application.id,
            competition_id: application.competition_id,
            applicant: application.applicant,
            submitted_by_user_id: application.submitted_by_user_id,
            status: application.status,
            notes: application.notes.clone(),
            submitted_at: render_timestamp(application.submitted_at)?,
            decided_at: render_optional_timestamp(application.decided_at)?,
            decided_by_user_id: application.decided_by_user_id,
        })
    }
}

/// API response listing a competition's applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListApplicationsResponse {
    pub competition_id: i64,
    pub applications: Vec<ApplicationInfo>,
}

/// The acting user's own application status for a competition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyApplicationsResponse {
    pub competition_id: i64,
    /// The user's individual application, if any.
    pub individual: Option<ApplicationInfo>,
    /// Applications of teams the user captains.
    pub teams: Vec<ApplicationInfo>,
}

/// API request to finalize results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizeResultsRequest {
    /// The acting identity.
    pub acting: User,
    /// The final standings. May be empty.
    #[serde(default)]
    pub results: Vec<ResultEntry>,
}

/// Confirmation of a successful finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedReceipt {
    pub competition_id: i64,
    pub results_recorded: usize,
    pub finalized_at: String,
    /// Always `results_published`.
    pub phase: Phase,
}

/// A recorded result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultInfo {
    pub result_id: i64,
    pub application_id: i64,
    pub applicant: Applicant,
    pub place: Option<i64>,
    pub score: Option<f64>,
    pub result_data: Option<String>,
    pub recorded_at: String,
    pub recorded_by_user_id: i64,
}

impl TryFrom<&CompetitionResult> for ResultInfo {
    type Error = ApiError;

    fn try_from(result: &CompetitionResult) -> Result<Self, Self::Error> {
        Ok(Self {
            result_id: result.id,
            application_id: result.application_id,
            applicant: result.applicant,
            place: result.place,
            score: result.score,
            result_data: result.result_data.clone(),
            recorded_at: render_timestamp(result.recorded_at)?,
            recorded_by_user_id: result.recorded_by_user_id,
        })
    }
}

/// API response listing a competition's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResultsResponse {
    pub competition_id: i64,
    pub phase: Phase,
    pub results: Vec<ResultInfo>,
}

/// API request to provision a user from the identity layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionUserRequest {
    pub display_name: String,
    pub role: Role,
    #[serde(default)]
    pub region_id: Option<i64>,
}

/// A provisioned user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: i64,
    pub display_name: String,
    pub role: Role,
    pub region_id: Option<i64>,
}

/// API request to create a team captained by the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    pub acting: User,
    pub name: String,
}

/// API request to add a member to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTeamMemberRequest {
    pub acting: User,
    pub user_id: i64,
}

/// A team and its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub team_id: i64,
    pub name: String,
    pub captain_user_id: i64,
    pub members: Vec<i64>,
}

impl From<&Team> for TeamInfo {
    fn from(team: &Team) -> Self {
        Self {
            team_id: team.id,
            name: team.name.clone(),
            captain_user_id: team.captain_user_id,
            members: team.members.iter().copied().collect(),
        }
    }
}
