// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Competition management, phase queries and identity provisioning.

use fsp_comp::Clock;
use fsp_comp_domain::{Competition, CompetitionDraft, Team, User};
use fsp_comp_persistence::{CompetitionFilter, Persistence, UserRecord};
use time::OffsetDateTime;
use tracing::info;

use crate::auth::AuthorizationService;
use crate::error::{ApiError, not_found};
use crate::request_response::{
    AddTeamMemberRequest, CompetitionInfo, CreateCompetitionRequest, CreateTeamRequest,
    ListCompetitionsFilter, ListCompetitionsResponse, PhaseResponse, ProvisionUserRequest, TeamInfo,
    UpdateCompetitionRequest, UserInfo,
};

fn load_visible_competition(
    persistence: &mut Persistence,
    viewer: &User,
    competition_id: i64,
) -> Result<Competition, ApiError> {
    let competition: Competition = persistence
        .get_competition(competition_id)?
        .ok_or_else(|| not_found("competition", competition_id))?;
    AuthorizationService::authorize_view_competition(viewer, &competition)?;
    Ok(competition)
}

/// Creates a competition organized by the acting user.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `clock` - The time source
/// * `request` - The acting user, the competition fields and the publish flag
///
/// # Returns
///
/// The created competition with its phase at creation time.
///
/// # Errors
///
/// Returns an error if:
/// - The acting role cannot organize competitions (`Forbidden`)
/// - A timestamp is malformed or the schedule is out of order
/// - The name is empty, or the region does not match the competition type
/// - `max_applicants` is not positive
pub fn create_competition(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    request: &CreateCompetitionRequest,
) -> Result<CompetitionInfo, ApiError> {
    let draft: CompetitionDraft = request.fields.to_draft()?;
    let competition: Competition =
        persistence.create_competition(clock, &request.acting, draft, request.publish)?;

    info!(
        competition_id = competition.id,
        organizer_id = competition.organizer_id,
        published = competition.published,
        "Competition created"
    );
    CompetitionInfo::from_competition(&competition, clock.now())
}

/// Replaces the fields of an unpublished competition.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `NotOrganizer`, or `Validation` (including
/// `competition_published` once the competition is public).
pub fn update_competition(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    competition_id: i64,
    request: &UpdateCompetitionRequest,
) -> Result<CompetitionInfo, ApiError> {
    let draft: CompetitionDraft = request.fields.to_draft()?;
    let competition: Competition =
        persistence.update_competition(&request.acting, competition_id, draft)?;
    CompetitionInfo::from_competition(&competition, clock.now())
}

/// Publishes a competition.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `NotOrganizer`, or
/// `Validation(already_published)`.
pub fn publish_competition(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    competition_id: i64,
    acting: &User,
) -> Result<CompetitionInfo, ApiError> {
    let competition: Competition = persistence.publish_competition(acting, competition_id)?;
    info!(competition_id, "Competition published");
    CompetitionInfo::from_competition(&competition, clock.now())
}

/// Retrieves a competition visible to the viewer.
///
/// # Errors
///
/// Returns `ResourceNotFound` if it does not exist or is hidden.
pub fn get_competition(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    viewer: &User,
    competition_id: i64,
) -> Result<CompetitionInfo, ApiError> {
    let competition: Competition = load_visible_competition(persistence, viewer, competition_id)?;
    CompetitionInfo::from_competition(&competition, clock.now())
}

/// Lists the competitions visible to the viewer, each with its current phase.
///
/// Published competitions are listed for everyone; drafts only for their
/// organizer and federation administrators. Type and name narrow the
/// stored rows; phase is matched after resolution against the clock.
///
/// # Errors
///
/// Returns an error if the competitions cannot be loaded.
pub fn list_competitions(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    viewer: &User,
    filter: &ListCompetitionsFilter,
) -> Result<ListCompetitionsResponse, ApiError> {
    let now: OffsetDateTime = clock.now();
    let stored: CompetitionFilter = CompetitionFilter {
        competition_type: filter.competition_type,
        name: filter.name.clone(),
    };
    let competitions: Vec<CompetitionInfo> = persistence
        .list_competitions(&stored)?
        .iter()
        .filter(|competition| competition.is_visible_to(viewer))
        .filter(|competition| {
            filter
                .phase
                .is_none_or(|phase| competition.phase_at(now) == phase)
        })
        .map(|competition| CompetitionInfo::from_competition(competition, now))
        .collect::<Result<Vec<CompetitionInfo>, ApiError>>()?;

    Ok(ListCompetitionsResponse { competitions })
}

/// Resolves the current phase of a competition.
///
/// # Errors
///
/// Returns `ResourceNotFound` if it does not exist or is hidden.
pub fn competition_phase(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    viewer: &User,
    competition_id: i64,
) -> Result<PhaseResponse, ApiError> {
    let competition: Competition = load_visible_competition(persistence, viewer, competition_id)?;
    Ok(PhaseResponse {
        competition_id,
        phase: competition.phase_at(clock.now()),
        published: competition.published,
    })
}

/// Records a user supplied by the identity layer.
///
/// # Errors
///
/// Returns an error if the user cannot be stored.
pub fn provision_user(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    request: &ProvisionUserRequest,
) -> Result<UserInfo, ApiError> {
    let record: UserRecord = persistence.create_user(
        &request.display_name,
        request.role,
        request.region_id,
        clock.now(),
    )?;
    Ok(UserInfo {
        user_id: record.user.id,
        display_name: record.display_name,
        role: record.user.role,
        region_id: record.user.region_id,
    })
}

/// Creates a team captained by the acting user.
///
/// The captain is not a member until added.
///
/// # Errors
///
/// Returns `Validation(invalid_team_name)` or `ResourceNotFound`.
pub fn create_team(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    request: &CreateTeamRequest,
) -> Result<TeamInfo, ApiError> {
    let team: Team = persistence.create_team(&request.name, request.acting.id, clock.now())?;
    Ok(TeamInfo::from(&team))
}

/// Adds a member to a team the acting user captains.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Forbidden`.
pub fn add_team_member(
    persistence: &mut Persistence,
    team_id: i64,
    request: &AddTeamMemberRequest,
) -> Result<TeamInfo, ApiError> {
    let team: Team = persistence
        .get_team(team_id)?
        .ok_or_else(|| not_found("team", team_id))?;
    AuthorizationService::authorize_manage_team(&request.acting, &team)?;

    let team: Team = persistence.add_team_member(team_id, request.user_id)?;
    Ok(TeamInfo::from(&team))
}

/// Retrieves a team.
///
/// # Errors
///
/// Returns `ResourceNotFound` if it does not exist.
pub fn get_team(persistence: &mut Persistence, team_id: i64) -> Result<TeamInfo, ApiError> {
    let team: Team = persistence
        .get_team(team_id)?
        .ok_or_else(|| not_found("team", team_id))?;
    Ok(TeamInfo::from(&team))
}
