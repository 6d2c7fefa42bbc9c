// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional orchestration of state transitions.
//!
//! Each function opens a `BEGIN IMMEDIATE` transaction, loads the rows the
//! planner needs, reads the clock, runs the pure planner from the core
//! crate, and writes the plan. Any failure rolls the whole transaction back.
//! Because the write lock is taken up front, the state a planner sees is
//! the state its writes apply to.

use diesel::SqliteConnection;
use fsp_comp::{
    Clock, CoreError, Decision, DecisionPlan, FinalizationPlan, NewApplication, NewCompetition,
    SubmissionContext, plan_create_competition, plan_decision, plan_finalization,
    plan_publish_competition, plan_submission, plan_update_competition,
};
use fsp_comp_domain::{
    Applicant, ApplicantCandidate, Application, Competition, CompetitionDraft, DomainError,
    ResultEntry, Team, User,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::error::PersistenceError;
use crate::mutations::{applications, competitions, identities, results};
use crate::queries;

fn not_found(resource: &str, id: i64) -> PersistenceError {
    PersistenceError::Rejected(CoreError::NotFound {
        resource: resource.to_string(),
        id,
    })
}

fn require_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    queries::users::get_user(conn, user_id)?
        .map(|_| ())
        .ok_or_else(|| not_found("user", user_id))
}

fn require_competition(
    conn: &mut SqliteConnection,
    competition_id: i64,
) -> Result<Competition, PersistenceError> {
    queries::competitions::get_competition(conn, competition_id)?
        .ok_or_else(|| not_found("competition", competition_id))
}

fn require_application(
    conn: &mut SqliteConnection,
    application_id: i64,
) -> Result<Application, PersistenceError> {
    queries::applications::get_application(conn, application_id)?
        .ok_or_else(|| not_found("application", application_id))
}

/// Creates a team captained by an existing user.
///
/// The captain is not added to the member set implicitly.
///
/// # Errors
///
/// Returns an error if the name is blank, the captain does not exist,
/// or the insert fails.
pub fn create_team(
    conn: &mut SqliteConnection,
    name: &str,
    captain_user_id: i64,
    now: OffsetDateTime,
) -> Result<Team, PersistenceError> {
    fsp_comp_domain::validate_team_name(name).map_err(CoreError::from)?;

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        require_user(conn, captain_user_id)?;
        let team_id: i64 = identities::insert_team(conn, name, captain_user_id, now)?;
        queries::teams::get_team(conn, team_id)?.ok_or_else(|| not_found("team", team_id))
    })
}

/// Adds an existing user to an existing team.
///
/// # Errors
///
/// Returns an error if the team or user does not exist, or the insert fails.
pub fn add_team_member(
    conn: &mut SqliteConnection,
    team_id: i64,
    user_id: i64,
) -> Result<Team, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        if queries::teams::get_team(conn, team_id)?.is_none() {
            return Err(not_found("team", team_id));
        }
        require_user(conn, user_id)?;
        identities::insert_team_member(conn, team_id, user_id)?;
        queries::teams::get_team(conn, team_id)?.ok_or_else(|| not_found("team", team_id))
    })
}

/// Creates a competition organized by the acting user.
///
/// # Errors
///
/// Returns `PersistenceError::Rejected` if the acting role may not organize,
/// the draft is invalid, or the acting user does not exist.
pub fn create_competition(
    conn: &mut SqliteConnection,
    clock: &dyn Clock,
    acting: &User,
    draft: CompetitionDraft,
    publish: bool,
) -> Result<Competition, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let plan: NewCompetition = plan_create_competition(acting, draft, publish, clock.now())?;
        require_user(conn, acting.id)?;
        let competition_id: i64 = competitions::insert_competition(conn, &plan)?;
        require_competition(conn, competition_id)
    })
}

/// Replaces the editable fields of an unpublished competition.
///
/// # Errors
///
/// Returns `PersistenceError::Rejected` if the competition does not exist,
/// the acting user is not its organizer, it is already published, or the
/// draft is invalid.
pub fn update_competition(
    conn: &mut SqliteConnection,
    acting: &User,
    competition_id: i64,
    draft: CompetitionDraft,
) -> Result<Competition, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let competition: Competition = require_competition(conn, competition_id)?;
        let draft: CompetitionDraft = plan_update_competition(acting, &competition, draft)?;
        competitions::update_competition_fields(conn, competition_id, &draft)?;
        require_competition(conn, competition_id)
    })
}

/// Publishes a competition.
///
/// # Errors
///
/// Returns `PersistenceError::Rejected` if the competition does not exist,
/// the acting user is not its organizer, or it is already published.
pub fn publish_competition(
    conn: &mut SqliteConnection,
    acting: &User,
    competition_id: i64,
) -> Result<Competition, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let competition: Competition = require_competition(conn, competition_id)?;
        plan_publish_competition(acting, &competition)?;
        competitions::set_published(conn, competition_id)?;
        require_competition(conn, competition_id)
    })
}

/// Submits an application for the acting user or one of their teams.
///
/// Phase and eligibility are evaluated against the clock read inside the
/// transaction. Of concurrent submissions for one applicant identity,
/// exactly one succeeds; the others fail with `DuplicateApplication`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `clock` - The time source
/// * `acting` - The verified acting identity
/// * `competition_id` - The competition applied to
/// * `team_id` - The team applied for, or `None` for an individual application
/// * `notes` - Optional free text
///
/// # Errors
///
/// Returns `PersistenceError::Rejected` carrying `NotFound`,
/// `CompetitionNotOpen`, `NotEligible`, or `DuplicateApplication`.
pub fn submit_application(
    conn: &mut SqliteConnection,
    clock: &dyn Clock,
    acting: &User,
    competition_id: i64,
    team_id: Option<i64>,
    notes: Option<String>,
) -> Result<Application, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let competition: Competition = require_competition(conn, competition_id)?;
        require_user(conn, acting.id)?;

        let team: Option<Team> = team_id
            .map(|id| queries::teams::get_team(conn, id)?.ok_or_else(|| not_found("team", id)))
            .transpose()?;
        let candidate: ApplicantCandidate<'_> = team
            .as_ref()
            .map_or(ApplicantCandidate::Individual, ApplicantCandidate::Team);
        let applicant: Applicant = candidate.applicant_for(acting);

        let existing: Vec<Application> =
            queries::applications::find_application(conn, competition_id, applicant)?
                .into_iter()
                .collect();

        let now: OffsetDateTime = clock.now();
        let plan: NewApplication = plan_submission(
            SubmissionContext {
                acting,
                competition: &competition,
                candidate,
                existing: &existing,
            },
            now,
            notes,
        )
        .inspect_err(|e| debug!(competition_id, %applicant, error = %e, "Submission refused"))?;

        let application_id: i64 = applications::insert_application(conn, &plan)?;
        info!(
            application_id,
            competition_id,
            %applicant,
            submitted_by = acting.id,
            "Application submitted"
        );
        require_application(conn, application_id)
    })
}

/// Approves or rejects a pending application.
///
/// # Errors
///
/// Returns `PersistenceError::Rejected` carrying `NotFound`, `NotOrganizer`,
/// or `Validation` (already decided, competition finalized).
pub fn decide_application(
    conn: &mut SqliteConnection,
    clock: &dyn Clock,
    acting: &User,
    application_id: i64,
    decision: Decision,
) -> Result<Application, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let application: Application = require_application(conn, application_id)?;
        let competition: Competition = require_competition(conn, application.competition_id)?;

        let plan: DecisionPlan =
            plan_decision(acting, &competition, &application, decision, clock.now())?;

        if applications::apply_decision(conn, &plan)? == 0 {
            let current: Application = require_application(conn, application_id)?;
            warn!(application_id, status = %current.status, "Decision lost compare-and-set");
            return Err(CoreError::from(DomainError::ApplicationAlreadyDecided {
                application_id,
                status: current.status,
            })
            .into());
        }

        info!(
            application_id,
            competition_id = competition.id,
            status = %plan.new_status,
            decided_by = acting.id,
            "Application decided"
        );
        require_application(conn, application_id)
    })
}

/// Records final results and publishes them, exactly once.
///
/// Results are inserted before the sticky override is set; the override
/// is written with compare-and-set on `NULL`.
///
/// # Errors
///
/// Returns `PersistenceError::Rejected` carrying `NotFound`,
/// `AlreadyFinalized`, `NotOrganizer`, `NotFinished`, `UnknownApplication`,
/// or `Validation`.
pub fn finalize_results(
    conn: &mut SqliteConnection,
    clock: &dyn Clock,
    acting: &User,
    competition_id: i64,
    entries: &[ResultEntry],
) -> Result<FinalizationPlan, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let competition: Competition = require_competition(conn, competition_id)?;
        let applications: Vec<Application> =
            queries::applications::list_applications_for_competition(conn, competition_id)?;

        let plan: FinalizationPlan =
            plan_finalization(acting, &competition, &applications, entries, clock.now())?;

        results::insert_results(conn, &plan)?;

        if results::mark_finalized(conn, &plan)? == 0 {
            warn!(competition_id, "Finalization lost compare-and-set");
            return Err(CoreError::AlreadyFinalized { competition_id }.into());
        }

        info!(
            competition_id,
            results_recorded = plan.results.len(),
            finalized_by = acting.id,
            "Results published"
        );
        Ok(plan)
    })
}
