// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The application registry.
//!
//! Submissions and decisions run as single transactions in the persistence
//! layer, which re-derives phase and eligibility at commit time. The
//! eligibility query here is advisory: it answers whether a submission
//! would be offered, not whether it will succeed.

use fsp_comp::{Clock, Decision};
use fsp_comp_domain::{
    Applicant, ApplicantCandidate, Application, Competition, Eligibility, EligibilityChecker,
    Phase, Team, User,
};
use fsp_comp_persistence::Persistence;
use tracing::debug;

use crate::auth::AuthorizationService;
use crate::error::{ApiError, not_found};
use crate::request_response::{
    ApplicationInfo, EligibilityRequest, EligibilityResponse, ListApplicationsResponse,
    MyApplicationsResponse, SubmitApplicationRequest,
};

/// Submits, decides and reports applications.
pub struct ApplicationRegistry<'a> {
    persistence: &'a mut Persistence,
    clock: &'a dyn Clock,
}

impl<'a> ApplicationRegistry<'a> {
    /// Creates a registry over a persistence adapter and a time source.
    #[must_use]
    pub fn new(persistence: &'a mut Persistence, clock: &'a dyn Clock) -> Self {
        Self { persistence, clock }
    }

    fn load_competition(&mut self, competition_id: i64) -> Result<Competition, ApiError> {
        self.persistence
            .get_competition(competition_id)?
            .ok_or_else(|| not_found("competition", competition_id))
    }

    fn load_team(&mut self, team_id: i64) -> Result<Team, ApiError> {
        self.persistence
            .get_team(team_id)?
            .ok_or_else(|| not_found("team", team_id))
    }

    fn load_visible_competition(
        &mut self,
        viewer: &User,
        competition_id: i64,
    ) -> Result<Competition, ApiError> {
        let competition: Competition = self.load_competition(competition_id)?;
        AuthorizationService::authorize_view_competition(viewer, &competition)?;
        Ok(competition)
    }

    /// Reports whether the acting user may apply, individually or for a team.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the competition is missing or
    /// hidden from the acting user, or the team does not exist.
    pub fn check_eligibility(
        &mut self,
        competition_id: i64,
        request: &EligibilityRequest,
    ) -> Result<EligibilityResponse, ApiError> {
        let competition: Competition =
            self.load_visible_competition(&request.acting, competition_id)?;
        let team: Option<Team> = request.team_id.map(|id| self.load_team(id)).transpose()?;
        let candidate: ApplicantCandidate<'_> = team
            .as_ref()
            .map_or(ApplicantCandidate::Individual, ApplicantCandidate::Team);
        let applicant: Applicant = candidate.applicant_for(&request.acting);

        let existing: Vec<Application> = self
            .persistence
            .find_application(competition_id, applicant)?
            .into_iter()
            .collect();
        let phase: Phase = competition.phase_at(self.clock.now());
        let eligibility: Eligibility = EligibilityChecker::can_apply(
            &request.acting,
            candidate,
            &competition,
            phase,
            &existing,
        );

        debug!(
            competition_id,
            %applicant,
            phase = phase.as_str(),
            allowed = eligibility.is_allowed(),
            "Eligibility checked"
        );

        Ok(EligibilityResponse {
            competition_id,
            applicant,
            phase,
            eligibility,
        })
    }

    /// Submits an application.
    ///
    /// # Errors
    ///
    /// Returns `NotEligible`, `CompetitionNotOpen`, `DuplicateApplication`,
    /// `Validation`, or `ResourceNotFound`.
    pub fn submit(
        &mut self,
        competition_id: i64,
        request: SubmitApplicationRequest,
    ) -> Result<ApplicationInfo, ApiError> {
        let application: Application = self.persistence.submit_application(
            self.clock,
            &request.acting,
            competition_id,
            request.team_id,
            request.notes,
        )?;
        ApplicationInfo::try_from(&application)
    }

    /// Approves a pending application.
    ///
    /// # Errors
    ///
    /// Returns `NotOrganizer`, `Validation` (already decided, competition
    /// finalized), or `ResourceNotFound`.
    pub fn approve(
        &mut self,
        application_id: i64,
        acting: &User,
    ) -> Result<ApplicationInfo, ApiError> {
        self.decide(application_id, acting, Decision::Approve)
    }

    /// Rejects a pending application.
    ///
    /// # Errors
    ///
    /// Returns `NotOrganizer`, `Validation` (already decided, competition
    /// finalized), or `ResourceNotFound`.
    pub fn reject(
        &mut self,
        application_id: i64,
        acting: &User,
    ) -> Result<ApplicationInfo, ApiError> {
        self.decide(application_id, acting, Decision::Reject)
    }

    fn decide(
        &mut self,
        application_id: i64,
        acting: &User,
        decision: Decision,
    ) -> Result<ApplicationInfo, ApiError> {
        let application: Application = self.persistence.decide_application(
            self.clock,
            acting,
            application_id,
            decision,
        )?;
        ApplicationInfo::try_from(&application)
    }

    /// Retrieves a single application.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if it does not exist, or `Forbidden` if the
    /// viewer is not a party to it.
    pub fn get_application(
        &mut self,
        viewer: &User,
        application_id: i64,
    ) -> Result<ApplicationInfo, ApiError> {
        let application: Application = self
            .persistence
            .get_application(application_id)?
            .ok_or_else(|| not_found("application", application_id))?;
        let competition: Competition = self.load_competition(application.competition_id)?;
        AuthorizationService::authorize_view_application(viewer, &application, &competition)?;
        ApplicationInfo::try_from(&application)
    }

    /// Lists every application of a competition, for its organizer.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `Forbidden`.
    pub fn list_applications(
        &mut self,
        viewer: &User,
        competition_id: i64,
    ) -> Result<ListApplicationsResponse, ApiError> {
        let competition: Competition = self.load_competition(competition_id)?;
        AuthorizationService::authorize_list_applications(viewer, &competition)?;

        let applications: Vec<ApplicationInfo> = self
            .persistence
            .list_applications(competition_id)?
            .iter()
            .map(ApplicationInfo::try_from)
            .collect::<Result<Vec<ApplicationInfo>, ApiError>>()?;

        Ok(ListApplicationsResponse {
            competition_id,
            applications,
        })
    }

    /// Reports the viewer's own application and those of teams they captain.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the competition is missing or hidden.
    pub fn my_applications(
        &mut self,
        viewer: &User,
        competition_id: i64,
    ) -> Result<MyApplicationsResponse, ApiError> {
        self.load_visible_competition(viewer, competition_id)?;

        let individual: Option<ApplicationInfo> = self
            .persistence
            .find_application(competition_id, Applicant::User(viewer.id))?
            .as_ref()
            .map(ApplicationInfo::try_from)
            .transpose()?;

        let mut teams: Vec<ApplicationInfo> = Vec::new();
        for team in self.persistence.teams_captained_by(viewer.id)? {
            if let Some(application) = self
                .persistence
                .find_application(competition_id, Applicant::Team(team.id))?
            {
                teams.push(ApplicationInfo::try_from(&application)?);
            }
        }

        Ok(MyApplicationsResponse {
            competition_id,
            individual,
            teams,
        })
    }
}
