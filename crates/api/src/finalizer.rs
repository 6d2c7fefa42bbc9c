// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The results finalizer.

use fsp_comp::{Clock, FinalizationPlan};
use fsp_comp_domain::{Competition, User, format_timestamp};
use fsp_comp_persistence::Persistence;

use crate::auth::AuthorizationService;
use crate::error::{ApiError, not_found};
use crate::request_response::{
    FinalizeResultsRequest, FinalizedReceipt, ListResultsResponse, ResultInfo,
};

/// Records final standings and publishes them, once.
pub struct ResultsFinalizer<'a> {
    persistence: &'a mut Persistence,
    clock: &'a dyn Clock,
}

impl<'a> ResultsFinalizer<'a> {
    /// Creates a finalizer over a persistence adapter and a time source.
    #[must_use]
    pub fn new(persistence: &'a mut Persistence, clock: &'a dyn Clock) -> Self {
        Self { persistence, clock }
    }

    /// Records the final standings and moves the competition into
    /// `results_published`.
    ///
    /// Every precondition is checked before anything is written; a failure
    /// leaves the competition untouched. A second call always fails with
    /// `AlreadyFinalized`.
    ///
    /// # Arguments
    ///
    /// * `competition_id` - The competition to close out
    /// * `request` - The acting organizer and the standings
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFinalized`, `NotOrganizer`, `NotFinished`,
    /// `UnknownApplication`, `Validation`, or `ResourceNotFound`.
    pub fn finalize(
        &mut self,
        competition_id: i64,
        request: &FinalizeResultsRequest,
    ) -> Result<FinalizedReceipt, ApiError> {
        let plan: FinalizationPlan = self.persistence.finalize_results(
            self.clock,
            &request.acting,
            competition_id,
            &request.results,
        )?;

        Ok(FinalizedReceipt {
            competition_id: plan.competition_id,
            results_recorded: plan.results.len(),
            finalized_at: format_timestamp(plan.finalized_at).map_err(|e| ApiError::Internal {
                message: e.to_string(),
            })?,
            phase: plan.phase,
        })
    }

    /// Lists the recorded results of a competition visible to the viewer.
    ///
    /// The list is empty until results are published.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the competition is missing or hidden.
    pub fn list_results(
        &mut self,
        viewer: &User,
        competition_id: i64,
    ) -> Result<ListResultsResponse, ApiError> {
        let competition: Competition = self
            .persistence
            .get_competition(competition_id)?
            .ok_or_else(|| not_found("competition", competition_id))?;
        AuthorizationService::authorize_view_competition(viewer, &competition)?;

        let results: Vec<ResultInfo> = self
            .persistence
            .list_results(competition_id)?
            .iter()
            .map(ResultInfo::try_from)
            .collect::<Result<Vec<ResultInfo>, ApiError>>()?;

        Ok(ListResultsResponse {
            competition_id,
            phase: competition.phase_at(self.clock.now()),
            results,
        })
    }
}
