// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application submission and decision planning.
//!
//! Planners are pure: they take the loaded state and the current instant
//! and either describe the write to perform or return the typed failure.
//! The persistence layer runs them inside a single immediate transaction.

use crate::error::CoreError;
use fsp_comp_domain::{
    Applicant, ApplicantCandidate, Application, ApplicationStatus, Competition, DomainError,
    Eligibility, EligibilityChecker, IneligibilityReason, Phase, User,
};
use time::OffsetDateTime;

/// The state a submission is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionContext<'a> {
    /// The verified acting identity.
    pub acting: &'a User,
    /// The competition being applied to.
    pub competition: &'a Competition,
    /// Individual, or the team being applied for.
    pub candidate: ApplicantCandidate<'a>,
    /// Applications already on file for the competition.
    pub existing: &'a [Application],
}

/// An application ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub competition_id: i64,
    pub applicant: Applicant,
    pub submitted_by_user_id: i64,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub submitted_at: OffsetDateTime,
}

/// Plans the submission of an application.
///
/// The phase is resolved at `now`, which the caller reads inside the
/// transaction that will perform the insert.
///
/// # Arguments
///
/// * `context` - The loaded competition, applicant and existing applications
/// * `now` - The current instant
/// * `notes` - Optional free text; blank notes are dropped
///
/// # Returns
///
/// * `Ok(NewApplication)` describing the row to insert
/// * `Err(CoreError)` if the submission is refused
///
/// # Errors
///
/// Returns an error if:
/// - The competition is unpublished or not in `registration_open` (`CompetitionNotOpen`)
/// - The applicant already has an application (`DuplicateApplication`)
/// - Any other eligibility rule fails (`NotEligible`)
pub fn plan_submission(
    context: SubmissionContext<'_>,
    now: OffsetDateTime,
    notes: Option<String>,
) -> Result<NewApplication, CoreError> {
    let competition: &Competition = context.competition;
    let phase: Phase = competition.phase_at(now);
    let applicant: Applicant = context.candidate.applicant_for(context.acting);

    let eligibility: Eligibility = EligibilityChecker::can_apply(
        context.acting,
        context.candidate,
        competition,
        phase,
        context.existing,
    );

    match eligibility {
        Eligibility::Allowed => {}
        Eligibility::NotEligible(
            IneligibilityReason::NotPublished | IneligibilityReason::Phase { .. },
        ) => {
            return Err(CoreError::CompetitionNotOpen {
                competition_id: competition.id,
                phase,
                published: competition.published,
            });
        }
        Eligibility::NotEligible(IneligibilityReason::AlreadyApplied) => {
            return Err(CoreError::DuplicateApplication {
                competition_id: competition.id,
                applicant,
            });
        }
        Eligibility::NotEligible(reason) => return Err(CoreError::NotEligible(reason)),
    }

    Ok(NewApplication {
        competition_id: competition.id,
        applicant,
        submitted_by_user_id: context.acting.id,
        status: ApplicationStatus::Pending,
        notes: notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        submitted_at: now,
    })
}

/// An organizer's verdict on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Returns the status the application moves to.
    #[must_use]
    pub const fn target_status(&self) -> ApplicationStatus {
        match self {
            Self::Approve => ApplicationStatus::Approved,
            Self::Reject => ApplicationStatus::Rejected,
        }
    }
}

/// A status change ready to be applied with compare-and-set on `expected_status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionPlan {
    pub application_id: i64,
    pub expected_status: ApplicationStatus,
    pub new_status: ApplicationStatus,
    pub decided_by_user_id: i64,
    pub decided_at: OffsetDateTime,
}

/// Plans an approve or reject decision.
///
/// # Arguments
///
/// * `acting` - The verified acting identity
/// * `competition` - The competition the application belongs to
/// * `application` - The application being decided
/// * `decision` - Approve or reject
/// * `now` - The current instant
///
/// # Errors
///
/// Returns an error if:
/// - The acting user does not organize the competition
/// - Results for the competition are already published
/// - The application has already been decided
pub fn plan_decision(
    acting: &User,
    competition: &Competition,
    application: &Application,
    decision: Decision,
    now: OffsetDateTime,
) -> Result<DecisionPlan, CoreError> {
    if !competition.is_organized_by(acting.id) {
        return Err(CoreError::NotOrganizer {
            competition_id: competition.id,
            user_id: acting.id,
        });
    }

    if competition.is_finalized() {
        return Err(DomainError::CompetitionFinalized {
            competition_id: competition.id,
        }
        .into());
    }

    let new_status: ApplicationStatus = decision.target_status();
    application
        .status
        .validate_transition(application.id, new_status)?;

    Ok(DecisionPlan {
        application_id: application.id,
        expected_status: application.status,
        new_status,
        decided_by_user_id: acting.id,
        decided_at: now,
    })
}
