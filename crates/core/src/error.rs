// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fsp_comp_domain::{Applicant, DomainError, IneligibilityReason, Phase, Role};

/// Errors that can occur while planning a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Input was malformed or a domain rule was violated.
    Validation(DomainError),
    /// The acting user may not submit this application.
    NotEligible(IneligibilityReason),
    /// The competition is unpublished or outside its registration window.
    CompetitionNotOpen {
        /// The competition applied to.
        competition_id: i64,
        /// The phase the competition is in.
        phase: Phase,
        /// Whether the competition is published.
        published: bool,
    },
    /// The applicant already has an application for the competition.
    DuplicateApplication {
        /// The competition applied to.
        competition_id: i64,
        /// The applicant identity.
        applicant: Applicant,
    },
    /// The acting user does not organize the competition.
    NotOrganizer {
        /// The competition in question.
        competition_id: i64,
        /// The acting user.
        user_id: i64,
    },
    /// Results can only be recorded once the competition has finished.
    NotFinished {
        /// The competition in question.
        competition_id: i64,
        /// The time-derived phase the competition is in.
        phase: Phase,
    },
    /// Results for the competition are already published.
    AlreadyFinalized {
        /// The competition in question.
        competition_id: i64,
    },
    /// A result referenced an application that does not belong to the competition.
    UnknownApplication {
        /// The referenced application.
        application_id: i64,
    },
    /// A referenced resource does not exist.
    NotFound {
        /// The kind of resource.
        resource: String,
        /// The identifier that was looked up.
        id: i64,
    },
    /// The acting user's role does not permit the action.
    Forbidden {
        /// The attempted action.
        action: String,
        /// The acting user's role.
        role: Role,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "Validation error: {err}"),
            Self::NotEligible(reason) => write!(f, "Not eligible: {reason}"),
            Self::CompetitionNotOpen {
                competition_id,
                phase,
                published,
            } => {
                if *published {
                    write!(
                        f,
                        "Competition {competition_id} is not open for registration (phase: {phase})"
                    )
                } else {
                    write!(f, "Competition {competition_id} is not published")
                }
            }
            Self::DuplicateApplication {
                competition_id,
                applicant,
            } => write!(
                f,
                "An application for {applicant} already exists in competition {competition_id}"
            ),
            Self::NotOrganizer {
                competition_id,
                user_id,
            } => write!(
                f,
                "User {user_id} is not the organizer of competition {competition_id}"
            ),
            Self::NotFinished {
                competition_id,
                phase,
            } => write!(
                f,
                "Competition {competition_id} has not finished (phase: {phase})"
            ),
            Self::AlreadyFinalized { competition_id } => write!(
                f,
                "Results for competition {competition_id} are already published"
            ),
            Self::UnknownApplication { application_id } => write!(
                f,
                "Application {application_id} does not belong to this competition"
            ),
            Self::NotFound { resource, id } => write!(f, "{resource} {id} not found"),
            Self::Forbidden { action, role } => {
                write!(f, "Role '{role}' is not permitted to {action}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err)
    }
}
