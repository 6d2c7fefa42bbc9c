// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use fsp_comp::CoreError;
use fsp_comp_domain::{Applicant, DomainError, IneligibilityReason, Phase};
use fsp_comp_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the contract
/// surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Input was malformed or a domain rule was violated.
    Validation {
        /// The stable code of the violated rule.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The acting user may not submit this application.
    NotEligible {
        /// Why the application is not allowed.
        reason: IneligibilityReason,
    },
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
        /// The time-derived phase.
        phase: Phase,
    },
    /// Results for the competition are already published.
    AlreadyFinalized {
        /// The competition in question.
        competition_id: i64,
    },
    /// A result referenced an application outside the competition.
    UnknownApplication {
        /// The referenced application.
        application_id: i64,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The acting user is not permitted to perform the action.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of who may perform it.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable machine-readable code of this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotEligible { .. } => "not_eligible",
            Self::CompetitionNotOpen { .. } => "competition_not_open",
            Self::DuplicateApplication { .. } => "duplicate_application",
            Self::NotOrganizer { .. } => "not_organizer",
            Self::NotFinished { .. } => "not_finished",
            Self::AlreadyFinalized { .. } => "already_finalized",
            Self::UnknownApplication { .. } => "unknown_application",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Forbidden { .. } => "forbidden",
            Self::Internal { .. } => "internal_error",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { rule, message } => {
                write!(f, "Validation error ({rule}): {message}")
            }
            Self::NotEligible { reason } => write!(f, "Not eligible: {reason}"),
            Self::CompetitionNotOpen {
                competition_id,
                phase,
                published,
            } => {
                if *published {
                    write!(
                        f,
                        "Competition {competition_id} is not accepting applications (phase: {phase})"
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
                "An application for {applicant} already exists for competition {competition_id}"
            ),
            Self::NotOrganizer {
                competition_id,
                user_id,
            } => write!(
                f,
                "User {user_id} does not organize competition {competition_id}"
            ),
            Self::NotFinished {
                competition_id,
                phase,
            } => write!(
                f,
                "Competition {competition_id} has not finished (phase: {phase})"
            ),
            Self::AlreadyFinalized { competition_id } => {
                write!(f, "Results for competition {competition_id} are already published")
            }
            Self::UnknownApplication { application_id } => write!(
                f,
                "Application {application_id} does not belong to this competition"
            ),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => write!(f, "{resource_type} not found: {message}"),
            Self::Forbidden { action, message } => {
                write!(f, "Forbidden to {action}: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Returns the stable rule code for a domain validation failure.
#[must_use]
pub const fn domain_rule(err: &DomainError) -> &'static str {
    match err {
        DomainError::InvalidCompetitionName(_) => "invalid_name",
        DomainError::InvalidCompetitionType(_) => "invalid_competition_type",
        DomainError::InvalidRole(_) => "invalid_role",
        DomainError::InvalidPhase(_) => "invalid_phase",
        DomainError::InvalidApplicationStatus(_) => "invalid_status",
        DomainError::InvalidSchedule { .. } => "invalid_schedule",
        DomainError::MissingRegion => "missing_region",
        DomainError::UnexpectedRegion { .. } => "unexpected_region",
        DomainError::InvalidMaxApplicants { .. } => "invalid_max_applicants",
        DomainError::InvalidPlace { .. } => "invalid_place",
        DomainError::NonFiniteScore { .. } => "non_finite_score",
        DomainError::DuplicateResultEntry { .. } => "duplicate_result_entry",
        DomainError::ApplicationNotApproved { .. } => "application_not_approved",
        DomainError::ApplicationAlreadyDecided { .. } => "already_decided",
        DomainError::CompetitionPublished { .. } => "competition_published",
        DomainError::AlreadyPublished { .. } => "already_published",
        DomainError::CompetitionNotPublished { .. } => "competition_not_published",
        DomainError::CompetitionFinalized { .. } => "competition_finalized",
        DomainError::InvalidTeamName(_) => "invalid_team_name",
        DomainError::DateParseError { .. } => "invalid_timestamp",
    }
}

/// Translates a domain error into an API error.
///
/// Every domain failure surfaces as `Validation` tagged with its rule code.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    ApiError::Validation {
        rule: String::from(domain_rule(&err)),
        message: err.to_string(),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Validation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotEligible(reason) => ApiError::NotEligible { reason },
        CoreError::CompetitionNotOpen {
            competition_id,
            phase,
            published,
        } => ApiError::CompetitionNotOpen {
            competition_id,
            phase,
            published,
        },
        CoreError::DuplicateApplication {
            competition_id,
            applicant,
        } => ApiError::DuplicateApplication {
            competition_id,
            applicant,
        },
        CoreError::NotOrganizer {
            competition_id,
            user_id,
        } => ApiError::NotOrganizer {
            competition_id,
            user_id,
        },
        CoreError::NotFinished {
            competition_id,
            phase,
        } => ApiError::NotFinished {
            competition_id,
            phase,
        },
        CoreError::AlreadyFinalized { competition_id } => {
            ApiError::AlreadyFinalized { competition_id }
        }
        CoreError::UnknownApplication { application_id } => {
            ApiError::UnknownApplication { application_id }
        }
        CoreError::NotFound { resource, id } => not_found(&resource, id),
        CoreError::Forbidden { action, role } => ApiError::Forbidden {
            action,
            message: format!("role '{role}' may not perform this action"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Rule failures detected inside a transaction keep their typed meaning;
/// storage failures become `Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Rejected(core_err) => translate_core_error(core_err),
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Builds a `ResourceNotFound` error for a resource kind and identifier.
#[must_use]
pub fn not_found(resource: &str, id: i64) -> ApiError {
    let mut resource_type: String = resource.to_string();
    if let Some(first) = resource_type.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    ApiError::ResourceNotFound {
        resource_type,
        message: format!("{resource} {id} does not exist"),
    }
}
