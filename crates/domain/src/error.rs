// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::application::ApplicationStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Competition name is empty or invalid.
    InvalidCompetitionName(String),
    /// Competition type string is not recognized.
    InvalidCompetitionType(String),
    /// Role string is not recognized.
    InvalidRole(String),
    /// Phase string is not recognized.
    InvalidPhase(String),
    /// Application status string is not recognized.
    InvalidApplicationStatus(String),
    /// The four competition timestamps are not in non-strict ascending order.
    InvalidSchedule {
        /// Which pair of boundaries is out of order.
        reason: String,
    },
    /// A regional competition was given no region.
    MissingRegion,
    /// A non-regional competition was given a region.
    UnexpectedRegion {
        /// The region that was supplied.
        region_id: i64,
    },
    /// Maximum applicant count must be positive.
    InvalidMaxApplicants {
        /// The invalid count value.
        count: i64,
    },
    /// A result place must be a positive integer.
    InvalidPlace {
        /// The invalid place value.
        place: i64,
    },
    /// A result score must be a finite number.
    NonFiniteScore {
        /// The application the score was recorded against.
        application_id: i64,
    },
    /// The same application appears more than once in a result batch.
    DuplicateResultEntry {
        /// The repeated application.
        application_id: i64,
    },
    /// A result was supplied for an application that is not approved.
    ApplicationNotApproved {
        /// The application in question.
        application_id: i64,
        /// Its current status.
        status: ApplicationStatus,
    },
    /// The application has already been approved or rejected.
    ApplicationAlreadyDecided {
        /// The application in question.
        application_id: i64,
        /// Its current status.
        status: ApplicationStatus,
    },
    /// The competition has already been published and can no longer be edited.
    CompetitionPublished {
        /// The competition in question.
        competition_id: i64,
    },
    /// The competition is already published.
    AlreadyPublished {
        /// The competition in question.
        competition_id: i64,
    },
    /// The competition is still a draft.
    CompetitionNotPublished {
        /// The competition in question.
        competition_id: i64,
    },
    /// Results for the competition are published; the competition is read-only.
    CompetitionFinalized {
        /// The competition in question.
        competition_id: i64,
    },
    /// Team name is empty or invalid.
    InvalidTeamName(String),
    /// Failed to parse a timestamp.
    DateParseError {
        /// The invalid timestamp string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCompetitionName(msg) => write!(f, "Invalid competition name: {msg}"),
            Self::InvalidCompetitionType(value) => {
                write!(f, "Invalid competition type: '{value}'")
            }
            Self::InvalidRole(value) => write!(f, "Invalid role: '{value}'"),
            Self::InvalidPhase(value) => write!(f, "Invalid phase: '{value}'"),
            Self::InvalidApplicationStatus(value) => {
                write!(f, "Invalid application status: '{value}'")
            }
            Self::InvalidSchedule { reason } => write!(f, "Invalid schedule: {reason}"),
            Self::MissingRegion => {
                write!(f, "A regional competition requires a region")
            }
            Self::UnexpectedRegion { region_id } => {
                write!(
                    f,
                    "Only regional competitions may carry a region, got region {region_id}"
                )
            }
            Self::InvalidMaxApplicants { count } => {
                write!(
                    f,
                    "Invalid maximum applicant count: {count}. Must be greater than 0"
                )
            }
            Self::InvalidPlace { place } => {
                write!(f, "Invalid place: {place}. Must be a positive integer")
            }
            Self::NonFiniteScore { application_id } => {
                write!(
                    f,
                    "Score for application {application_id} must be a finite number"
                )
            }
            Self::DuplicateResultEntry { application_id } => {
                write!(
                    f,
                    "Application {application_id} appears more than once in the result batch"
                )
            }
            Self::ApplicationNotApproved {
                application_id,
                status,
            } => {
                write!(
                    f,
                    "Application {application_id} is {status}; results may only be recorded for approved applications"
                )
            }
            Self::ApplicationAlreadyDecided {
                application_id,
                status,
            } => {
                write!(f, "Application {application_id} is already {status}")
            }
            Self::CompetitionPublished { competition_id } => {
                write!(
                    f,
                    "Competition {competition_id} is published and can no longer be edited"
                )
            }
            Self::AlreadyPublished { competition_id } => {
                write!(f, "Competition {competition_id} is already published")
            }
            Self::CompetitionNotPublished { competition_id } => {
                write!(f, "Competition {competition_id} has not been published")
            }
            Self::CompetitionFinalized { competition_id } => {
                write!(
                    f,
                    "Results for competition {competition_id} are published; the competition is read-only"
                )
            }
            Self::InvalidTeamName(msg) => write!(f, "Invalid team name: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse timestamp '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
