// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applications and their decision lifecycle.
//!
//! An application is filed on behalf of exactly one applicant identity,
//! either an individual user or a team. It is created `pending` and moves
//! to `approved` or `rejected` exactly once, by organizer action.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The identity an application is filed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Applicant {
    /// An individual user applying for themselves.
    User(i64),
    /// A team applying through its captain.
    Team(i64),
}

impl Applicant {
    /// Returns the user id when this is an individual applicant.
    #[must_use]
    pub const fn user_id(&self) -> Option<i64> {
        match self {
            Self::User(id) => Some(*id),
            Self::Team(_) => None,
        }
    }

    /// Returns the team id when this is a team applicant.
    #[must_use]
    pub const fn team_id(&self) -> Option<i64> {
        match self {
            Self::User(_) => None,
            Self::Team(id) => Some(*id),
        }
    }

    /// Rebuilds an applicant from the two mutually exclusive storage columns.
    ///
    /// Returns `None` unless exactly one of the two ids is present.
    #[must_use]
    pub const fn from_columns(user_id: Option<i64>, team_id: Option<i64>) -> Option<Self> {
        match (user_id, team_id) {
            (Some(id), None) => Some(Self::User(id)),
            (None, Some(id)) => Some(Self::Team(id)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Applicant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(id) => write!(f, "user {id}"),
            Self::Team(id) => write!(f, "team {id}"),
        }
    }
}

/// Decision state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Awaiting an organizer decision.
    Pending,
    /// Accepted by the organizer.
    Approved,
    /// Declined by the organizer.
    Rejected,
}

impl ApplicationStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true once an organizer has decided the application.
    #[must_use]
    pub const fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Validates a decision transition out of this status.
    ///
    /// Only `pending -> approved` and `pending -> rejected` are permitted.
    ///
    /// # Arguments
    ///
    /// * `application_id` - The application being decided, for error reporting
    /// * `new_status` - The requested status
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ApplicationAlreadyDecided` if the application is
    /// no longer pending, or `DomainError::InvalidApplicationStatus` if the
    /// requested status is `pending`.
    pub fn validate_transition(
        &self,
        application_id: i64,
        new_status: Self,
    ) -> Result<(), DomainError> {
        if self.is_decided() {
            return Err(DomainError::ApplicationAlreadyDecided {
                application_id,
                status: *self,
            });
        }
        if new_status == Self::Pending {
            return Err(DomainError::InvalidApplicationStatus(
                new_status.as_str().to_string(),
            ));
        }
        Ok(())
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidApplicationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// The application's canonical identifier.
    pub id: i64,
    /// The competition applied to.
    pub competition_id: i64,
    /// Who the application is for.
    pub applicant: Applicant,
    /// Who filed it. Equal to the applicant for individuals, the captain for teams.
    pub submitted_by_user_id: i64,
    /// Current decision state.
    pub status: ApplicationStatus,
    /// Optional free text supplied with the application.
    pub notes: Option<String>,
    pub submitted_at: OffsetDateTime,
    pub decided_at: Option<OffsetDateTime>,
    pub decided_by_user_id: Option<i64>,
}

impl Application {
    /// Returns whether this application was filed for the given identity.
    #[must_use]
    pub fn is_for(&self, applicant: Applicant) -> bool {
        self.applicant == applicant
    }
}
