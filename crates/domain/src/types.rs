// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// The role a federation user holds.
///
/// Roles form a closed set. Authorization decisions go through the
/// capability predicates below rather than comparing role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// An athlete. May apply individually or captain a team.
    Athlete,
    /// A regional representative. May organize competitions.
    RegionalRep,
    /// A federation administrator. May organize competitions and sees all drafts.
    FspAdmin,
}

impl Role {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Athlete => "athlete",
            Self::RegionalRep => "regional_rep",
            Self::FspAdmin => "fsp_admin",
        }
    }

    /// Returns whether this role may create and manage competitions.
    #[must_use]
    pub const fn can_organize(&self) -> bool {
        matches!(self, Self::RegionalRep | Self::FspAdmin)
    }

    /// Returns whether this role is the federation administrator.
    #[must_use]
    pub const fn is_federation_admin(&self) -> bool {
        matches!(self, Self::FspAdmin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "athlete" => Ok(Self::Athlete),
            "regional_rep" => Ok(Self::RegionalRep),
            "fsp_admin" => Ok(Self::FspAdmin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A verified identity as supplied by the identity provider.
///
/// Every operation receives the acting user explicitly; there is no
/// ambient session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's canonical identifier.
    pub id: i64,
    /// The user's role.
    pub role: Role,
    /// The region the user belongs to, if any.
    pub region_id: Option<i64>,
}

impl User {
    /// Creates a new `User`.
    #[must_use]
    pub const fn new(id: i64, role: Role, region_id: Option<i64>) -> Self {
        Self {
            id,
            role,
            region_id,
        }
    }
}

/// A team that may apply to competitions through its captain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// The team's canonical identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// The only member allowed to submit on the team's behalf.
    pub captain_user_id: i64,
    /// Member user ids. The captain counts as a member when listed here.
    pub members: BTreeSet<i64>,
}

impl Team {
    /// Creates a new `Team`.
    #[must_use]
    pub const fn new(
        id: i64,
        name: String,
        captain_user_id: i64,
        members: BTreeSet<i64>,
    ) -> Self {
        Self {
            id,
            name,
            captain_user_id,
            members,
        }
    }

    /// Returns whether the given user is the team's captain.
    #[must_use]
    pub const fn is_captain(&self, user_id: i64) -> bool {
        self.captain_user_id == user_id
    }

    /// Returns whether the team has at least one member.
    #[must_use]
    pub fn has_members(&self) -> bool {
        !self.members.is_empty()
    }
}

/// The kind of competition, which determines regional screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionType {
    /// Anyone may apply.
    Open,
    /// Individual applicants must belong to the competition's region.
    Regional,
    /// Federation-wide; anyone may apply.
    Federal,
}

impl CompetitionType {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Regional => "regional",
            Self::Federal => "federal",
        }
    }

    /// Returns whether competitions of this type are bound to a region.
    #[must_use]
    pub const fn is_regional(&self) -> bool {
        matches!(self, Self::Regional)
    }
}

impl FromStr for CompetitionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "regional" => Ok(Self::Regional),
            "federal" => Ok(Self::Federal),
            _ => Err(DomainError::InvalidCompetitionType(s.to_string())),
        }
    }
}

impl std::fmt::Display for CompetitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
