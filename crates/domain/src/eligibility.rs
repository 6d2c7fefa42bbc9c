// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application eligibility rules.
//!
//! Decides whether an acting user may submit an application for a given
//! applicant identity. The rules are evaluated in a fixed order and the
//! first failing rule determines the reason. Evaluation has no side effects;
//! the uniqueness rule here is advisory and the datastore has the final say.

use crate::application::{Applicant, Application};
use crate::competition::Competition;
use crate::phase::Phase;
use crate::types::{Team, User};
use serde::{Deserialize, Serialize};

/// The identity an application would be filed for, with the data the rules need.
#[derive(Debug, Clone, Copy)]
pub enum ApplicantCandidate<'a> {
    /// The acting user applies for themselves.
    Individual,
    /// The acting user applies on behalf of a team.
    Team(&'a Team),
}

impl ApplicantCandidate<'_> {
    /// Returns the applicant identity this candidate resolves to for the acting user.
    #[must_use]
    pub const fn applicant_for(&self, acting: &User) -> Applicant {
        match self {
            Self::Individual => Applicant::User(acting.id),
            Self::Team(team) => Applicant::Team(team.id),
        }
    }
}

/// Why an application may not be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IneligibilityReason {
    /// The competition is still a draft.
    NotPublished,
    /// The competition is not accepting applications in its current phase.
    Phase {
        /// The phase the competition is in.
        phase: Phase,
    },
    /// An individual's region does not match a regional competition's region.
    RegionMismatch {
        /// The competition's region.
        competition_region_id: Option<i64>,
        /// The applicant's region, if any.
        applicant_region_id: Option<i64>,
    },
    /// Only a team's captain may apply on its behalf.
    NotCaptain,
    /// The team has no members.
    EmptyTeam,
    /// This applicant already has an application for the competition.
    AlreadyApplied,
}

impl IneligibilityReason {
    /// Returns the stable machine-readable code of the reason.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotPublished => "not_published",
            Self::Phase { .. } => "phase",
            Self::RegionMismatch { .. } => "region_mismatch",
            Self::NotCaptain => "not_captain",
            Self::EmptyTeam => "empty_team",
            Self::AlreadyApplied => "already_applied",
        }
    }
}

impl std::fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPublished => write!(f, "The competition is not published"),
            Self::Phase { phase } => {
                write!(f, "Applications are not accepted while the competition is {phase}")
            }
            Self::RegionMismatch {
                competition_region_id,
                applicant_region_id,
            } => match (competition_region_id, applicant_region_id) {
                (Some(expected), Some(actual)) => write!(
                    f,
                    "Applicant region {actual} does not match competition region {expected}"
                ),
                (Some(expected), None) => write!(
                    f,
                    "Applicant has no region; competition is restricted to region {expected}"
                ),
                _ => write!(f, "Applicant region does not match the competition region"),
            },
            Self::NotCaptain => write!(f, "Only the team captain may apply for the team"),
            Self::EmptyTeam => write!(f, "The team has no members"),
            Self::AlreadyApplied => {
                write!(f, "An application for this applicant already exists")
            }
        }
    }
}

/// Outcome of an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Eligibility {
    Allowed,
    NotEligible(IneligibilityReason),
}

impl Eligibility {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Converts the outcome into a `Result`, yielding the reason on refusal.
    ///
    /// # Errors
    ///
    /// Returns the `IneligibilityReason` when the outcome is `NotEligible`.
    pub const fn into_result(self) -> Result<(), IneligibilityReason> {
        match self {
            Self::Allowed => Ok(()),
            Self::NotEligible(reason) => Err(reason),
        }
    }
}

/// Evaluates the application eligibility rules.
pub struct EligibilityChecker;

impl EligibilityChecker {
    /// Decides whether `acting` may submit an application for `candidate`.
    ///
    /// Rules, first failure wins:
    /// 1. the competition is published
    /// 2. `phase` is `registration_open`
    /// 3. individuals on a regional competition share its region
    /// 4. teams apply through their captain
    /// 5. teams have at least one member
    /// 6. the applicant has no existing application on the competition
    ///
    /// The rules do not depend on the acting user's role. A team's region
    /// is not screened.
    ///
    /// # Arguments
    ///
    /// * `acting` - The verified acting identity
    /// * `candidate` - Individual, or the team being applied for
    /// * `competition` - The target competition
    /// * `phase` - The competition's current phase
    /// * `existing` - Applications already on file for the competition
    #[must_use]
    pub fn can_apply(
        acting: &User,
        candidate: ApplicantCandidate<'_>,
        competition: &Competition,
        phase: Phase,
        existing: &[Application],
    ) -> Eligibility {
        match Self::check(acting, candidate, competition, phase, existing) {
            Ok(()) => Eligibility::Allowed,
            Err(reason) => Eligibility::NotEligible(reason),
        }
    }

    fn check(
        acting: &User,
        candidate: ApplicantCandidate<'_>,
        competition: &Competition,
        phase: Phase,
        existing: &[Application],
    ) -> Result<(), IneligibilityReason> {
        if !competition.published {
            return Err(IneligibilityReason::NotPublished);
        }

        if !phase.accepts_applications() {
            return Err(IneligibilityReason::Phase { phase });
        }

        match candidate {
            ApplicantCandidate::Individual => {
                // A missing region on either side never matches.
                if competition.competition_type.is_regional()
                    && (acting.region_id.is_none() || acting.region_id != competition.region_id)
                {
                    return Err(IneligibilityReason::RegionMismatch {
                        competition_region_id: competition.region_id,
                        applicant_region_id: acting.region_id,
                    });
                }
            }
            ApplicantCandidate::Team(team) => {
                if !team.is_captain(acting.id) {
                    return Err(IneligibilityReason::NotCaptain);
                }
                if !team.has_members() {
                    return Err(IneligibilityReason::EmptyTeam);
                }
            }
        }

        let applicant: Applicant = candidate.applicant_for(acting);
        if existing.iter().any(|application| {
            application.competition_id == competition.id && application.is_for(applicant)
        }) {
            return Err(IneligibilityReason::AlreadyApplied);
        }

        Ok(())
    }
}
