// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Competition lifecycle phases.
//!
//! Phases are derived from the competition schedule and the current time.
//! They are never stored, with the single exception of the sticky terminal
//! override written when results are published.

use crate::competition::CompetitionSchedule;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The lifecycle phase of a competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Registration has not started.
    Upcoming,
    /// Applications are accepted.
    RegistrationOpen,
    /// Registration ended; the competition has not started.
    RegistrationClosed,
    /// The competition is running.
    InProgress,
    /// The competition ended; results may be recorded.
    Finished,
    /// Results are published. Terminal.
    ResultsPublished,
}

impl Phase {
    /// Returns the string representation of the phase.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::RegistrationOpen => "registration_open",
            Self::RegistrationClosed => "registration_closed",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
            Self::ResultsPublished => "results_published",
        }
    }

    /// Returns true if applications may be submitted in this phase.
    #[must_use]
    pub const fn accepts_applications(&self) -> bool {
        matches!(self, Self::RegistrationOpen)
    }

    /// Returns true if this phase can only be reached through the sticky override.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::ResultsPublished)
    }
}

impl FromStr for Phase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "registration_open" => Ok(Self::RegistrationOpen),
            "registration_closed" => Ok(Self::RegistrationClosed),
            "in_progress" => Ok(Self::InProgress),
            "finished" => Ok(Self::Finished),
            "results_published" => Ok(Self::ResultsPublished),
            _ => Err(DomainError::InvalidPhase(s.to_string())),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps a schedule and the current time to a lifecycle phase.
///
/// Pure and deterministic. All boundary comparisons are inclusive on the
/// `registration_open` and `in_progress` side. When degenerate equal
/// boundaries would match two phases, the earlier phase wins.
pub struct StatusResolver;

impl StatusResolver {
    /// Resolves the phase of a competition.
    ///
    /// A present override is returned unconditionally and never recomputed.
    ///
    /// # Arguments
    ///
    /// * `now` - The current instant
    /// * `schedule` - The competition's four ordered boundaries
    /// * `finalized_override` - The persisted sticky phase, if any
    #[must_use]
    pub fn resolve(
        now: OffsetDateTime,
        schedule: &CompetitionSchedule,
        finalized_override: Option<Phase>,
    ) -> Phase {
        finalized_override.unwrap_or_else(|| Self::resolve_time_phase(now, schedule))
    }

    /// Resolves the phase from time alone, ignoring any override.
    #[must_use]
    pub fn resolve_time_phase(now: OffsetDateTime, schedule: &CompetitionSchedule) -> Phase {
        if now < schedule.registration_start() {
            Phase::Upcoming
        } else if now <= schedule.registration_end() {
            Phase::RegistrationOpen
        } else if now < schedule.competition_start() {
            Phase::RegistrationClosed
        } else if now <= schedule.competition_end() {
            Phase::InProgress
        } else {
            Phase::Finished
        }
    }
}
