// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::phase::{Phase, StatusResolver};
use crate::types::{CompetitionType, User};
use time::OffsetDateTime;

/// The four time boundaries of a competition.
///
/// Boundaries are validated to be in non-strict ascending order at
/// construction; out-of-order input is rejected, never corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompetitionSchedule {
    registration_start: OffsetDateTime,
    registration_end: OffsetDateTime,
    competition_start: OffsetDateTime,
    competition_end: OffsetDateTime,
}

impl CompetitionSchedule {
    /// Creates a validated schedule.
    ///
    /// # Arguments
    ///
    /// * `registration_start` - First instant applications are accepted
    /// * `registration_end` - Last instant applications are accepted
    /// * `competition_start` - First instant of the competition
    /// * `competition_end` - Last instant of the competition
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSchedule` if any boundary precedes the one before it.
    pub fn new(
        registration_start: OffsetDateTime,
        registration_end: OffsetDateTime,
        competition_start: OffsetDateTime,
        competition_end: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if registration_end < registration_start {
            return Err(DomainError::InvalidSchedule {
                reason: String::from("registration end precedes registration start"),
            });
        }
        if competition_start < registration_end {
            return Err(DomainError::InvalidSchedule {
                reason: String::from("competition start precedes registration end"),
            });
        }
        if competition_end < competition_start {
            return Err(DomainError::InvalidSchedule {
                reason: String::from("competition end precedes competition start"),
            });
        }

        Ok(Self {
            registration_start,
            registration_end,
            competition_start,
            competition_end,
        })
    }

    #[must_use]
    pub const fn registration_start(&self) -> OffsetDateTime {
        self.registration_start
    }

    #[must_use]
    pub const fn registration_end(&self) -> OffsetDateTime {
        self.registration_end
    }

    #[must_use]
    pub const fn competition_start(&self) -> OffsetDateTime {
        self.competition_start
    }

    #[must_use]
    pub const fn competition_end(&self) -> OffsetDateTime {
        self.competition_end
    }
}

/// The editable fields of a competition, as supplied by an organizer.
///
/// A draft is validated with [`crate::validate_competition_draft`] before
/// it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionDraft {
    pub name: String,
    pub description: Option<String>,
    pub competition_type: CompetitionType,
    /// Present if and only if the competition is regional.
    pub region_id: Option<i64>,
    pub schedule: CompetitionSchedule,
    /// Informational cap on applicants. Must be positive when present.
    pub max_applicants: Option<i64>,
}

/// A stored competition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competition {
    /// The competition's canonical identifier.
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub competition_type: CompetitionType,
    pub region_id: Option<i64>,
    pub schedule: CompetitionSchedule,
    pub max_applicants: Option<i64>,
    /// The user who created the competition and decides its applications.
    pub organizer_id: i64,
    /// Manually set visibility flag. Unpublished competitions are drafts.
    pub published: bool,
    /// Sticky terminal phase, written once when results are published.
    pub finalized_override: Option<Phase>,
}

impl Competition {
    /// Resolves the competition's phase at the given instant.
    #[must_use]
    pub fn phase_at(&self, now: OffsetDateTime) -> Phase {
        StatusResolver::resolve(now, &self.schedule, self.finalized_override)
    }

    /// Resolves the phase from the schedule alone, ignoring the override.
    #[must_use]
    pub fn time_phase_at(&self, now: OffsetDateTime) -> Phase {
        StatusResolver::resolve_time_phase(now, &self.schedule)
    }

    /// Returns true once results have been published.
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        self.finalized_override.is_some()
    }

    /// Returns whether the given user organizes this competition.
    #[must_use]
    pub const fn is_organized_by(&self, user_id: i64) -> bool {
        self.organizer_id == user_id
    }

    /// Returns whether the competition is visible to the given viewer.
    ///
    /// Published competitions are visible to everyone. Drafts are visible
    /// to their organizer and to federation administrators.
    #[must_use]
    pub const fn is_visible_to(&self, viewer: &User) -> bool {
        self.published || self.is_organized_by(viewer.id) || viewer.role.is_federation_admin()
    }
}
