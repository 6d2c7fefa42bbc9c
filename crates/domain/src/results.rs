// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::application::Applicant;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One line of the final standings as supplied by the organizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// The approved application the result belongs to.
    pub application_id: i64,
    /// Final place. Must be a positive integer when present.
    pub place: Option<i64>,
    /// Final score. Must be finite when present; may be negative.
    pub score: Option<f64>,
    /// Free-form result details.
    pub result_data: Option<String>,
}

impl ResultEntry {
    /// Validates the place and score of this entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPlace` if the place is not a positive
    /// integer that fits the storage column, or `DomainError::NonFiniteScore`
    /// if the score is NaN or infinite.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(place) = self.place.filter(|p| *p < 1 || *p > i64::from(i32::MAX)) {
            return Err(DomainError::InvalidPlace { place });
        }

        if self.score.is_some_and(|score| !score.is_finite()) {
            return Err(DomainError::NonFiniteScore {
                application_id: self.application_id,
            });
        }

        Ok(())
    }
}

/// A recorded result. Immutable once written.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionResult {
    pub id: i64,
    pub competition_id: i64,
    pub application_id: i64,
    /// Mirrors the applicant of the approved application.
    pub applicant: Applicant,
    pub place: Option<i64>,
    pub score: Option<f64>,
    pub result_data: Option<String>,
    pub recorded_at: OffsetDateTime,
    pub recorded_by_user_id: i64,
}
