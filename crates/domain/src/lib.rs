// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod application;
mod competition;
mod eligibility;
mod error;
mod phase;
mod results;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use application::{Applicant, Application, ApplicationStatus};
pub use competition::{Competition, CompetitionDraft, CompetitionSchedule};
pub use eligibility::{ApplicantCandidate, Eligibility, EligibilityChecker, IneligibilityReason};
pub use phase::{Phase, StatusResolver};
pub use results::{CompetitionResult, ResultEntry};

// Re-export public types
pub use error::DomainError;
pub use types::{CompetitionType, Role, Team, User};
pub use validation::{
    format_timestamp, parse_timestamp, validate_competition_draft, validate_team_name,
};
