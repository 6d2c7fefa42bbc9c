// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use fsp_comp_domain::{
    Applicant, Application, ApplicationStatus, Competition, DomainError, Phase, ResultEntry, User,
};
use std::collections::HashSet;
use time::OffsetDateTime;

/// A result row ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResult {
    pub competition_id: i64,
    pub application_id: i64,
    pub applicant: Applicant,
    pub place: Option<i64>,
    pub score: Option<f64>,
    pub result_data: Option<String>,
}

/// Everything the one-shot finalization transaction writes.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizationPlan {
    pub competition_id: i64,
    pub results: Vec<NewResult>,
    pub recorded_by_user_id: i64,
    pub finalized_at: OffsetDateTime,
    /// The sticky phase written to the competition.
    pub phase: Phase,
}

/// Plans the publication of final results.
///
/// All preconditions are checked before anything is written. An empty
/// batch is permitted.
///
/// # Arguments
///
/// * `acting` - The verified acting identity
/// * `competition` - The competition being finalized
/// * `applications` - The competition's applications
/// * `entries` - The organizer's result lines
/// * `now` - The current instant
///
/// # Errors
///
/// Returns, in order of precedence:
/// - `AlreadyFinalized` if results are already published
/// - `NotOrganizer` if the acting user does not organize the competition
/// - `Validation(CompetitionNotPublished)` if the competition is a draft
/// - `NotFinished` if the time-derived phase is not `finished`
/// - `Validation(DuplicateResultEntry)` if an application repeats
/// - `UnknownApplication` if an entry references a foreign application
/// - `Validation(ApplicationNotApproved)` if an entry's application is not approved
/// - `Validation(InvalidPlace | NonFiniteScore)` for malformed values
pub fn plan_finalization(
    acting: &User,
    competition: &Competition,
    applications: &[Application],
    entries: &[ResultEntry],
    now: OffsetDateTime,
) -> Result<FinalizationPlan, CoreError> {
    if competition.is_finalized() {
        return Err(CoreError::AlreadyFinalized {
            competition_id: competition.id,
        });
    }

    if !competition.is_organized_by(acting.id) {
        return Err(CoreError::NotOrganizer {
            competition_id: competition.id,
            user_id: acting.id,
        });
    }

    if !competition.published {
        return Err(DomainError::CompetitionNotPublished {
            competition_id: competition.id,
        }
        .into());
    }

    let phase: Phase = competition.time_phase_at(now);
    if phase != Phase::Finished {
        return Err(CoreError::NotFinished {
            competition_id: competition.id,
            phase,
        });
    }

    let mut seen: HashSet<i64> = HashSet::with_capacity(entries.len());
    let mut results: Vec<NewResult> = Vec::with_capacity(entries.len());

    for entry in entries {
        if !seen.insert(entry.application_id) {
            return Err(DomainError::DuplicateResultEntry {
                application_id: entry.application_id,
            }
            .into());
        }

        let application: &Application = applications
            .iter()
            .find(|a| a.id == entry.application_id && a.competition_id == competition.id)
            .ok_or(CoreError::UnknownApplication {
                application_id: entry.application_id,
            })?;

        if application.status != ApplicationStatus::Approved {
            return Err(DomainError::ApplicationNotApproved {
                application_id: application.id,
                status: application.status,
            }
            .into());
        }

        entry.validate()?;

        results.push(NewResult {
            competition_id: competition.id,
            application_id: application.id,
            applicant: application.applicant,
            place: entry.place,
            score: entry.score,
            result_data: entry.result_data.clone(),
        });
    }

    Ok(FinalizationPlan {
        competition_id: competition.id,
        results,
        recorded_by_user_id: acting.id,
        finalized_at: now,
        phase: Phase::ResultsPublished,
    })
}
