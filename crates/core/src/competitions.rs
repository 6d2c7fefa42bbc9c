// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use fsp_comp_domain::{Competition, CompetitionDraft, DomainError, User, validate_competition_draft};
use time::OffsetDateTime;

/// A competition ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompetition {
    pub draft: CompetitionDraft,
    pub organizer_id: i64,
    pub published: bool,
    pub created_at: OffsetDateTime,
}

/// Plans the creation of a competition.
///
/// The acting user becomes the organizer.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the acting role cannot organize
/// competitions, or `CoreError::Validation` if the draft is invalid.
pub fn plan_create_competition(
    acting: &User,
    draft: CompetitionDraft,
    publish: bool,
    now: OffsetDateTime,
) -> Result<NewCompetition, CoreError> {
    if !acting.role.can_organize() {
        return Err(CoreError::Forbidden {
            action: String::from("create competitions"),
            role: acting.role,
        });
    }

    validate_competition_draft(&draft)?;

    Ok(NewCompetition {
        draft,
        organizer_id: acting.id,
        published: publish,
        created_at: now,
    })
}

/// Plans an edit of an unpublished competition.
///
/// # Errors
///
/// Returns an error if the acting user is not the organizer, results are
/// already published, the competition is already published, or the new
/// draft is invalid.
pub fn plan_update_competition(
    acting: &User,
    competition: &Competition,
    draft: CompetitionDraft,
) -> Result<CompetitionDraft, CoreError> {
    require_organizer(acting, competition)?;
    require_not_finalized(competition)?;

    if competition.published {
        return Err(DomainError::CompetitionPublished {
            competition_id: competition.id,
        }
        .into());
    }

    validate_competition_draft(&draft)?;
    Ok(draft)
}

/// Plans publishing a competition.
///
/// # Errors
///
/// Returns an error if the acting user is not the organizer, results are
/// already published, or the competition is already published.
pub fn plan_publish_competition(acting: &User, competition: &Competition) -> Result<(), CoreError> {
    require_organizer(acting, competition)?;
    require_not_finalized(competition)?;

    if competition.published {
        return Err(DomainError::AlreadyPublished {
            competition_id: competition.id,
        }
        .into());
    }

    Ok(())
}

fn require_organizer(acting: &User, competition: &Competition) -> Result<(), CoreError> {
    if competition.is_organized_by(acting.id) {
        Ok(())
    } else {
        Err(CoreError::NotOrganizer {
            competition_id: competition.id,
            user_id: acting.id,
        })
    }
}

fn require_not_finalized(competition: &Competition) -> Result<(), CoreError> {
    if competition.is_finalized() {
        return Err(DomainError::CompetitionFinalized {
            competition_id: competition.id,
        }
        .into());
    }
    Ok(())
}
