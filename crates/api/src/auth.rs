// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization checks for read paths and team management.
//!
//! Transition rules (who may create, publish, decide, finalize) are
//! enforced by the core planners. The checks here gate what a verified
//! identity may see and which teams it may change.

use fsp_comp_domain::{Application, Competition, Team, User};

use crate::error::{ApiError, not_found};

/// Authorization service for enforcing visibility and ownership.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that a competition is visible to the viewer.
    ///
    /// Unpublished competitions are reported as missing to viewers who may
    /// not see them.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the competition is hidden.
    pub fn authorize_view_competition(
        viewer: &User,
        competition: &Competition,
    ) -> Result<(), ApiError> {
        if competition.is_visible_to(viewer) {
            Ok(())
        } else {
            Err(not_found("competition", competition.id))
        }
    }

    /// Checks that the viewer may list every application of a competition.
    ///
    /// Only the organizer and federation administrators may.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` otherwise.
    pub fn authorize_list_applications(
        viewer: &User,
        competition: &Competition,
    ) -> Result<(), ApiError> {
        if competition.is_organized_by(viewer.id) || viewer.role.is_federation_admin() {
            return Ok(());
        }
        Err(ApiError::Forbidden {
            action: String::from("list applications"),
            message: format!(
                "only the organizer of competition {} or a federation admin may",
                competition.id
            ),
        })
    }

    /// Checks that the viewer may see a single application.
    ///
    /// The submitter, the individual applicant, the organizer and
    /// federation administrators may.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` otherwise.
    pub fn authorize_view_application(
        viewer: &User,
        application: &Application,
        competition: &Competition,
    ) -> Result<(), ApiError> {
        let allowed: bool = application.submitted_by_user_id == viewer.id
            || application.applicant.user_id() == Some(viewer.id)
            || competition.is_organized_by(viewer.id)
            || viewer.role.is_federation_admin();
        if allowed {
            return Ok(());
        }
        Err(ApiError::Forbidden {
            action: String::from("view application"),
            message: format!(
                "user {} is not a party to application {}",
                viewer.id, application.id
            ),
        })
    }

    /// Checks that the acting user captains the team.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` otherwise.
    pub fn authorize_manage_team(acting: &User, team: &Team) -> Result<(), ApiError> {
        if team.is_captain(acting.id) {
            return Ok(());
        }
        Err(ApiError::Forbidden {
            action: String::from("manage team"),
            message: format!("only the captain of team {} may", team.id),
        })
    }
}
