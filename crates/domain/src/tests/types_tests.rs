// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_team;
use crate::{Applicant, ApplicationStatus, CompetitionType, DomainError, Role, Team};
use std::str::FromStr;

#[test]
fn test_role_capabilities() {
    assert!(!Role::Athlete.can_organize());
    assert!(Role::RegionalRep.can_organize());
    assert!(Role::FspAdmin.can_organize());

    assert!(!Role::Athlete.is_federation_admin());
    assert!(!Role::RegionalRep.is_federation_admin());
    assert!(Role::FspAdmin.is_federation_admin());
}

#[test]
fn test_role_parsing() {
    assert_eq!(Role::from_str("regional_rep").unwrap(), Role::RegionalRep);
    assert!(matches!(
        Role::from_str("coach"),
        Err(DomainError::InvalidRole(_))
    ));
}

#[test]
fn test_competition_type_parsing() {
    assert_eq!(
        CompetitionType::from_str("federal").unwrap(),
        CompetitionType::Federal
    );
    assert!(CompetitionType::Regional.is_regional());
    assert!(!CompetitionType::Open.is_regional());
    assert!(matches!(
        CompetitionType::from_str("Regional"),
        Err(DomainError::InvalidCompetitionType(_))
    ));
}

#[test]
fn test_team_captain_is_member_only_when_listed() {
    let team: Team = create_test_team(1, &[2]);
    assert!(team.is_captain(1));
    assert!(!team.is_captain(2));
    assert!(team.has_members());
    assert!(!team.members.contains(&1));

    let empty: Team = create_test_team(1, &[]);
    assert!(!empty.has_members());
}

#[test]
fn test_applicant_from_columns_requires_exactly_one() {
    assert_eq!(
        Applicant::from_columns(Some(3), None),
        Some(Applicant::User(3))
    );
    assert_eq!(
        Applicant::from_columns(None, Some(4)),
        Some(Applicant::Team(4))
    );
    assert_eq!(Applicant::from_columns(Some(3), Some(4)), None);
    assert_eq!(Applicant::from_columns(None, None), None);
}

#[test]
fn test_application_status_transitions() {
    assert!(
        ApplicationStatus::Pending
            .validate_transition(1, ApplicationStatus::Approved)
            .is_ok()
    );
    assert!(
        ApplicationStatus::Pending
            .validate_transition(1, ApplicationStatus::Rejected)
            .is_ok()
    );
    assert!(matches!(
        ApplicationStatus::Pending.validate_transition(1, ApplicationStatus::Pending),
        Err(DomainError::InvalidApplicationStatus(_))
    ));
    assert_eq!(
        ApplicationStatus::Approved.validate_transition(1, ApplicationStatus::Rejected),
        Err(DomainError::ApplicationAlreadyDecided {
            application_id: 1,
            status: ApplicationStatus::Approved,
        })
    );
    assert!(
        ApplicationStatus::Rejected
            .validate_transition(1, ApplicationStatus::Approved)
            .is_err()
    );
}
