// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    AFTER_COMPETITION, BEFORE_COMPETITION, create_test_application, create_test_competition,
    create_test_organizer,
};
use crate::{CoreError, Decision, DecisionPlan, plan_decision};
use fsp_comp_domain::{
    Applicant, Application, ApplicationStatus, Competition, DomainError, Phase, Role, User,
};

#[test]
fn test_plan_decision_approves_pending_application() {
    let competition: Competition = create_test_competition();
    let organizer: User = create_test_organizer();
    let application: Application =
        create_test_application(5, Applicant::User(1), ApplicationStatus::Pending);

    let plan: DecisionPlan = plan_decision(
        &organizer,
        &competition,
        &application,
        Decision::Approve,
        BEFORE_COMPETITION,
    )
    .unwrap();
    assert_eq!(plan.application_id, 5);
    assert_eq!(plan.expected_status, ApplicationStatus::Pending);
    assert_eq!(plan.new_status, ApplicationStatus::Approved);
    assert_eq!(plan.decided_by_user_id, organizer.id);
    assert_eq!(plan.decided_at, BEFORE_COMPETITION);
}

#[test]
fn test_plan_decision_requires_organizer() {
    let competition: Competition = create_test_competition();
    let admin: User = User::new(999, Role::FspAdmin, None);
    let application: Application =
        create_test_application(5, Applicant::User(1), ApplicationStatus::Pending);

    let result: Result<DecisionPlan, CoreError> = plan_decision(
        &admin,
        &competition,
        &application,
        Decision::Reject,
        BEFORE_COMPETITION,
    );
    assert_eq!(
        result,
        Err(CoreError::NotOrganizer {
            competition_id: 1,
            user_id: 999,
        })
    );
}

#[test]
fn test_plan_decision_rejects_already_decided() {
    let competition: Competition = create_test_competition();
    let organizer: User = create_test_organizer();
    let application: Application =
        create_test_application(5, Applicant::User(1), ApplicationStatus::Approved);

    let result: Result<DecisionPlan, CoreError> = plan_decision(
        &organizer,
        &competition,
        &application,
        Decision::Reject,
        BEFORE_COMPETITION,
    );
    assert_eq!(
        result,
        Err(CoreError::Validation(
            DomainError::ApplicationAlreadyDecided {
                application_id: 5,
                status: ApplicationStatus::Approved,
            }
        ))
    );
}

#[test]
fn test_plan_decision_refused_after_finalization() {
    let mut competition: Competition = create_test_competition();
    competition.finalized_override = Some(Phase::ResultsPublished);
    let organizer: User = create_test_organizer();
    let application: Application =
        create_test_application(5, Applicant::User(1), ApplicationStatus::Pending);

    let result: Result<DecisionPlan, CoreError> = plan_decision(
        &organizer,
        &competition,
        &application,
        Decision::Approve,
        AFTER_COMPETITION,
    );
    assert_eq!(
        result,
        Err(CoreError::Validation(DomainError::CompetitionFinalized {
            competition_id: 1,
        }))
    );
}
