// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    DURING_REGISTRATION, create_test_competition, create_test_draft, create_test_organizer,
};
use crate::{
    CoreError, NewCompetition, plan_create_competition, plan_publish_competition,
    plan_update_competition,
};
use fsp_comp_domain::{Competition, CompetitionDraft, DomainError, Phase, Role, User};

#[test]
fn test_plan_create_competition_sets_organizer() {
    let organizer: User = create_test_organizer();
    let plan: NewCompetition =
        plan_create_competition(&organizer, create_test_draft(), false, DURING_REGISTRATION)
            .unwrap();
    assert_eq!(plan.organizer_id, organizer.id);
    assert!(!plan.published);
}

#[test]
fn test_plan_create_competition_forbidden_for_athletes() {
    let athlete: User = User::new(1, Role::Athlete, Some(7));
    let result: Result<NewCompetition, CoreError> =
        plan_create_competition(&athlete, create_test_draft(), true, DURING_REGISTRATION);
    assert!(matches!(
        result,
        Err(CoreError::Forbidden {
            role: Role::Athlete,
            ..
        })
    ));
}

#[test]
fn test_plan_create_competition_validates_draft() {
    let admin: User = User::new(2, Role::FspAdmin, None);
    let mut draft: CompetitionDraft = create_test_draft();
    draft.region_id = None;

    let result: Result<NewCompetition, CoreError> =
        plan_create_competition(&admin, draft, false, DURING_REGISTRATION);
    assert_eq!(result, Err(CoreError::Validation(DomainError::MissingRegion)));
}

#[test]
fn test_plan_update_competition_only_while_unpublished() {
    let organizer: User = create_test_organizer();
    let mut competition: Competition = create_test_competition();

    let result: Result<CompetitionDraft, CoreError> =
        plan_update_competition(&organizer, &competition, create_test_draft());
    assert_eq!(
        result,
        Err(CoreError::Validation(DomainError::CompetitionPublished {
            competition_id: 1,
        }))
    );

    competition.published = false;
    assert!(plan_update_competition(&organizer, &competition, create_test_draft()).is_ok());
}

#[test]
fn test_plan_publish_competition_twice_is_an_error() {
    let organizer: User = create_test_organizer();
    let mut competition: Competition = create_test_competition();
    competition.published = false;
    assert!(plan_publish_competition(&organizer, &competition).is_ok());

    competition.published = true;
    assert_eq!(
        plan_publish_competition(&organizer, &competition),
        Err(CoreError::Validation(DomainError::AlreadyPublished {
            competition_id: 1,
        }))
    );
}

#[test]
fn test_plan_publish_competition_requires_organizer() {
    let other: User = User::new(5, Role::RegionalRep, Some(7));
    let mut competition: Competition = create_test_competition();
    competition.published = false;
    assert!(matches!(
        plan_publish_competition(&other, &competition),
        Err(CoreError::NotOrganizer { .. })
    ));
}

#[test]
fn test_finalized_competition_is_read_only() {
    let organizer: User = create_test_organizer();
    let mut competition: Competition = create_test_competition();
    competition.published = false;
    competition.finalized_override = Some(Phase::ResultsPublished);

    let finalized: CoreError = CoreError::Validation(DomainError::CompetitionFinalized {
        competition_id: 1,
    });
    assert_eq!(
        plan_update_competition(&organizer, &competition, create_test_draft()),
        Err(finalized.clone())
    );
    assert_eq!(
        plan_publish_competition(&organizer, &competition),
        Err(finalized)
    );
}
