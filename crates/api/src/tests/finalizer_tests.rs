// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fsp_comp::FixedClock;
use fsp_comp_domain::{Phase, ResultEntry, Role, User};

use super::helpers::{
    REGION_ID, TestContext, after_competition, create_test_context, create_test_user,
    during_competition, during_registration, individual_request,
};
use crate::{
    ApiError, ApplicationInfo, ApplicationRegistry, FinalizeResultsRequest, FinalizedReceipt,
    ListResultsResponse, ResultsFinalizer,
};

fn entry(application_id: i64, place: Option<i64>, score: Option<f64>) -> ResultEntry {
    ResultEntry {
        application_id,
        place,
        score,
        result_data: None,
    }
}

fn finalize_request(acting: &User, results: Vec<ResultEntry>) -> FinalizeResultsRequest {
    FinalizeResultsRequest {
        acting: acting.clone(),
        results,
    }
}

#[test]
fn test_finalize_returns_receipt_and_publishes_results() {
    let mut context: TestContext = create_test_context();
    let athlete: User = context.athlete.clone();
    let application: ApplicationInfo = context.create_approved_application(&athlete);
    let organizer: User = context.organizer.clone();
    let competition_id: i64 = context.competition_id;
    let clock: FixedClock = after_competition();
    let mut finalizer: ResultsFinalizer<'_> =
        ResultsFinalizer::new(&mut context.persistence, &clock);

    let receipt: FinalizedReceipt = finalizer
        .finalize(
            competition_id,
            &finalize_request(
                &organizer,
                vec![entry(application.application_id, Some(1), Some(42.0))],
            ),
        )
        .unwrap();

    assert_eq!(
        receipt,
        FinalizedReceipt {
            competition_id,
            results_recorded: 1,
            finalized_at: String::from("2025-01-20T00:00:00Z"),
            phase: Phase::ResultsPublished,
        }
    );

    let listed: ListResultsResponse = finalizer.list_results(&athlete, competition_id).unwrap();
    assert_eq!(listed.phase, Phase::ResultsPublished);
    assert_eq!(listed.results.len(), 1);
    assert_eq!(listed.results[0].place, Some(1));
    assert_eq!(listed.results[0].score, Some(42.0));
}

#[test]
fn test_second_finalize_fails_and_keeps_first_results() {
    let mut context: TestContext = create_test_context();
    let athlete: User = context.athlete.clone();
    let application: ApplicationInfo = context.create_approved_application(&athlete);
    let organizer: User = context.organizer.clone();
    let competition_id: i64 = context.competition_id;
    let clock: FixedClock = after_competition();
    let mut finalizer: ResultsFinalizer<'_> =
        ResultsFinalizer::new(&mut context.persistence, &clock);
    finalizer
        .finalize(
            competition_id,
            &finalize_request(
                &organizer,
                vec![entry(application.application_id, Some(1), None)],
            ),
        )
        .unwrap();

    let second: Result<FinalizedReceipt, ApiError> = finalizer.finalize(
        competition_id,
        &finalize_request(
            &organizer,
            vec![entry(application.application_id, Some(3), None)],
        ),
    );

    assert_eq!(second, Err(ApiError::AlreadyFinalized { competition_id }));
    let listed: ListResultsResponse = finalizer.list_results(&organizer, competition_id).unwrap();
    assert_eq!(listed.results.len(), 1);
    assert_eq!(listed.results[0].place, Some(1));
}

#[test]
fn test_already_finalized_takes_precedence_over_other_checks() {
    let mut context: TestContext = create_test_context();
    let athlete: User = context.athlete.clone();
    let organizer: User = context.organizer.clone();
    let competition_id: i64 = context.competition_id;
    let clock: FixedClock = after_competition();
    let mut finalizer: ResultsFinalizer<'_> =
        ResultsFinalizer::new(&mut context.persistence, &clock);
    finalizer
        .finalize(competition_id, &finalize_request(&organizer, Vec::new()))
        .unwrap();

    let result: Result<FinalizedReceipt, ApiError> = finalizer.finalize(
        competition_id,
        &finalize_request(&athlete, vec![entry(999, Some(0), Some(f64::NAN))]),
    );

    assert_eq!(result, Err(ApiError::AlreadyFinalized { competition_id }));
}

#[test]
fn test_finalize_requires_organizer() {
    let mut context: TestContext = create_test_context();
    let athlete: User = context.athlete.clone();
    let competition_id: i64 = context.competition_id;
    let clock: FixedClock = after_competition();
    let mut finalizer: ResultsFinalizer<'_> =
        ResultsFinalizer::new(&mut context.persistence, &clock);

    let result: Result<FinalizedReceipt, ApiError> =
        finalizer.finalize(competition_id, &finalize_request(&athlete, Vec::new()));

    assert_eq!(
        result,
        Err(ApiError::NotOrganizer {
            competition_id,
            user_id: athlete.id,
        })
    );
}

#[test]
fn test_finalize_requires_finished_competition() {
    let mut context: TestContext = create_test_context();
    let organizer: User = context.organizer.clone();
    let competition_id: i64 = context.competition_id;
    let clock: FixedClock = during_competition();
    let mut finalizer: ResultsFinalizer<'_> =
        ResultsFinalizer::new(&mut context.persistence, &clock);

    let result: Result<FinalizedReceipt, ApiError> =
        finalizer.finalize(competition_id, &finalize_request(&organizer, Vec::new()));

    assert_eq!(
        result,
        Err(ApiError::NotFinished {
            competition_id,
            phase: Phase::InProgress,
        })
    );
}

#[test]
fn test_finalize_rejects_bad_entries() {
    let mut context: TestContext = create_test_context();
    let athlete: User = context.athlete.clone();
    let second: User = create_test_user(
        &mut context.persistence,
        "Vera",
        Role::Athlete,
        Some(REGION_ID),
    );
    let application: ApplicationInfo = context.create_approved_application(&athlete);
    let pending: ApplicationInfo = {
        let clock: FixedClock = during_registration();
        let competition_id: i64 = context.competition_id;
        ApplicationRegistry::new(&mut context.persistence, &clock)
            .submit(competition_id, individual_request(&second))
            .unwrap()
    };
    let organizer: User = context.organizer.clone();
    let competition_id: i64 = context.competition_id;
    let clock: FixedClock = after_competition();
    let mut finalizer: ResultsFinalizer<'_> =
        ResultsFinalizer::new(&mut context.persistence, &clock);

    let cases: Vec<(Vec<ResultEntry>, &str)> = vec![
        (
            vec![
                entry(application.application_id, Some(1), None),
                entry(application.application_id, Some(2), None),
            ],
            "duplicate_result_entry",
        ),
        (
            vec![entry(pending.application_id, Some(1), None)],
            "application_not_approved",
        ),
        (
            vec![entry(application.application_id, Some(0), None)],
            "invalid_place",
        ),
        (
            vec![entry(application.application_id, None, Some(f64::INFINITY))],
            "non_finite_score",
        ),
    ];

    for (entries, expected_rule) in cases {
        let result: Result<FinalizedReceipt, ApiError> =
            finalizer.finalize(competition_id, &finalize_request(&organizer, entries));
        assert!(
            matches!(result, Err(ApiError::Validation { ref rule, .. }) if rule == expected_rule),
            "expected {expected_rule}, got {result:?}"
        );
    }

    let unknown: Result<FinalizedReceipt, ApiError> = finalizer.finalize(
        competition_id,
        &finalize_request(&organizer, vec![entry(999, Some(1), None)]),
    );
    assert_eq!(
        unknown,
        Err(ApiError::UnknownApplication {
            application_id: 999
        })
    );

    let listed: ListResultsResponse = finalizer.list_results(&organizer, competition_id).unwrap();
    assert_eq!(listed.phase, Phase::Finished);
    assert!(listed.results.is_empty());
}
