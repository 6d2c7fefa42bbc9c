// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fsp_comp_domain::{
    Applicant, Application, ApplicationStatus, Competition, CompetitionDraft, CompetitionSchedule,
    CompetitionType, ResultEntry, Role, User,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const ORGANIZER_ID: i64 = 100;

pub const DURING_REGISTRATION: OffsetDateTime = datetime!(2025-01-05 00:00 UTC);
pub const BEFORE_COMPETITION: OffsetDateTime = datetime!(2025-01-12 00:00 UTC);
pub const AFTER_COMPETITION: OffsetDateTime = datetime!(2025-01-20 00:00 UTC);

pub fn create_test_schedule() -> CompetitionSchedule {
    CompetitionSchedule::new(
        datetime!(2025-01-01 00:00 UTC),
        datetime!(2025-01-10 00:00 UTC),
        datetime!(2025-01-15 00:00 UTC),
        datetime!(2025-01-16 00:00 UTC),
    )
    .unwrap()
}

pub fn create_test_draft() -> CompetitionDraft {
    CompetitionDraft {
        name: String::from("Spring Cup"),
        description: None,
        competition_type: CompetitionType::Regional,
        region_id: Some(7),
        schedule: create_test_schedule(),
        max_applicants: Some(32),
    }
}

pub fn create_test_competition() -> Competition {
    let draft: CompetitionDraft = create_test_draft();
    Competition {
        id: 1,
        name: draft.name,
        description: draft.description,
        competition_type: draft.competition_type,
        region_id: draft.region_id,
        schedule: draft.schedule,
        max_applicants: draft.max_applicants,
        organizer_id: ORGANIZER_ID,
        published: true,
        finalized_override: None,
    }
}

pub fn create_test_organizer() -> User {
    User::new(ORGANIZER_ID, Role::RegionalRep, Some(7))
}

pub fn create_test_application(
    id: i64,
    applicant: Applicant,
    status: ApplicationStatus,
) -> Application {
    Application {
        id,
        competition_id: 1,
        applicant,
        submitted_by_user_id: applicant.user_id().unwrap_or(1),
        status,
        notes: None,
        submitted_at: DURING_REGISTRATION,
        decided_at: None,
        decided_by_user_id: None,
    }
}

pub fn create_test_entry(application_id: i64, place: Option<i64>) -> ResultEntry {
    ResultEntry {
        application_id,
        place,
        score: Some(87.5),
        result_data: None,
    }
}
