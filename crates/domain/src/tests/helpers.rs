// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Applicant, Application, ApplicationStatus, Competition, CompetitionSchedule, CompetitionType,
    Role, Team, User,
};
use std::collections::BTreeSet;
use time::macros::datetime;

/// Registration 2025-01-01..=2025-01-10, competition 2025-01-15..=2025-01-16.
pub fn create_test_schedule() -> CompetitionSchedule {
    CompetitionSchedule::new(
        datetime!(2025-01-01 00:00 UTC),
        datetime!(2025-01-10 00:00 UTC),
        datetime!(2025-01-15 00:00 UTC),
        datetime!(2025-01-16 00:00 UTC),
    )
    .unwrap()
}

pub fn create_test_competition(competition_type: CompetitionType) -> Competition {
    let region_id: Option<i64> = competition_type.is_regional().then_some(7);
    Competition {
        id: 1,
        name: String::from("Spring Cup"),
        description: None,
        competition_type,
        region_id,
        schedule: create_test_schedule(),
        max_applicants: None,
        organizer_id: 100,
        published: true,
        finalized_override: None,
    }
}

pub fn create_test_athlete(id: i64, region_id: Option<i64>) -> User {
    User::new(id, Role::Athlete, region_id)
}

pub fn create_test_team(captain_user_id: i64, members: &[i64]) -> Team {
    Team::new(
        10,
        String::from("Byte Busters"),
        captain_user_id,
        members.iter().copied().collect::<BTreeSet<i64>>(),
    )
}

pub fn create_test_application(competition_id: i64, applicant: Applicant) -> Application {
    Application {
        id: 500,
        competition_id,
        applicant,
        submitted_by_user_id: 1,
        status: ApplicationStatus::Pending,
        notes: None,
        submitted_at: datetime!(2025-01-02 00:00 UTC),
        decided_at: None,
        decided_by_user_id: None,
    }
}
