// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use fsp_comp::FixedClock;
use fsp_comp_domain::{CompetitionType, Role, User};
use fsp_comp_persistence::Persistence;
use time::macros::datetime;

use crate::{
    ApplicationInfo, ApplicationRegistry, CompetitionFields, CompetitionInfo,
    CreateCompetitionRequest, ProvisionUserRequest, SubmitApplicationRequest, UserInfo,
    create_competition, provision_user,
};

pub const REGION_ID: i64 = 7;

pub fn before_registration() -> FixedClock {
    FixedClock::new(datetime!(2024-12-20 00:00 UTC))
}

pub fn during_registration() -> FixedClock {
    FixedClock::new(datetime!(2025-01-05 00:00 UTC))
}

pub fn during_competition() -> FixedClock {
    FixedClock::new(datetime!(2025-01-15 12:00 UTC))
}

pub fn after_competition() -> FixedClock {
    FixedClock::new(datetime!(2025-01-20 00:00 UTC))
}

pub fn create_test_fields() -> CompetitionFields {
    CompetitionFields {
        name: String::from("Spring Cup"),
        description: None,
        competition_type: CompetitionType::Regional,
        region_id: Some(REGION_ID),
        registration_start: String::from("2025-01-01T00:00:00Z"),
        registration_end: String::from("2025-01-10T00:00:00Z"),
        competition_start: String::from("2025-01-15T00:00:00Z"),
        competition_end: String::from("2025-01-16T00:00:00Z"),
        max_applicants: Some(16),
    }
}

pub fn create_test_user(
    persistence: &mut Persistence,
    name: &str,
    role: Role,
    region_id: Option<i64>,
) -> User {
    let info: UserInfo = provision_user(
        persistence,
        &before_registration(),
        &ProvisionUserRequest {
            display_name: String::from(name),
            role,
            region_id,
        },
    )
    .unwrap();
    User::new(info.user_id, info.role, info.region_id)
}

/// An in-memory database with an organizer, an athlete and one published
/// regional competition.
pub struct TestContext {
    pub persistence: Persistence,
    pub organizer: User,
    pub athlete: User,
    pub competition_id: i64,
}

pub fn create_test_context() -> TestContext {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let organizer: User =
        create_test_user(&mut persistence, "Olga", Role::RegionalRep, Some(REGION_ID));
    let athlete: User =
        create_test_user(&mut persistence, "Artem", Role::Athlete, Some(REGION_ID));
    let competition: CompetitionInfo = create_competition(
        &mut persistence,
        &before_registration(),
        &CreateCompetitionRequest {
            acting: organizer.clone(),
            fields: create_test_fields(),
            publish: true,
        },
    )
    .unwrap();

    TestContext {
        persistence,
        organizer,
        athlete,
        competition_id: competition.competition_id,
    }
}

impl TestContext {
    /// Submits an individual application for `user` and approves it.
    pub fn create_approved_application(&mut self, user: &User) -> ApplicationInfo {
        let clock: FixedClock = during_registration();
        let organizer: User = self.organizer.clone();
        let competition_id: i64 = self.competition_id;
        let mut registry: ApplicationRegistry<'_> =
            ApplicationRegistry::new(&mut self.persistence, &clock);
        let submitted: ApplicationInfo = registry
            .submit(competition_id, individual_request(user))
            .unwrap();
        registry
            .approve(submitted.application_id, &organizer)
            .unwrap()
    }
}

pub fn individual_request(acting: &User) -> SubmitApplicationRequest {
    SubmitApplicationRequest {
        acting: acting.clone(),
        team_id: None,
        notes: None,
    }
}
