// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, UserRecord};
use fsp_comp::FixedClock;
use fsp_comp_domain::{
    Application, Competition, CompetitionDraft, CompetitionSchedule, CompetitionType, Role, User,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::macros::datetime;

pub const REGION_ID: i64 = 7;

pub const BEFORE_REGISTRATION: OffsetDateTime = datetime!(2024-12-20 00:00 UTC);
pub const DURING_REGISTRATION: OffsetDateTime = datetime!(2025-01-05 00:00 UTC);
pub const DURING_COMPETITION: OffsetDateTime = datetime!(2025-01-15 12:00 UTC);
pub const AFTER_COMPETITION: OffsetDateTime = datetime!(2025-01-20 00:00 UTC);

static TEMP_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A database with one organizer, one athlete and one published regional
/// competition.
pub struct Fixture {
    pub persistence: Persistence,
    pub organizer: User,
    pub athlete: User,
    pub competition: Competition,
}

pub fn create_test_draft() -> CompetitionDraft {
    CompetitionDraft {
        name: String::from("Spring Cup"),
        description: Some(String::from("Regional qualifier")),
        competition_type: CompetitionType::Regional,
        region_id: Some(REGION_ID),
        schedule: CompetitionSchedule::new(
            datetime!(2025-01-01 00:00 UTC),
            datetime!(2025-01-10 00:00 UTC),
            datetime!(2025-01-15 00:00 UTC),
            datetime!(2025-01-16 00:00 UTC),
        )
        .unwrap(),
        max_applicants: Some(32),
    }
}

pub fn create_test_user(
    persistence: &mut Persistence,
    name: &str,
    role: Role,
    region_id: Option<i64>,
) -> User {
    let record: UserRecord = persistence
        .create_user(name, role, region_id, BEFORE_REGISTRATION)
        .unwrap();
    record.user
}

pub fn create_test_fixture_with(mut persistence: Persistence) -> Fixture {
    let organizer: User =
        create_test_user(&mut persistence, "Olga", Role::RegionalRep, Some(REGION_ID));
    let athlete: User = create_test_user(&mut persistence, "Artem", Role::Athlete, Some(REGION_ID));
    let competition: Competition = persistence
        .create_competition(
            &FixedClock::new(BEFORE_REGISTRATION),
            &organizer,
            create_test_draft(),
            true,
        )
        .unwrap();

    Fixture {
        persistence,
        organizer,
        athlete,
        competition,
    }
}

pub fn create_test_fixture() -> Fixture {
    create_test_fixture_with(Persistence::new_in_memory().unwrap())
}

/// Submits an individual application for `user` and approves it.
pub fn create_approved_application(fixture: &mut Fixture, user: &User) -> Application {
    let application: Application = fixture
        .persistence
        .submit_application(
            &FixedClock::new(DURING_REGISTRATION),
            user,
            fixture.competition.id,
            None,
            None,
        )
        .unwrap();
    fixture
        .persistence
        .decide_application(
            &FixedClock::new(DURING_REGISTRATION),
            &fixture.organizer,
            application.id,
            fsp_comp::Decision::Approve,
        )
        .unwrap()
}

/// Returns a unique database path under the system temp directory.
pub fn create_temp_db_path() -> PathBuf {
    let id: u64 = TEMP_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("fsp_comp_test_{}_{id}.db", std::process::id()))
}

/// Removes a database file and its WAL companions.
pub fn remove_temp_db(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file: std::ffi::OsString = path.as_os_str().to_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
