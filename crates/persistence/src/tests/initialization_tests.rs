// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use super::helpers::{
    BEFORE_REGISTRATION, Fixture, create_temp_db_path, create_test_fixture, create_test_user,
    remove_temp_db,
};
use crate::error::PersistenceError;
use crate::{Persistence, UserRecord};
use fsp_comp_domain::{Competition, Role, User};
use std::path::PathBuf;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    let user: User = create_test_user(&mut db1, "Olga", Role::Athlete, None);

    assert!(db1.get_user(user.id).unwrap().is_some());
    assert!(db2.get_user(user.id).unwrap().is_none());
}

#[test]
fn test_create_user_round_trips_role_and_region() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let record: UserRecord = persistence
        .create_user("Olga", Role::RegionalRep, Some(7), BEFORE_REGISTRATION)
        .unwrap();
    let loaded: UserRecord = persistence.get_user(record.user.id).unwrap().unwrap();

    assert_eq!(loaded, record);
    assert_eq!(loaded.user.role, Role::RegionalRep);
    assert_eq!(loaded.user.region_id, Some(7));
    assert_eq!(loaded.display_name, "Olga");
}

#[test]
fn test_competition_round_trips_through_storage() {
    let mut fixture: Fixture = create_test_fixture();

    let loaded: Competition = fixture
        .persistence
        .get_competition(fixture.competition.id)
        .unwrap()
        .unwrap();

    assert_eq!(loaded, fixture.competition);
    assert!(loaded.published);
    assert_eq!(loaded.finalized_override, None);
    assert_eq!(loaded.organizer_id, fixture.organizer.id);
}

#[test]
fn test_file_database_reopens_with_existing_data() {
    let path: PathBuf = create_temp_db_path();

    let user_id: i64 = {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        create_test_user(&mut persistence, "Olga", Role::Athlete, None).id
    };

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    assert!(reopened.get_user(user_id).unwrap().is_some());

    drop(reopened);
    remove_temp_db(&path);
}
