// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the competition registration system.
//!
//! This crate stores users, teams, competitions, applications, and results
//! in `SQLite` through Diesel. Every state transition runs inside a single
//! `BEGIN IMMEDIATE` transaction that re-reads the rows its rule depends on,
//! reads the clock, and writes the outcome. A rejected transition writes
//! nothing.
//!
//! ## Integrity Backstops
//!
//! The schema repeats the invariants the rules enforce:
//!
//! - At most one application per applicant identity per competition
//!   (partial unique indexes)
//! - Exactly one applicant column set on applications and results
//! - At most one result per application
//! - Results are immutable, require an approved application, and cannot
//!   be written once the competition is finalized
//! - The finalized override can be set once and never cleared
//!
//! ## Testing
//!
//! - `new_in_memory()` gives each caller an isolated shared-cache database
//! - `new_with_file()` enables WAL so several connections can contend

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use fsp_comp::{Clock, Decision, FinalizationPlan};
use fsp_comp_domain::{
    Applicant, Application, Competition, CompetitionDraft, CompetitionResult, ResultEntry, Role,
    Team, User,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::UserRecord;
pub use error::PersistenceError;
pub use queries::competitions::CompetitionFilter;

use backend::SqliteBackend;
use mutations::{identities, transitions};

/// Persistence adapter over a single `SQLite` connection.
///
/// Callers that share one adapter across tasks must serialize access
/// themselves; separate adapters on the same file contend through
/// `SQLite` locking.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an isolated in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized or foreign
    /// keys are not enforced.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// Opening the same file twice yields two independent connections.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        conn.enable_wal_mode()?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ------------------------------------------------------------------
    // Identities
    // ------------------------------------------------------------------

    /// Creates a user.
    ///
    /// # Arguments
    ///
    /// * `display_name` - The name shown for the user
    /// * `role` - The user's role
    /// * `region_id` - The user's region, if any
    /// * `created_at` - The creation instant
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_user(
        &mut self,
        display_name: &str,
        role: Role,
        region_id: Option<i64>,
        created_at: OffsetDateTime,
    ) -> Result<UserRecord, PersistenceError> {
        let user_id: i64 =
            identities::insert_user(&mut self.conn, display_name, role, region_id, created_at)?;
        queries::users::get_user(&mut self.conn, user_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("user {user_id}")))
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&mut self, user_id: i64) -> Result<Option<UserRecord>, PersistenceError> {
        queries::users::get_user(&mut self.conn, user_id)
    }

    /// Creates a team captained by an existing user.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the captain does not exist.
    pub fn create_team(
        &mut self,
        name: &str,
        captain_user_id: i64,
        created_at: OffsetDateTime,
    ) -> Result<Team, PersistenceError> {
        transitions::create_team(&mut self.conn, name, captain_user_id, created_at)
    }

    /// Adds a user to a team. Adding an existing member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the team or user does not exist.
    pub fn add_team_member(
        &mut self,
        team_id: i64,
        user_id: i64,
    ) -> Result<Team, PersistenceError> {
        transitions::add_team_member(&mut self.conn, team_id, user_id)
    }

    /// Retrieves a team and its members.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_team(&mut self, team_id: i64) -> Result<Option<Team>, PersistenceError> {
        queries::teams::get_team(&mut self.conn, team_id)
    }

    /// Lists the teams a user captains.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn teams_captained_by(&mut self, user_id: i64) -> Result<Vec<Team>, PersistenceError> {
        queries::teams::teams_captained_by(&mut self.conn, user_id)
    }

    // ------------------------------------------------------------------
    // Competitions
    // ------------------------------------------------------------------

    /// Creates a competition organized by the acting user.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Rejected` if the role may not organize or
    /// the draft is invalid.
    pub fn create_competition(
        &mut self,
        clock: &dyn Clock,
        acting: &User,
        draft: CompetitionDraft,
        publish: bool,
    ) -> Result<Competition, PersistenceError> {
        transitions::create_competition(&mut self.conn, clock, acting, draft, publish)
    }

    /// Replaces the editable fields of an unpublished competition.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Rejected` if the update is refused.
    pub fn update_competition(
        &mut self,
        acting: &User,
        competition_id: i64,
        draft: CompetitionDraft,
    ) -> Result<Competition, PersistenceError> {
        transitions::update_competition(&mut self.conn, acting, competition_id, draft)
    }

    /// Publishes a competition.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Rejected` if publishing is refused.
    pub fn publish_competition(
        &mut self,
        acting: &User,
        competition_id: i64,
    ) -> Result<Competition, PersistenceError> {
        transitions::publish_competition(&mut self.conn, acting, competition_id)
    }

    /// Retrieves a competition by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_competition(
        &mut self,
        competition_id: i64,
    ) -> Result<Option<Competition>, PersistenceError> {
        queries::competitions::get_competition(&mut self.conn, competition_id)
    }

    /// Lists competitions matching `filter`, ordered by registration start.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_competitions(
        &mut self,
        filter: &CompetitionFilter,
    ) -> Result<Vec<Competition>, PersistenceError> {
        queries::competitions::list_competitions(&mut self.conn, filter)
    }

    // ------------------------------------------------------------------
    // Applications
    // ------------------------------------------------------------------

    /// Submits an application for the acting user, or for a team they captain.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Rejected` if the submission is refused.
    pub fn submit_application(
        &mut self,
        clock: &dyn Clock,
        acting: &User,
        competition_id: i64,
        team_id: Option<i64>,
        notes: Option<String>,
    ) -> Result<Application, PersistenceError> {
        transitions::submit_application(
            &mut self.conn,
            clock,
            acting,
            competition_id,
            team_id,
            notes,
        )
    }

    /// Approves or rejects a pending application.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Rejected` if the decision is refused.
    pub fn decide_application(
        &mut self,
        clock: &dyn Clock,
        acting: &User,
        application_id: i64,
        decision: Decision,
    ) -> Result<Application, PersistenceError> {
        transitions::decide_application(&mut self.conn, clock, acting, application_id, decision)
    }

    /// Retrieves an application by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_application(
        &mut self,
        application_id: i64,
    ) -> Result<Option<Application>, PersistenceError> {
        queries::applications::get_application(&mut self.conn, application_id)
    }

    /// Lists the applications of a competition in submission order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_applications(
        &mut self,
        competition_id: i64,
    ) -> Result<Vec<Application>, PersistenceError> {
        queries::applications::list_applications_for_competition(&mut self.conn, competition_id)
    }

    /// Finds the application an applicant identity holds on a competition.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_application(
        &mut self,
        competition_id: i64,
        applicant: Applicant,
    ) -> Result<Option<Application>, PersistenceError> {
        queries::applications::find_application(&mut self.conn, competition_id, applicant)
    }

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    /// Records final results and publishes them.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Rejected` if finalization is refused.
    pub fn finalize_results(
        &mut self,
        clock: &dyn Clock,
        acting: &User,
        competition_id: i64,
        entries: &[ResultEntry],
    ) -> Result<FinalizationPlan, PersistenceError> {
        transitions::finalize_results(&mut self.conn, clock, acting, competition_id, entries)
    }

    /// Lists the recorded results of a competition.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_results(
        &mut self,
        competition_id: i64,
    ) -> Result<Vec<CompetitionResult>, PersistenceError> {
        queries::results::list_results(&mut self.conn, competition_id)
    }
}
