// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for competition registration and results.
//!
//! Every operation takes the verified acting identity explicitly and
//! returns either a response DTO or a typed `ApiError`.

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

mod auth;
mod error;
mod finalizer;
mod handlers;
mod registry;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::AuthorizationService;
pub use error::{
    ApiError, domain_rule, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use finalizer::ResultsFinalizer;
pub use handlers::{
    add_team_member, competition_phase, create_competition, create_team, get_competition,
    get_team, list_competitions, provision_user, publish_competition, update_competition,
};
pub use registry::ApplicationRegistry;
pub use request_response::{
    ActingRequest, AddTeamMemberRequest, ApplicationInfo, CompetitionFields, CompetitionInfo,
    CreateCompetitionRequest, CreateTeamRequest, EligibilityRequest, EligibilityResponse,
    FinalizeResultsRequest, FinalizedReceipt, ListApplicationsResponse, ListCompetitionsFilter,
    ListCompetitionsResponse, ListResultsResponse, MyApplicationsResponse, PhaseResponse,
    ProvisionUserRequest, ResultInfo, SubmitApplicationRequest, TeamInfo, UpdateCompetitionRequest,
    UserInfo,
};
