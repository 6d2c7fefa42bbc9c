// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use fsp_comp::{Clock, SystemClock};
use fsp_comp_api::{
    ActingRequest, AddTeamMemberRequest, ApiError, ApplicationInfo, ApplicationRegistry,
    CompetitionInfo, CreateCompetitionRequest, CreateTeamRequest, EligibilityRequest,
    EligibilityResponse, FinalizeResultsRequest, FinalizedReceipt, ListApplicationsResponse,
    ListCompetitionsFilter, ListCompetitionsResponse, ListResultsResponse, MyApplicationsResponse,
    PhaseResponse, ProvisionUserRequest, ResultsFinalizer, SubmitApplicationRequest, TeamInfo,
    UpdateCompetitionRequest, UserInfo, add_team_member, competition_phase, create_competition,
    create_team, get_competition, get_team, list_competitions, provision_user,
    publish_competition, update_competition,
};
use fsp_comp_domain::{Role, User};
use fsp_comp_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// FSP competition server - registration, eligibility and results over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,
}

/// Application state shared across handlers.
///
/// Persistence sits behind a mutex; every operation holds it for the
/// duration of one transaction.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    clock: Arc<dyn Clock>,
}

/// The viewer identity for read-only requests, supplied by the identity
/// layer as query parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ViewerQuery {
    user_id: i64,
    role: Role,
    #[serde(default)]
    region_id: Option<i64>,
}

impl ViewerQuery {
    const fn user(&self) -> User {
        User {
            id: self.user_id,
            role: self.role,
            region_id: self.region_id,
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Stable machine-readable error code.
    error: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.code.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::Validation { .. } | ApiError::UnknownApplication { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::NotEligible { .. }
            | ApiError::NotOrganizer { .. }
            | ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::CompetitionNotOpen { .. }
            | ApiError::DuplicateApplication { .. }
            | ApiError::NotFinished { .. }
            | ApiError::AlreadyFinalized { .. } => StatusCode::CONFLICT,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/users` endpoint.
///
/// Records a user supplied by the identity layer.
async fn handle_provision_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ProvisionUserRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(role = %req.role, "Handling provision_user request");

    let mut persistence = app_state.persistence.lock().await;
    let response: UserInfo = provision_user(&mut persistence, app_state.clock.as_ref(), &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/teams` endpoint.
async fn handle_create_team(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Json<TeamInfo>, HttpError> {
    info!(captain_id = req.acting.id, "Handling create_team request");

    let mut persistence = app_state.persistence.lock().await;
    let response: TeamInfo = create_team(&mut persistence, app_state.clock.as_ref(), &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/teams/{team_id}` endpoint.
async fn handle_get_team(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: TeamInfo = get_team(&mut persistence, team_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/teams/{team_id}/members` endpoint.
async fn handle_add_team_member(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<i64>,
    Json(req): Json<AddTeamMemberRequest>,
) -> Result<Json<TeamInfo>, HttpError> {
    info!(
        team_id,
        acting_id = req.acting.id,
        user_id = req.user_id,
        "Handling add_team_member request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TeamInfo = add_team_member(&mut persistence, team_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/competitions` endpoint.
async fn handle_create_competition(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateCompetitionRequest>,
) -> Result<Json<CompetitionInfo>, HttpError> {
    info!(
        acting_id = req.acting.id,
        role = %req.acting.role,
        "Handling create_competition request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CompetitionInfo =
        create_competition(&mut persistence, app_state.clock.as_ref(), &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/competitions` endpoint.
///
/// Lists the competitions visible to the viewer, optionally narrowed by
/// `competition_type`, `phase` and `name` query parameters.
async fn handle_list_competitions(
    AxumState(app_state): AxumState<AppState>,
    Query(viewer): Query<ViewerQuery>,
    Query(filter): Query<ListCompetitionsFilter>,
) -> Result<Json<ListCompetitionsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListCompetitionsResponse = list_competitions(
        &mut persistence,
        app_state.clock.as_ref(),
        &viewer.user(),
        &filter,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/competitions/{competition_id}` endpoint.
async fn handle_get_competition(
    AxumState(app_state): AxumState<AppState>,
    Path(competition_id): Path<i64>,
    Query(viewer): Query<ViewerQuery>,
) -> Result<Json<CompetitionInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CompetitionInfo = get_competition(
        &mut persistence,
        app_state.clock.as_ref(),
        &viewer.user(),
        competition_id,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/competitions/{competition_id}` endpoint.
async fn handle_update_competition(
    AxumState(app_state): AxumState<AppState>,
    Path(competition_id): Path<i64>,
    Json(req): Json<UpdateCompetitionRequest>,
) -> Result<Json<CompetitionInfo>, HttpError> {
    info!(
        competition_id,
        acting_id = req.acting.id,
        "Handling update_competition request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CompetitionInfo = update_competition(
        &mut persistence,
        app_state.clock.as_ref(),
        competition_id,
        &req,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/competitions/{competition_id}/publish` endpoint.
async fn handle_publish_competition(
    AxumState(app_state): AxumState<AppState>,
    Path(competition_id): Path<i64>,
    Json(req): Json<ActingRequest>,
) -> Result<Json<CompetitionInfo>, HttpError> {
    info!(
        competition_id,
        acting_id = req.acting.id,
        "Handling publish_competition request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CompetitionInfo = publish_competition(
        &mut persistence,
        app_state.clock.as_ref(),
        competition_id,
        &req.acting,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/competitions/{competition_id}/phase` endpoint.
async fn handle_competition_phase(
    AxumState(app_state): AxumState<AppState>,
    Path(competition_id): Path<i64>,
    Query(viewer): Query<ViewerQuery>,
) -> Result<Json<PhaseResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: PhaseResponse = competition_phase(
        &mut persistence,
        app_state.clock.as_ref(),
        &viewer.user(),
        competition_id,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/competitions/{competition_id}/eligibility` endpoint.
///
/// Reports whether the acting user may apply. Nothing is written.
async fn handle_check_eligibility(
    AxumState(app_state): AxumState<AppState>,
    Path(competition_id): Path<i64>,
    Json(req): Json<EligibilityRequest>,
) -> Result<Json<EligibilityResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: EligibilityResponse =
        ApplicationRegistry::new(&mut persistence, app_state.clock.as_ref())
            .check_eligibility(competition_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/competitions/{competition_id}/applications` endpoint.
async fn handle_submit_application(
    AxumState(app_state): AxumState<AppState>,
    Path(competition_id): Path<i64>,
    Json(req): Json<SubmitApplicationRequest>,
) -> Result<Json<ApplicationInfo>, HttpError> {
    info!(
        competition_id,
        acting_id = req.acting.id,
        team_id = ?req.team_id,
        "Handling submit_application request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ApplicationInfo =
        ApplicationRegistry::new(&mut persistence, app_state.clock.as_ref())
            .submit(competition_id, req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/competitions/{competition_id}/applications` endpoint.
///
/// Lists every application, for the organizer.
async fn handle_list_applications(
    AxumState(app_state): AxumState<AppState>,
    Path(competition_id): Path<i64>,
    Query(viewer): Query<ViewerQuery>,
) -> Result<Json<ListApplicationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListApplicationsResponse =
        ApplicationRegistry::new(&mut persistence, app_state.clock.as_ref())
            .list_applications(&viewer.user(), competition_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/competitions/{competition_id}/applications/mine` endpoint.
async fn handle_my_applications(
    AxumState(app_state): AxumState<AppState>,
    Path(competition_id): Path<i64>,
    Query(viewer): Query<ViewerQuery>,
) -> Result<Json<MyApplicationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MyApplicationsResponse =
        ApplicationRegistry::new(&mut persistence, app_state.clock.as_ref())
            .my_applications(&viewer.user(), competition_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/applications/{application_id}` endpoint.
async fn handle_get_application(
    AxumState(app_state): AxumState<AppState>,
    Path(application_id): Path<i64>,
    Query(viewer): Query<ViewerQuery>,
) -> Result<Json<ApplicationInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ApplicationInfo =
        ApplicationRegistry::new(&mut persistence, app_state.clock.as_ref())
            .get_application(&viewer.user(), application_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/applications/{application_id}/approve` endpoint.
async fn handle_approve_application(
    AxumState(app_state): AxumState<AppState>,
    Path(application_id): Path<i64>,
    Json(req): Json<ActingRequest>,
) -> Result<Json<ApplicationInfo>, HttpError> {
    info!(
        application_id,
        acting_id = req.acting.id,
        "Handling approve_application request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ApplicationInfo =
        ApplicationRegistry::new(&mut persistence, app_state.clock.as_ref())
            .approve(application_id, &req.acting)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/applications/{application_id}/reject` endpoint.
async fn handle_reject_application(
    AxumState(app_state): AxumState<AppState>,
    Path(application_id): Path<i64>,
    Json(req): Json<ActingRequest>,
) -> Result<Json<ApplicationInfo>, HttpError> {
    info!(
        application_id,
        acting_id = req.acting.id,
        "Handling reject_application request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ApplicationInfo =
        ApplicationRegistry::new(&mut persistence, app_state.clock.as_ref())
            .reject(application_id, &req.acting)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/competitions/{competition_id}/results` endpoint.
///
/// Records the final standings and publishes them.
async fn handle_finalize_results(
    AxumState(app_state): AxumState<AppState>,
    Path(competition_id): Path<i64>,
    Json(req): Json<FinalizeResultsRequest>,
) -> Result<Json<FinalizedReceipt>, HttpError> {
    info!(
        competition_id,
        acting_id = req.acting.id,
        entries = req.results.len(),
        "Handling finalize_results request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: FinalizedReceipt =
        ResultsFinalizer::new(&mut persistence, app_state.clock.as_ref())
            .finalize(competition_id, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/competitions/{competition_id}/results` endpoint.
async fn handle_list_results(
    AxumState(app_state): AxumState<AppState>,
    Path(competition_id): Path<i64>,
    Query(viewer): Query<ViewerQuery>,
) -> Result<Json<ListResultsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListResultsResponse =
        ResultsFinalizer::new(&mut persistence, app_state.clock.as_ref())
            .list_results(&viewer.user(), competition_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users", post(handle_provision_user))
        .route("/teams", post(handle_create_team))
        .route("/teams/{team_id}", get(handle_get_team))
        .route("/teams/{team_id}/members", post(handle_add_team_member))
        .route(
            "/competitions",
            post(handle_create_competition).get(handle_list_competitions),
        )
        .route(
            "/competitions/{competition_id}",
            get(handle_get_competition).put(handle_update_competition),
        )
        .route(
            "/competitions/{competition_id}/publish",
            post(handle_publish_competition),
        )
        .route(
            "/competitions/{competition_id}/phase",
            get(handle_competition_phase),
        )
        .route(
            "/competitions/{competition_id}/eligibility",
            post(handle_check_eligibility),
        )
        .route(
            "/competitions/{competition_id}/applications",
            post(handle_submit_application).get(handle_list_applications),
        )
        .route(
            "/competitions/{competition_id}/applications/mine",
            get(handle_my_applications),
        )
        .route(
            "/competitions/{competition_id}/results",
            post(handle_finalize_results).get(handle_list_results),
        )
        .route("/applications/{application_id}", get(handle_get_application))
        .route(
            "/applications/{application_id}/approve",
            post(handle_approve_application),
        )
        .route(
            "/applications/{application_id}/reject",
            post(handle_reject_application),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing FSP competition server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: Arc::new(SystemClock),
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use fsp_comp::FixedClock;
    use serde_json::{Value, json};
    use time::macros::datetime;
    use tower::ServiceExt;

    const ORGANIZER_QUERY: &str = "user_id=1&role=regional_rep&region_id=7";
    const ATHLETE_QUERY: &str = "user_id=2&role=athlete&region_id=7";

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state(clock: FixedClock) -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            clock: Arc::new(clock),
        }
    }

    /// Shares the database of `state` under a different clock.
    fn with_clock(state: &AppState, clock: FixedClock) -> AppState {
        AppState {
            persistence: Arc::clone(&state.persistence),
            clock: Arc::new(clock),
        }
    }

    fn registration_clock() -> FixedClock {
        FixedClock::new(datetime!(2025-01-05 00:00 UTC))
    }

    fn organizer() -> Value {
        json!({ "id": 1, "role": "regional_rep", "region_id": 7 })
    }

    fn athlete() -> Value {
        json!({ "id": 2, "role": "athlete", "region_id": 7 })
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let request: Request<Body> = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status: HttpStatusCode = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    /// Provisions an organizer (id 1) and an athlete (id 2) and creates a
    /// published regional competition (id 1).
    async fn bootstrap(app: &Router) {
        for (name, role) in [("Olga", "regional_rep"), ("Artem", "athlete")] {
            let (status, _) = send(
                app,
                "POST",
                "/users",
                Some(json!({ "display_name": name, "role": role, "region_id": 7 })),
            )
            .await;
            assert_eq!(status, HttpStatusCode::OK);
        }

        let (status, body) = send(
            app,
            "POST",
            "/competitions",
            Some(json!({
                "acting": organizer(),
                "name": "Spring Cup",
                "competition_type": "regional",
                "region_id": 7,
                "registration_start": "2025-01-01T00:00:00Z",
                "registration_end": "2025-01-10T00:00:00Z",
                "competition_start": "2025-01-15T00:00:00Z",
                "competition_end": "2025-01-16T00:00:00Z",
                "publish": true
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["competition_id"], 1);
    }

    #[tokio::test]
    async fn test_competition_listing_shows_phase() {
        let app: Router = build_router(create_test_app_state(registration_clock()));
        bootstrap(&app).await;

        let (status, body) =
            send(&app, "GET", &format!("/competitions?{ATHLETE_QUERY}"), None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["competitions"][0]["phase"], "registration_open");
    }

    #[tokio::test]
    async fn test_competition_listing_applies_filters() {
        let app: Router = build_router(create_test_app_state(registration_clock()));
        bootstrap(&app).await;

        let (status, body) = send(
            &app,
            "GET",
            &format!("/competitions?{ATHLETE_QUERY}&competition_type=regional&name=spring%20cup"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["competitions"][0]["name"], "Spring Cup");

        let (status, body) = send(
            &app,
            "GET",
            &format!("/competitions?{ATHLETE_QUERY}&phase=finished"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["competitions"], json!([]));
    }

    #[tokio::test]
    async fn test_athlete_cannot_create_competition() {
        let app: Router = build_router(create_test_app_state(registration_clock()));
        bootstrap(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/competitions",
            Some(json!({
                "acting": athlete(),
                "name": "Backyard Open",
                "competition_type": "open",
                "registration_start": "2025-01-01T00:00:00Z",
                "registration_end": "2025-01-10T00:00:00Z",
                "competition_start": "2025-01-15T00:00:00Z",
                "competition_end": "2025-01-16T00:00:00Z"
            })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::FORBIDDEN);
        assert_eq!(body["error"], "forbidden");
    }

    #[tokio::test]
    async fn test_duplicate_application_is_conflict() {
        let app: Router = build_router(create_test_app_state(registration_clock()));
        bootstrap(&app).await;

        let (eligibility_status, eligibility) = send(
            &app,
            "POST",
            "/competitions/1/eligibility",
            Some(json!({ "acting": athlete() })),
        )
        .await;
        assert_eq!(eligibility_status, HttpStatusCode::OK);
        assert_eq!(eligibility["eligibility"]["outcome"], "allowed");

        let (first, application) = send(
            &app,
            "POST",
            "/competitions/1/applications",
            Some(json!({ "acting": athlete() })),
        )
        .await;
        assert_eq!(first, HttpStatusCode::OK);
        assert_eq!(application["status"], "pending");

        let (second, body) = send(
            &app,
            "POST",
            "/competitions/1/applications",
            Some(json!({ "acting": athlete() })),
        )
        .await;
        assert_eq!(second, HttpStatusCode::CONFLICT);
        assert_eq!(body["error"], "duplicate_application");
    }

    #[tokio::test]
    async fn test_unknown_competition_is_not_found() {
        let app: Router = build_router(create_test_app_state(registration_clock()));
        bootstrap(&app).await;

        let (status, body) = send(
            &app,
            "GET",
            &format!("/competitions/99/phase?{ATHLETE_QUERY}"),
            None,
        )
        .await;

        assert_eq!(status, HttpStatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_finalize_publishes_results_once() {
        let state: AppState = create_test_app_state(registration_clock());
        let app: Router = build_router(state.clone());
        bootstrap(&app).await;

        let (_, application) = send(
            &app,
            "POST",
            "/competitions/1/applications",
            Some(json!({ "acting": athlete() })),
        )
        .await;
        let application_id: i64 = application["application_id"].as_i64().unwrap();
        let (approved, _) = send(
            &app,
            "POST",
            &format!("/applications/{application_id}/approve"),
            Some(json!({ "acting": organizer() })),
        )
        .await;
        assert_eq!(approved, HttpStatusCode::OK);

        let finalize_body: Value = json!({
            "acting": organizer(),
            "results": [{ "application_id": application_id, "place": 1, "score": 97.5 }]
        });

        let (early, body) = send(
            &app,
            "POST",
            "/competitions/1/results",
            Some(finalize_body.clone()),
        )
        .await;
        assert_eq!(early, HttpStatusCode::CONFLICT);
        assert_eq!(body["error"], "not_finished");

        let later: Router = build_router(with_clock(
            &state,
            FixedClock::new(datetime!(2025-01-20 00:00 UTC)),
        ));
        let (status, receipt) = send(
            &later,
            "POST",
            "/competitions/1/results",
            Some(finalize_body.clone()),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(receipt["phase"], "results_published");
        assert_eq!(receipt["results_recorded"], 1);

        let (again, body) =
            send(&later, "POST", "/competitions/1/results", Some(finalize_body)).await;
        assert_eq!(again, HttpStatusCode::CONFLICT);
        assert_eq!(body["error"], "already_finalized");

        let (listed, results) = send(
            &later,
            "GET",
            &format!("/competitions/1/results?{ORGANIZER_QUERY}"),
            None,
        )
        .await;
        assert_eq!(listed, HttpStatusCode::OK);
        assert_eq!(results["results"][0]["place"], 1);
    }
}
