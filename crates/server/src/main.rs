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
use cageside::RankingEngine;
use cageside_api::{
    ApiError, ApplyEventRequest, ApplyEventResponse, HistoryResponse, LeaderboardRequest,
    LeaderboardResponse, StandingResponse, StatusesResponse, SyncUserRequest, SyncUserResponse,
    apply_event, get_history, get_leaderboard, get_standing, list_statuses, sync_user,
};
use cageside_domain::PointWeights;
use cageside_persistence::Persistence;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Cageside Server - reputation, status and leaderboard service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[cfg(feature = "mysql")]
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// JSON file mapping event kinds to point weights, e.g. `{"POTD_RECEIVED": 10}`.
    /// Kinds not listed are worth 1 point.
    #[arg(short, long)]
    weights: Option<PathBuf>,
}

/// Application state shared across handlers.
///
/// The engine owns a single database connection, so access is serialized
/// through a mutex.
#[derive(Clone)]
struct AppState {
    engine: Arc<Mutex<RankingEngine<Persistence>>>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Machine-readable error category.
    error: String,
    /// Human-readable error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.error.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let (status, error): (StatusCode, &'static str) = match &err {
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_input"),
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::DomainRuleViolation { .. } => (StatusCode::CONFLICT, "rule_violation"),
            ApiError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        } else {
            warn!(error = %err, "Request rejected");
        }
        Self {
            status,
            error,
            message: err.to_string(),
        }
    }
}

/// Loads point weights from a JSON object of kind name to weight.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if it names an
/// unknown kind or a negative weight.
fn load_weights(path: &FsPath) -> Result<PointWeights, Box<dyn std::error::Error>> {
    let contents: String = std::fs::read_to_string(path)?;
    let entries: BTreeMap<String, i64> = serde_json::from_str(&contents)?;
    Ok(PointWeights::from_entries(entries)?)
}

/// Handler for POST `/users/sync`.
async fn handle_sync_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SyncUserRequest>,
) -> Result<Json<SyncUserResponse>, HttpError> {
    info!(user_id = %req.user_id, "Handling sync_user request");

    let mut engine = app_state.engine.lock().await;
    let response: SyncUserResponse = sync_user(&mut *engine, req)?;
    drop(engine);

    Ok(Json(response))
}

/// Handler for POST `/events`.
async fn handle_apply_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ApplyEventRequest>,
) -> Result<Json<ApplyEventResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        target_id = %req.target_id,
        kind = %req.kind,
        delta = req.delta,
        "Handling apply_event request"
    );

    let mut engine = app_state.engine.lock().await;
    let response: ApplyEventResponse = apply_event(&mut *engine, req)?;
    drop(engine);

    Ok(Json(response))
}

/// Handler for GET `/users/{user_id}/standing`.
async fn handle_get_standing(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<StandingResponse>, HttpError> {
    let mut engine = app_state.engine.lock().await;
    let response: StandingResponse = get_standing(&mut *engine, &user_id)?;
    drop(engine);

    Ok(Json(response))
}

/// Handler for GET `/users/{user_id}/history`.
async fn handle_get_history(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<HistoryResponse>, HttpError> {
    let mut engine = app_state.engine.lock().await;
    let response: HistoryResponse = get_history(&mut *engine, &user_id)?;
    drop(engine);

    Ok(Json(response))
}

/// Handler for GET `/leaderboard`.
async fn handle_get_leaderboard(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<LeaderboardRequest>,
) -> Result<Json<LeaderboardResponse>, HttpError> {
    let mut engine = app_state.engine.lock().await;
    let response: LeaderboardResponse = get_leaderboard(&mut *engine, query)?;
    drop(engine);

    Ok(Json(response))
}

/// Handler for GET `/statuses`.
async fn handle_list_statuses() -> Json<StatusesResponse> {
    Json(list_statuses())
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users/sync", post(handle_sync_user))
        .route("/users/{user_id}/standing", get(handle_get_standing))
        .route("/users/{user_id}/history", get(handle_get_history))
        .route("/events", post(handle_apply_event))
        .route("/leaderboard", get(handle_get_leaderboard))
        .route("/statuses", get(handle_list_statuses))
        .with_state(app_state)
}

/// Opens the configured database.
fn open_persistence(args: &Args) -> Result<Persistence, Box<dyn std::error::Error>> {
    #[cfg(feature = "mysql")]
    if let Some(url) = &args.mysql_url {
        info!("Using MySQL database");
        return Ok(Persistence::new_with_mysql(url)?);
    }

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    Ok(persistence)
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

    info!("Initializing Cageside Server");

    let weights: PointWeights = match &args.weights {
        Some(path) => {
            info!("Loading point weights from: {}", path.display());
            load_weights(path)?
        }
        None => PointWeights::default(),
    };
    for (kind, weight) in weights.effective() {
        info!(kind = %kind, weight, "Point weight");
    }

    let mut persistence: Persistence = open_persistence(&args)?;
    info!(users = persistence.count_users()?, "Database ready");
    let app_state: AppState = AppState {
        engine: Arc::new(Mutex::new(RankingEngine::new(persistence, weights))),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use cageside_domain::EventKind;
    use tower::ServiceExt;

    /// Helper to create a router over a fresh in-memory database.
    fn create_test_app() -> Router {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        build_router(AppState {
            engine: Arc::new(Mutex::new(RankingEngine::new(
                persistence,
                PointWeights::default(),
            ))),
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<String>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request: Request<Body> = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    async fn sync(app: &Router, user_id: &str, role: &str) -> Response {
        let body: String = serde_json::json!({
            "user_id": user_id,
            "username": user_id,
            "role": role,
        })
        .to_string();
        send(app, "POST", "/users/sync", Some(body)).await
    }

    async fn event(app: &Router, target_id: &str, kind: &str, delta: i64) -> Response {
        let body: String = serde_json::json!({
            "actor_id": "fan",
            "target_id": target_id,
            "kind": kind,
            "delta": delta,
            "cause_id": "thread-1",
        })
        .to_string();
        send(app, "POST", "/events", Some(body)).await
    }

    #[tokio::test]
    async fn test_sync_then_standing() {
        let app: Router = create_test_app();

        let response: Response = sync(&app, "rookie", "MEMBER").await;
        assert_eq!(response.status(), StatusCode::OK);
        let synced: SyncUserResponse = read_json(response).await;
        assert!(synced.created);

        let response: Response = send(&app, "GET", "/users/rookie/standing", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let standing: StandingResponse = read_json(response).await;
        assert_eq!(standing.status.as_deref(), Some("AMATEUR"));
        assert_eq!(standing.position, 1);
    }

    #[tokio::test]
    async fn test_events_move_user_up_the_leaderboard() {
        let app: Router = create_test_app();
        sync(&app, "veteran", "MEMBER").await;
        sync(&app, "rookie", "MEMBER").await;
        for _ in 0..2 {
            assert_eq!(event(&app, "veteran", "LIKE_RECEIVED", 1).await.status(), StatusCode::OK);
        }
        for _ in 0..3 {
            assert_eq!(event(&app, "rookie", "POTD_RECEIVED", 1).await.status(), StatusCode::OK);
        }

        let response: Response = send(&app, "GET", "/leaderboard?page=1&page_size=10", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let page: LeaderboardResponse = read_json(response).await;
        assert_eq!(page.total_users, 2);
        assert_eq!(page.entries[0].user_id, "rookie");
        assert_eq!(page.entries[0].points, Some(3));
        assert_eq!(page.entries[1].position, 2);
    }

    #[tokio::test]
    async fn test_unknown_kind_is_bad_request() {
        let app: Router = create_test_app();
        sync(&app, "rookie", "MEMBER").await;

        let response: Response = event(&app, "rookie", "SLAM_RECEIVED", 1).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "invalid_input");
    }

    #[tokio::test]
    async fn test_event_for_unknown_user_is_not_found() {
        let app: Router = create_test_app();

        let response: Response = event(&app, "ghost", "LIKE_RECEIVED", 1).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rename_on_sync_is_conflict() {
        let app: Router = create_test_app();
        sync(&app, "rookie", "MEMBER").await;

        let body: String = serde_json::json!({
            "user_id": "rookie",
            "username": "Someone Else",
        })
        .to_string();
        let response: Response = send(&app, "POST", "/users/sync", Some(body)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "rule_violation");
    }

    #[tokio::test]
    async fn test_invalid_page_size_is_bad_request() {
        let app: Router = create_test_app();

        let response: Response = send(&app, "GET", "/leaderboard?page_size=0", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_history_lists_events() {
        let app: Router = create_test_app();
        sync(&app, "rookie", "MEMBER").await;
        event(&app, "rookie", "REPLY_RECEIVED", 1).await;
        event(&app, "rookie", "REPLY_RECEIVED", -1).await;

        let response: Response = send(&app, "GET", "/users/rookie/history", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let history: HistoryResponse = read_json(response).await;
        assert_eq!(history.events.len(), 3);
        assert_eq!(history.events[2].points_after, Some(0));
    }

    #[tokio::test]
    async fn test_statuses_endpoint() {
        let app: Router = create_test_app();

        let response: Response = send(&app, "GET", "/statuses", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let statuses: StatusesResponse = read_json(response).await;
        assert_eq!(statuses.statuses.first().unwrap().label, "HALL OF FAMER");
    }

    #[test]
    fn test_load_weights_from_file() {
        let path: PathBuf =
            std::env::temp_dir().join(format!("cageside-weights-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"POTD_RECEIVED": 10, "LIKE_RECEIVED": 2}"#).unwrap();

        let weights: PointWeights = load_weights(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(weights.weight(EventKind::PotdReceived), 10);
        assert_eq!(weights.weight(EventKind::LikeReceived), 2);
        assert_eq!(weights.weight(EventKind::PostCreated), 1);
    }

    #[test]
    fn test_load_weights_rejects_negative_weight() {
        let path: PathBuf = std::env::temp_dir().join(format!(
            "cageside-bad-weights-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"PIN_RECEIVED": -3}"#).unwrap();

        let result = load_weights(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
