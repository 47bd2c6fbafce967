//! HTTP server exposing the record store.
//!
//! Thin request/response mapping: every handler loads the collection through
//! the shared [`Store`], acts, and answers in JSON. Errors follow the
//! `{"error": <message>}` envelope, mutation successes the
//! `{"message": <message>, ...}` envelope.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::{Result, StoreError};
use crate::store::Store;
use crate::types::Record;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
    store: Arc<Store>,
}

impl Server {
    /// Create a server over the given store.
    pub fn new(config: ServerConfig, store: Store) -> Self {
        Self {
            config,
            store: Arc::new(store),
        }
    }

    /// Runs the server until SIGINT/SIGTERM.
    pub async fn run(self) -> Result<()> {
        let router = app(self.store);

        tracing::info!(addr = %self.config.addr, "starting roster server");
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;

        let shutdown_signal = async {
            let ctrl_c = async {
                tokio::signal::ctrl_c()
                    .await
                    .expect("Failed to install Ctrl+C handler");
            };

            #[cfg(unix)]
            let terminate = async {
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("Failed to install signal handler")
                    .recv()
                    .await;
            };

            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                () = ctrl_c => {},
                () = terminate => {},
            }
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        tracing::info!("server shutdown complete");
        Ok(())
    }
}

/// Build the router over a shared store.
///
/// Exposed separately from [`Server`] so tests can drive it without binding
/// a socket.
pub fn app(store: Arc<Store>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/students", get(list_students).post(add_student))
        .route(
            "/students/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}

// === Error Responses ===

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Student not found"})),
    )
        .into_response()
}

fn bad_request(rejection: &JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": rejection.body_text()})),
    )
        .into_response()
}

fn store_error(error: StoreError) -> Response {
    match error {
        StoreError::StudentNotFound(_) => not_found(),
        other => {
            // Tampered keys and IO failures are server-side problems; the
            // detail goes to the log, not the caller.
            tracing::error!(error = %other, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

// === Handlers ===

const WELCOME_PAGE: &str = "<!DOCTYPE html>\n<html>\n<head><title>Roster</title></head>\n<body>\n<h1>Welcome to the student record service</h1>\n<p>The API lives under <code>/students</code>.</p>\n</body>\n</html>\n";

async fn home() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    course: Option<String>,
}

async fn list_students(
    State(store): State<Arc<Store>>,
    Query(query): Query<ListQuery>,
) -> Response {
    // An empty ?course= value behaves as if the filter were absent.
    let result = match query.course.as_deref() {
        Some(course) if !course.is_empty() => store.list_by_course(course),
        _ => store.list(),
    };

    match result {
        Ok(collection) => (StatusCode::OK, Json(collection)).into_response(),
        Err(e) => store_error(e),
    }
}

async fn get_student(State(store): State<Arc<Store>>, Path(id): Path<String>) -> Response {
    match store.get(&id) {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => not_found(),
        Err(e) => store_error(e),
    }
}

async fn add_student(
    State(store): State<Arc<Store>>,
    body: std::result::Result<Json<Record>, JsonRejection>,
) -> Response {
    let Json(record) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(&rejection),
    };

    match store.create(record) {
        Ok(id) => (
            StatusCode::CREATED,
            Json(json!({"message": "Student added", "id": id})),
        )
            .into_response(),
        Err(e) => store_error(e),
    }
}

async fn update_student(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
    body: std::result::Result<Json<Record>, JsonRejection>,
) -> Response {
    let Json(record) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(&rejection),
    };

    match store.replace(&id, record) {
        Ok(stored) => (
            StatusCode::OK,
            Json(json!({"message": "Student updated", "data": stored})),
        )
            .into_response(),
        Err(e) => store_error(e),
    }
}

async fn delete_student(State(store): State<Arc<Store>>, Path(id): Path<String>) -> Response {
    match store.delete(&id) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": format!("Student {id} deleted")})),
        )
            .into_response(),
        Err(e) => store_error(e),
    }
}
