//! HTTP API for the MIPS pipeline simulator.
//!
//! One simulator instance is shared by every request. Routes:
//! 1. **`GET /api/health`:** liveness check, answers `OK`.
//! 2. **`GET /api/state`:** the full [`StateView`](mipsim_core::sim::StateView) JSON.
//! 3. **`POST /api/load?start=ADDR`:** body is hex or assembly program text.
//! 4. **`POST /api/step?cycles=N`:** advances at least one cycle.
//! 5. **`POST /api/reset?clearRegs&clearMem&pc`:** unloads the program and resets the pipeline.
//!
//! CORS is permissive and every `OPTIONS` request is answered with `204 No Content`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use mipsim_core::Simulator;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Error types and their HTTP mapping.
pub mod error;

mod handlers;

/// The simulator as shared between request handlers.
pub type SharedSimulator = Arc<Mutex<Simulator>>;

/// Wraps a simulator for use with [`router`].
pub fn shared(sim: Simulator) -> SharedSimulator {
    Arc::new(Mutex::new(sim))
}

/// Builds the API router around a shared simulator.
pub fn router(sim: SharedSimulator) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/state", get(handlers::state))
        .route("/api/load", post(handlers::load))
        .route("/api/step", post(handlers::step))
        .route("/api/reset", post(handlers::reset))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(preflight_no_content))
        .with_state(sim)
}

/// Rewrites any `OPTIONS` response to an empty 204, keeping the CORS headers.
async fn preflight_no_content(req: Request, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let mut res = next.run(req).await;
    if is_options {
        *res.status_mut() = StatusCode::NO_CONTENT;
        *res.body_mut() = Body::empty();
    }
    res
}
