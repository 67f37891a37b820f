//! HTTP status API.
//!
//! Read-only view of the scheduler for display front-ends.
//! Runs on port 8768 (configurable) using axum.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::animation::NarratorFrame;
use crate::queue::ScriptQueue;
use crate::scheduler::{NowPlaying, SchedulerState, StatusBoard};

#[derive(Clone)]
pub struct ApiState {
    pub status: StatusBoard,
    pub queue: ScriptQueue,
    pub frames: watch::Receiver<Option<NarratorFrame>>,
}

#[derive(Serialize)]
struct StatusResponse {
    state: SchedulerState,
    queued: usize,
    now_playing: Option<NowPlaying>,
    frame: Option<NarratorFrame>,
}

#[derive(Serialize)]
struct NowPlayingResponse {
    on_air: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    article: Option<NowPlaying>,
}

/// Build the axum router.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/status", get(handle_status))
        .route("/now-playing", get(handle_now_playing))
        .with_state(state)
}

/// Start the status API as a background tokio task.
pub async fn start_status_api(state: ApiState, port: u16) {
    let app = router(state);
    let addr = format!("127.0.0.1:{port}");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            warn!("Failed to bind status API on {addr}: {e}");
            return;
        }
    };
    info!("Status API listening on {addr}");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warn!("Status API server error: {e}");
        }
    });
}

// --- Handlers ---

async fn handle_status(State(state): State<ApiState>) -> Json<StatusResponse> {
    let status = state.status.snapshot();
    Json(StatusResponse {
        state: status.state,
        queued: state.queue.len(),
        now_playing: status.now_playing,
        frame: state.frames.borrow().clone(),
    })
}

async fn handle_now_playing(State(state): State<ApiState>) -> Json<NowPlayingResponse> {
    let article = state.status.snapshot().now_playing;
    Json(NowPlayingResponse {
        on_air: article.is_some(),
        article,
    })
}
