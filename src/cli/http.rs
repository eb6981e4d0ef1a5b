// ============================================================
// Layer 1 — HTTP Surface
// ============================================================
//   GET  /        → embedded landing page
//   POST /detect  → {"sentence": "..."} in, detection JSON out
//
//   not found: {"status":"not_found","message":"No idiom found."}
//   found:     {"status":"success","idiom":..,"literal":..,
//               "meaning":..,"example":..,"language":..}
//
// The store is loaded before the listener binds and shared by all
// handlers through an Arc.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::application::detect_use_case::DetectUseCase;
use crate::domain::idiom::{DetectionResult, NO_IDIOM_MESSAGE};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<DetectUseCase>,
}

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub sentence: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetectResponse {
    NotFound {
        message: String,
    },
    Success {
        idiom:    String,
        literal:  String,
        meaning:  String,
        example:  String,
        language: String,
    },
}

impl From<DetectionResult> for DetectResponse {
    fn from(r: DetectionResult) -> Self {
        match r.idiom {
            Some(idiom) if r.found => DetectResponse::Success {
                idiom,
                literal:  r.literal.unwrap_or_default(),
                meaning:  r.meaning.unwrap_or_default(),
                example:  r.example.unwrap_or_default(),
                language: r.language.unwrap_or_default(),
            },
            _ => DetectResponse::NotFound {
                message: NO_IDIOM_MESSAGE.to_string(),
            },
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/detect", post(detect))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .await
        .context("HTTP server stopped")
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn detect(
    State(state): State<AppState>,
    Json(req):    Json<DetectRequest>,
) -> Json<DetectResponse> {
    Json(state.detector.analyze(&req.sentence).into())
}
