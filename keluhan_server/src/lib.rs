//! HTTP surface for the complaint pipeline.
//!
//! - `GET  /healthz`: liveness and configured model
//! - `POST /chat`: extract a structured complaint from `{ "text": ... }`
//! - `POST /extract`: alias of `/chat`
//! - `GET  /faq?q=...`: keyword FAQ lookup

#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use keluhan_core::{LLMProvider, Pipeline};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod routes;

pub use error::ApiError;

pub struct AppState {
    pub pipeline: Pipeline<Arc<dyn LLMProvider>>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    #[must_use]
    pub fn shared(pipeline: Pipeline<Arc<dyn LLMProvider>>) -> SharedState {
        Arc::new(Self { pipeline })
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/chat", post(routes::chat))
        .route("/extract", post(routes::chat))
        .route("/faq", get(routes::faq))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: SharedState) -> anyhow::Result<()> {
    let model = state.pipeline.model().to_string();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("keluhan listening on http://{addr} (model: {model})");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("failed to listen for Ctrl-C: {e}");
            }
            info!("keluhan shutting down");
        })
        .await?;

    Ok(())
}
