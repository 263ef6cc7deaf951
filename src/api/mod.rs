//! HTTP layer exposing the transcript analysis components.

pub mod routes;
pub mod types;

use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    clinical::keywords::KeywordExtractor, config::Settings, nlp::ModelSet, pipeline::Pipeline,
};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub pipeline: Pipeline,
    pub keywords: KeywordExtractor,
}

impl AppState {
    pub fn new(models: &ModelSet, settings: Settings) -> Self {
        Self {
            pipeline: Pipeline::new(models, &settings),
            keywords: KeywordExtractor::new(models.embedder.clone()),
            settings,
        }
    }
}

/// Build the API router; exposed separately so tests can drive it in-process.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/analyze", post(routes::analyze))
        .route("/soap", post(routes::soap))
        .route("/keywords", post(routes::keywords))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Load every model off the async runtime and assemble the shared state.
pub async fn load_state(settings: Settings) -> Result<AppState> {
    tokio::task::spawn_blocking(move || -> Result<AppState> {
        let models = ModelSet::load(&settings)?;
        Ok(AppState::new(&models, settings))
    })
    .await?
}

pub async fn serve(settings: Settings, addr: SocketAddr) -> Result<()> {
    let router = router(load_state(settings).await?);

    info!(%addr, "serving medscribe API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for ctrl-c");
    }
}
