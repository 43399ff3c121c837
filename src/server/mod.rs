//! HTTP surface of the annotation app.
//!
//! - `GET /` returns the app metadata
//! - `POST /` annotates an MMIF body
//! - `GET /health` for liveness checks

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::{Settings, DEFAULT_MAX_BODY_BYTES};
use crate::models::AppMetadata;
use crate::services::Annotator;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub annotator: Arc<Annotator>,
    /// Computed once at startup so every `GET /` returns the same document.
    pub metadata: Arc<AppMetadata>,
    /// Bodies above this size get a 413.
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(annotator: Annotator) -> Self {
        let metadata = annotator.metadata();
        Self {
            annotator: Arc::new(annotator),
            metadata: Arc::new(metadata),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Annotator::from_settings(settings)).with_max_body_bytes(settings.max_body_bytes)
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
