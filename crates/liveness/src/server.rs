//! axum router and listener for the liveness endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use tower_http::trace::TraceLayer;

use crate::state::ServerState;

/// Liveness HTTP server
#[derive(Clone)]
pub struct LivenessServer {
    state: ServerState,
}

impl LivenessServer {
    /// Create a server answering `GET /` with `banner`
    pub fn new(banner: impl Into<String>) -> Self {
        Self {
            state: ServerState::new(banner),
        }
    }

    /// Create the axum router with all routes configured
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/health", get(health_check))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Bind `host:port` and serve until the process exits
    pub async fn serve(self, host: &str, port: u16) -> crate::Result<()> {
        let addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!("Liveness server listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

async fn index(State(state): State<ServerState>) -> impl IntoResponse {
    (StatusCode::OK, state.banner().to_string())
}

async fn health_check(State(state): State<ServerState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.health()))
}
