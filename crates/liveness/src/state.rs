//! Shared state for the liveness routes

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub uptime_secs: u64,
}

#[derive(Clone)]
pub struct ServerState {
    banner: Arc<str>,
    started: Instant,
}

impl ServerState {
    pub fn new(banner: impl Into<String>) -> Self {
        let banner: String = banner.into();
        Self {
            banner: Arc::from(banner),
            started: Instant::now(),
        }
    }

    /// Text served on `/`
    pub fn banner(&self) -> &str {
        &self.banner
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    pub fn health(&self) -> Health {
        Health {
            status: "ok",
            uptime_secs: self.uptime_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_snapshot() {
        let state = ServerState::new("online");
        assert_eq!(state.banner(), "online");

        let health = state.health();
        assert_eq!(health.status, "ok");
        assert!(health.uptime_secs < 5);
    }
}
