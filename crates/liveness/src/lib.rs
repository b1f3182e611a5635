//! HTTP liveness endpoint
//!
//! Hosting platforms that expect a web process ping `/` (or `/health`) to
//! decide whether the bot is alive. The server carries no other routes.

mod server;
mod state;

pub use server::LivenessServer;
pub use state::{Health, ServerState};

/// Result type alias for liveness server operations
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
