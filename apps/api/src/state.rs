use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Handlers check out one connection per request; see `conversation::handlers`.
    pub db: SqlitePool,
    /// Pluggable completion backend. Default: `AnthropicClient`.
    pub llm: Arc<dyn CompletionClient>,
    pub config: Config,
}
