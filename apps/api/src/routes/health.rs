use axum::Json;
use serde_json::{json, Value};

use crate::envelope::{ok, Envelope};

const SERVICE_NAME: &str = "prepwise-api";

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": SERVICE_NAME,
        "model": crate::llm_client::MODEL
    }))
}

/// GET /
/// Enveloped like every other operation, unlike `/health`.
pub async fn root_handler() -> Json<Envelope<Value>> {
    ok(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
