use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and which optional capabilities are active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let ai_mode = if state.ai.is_live() { "live" } else { "mock" };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "interview-api",
        "ai": ai_mode,
        "models": state.config.ai_models,
        "persistence": state.db.is_some()
    }))
}
