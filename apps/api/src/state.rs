use std::sync::Arc;

use sqlx::PgPool;

use crate::ai::AiGateway;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when `DATABASE_URL` is unset; résumés and attempts are then not stored.
    pub db: Option<PgPool>,
    pub ai: Arc<AiGateway>,
    pub config: Config,
}
