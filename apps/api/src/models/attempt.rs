#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One answered interview question.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewAttemptRow {
    pub id: Uuid,
    pub user_email: String,
    pub question: String,
    pub user_answer: String,
    pub ai_feedback: String,
    /// 0–10
    pub score: f64,
    /// Technical, Behavioral or System Design
    pub category: String,
    pub session_mode: String,
    pub created_at: DateTime<Utc>,
}
