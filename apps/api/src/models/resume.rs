#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub user_email: String,
    pub extracted_text: String,
    pub analysis: Value,
    pub uploaded_at: DateTime<Utc>,
}
