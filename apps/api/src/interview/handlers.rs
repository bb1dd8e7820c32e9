//! Axum route handlers for the interview API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::interview::analysis::ResumeAnalysis;
use crate::interview::chat::{run_chat_turn, ChatReply, ChatRequest};
use crate::interview::dashboard::{build_dashboard, Dashboard};
use crate::interview::prompts::{resume_analysis_prompt, RECRUITER_ROLE};
use crate::resume::extract::extract_resume_text;
use crate::state::AppState;
use crate::store;

/// Extracted text shorter than this is not worth sending to the model.
const MIN_RESUME_CHARS: usize = 50;

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub success: bool,
    pub analysis: ResumeAnalysis,
}

struct ResumeUpload {
    email: Option<String>,
    file: Option<(Bytes, String)>,
}

/// POST /api/v1/resumes
///
/// Multipart form: `resume` (file) and optional `email`.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let (data, mime) = upload
        .file
        .ok_or_else(|| AppError::Validation("No file uploaded.".to_string()))?;

    let text = tokio::task::spawn_blocking(move || extract_resume_text(&data, &mime))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))??;

    if text.chars().count() < MIN_RESUME_CHARS {
        return Err(AppError::Validation("Resume text too short.".to_string()));
    }

    let raw = state
        .ai
        .generate(&resume_analysis_prompt(&text), RECRUITER_ROLE)
        .await;
    let analysis = ResumeAnalysis::from_ai_result(&raw);

    if let (Some(pool), Some(email)) = (&state.db, upload.email.as_deref()) {
        store::upsert_resume(pool, email, &text, &analysis).await?;
        info!("Stored resume analysis for {email}");
    }

    Ok(Json(ResumeUploadResponse {
        success: true,
        analysis,
    }))
}

async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut upload = ResumeUpload {
        email: None,
        file: None,
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                upload.file = Some((field.bytes().await?, mime));
            }
            "email" => {
                let email = field.text().await?;
                let email = email.trim();
                if !email.is_empty() {
                    upload.email = Some(email.to_string());
                }
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// POST /api/v1/interview/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = run_chat_turn(&state.ai, state.db.as_ref(), &request).await?;
    Ok(Json(reply))
}

/// GET /api/v1/dashboard/:email
///
/// Without a database there is nothing recorded, so the dashboard is empty.
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Dashboard>, AppError> {
    let (resume, attempts) = match &state.db {
        Some(pool) => (
            store::find_resume_analysis(pool, &email).await?,
            store::list_attempts(pool, &email).await?,
        ),
        None => (None, Vec::new()),
    };

    Ok(Json(build_dashboard(&attempts, resume)))
}
