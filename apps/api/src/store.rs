//! Persistence for résumés and interview attempts.
//!
//! Every function takes a live pool; callers skip these entirely when the
//! persistence capability is disabled.

use sqlx::PgPool;
use uuid::Uuid;

use crate::interview::analysis::ResumeAnalysis;
use crate::interview::evaluation::AnswerEvaluation;
use crate::models::attempt::InterviewAttemptRow;
use crate::models::resume::ResumeRow;

/// Placeholder stored as the question text; the client does not send question ids.
pub const GENERIC_QUESTION: &str = "Interview Question";

pub struct NewAttempt<'a> {
    pub user_email: &'a str,
    pub user_answer: &'a str,
    pub evaluation: &'a AnswerEvaluation,
    pub session_mode: &'a str,
}

/// Inserts or replaces the résumé stored for `email`.
pub async fn upsert_resume(
    pool: &PgPool,
    email: &str,
    extracted_text: &str,
    analysis: &ResumeAnalysis,
) -> Result<(), sqlx::Error> {
    let analysis = analysis_document(analysis)?;

    sqlx::query(
        r#"
        INSERT INTO resumes (user_email, extracted_text, analysis, uploaded_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (user_email)
        DO UPDATE SET extracted_text = EXCLUDED.extracted_text,
                      analysis = EXCLUDED.analysis,
                      uploaded_at = EXCLUDED.uploaded_at
        "#,
    )
    .bind(email)
    .bind(extracted_text)
    .bind(&analysis)
    .execute(pool)
    .await?;

    Ok(())
}

/// JSONB value written to `resumes.analysis`.
fn analysis_document(analysis: &ResumeAnalysis) -> Result<serde_json::Value, sqlx::Error> {
    serde_json::to_value(analysis)
        .map_err(|e| sqlx::Error::Protocol(format!("failed to encode analysis: {e}")))
}

/// Stored analysis for `email`. Rows written by older schemas are normalised
/// the same way fresh model output is.
pub async fn find_resume_analysis(
    pool: &PgPool,
    email: &str,
) -> Result<Option<ResumeAnalysis>, sqlx::Error> {
    let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE user_email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row.and_then(|r| r.analysis.as_object().map(ResumeAnalysis::from_ai_result)))
}

pub async fn record_attempt(pool: &PgPool, attempt: NewAttempt<'_>) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO interview_attempts
            (id, user_email, question, user_answer, ai_feedback, score, category, session_mode)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(attempt.user_email)
    .bind(GENERIC_QUESTION)
    .bind(attempt.user_answer)
    .bind(&attempt.evaluation.feedback)
    .bind(attempt.evaluation.score)
    .bind(attempt.evaluation.category.as_str())
    .bind(attempt.session_mode)
    .execute(pool)
    .await?;

    Ok(id)
}

/// All attempts for `email`, oldest first.
pub async fn list_attempts(
    pool: &PgPool,
    email: &str,
) -> Result<Vec<InterviewAttemptRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewAttemptRow>(
        "SELECT * FROM interview_attempts WHERE user_email = $1 ORDER BY created_at ASC",
    )
    .bind(email)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> ResumeAnalysis {
        ResumeAnalysis {
            summary: "Backend engineer.".to_string(),
            level: "Senior".to_string(),
            skills: vec!["Rust".to_string(), "Postgres".to_string()],
            questions: vec!["Why Rust?".to_string()],
            score: 82.5,
            suggestions: vec![],
        }
    }

    #[test]
    fn test_analysis_document_is_a_json_object() {
        let doc = analysis_document(&analysis()).unwrap();
        assert_eq!(doc["level"], "Senior");
        assert_eq!(doc["skills"][1], "Postgres");
        assert_eq!(doc["score"], 82.5);
        assert!(doc["suggestions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_analysis_document_reads_back_unchanged() {
        let doc = analysis_document(&analysis()).unwrap();
        let restored = ResumeAnalysis::from_ai_result(doc.as_object().unwrap());
        assert_eq!(restored, analysis());
    }
}
