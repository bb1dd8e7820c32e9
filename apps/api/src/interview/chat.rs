//! One turn of the interview loop: score the previous answer, record it, ask the next question.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;

use super::analysis::{non_empty_str, ResumeAnalysis};
use super::evaluation::AnswerEvaluation;
use super::prompts::{evaluation_prompt, next_question_prompt};
use crate::ai::AiGateway;
use crate::errors::AppError;
use crate::llm_client::prompts::DEFAULT_ROLE;
use crate::store::{self, NewAttempt};

/// Sent when the next-question result carries no usable `message`.
pub const FALLBACK_REPLY: &str =
    "Could you walk me through a recent project and the decisions you made in it?";

/// Mode used when the client sends none.
pub const DEFAULT_MODE: &str = "general";

/// Mode that tailors questions to the stored résumé analysis.
pub const RESUME_MODE: &str = "resume";

#[derive(Debug, Clone, Deserialize)]
pub struct ChatContext {
    /// Free-form mode label, e.g. "resume", "skill" or "topic". Stored as given.
    #[serde(default = "default_mode")]
    pub mode: String,
    pub skill: Option<String>,
}

impl Default for ChatContext {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            skill: None,
        }
    }
}

impl ChatContext {
    pub fn is_resume_mode(&self) -> bool {
        self.mode == RESUME_MODE
    }
}

fn default_mode() -> String {
    DEFAULT_MODE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub email: Option<String>,
    pub message: String,
    #[serde(default)]
    pub context: ChatContext,
    #[serde(default, alias = "isFirst")]
    pub is_first: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub evaluation: Option<AnswerEvaluation>,
}

pub async fn run_chat_turn(
    ai: &AiGateway,
    db: Option<&PgPool>,
    request: &ChatRequest,
) -> Result<ChatReply, AppError> {
    let email = request.email.as_deref().filter(|e| !e.trim().is_empty());
    let topic = request
        .context
        .skill
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let mode = request.context.mode.as_str();

    let resume: Option<ResumeAnalysis> = match (db, email) {
        (Some(pool), Some(email)) if request.context.is_resume_mode() => {
            store::find_resume_analysis(pool, email).await?
        }
        _ => None,
    };

    let evaluation = if request.is_first {
        None
    } else {
        let prompt = evaluation_prompt(&request.message, mode, topic);
        let evaluation = AnswerEvaluation::from_ai_result(&ai.generate(&prompt, DEFAULT_ROLE).await);

        if let (Some(pool), Some(email)) = (db, email) {
            let id = store::record_attempt(
                pool,
                NewAttempt {
                    user_email: email,
                    user_answer: &request.message,
                    evaluation: &evaluation,
                    session_mode: mode,
                },
            )
            .await?;
            info!("Recorded interview attempt {id} (score {})", evaluation.score);
        }
        Some(evaluation)
    };

    let prompt = next_question_prompt(
        &request.message,
        resume.as_ref(),
        topic,
        evaluation.as_ref(),
    );
    let next = ai.generate(&prompt, DEFAULT_ROLE).await;
    let reply = non_empty_str(next.get("message"))
        .unwrap_or(FALLBACK_REPLY)
        .to_string();

    Ok(ChatReply { reply, evaluation })
}
