//! Tries each configured model once, in priority order, and
//! returns the first response that repairs into a JSON object.
//!
//! Failures never escape: a missing credential, transport errors, unparseable
//! output, or an elapsed deadline all end in the mock responder.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::repair::repair_json;
use super::{mock, AiResult};
use crate::llm_client::prompts::compose_prompt;
use crate::llm_client::{LlmError, TextGenerator};

/// One entry of the model cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAttempt {
    pub model_id: String,
    /// Priority rank, 0 = tried first.
    pub order: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NoCredential,
    Exhausted,
    DeadlineElapsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSource {
    Model(String),
    Mock(FallbackReason),
}

/// Gateway output together with where it came from.
#[derive(Debug, Clone)]
pub struct Generated {
    pub result: AiResult,
    pub source: ResultSource,
}

pub struct AiGateway {
    generator: Option<Arc<dyn TextGenerator>>,
    attempts: Vec<ModelAttempt>,
    deadline: Option<Duration>,
}

impl AiGateway {
    /// `generator` is `None` when no credential is configured.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, models: Vec<String>) -> Self {
        let attempts = models
            .into_iter()
            .enumerate()
            .map(|(order, model_id)| ModelAttempt { model_id, order })
            .collect();
        Self {
            generator,
            attempts,
            deadline: None,
        }
    }

    /// A gateway that always answers from the mock responder.
    #[cfg(test)]
    pub fn mock_only() -> Self {
        Self::new(None, Vec::new())
    }

    /// Bounds the total time spent across all model attempts of one call.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn is_live(&self) -> bool {
        self.generator.is_some()
    }

    pub fn attempts(&self) -> &[ModelAttempt] {
        &self.attempts
    }

    pub async fn generate(&self, task_prompt: &str, role_description: &str) -> AiResult {
        let generated = self.generate_traced(task_prompt, role_description).await;
        match &generated.source {
            ResultSource::Model(model) => debug!("AI result from {}", model),
            ResultSource::Mock(reason) => debug!("AI result from mock ({:?})", reason),
        }
        generated.result
    }

    pub async fn generate_traced(&self, task_prompt: &str, role_description: &str) -> Generated {
        info!("AI gateway called");

        let Some(generator) = &self.generator else {
            return fallback(task_prompt, FallbackReason::NoCredential);
        };

        let started = Instant::now();
        let prompt = compose_prompt(role_description, task_prompt);

        for attempt in &self.attempts {
            let model = attempt.model_id.as_str();
            info!("Attempting model {} (rank {})", model, attempt.order);

            let outcome = match self.deadline {
                Some(limit) => {
                    let remaining = limit.saturating_sub(started.elapsed());
                    if remaining.is_zero() {
                        return fallback(task_prompt, FallbackReason::DeadlineElapsed);
                    }
                    tokio::time::timeout(remaining, generator.generate(model, &prompt))
                        .await
                        .unwrap_or(Err(LlmError::Timeout))
                }
                None => generator.generate(model, &prompt).await,
            };

            match outcome {
                Ok(text) => match repair_json(&text) {
                    Some(result) => {
                        info!("Model {} returned a valid JSON object", model);
                        return Generated {
                            result,
                            source: ResultSource::Model(model.to_string()),
                        };
                    }
                    None => warn!("Model {} returned text that is not a JSON object", model),
                },
                Err(LlmError::Timeout) => {
                    warn!("Model {} did not answer before the deadline", model);
                    return fallback(task_prompt, FallbackReason::DeadlineElapsed);
                }
                Err(e) => warn!("Model {} failed: {}", model, e),
            }
        }

        fallback(task_prompt, FallbackReason::Exhausted)
    }
}

fn fallback(task_prompt: &str, reason: FallbackReason) -> Generated {
    warn!("Using smart mock responder ({:?})", reason);
    Generated {
        result: mock::respond(task_prompt),
        source: ResultSource::Mock(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

    const ANALYSIS_PROMPT: &str =
        "Perform a deep analysis of this resume.\nRESUME CONTENT:\nJane Doe, Rust engineer";

    #[derive(Clone, Copy)]
    enum Reply {
        Text(&'static str),
        Fail,
        Hang,
    }

    /// Scripted stand-in for the remote call; unknown models fail.
    struct ScriptedGenerator {
        replies: HashMap<&'static str, Reply>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedGenerator {
        fn with(replies: &[(&'static str, Reply)]) -> Arc<Self> {
            Arc::new(Self {
                replies: replies.iter().copied().collect(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn models_called(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(m, _)| m.clone())
                .collect()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((model.to_string(), prompt.to_string()));
            match self.replies.get(model).copied().unwrap_or(Reply::Fail) {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Fail => Err(LlmError::Api {
                    status: 429,
                    message: "quota exceeded".to_string(),
                }),
                Reply::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok("{\"late\": true}".to_string())
                }
            }
        }
    }

    fn live(generator: &Arc<ScriptedGenerator>) -> Option<Arc<dyn TextGenerator>> {
        let generator: Arc<dyn TextGenerator> = generator.clone();
        Some(generator)
    }

    fn models(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|m| m.to_string()).collect()
    }

    #[tokio::test]
    async fn test_no_credential_goes_straight_to_mock() {
        let gateway = AiGateway::new(None, models(&["gemini-1.5-flash"]));
        let generated = gateway.generate_traced(ANALYSIS_PROMPT, "role").await;
        assert_eq!(
            generated.source,
            ResultSource::Mock(FallbackReason::NoCredential)
        );
        assert_eq!(generated.result["score"], 75);
        assert_eq!(generated.result, mock::respond(ANALYSIS_PROMPT));
    }

    #[tokio::test]
    async fn test_first_valid_model_wins_and_stops_cascade() {
        let generator = ScriptedGenerator::with(&[
            ("a", Reply::Fail),
            ("b", Reply::Text("```json\n{\"score\": 9, \"feedback\": \"Great\"}\n```")),
            ("c", Reply::Text("{\"score\": 1}")),
        ]);
        let gateway = AiGateway::new(live(&generator), models(&["a", "b", "c"]));

        let generated = gateway.generate_traced("Evaluate this answer.", "role").await;

        assert_eq!(generated.source, ResultSource::Model("b".to_string()));
        assert_eq!(generated.result["score"], 9);
        assert_eq!(generator.models_called(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_unparseable_output_advances_to_next_model() {
        let generator = ScriptedGenerator::with(&[
            ("a", Reply::Text("I cannot produce JSON today.")),
            ("b", Reply::Text("Here you go: {\"message\": \"What is a monad?\"} Enjoy!")),
        ]);
        let gateway = AiGateway::new(live(&generator), models(&["a", "b"]));

        let generated = gateway.generate_traced("next question", "role").await;

        assert_eq!(generated.source, ResultSource::Model("b".to_string()));
        assert_eq!(generated.result["message"], "What is a monad?");
    }

    #[tokio::test]
    async fn test_every_model_failing_falls_back_to_mock() {
        let generator = ScriptedGenerator::with(&[("a", Reply::Fail), ("b", Reply::Text("nope"))]);
        let gateway = AiGateway::new(live(&generator), models(&["a", "b"]));

        let generated = gateway.generate_traced(ANALYSIS_PROMPT, "role").await;

        assert_eq!(generated.source, ResultSource::Mock(FallbackReason::Exhausted));
        assert_eq!(generated.result["score"], 75);
        assert_eq!(generator.models_called(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_model_list_falls_back_to_mock() {
        let generator = ScriptedGenerator::with(&[]);
        let gateway = AiGateway::new(live(&generator), Vec::new());
        let result = gateway
            .generate("Evaluate this answer. User Answer: \"ok\"", "role")
            .await;
        assert_eq!(result["score"], 2);
        assert!(generator.models_called().is_empty());
    }

    #[tokio::test]
    async fn test_prompt_composes_role_task_and_json_instruction() {
        let generator = ScriptedGenerator::with(&[("a", Reply::Text("{}"))]);
        let gateway = AiGateway::new(live(&generator), models(&["a"]));

        gateway
            .generate("Evaluate this answer.", "You are a strict reviewer.")
            .await;

        let calls = generator.calls.lock().unwrap();
        let (_, prompt) = &calls[0];
        assert!(prompt.starts_with("You are a strict reviewer."));
        assert!(prompt.contains("Task: Evaluate this answer."));
        assert!(prompt.ends_with(JSON_ONLY_INSTRUCTION));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_stops_cascade_and_uses_mock() {
        let generator = ScriptedGenerator::with(&[
            ("slow", Reply::Hang),
            ("fast", Reply::Text("{\"score\": 10}")),
        ]);
        let gateway = AiGateway::new(live(&generator), models(&["slow", "fast"]))
            .with_deadline(Some(Duration::from_secs(5)));

        let generated = gateway
            .generate_traced("Evaluate this answer. User Answer: \"ok\"", "role")
            .await;

        assert_eq!(
            generated.source,
            ResultSource::Mock(FallbackReason::DeadlineElapsed)
        );
        assert_eq!(generated.result["score"], 2);
        assert_eq!(generator.models_called(), vec!["slow"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_without_deadline_slow_model_still_wins() {
        let generator = ScriptedGenerator::with(&[("slow", Reply::Hang)]);
        let gateway = AiGateway::new(live(&generator), models(&["slow"]));

        let generated = gateway.generate_traced("anything", "role").await;

        assert_eq!(generated.source, ResultSource::Model("slow".to_string()));
        assert_eq!(generated.result["late"], true);
    }

    #[test]
    fn test_attempts_keep_priority_order() {
        let gateway = AiGateway::new(None, models(&["x", "y"]));
        assert_eq!(
            gateway.attempts(),
            &[
                ModelAttempt {
                    model_id: "x".to_string(),
                    order: 0
                },
                ModelAttempt {
                    model_id: "y".to_string(),
                    order: 1
                },
            ]
        );
        assert!(!gateway.is_live());
    }
}
