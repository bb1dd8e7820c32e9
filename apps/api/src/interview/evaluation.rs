use serde::{Deserialize, Serialize};

use super::analysis::{non_empty_str, number};
use crate::ai::AiResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Technical,
    Behavioral,
    #[serde(rename = "System Design")]
    SystemDesign,
}

impl Category {
    /// Folds free-form labels: anything mentioning "behavioral" or "system"
    /// maps to that bucket, everything else is Technical.
    pub fn fold(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("behavioral") {
            Category::Behavioral
        } else if label.contains("system") {
            Category::SystemDesign
        } else {
            Category::Technical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technical => "Technical",
            Category::Behavioral => "Behavioral",
            Category::SystemDesign => "System Design",
        }
    }
}

/// Score and feedback for a single answer (score 0–10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    pub score: f64,
    pub feedback: String,
    pub category: Category,
}

impl AnswerEvaluation {
    pub fn from_ai_result(raw: &AiResult) -> Self {
        Self {
            score: number(raw.get("score")).clamp(0.0, 10.0),
            feedback: non_empty_str(raw.get("feedback"))
                .unwrap_or_default()
                .to_string(),
            category: non_empty_str(raw.get("category"))
                .map(Category::fold)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_fold() {
        assert_eq!(Category::fold("Behavioral"), Category::Behavioral);
        assert_eq!(Category::fold("system design"), Category::SystemDesign);
        assert_eq!(Category::fold("Distributed Systems"), Category::SystemDesign);
        assert_eq!(Category::fold("Coding"), Category::Technical);
    }

    #[test]
    fn test_category_serializes_with_display_names() {
        assert_eq!(
            serde_json::to_string(&Category::SystemDesign).unwrap(),
            "\"System Design\""
        );
        let parsed: Category = serde_json::from_str("\"Behavioral\"").unwrap();
        assert_eq!(parsed, Category::Behavioral);
    }

    #[test]
    fn test_missing_fields_default() {
        let evaluation = AnswerEvaluation::from_ai_result(&AiResult::new());
        assert_eq!(evaluation.score, 0.0);
        assert_eq!(evaluation.feedback, "");
        assert_eq!(evaluation.category, Category::Technical);
    }

    #[test]
    fn test_out_of_range_score_is_clamped() {
        let raw = json!({"score": 42, "feedback": "Wow", "category": "Behavioral"});
        let evaluation = AnswerEvaluation::from_ai_result(raw.as_object().unwrap());
        assert_eq!(evaluation.score, 10.0);
        assert_eq!(evaluation.category, Category::Behavioral);
    }

    #[test]
    fn test_mock_evaluation_is_technical() {
        let raw = crate::ai::mock::respond("Evaluate this answer. User Answer: \"ok\"");
        let evaluation = AnswerEvaluation::from_ai_result(&raw);
        assert_eq!(evaluation.score, 2.0);
        assert_eq!(evaluation.category, Category::Technical);
    }
}
