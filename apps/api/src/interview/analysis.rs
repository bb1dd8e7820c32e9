use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ai::AiResult;

pub const UNKNOWN_LEVEL: &str = "Unknown";
pub const MISSING_SUMMARY: &str = "Candidate profile analysis unavailable.";

/// Résumé analysis as stored and returned to clients.
///
/// The gateway guarantees only "a JSON object", so every field is defaulted
/// when the model omits it or sends the wrong type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub summary: String,
    pub level: String,
    pub skills: Vec<String>,
    pub questions: Vec<String>,
    pub score: f64,
    pub suggestions: Vec<String>,
}

impl ResumeAnalysis {
    pub fn from_ai_result(raw: &AiResult) -> Self {
        Self {
            summary: non_empty_str(raw.get("summary")).unwrap_or(MISSING_SUMMARY).to_string(),
            level: non_empty_str(raw.get("level")).unwrap_or(UNKNOWN_LEVEL).to_string(),
            skills: string_list(raw.get("skills")),
            questions: string_list(raw.get("questions")),
            score: number(raw.get("score")).clamp(0.0, 100.0),
            suggestions: string_list(raw.get("suggestions")),
        }
    }
}

pub(crate) fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Numbers pass through; numeric strings such as `"8"` are accepted; anything else is 0.
pub(crate) fn number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(value: Value) -> AiResult {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_complete_result_is_kept() {
        let analysis = ResumeAnalysis::from_ai_result(&result(json!({
            "summary": "Backend engineer.",
            "level": "Senior",
            "skills": ["Rust", "Postgres"],
            "questions": ["Why Rust?"],
            "score": 88,
            "suggestions": ["Add metrics"]
        })));
        assert_eq!(analysis.level, "Senior");
        assert_eq!(analysis.skills, vec!["Rust", "Postgres"]);
        assert_eq!(analysis.score, 88.0);
    }

    #[test]
    fn test_empty_result_gets_defaults() {
        let analysis = ResumeAnalysis::from_ai_result(&AiResult::new());
        assert_eq!(analysis.summary, MISSING_SUMMARY);
        assert_eq!(analysis.level, UNKNOWN_LEVEL);
        assert!(analysis.skills.is_empty());
        assert!(analysis.questions.is_empty());
        assert!(analysis.suggestions.is_empty());
        assert_eq!(analysis.score, 0.0);
    }

    #[test]
    fn test_wrong_types_are_defaulted() {
        let analysis = ResumeAnalysis::from_ai_result(&result(json!({
            "skills": "Rust, Go",
            "score": "72",
            "level": 3,
            "questions": ["Valid", 42, null]
        })));
        assert!(analysis.skills.is_empty());
        assert_eq!(analysis.score, 72.0);
        assert_eq!(analysis.level, UNKNOWN_LEVEL);
        assert_eq!(analysis.questions, vec!["Valid"]);
    }

    #[test]
    fn test_mock_analysis_normalizes_cleanly() {
        let raw = crate::ai::mock::respond("Analyze this resume");
        let analysis = ResumeAnalysis::from_ai_result(&raw);
        assert_eq!(analysis.score, 75.0);
        assert_eq!(analysis.skills.len(), 5);
        assert_eq!(analysis.level, "Intermediate");
    }
}
