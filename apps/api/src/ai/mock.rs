//! Deterministic stand-in for the model when no live call succeeds.
//!
//! Prompts are classified by case-insensitive marker substrings, checked in the
//! order of [`CLASSIFIERS`]; the first hit decides the [`TaskKind`]. Anything
//! that varies between answers is picked by `prompt length % candidates`, so the
//! same prompt always yields the same payload.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use super::topics::{generic_questions, questions_for, UNKNOWN_TOPIC};
use super::AiResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    ResumeAnalysis,
    AnswerEvaluation,
    NextQuestion,
    Greeting,
    FreeformChat,
}

/// Ordered (kind, markers) table. Markers are matched against the lowercased prompt.
pub const CLASSIFIERS: &[(TaskKind, &[&str])] = &[
    (
        TaskKind::ResumeAnalysis,
        &["analysis of this resume", "analyze this resume"],
    ),
    (TaskKind::AnswerEvaluation, &["evaluate this answer"]),
    (
        TaskKind::NextQuestion,
        &["generate the next interview question"],
    ),
    (TaskKind::Greeting, &["start", "begin", "hello"]),
];

const TECH_KEYWORDS: &[&str] = &["java", "react", "node"];
const REASONING_MARKERS: &[&str] = &["because", "example"];
const MIN_ANSWER_CHARS: usize = 5;

/// Answer block of the server's evaluation prompt; may span several lines.
static PROMPT_ANSWER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)user answer:\s*"(.*?)"\s*\n\s*Context:"#)
        .expect("prompt answer pattern is valid")
});
static QUOTED_ANSWER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:evaluate this answer|user answer):\s*"(.*)""#)
        .expect("answer pattern is valid")
});
static TOPIC_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Topic:\s*(.*)").expect("topic pattern is valid"));
static ROLE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Job Role:\s*(.*)").expect("role pattern is valid"));
static SKILLS_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)- Detected Skills:\s*(.*)").expect("skills pattern is valid")
});

pub fn classify(prompt: &str) -> TaskKind {
    let lowered = prompt.to_lowercase();
    CLASSIFIERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| lowered.contains(m)))
        .map(|(kind, _)| *kind)
        .unwrap_or(TaskKind::FreeformChat)
}

/// Produces a canned result for `prompt`. Pure; safe to call from any task.
pub fn respond(prompt: &str) -> AiResult {
    let payload = match classify(prompt) {
        TaskKind::ResumeAnalysis => resume_analysis(),
        TaskKind::AnswerEvaluation => evaluate_answer(prompt),
        TaskKind::NextQuestion => next_question(prompt),
        TaskKind::Greeting => json!({
            "message": "Great! Let's get started. Please introduce yourself and highlight your key technical skills.",
            "score": 0,
            "feedback": "Introduction phase."
        }),
        TaskKind::FreeformChat => json!({
            "message": "That's interesting. Can you tell me more about your experience with backend testing?",
            "score": 5,
            "feedback": "General probe.",
            "error": null
        }),
    };

    match payload {
        Value::Object(map) => map,
        _ => AiResult::new(),
    }
}

fn resume_analysis() -> Value {
    json!({
        "summary": "This is a generated analysis (Smart Mock) because the AI service is unavailable or returned an error. The candidate appears to have experience in software development.",
        "level": "Intermediate",
        "skills": ["JavaScript", "HTML/CSS", "Node.js", "React", "Problem Solving"],
        "questions": [
            "Explain the Virtual DOM in React.",
            "How do you handle asynchronous operations in JavaScript?",
            "Describe a challenging project you worked on."
        ],
        "score": 75,
        "suggestions": [
            "Deepen your knowledge of System Design patterns.",
            "Consider learning TypeScript for type safety.",
            "Add more metrics to your project descriptions."
        ]
    })
}

fn evaluate_answer(prompt: &str) -> Value {
    let answer = PROMPT_ANSWER
        .captures(prompt)
        .or_else(|| QUOTED_ANSWER.captures(prompt))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_default();

    let (score, feedback) = if answer.chars().count() < MIN_ANSWER_CHARS {
        (2, "Your answer provides no detail. Please elaborate.")
    } else if TECH_KEYWORDS.iter().any(|k| answer.contains(k)) {
        (8, "Good use of technical terminology.")
    } else if REASONING_MARKERS.iter().any(|k| answer.contains(k)) {
        (7, "Good reasoning provided.")
    } else {
        (5, "Okay answer.")
    };

    json!({
        "score": score,
        "feedback": feedback,
        "category": "Technical"
    })
}

fn next_question(prompt: &str) -> Value {
    let topic = label_value(&TOPIC_LABEL, prompt);
    let role = label_value(&ROLE_LABEL, prompt);
    let skills = label_value(&SKILLS_LABEL, prompt);
    let context = format!("{topic} {role} {skills}").to_lowercase();
    // UTF-16 length, so astral characters count twice.
    let selector = prompt.encode_utf16().count();

    let question = match questions_for(&context) {
        Some(questions) => questions[selector % questions.len()].to_string(),
        None => {
            let display_topic = [topic, role]
                .into_iter()
                .find(|s| !s.is_empty())
                .unwrap_or(UNKNOWN_TOPIC);
            let mut templates = generic_questions(display_topic);
            let index = selector % templates.len();
            std::mem::take(&mut templates[index])
        }
    };

    json!({
        "message": question,
        "feedback": "Moving to next topic.",
        "score": 0
    })
}

/// Text after a `Label:` marker up to the end of that line, trimmed.
fn label_value<'a>(pattern: &Regex, prompt: &'a str) -> &'a str {
    pattern
        .captures(prompt)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or_default()
}
