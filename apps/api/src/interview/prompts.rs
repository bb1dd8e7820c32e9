// Interview prompt templates.
// The mock responder keys off the opening line of each template
// ("analysis of this resume", "Evaluate this answer", "Generate the next interview question"),
// so keep those phrases intact when editing.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::analysis::ResumeAnalysis;
use super::evaluation::AnswerEvaluation;

/// Role description for résumé analysis calls.
pub const RECRUITER_ROLE: &str = "System: Expert Technical Recruiter";

/// Only this many characters of résumé text are sent to the model.
pub const MAX_RESUME_CHARS: usize = 4000;

const RESUME_ANALYSIS_TEMPLATE: &str = r#"
Perform a deep analysis of this resume.
Task:
1. Extract a concise executive summary (3-4 sentences max).
2. Identify the candidate's experience level (Entry, Mid, Senior, Lead).
3. List exactly 5-8 key technical skills (e.g., Python, React, AWS).
4. Suggest 3 specific interview questions related to their projects or skills.
5. Calculate a match score (0-100) for a general Software Engineer role.

RESUME CONTENT:
{resume_text}

Return JSON strictly:
{
  "summary": "string",
  "level": "string",
  "skills": ["string", "string"],
  "questions": ["string", "string"],
  "score": number,
  "suggestions": ["string", "string"]
}"#;

const EVALUATION_TEMPLATE: &str = r#"
Evaluate this answer.
User Answer: "{answer}"
Context: {mode} interview. Topic: {topic}.

Return JSON strictly:
{
  "score": number (0-10),
  "feedback": "string (concise)",
  "category": "Technical" | "Behavioral" | "System Design"
}"#;

const NEXT_QUESTION_TEMPLATE: &str = r#"
Generate the next interview question.
Context: {context}
Previous Interaction:
- User's Last Answer: "{answer}"
- AI Feedback: {evaluation}

Constraint: Keep the question concise and professional.
Return JSON strictly: { "message": "string" }"#;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Fills `{name}` placeholders in one pass; substituted values are not
/// rescanned. Unknown placeholders are left as written.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

pub fn resume_analysis_prompt(resume_text: &str) -> String {
    let excerpt: String = resume_text.chars().take(MAX_RESUME_CHARS).collect();
    render(RESUME_ANALYSIS_TEMPLATE, &[("resume_text", &excerpt)])
}

pub fn evaluation_prompt(answer: &str, mode: &str, topic: Option<&str>) -> String {
    render(
        EVALUATION_TEMPLATE,
        &[
            ("answer", answer),
            ("mode", mode),
            ("topic", topic.unwrap_or("General")),
        ],
    )
}

/// `evaluation` is serialized as JSON, or `null` on the first turn.
pub fn next_question_prompt(
    answer: &str,
    resume: Option<&ResumeAnalysis>,
    topic: Option<&str>,
    evaluation: Option<&AnswerEvaluation>,
) -> String {
    let context = match resume {
        Some(analysis) => format!(
            "\nCandidate Resume Analysis:\n- Level: {}\n- Detected Skills: {}\n- Summary: {}\n\nTask: Ask a relevant technical or behavioral interview question tailored to this candidate's profile.\n",
            analysis.level,
            analysis.skills.join(", "),
            if analysis.summary.is_empty() {
                "N/A"
            } else {
                analysis.summary.as_str()
            }
        ),
        None => format!(
            "Topic: {}",
            topic.unwrap_or("General Software Engineering")
        ),
    };
    let evaluation_json =
        serde_json::to_string(&evaluation).unwrap_or_else(|_| "null".to_string());

    render(
        NEXT_QUESTION_TEMPLATE,
        &[
            ("answer", answer),
            ("context", &context),
            ("evaluation", &evaluation_json),
        ],
    )
}
