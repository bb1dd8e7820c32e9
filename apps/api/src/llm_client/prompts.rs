// Prompt fragments shared by every gateway call.
// Task-specific prompts live next to the code that builds them (interview::prompts).

/// Role description used when the caller does not supply one.
pub const DEFAULT_ROLE: &str = "You are an expert technical interviewer.";

/// Appended to every composed prompt so the model answers with bare JSON.
pub const JSON_ONLY_INSTRUCTION: &str =
    "IMPORTANT: Return ONLY valid JSON. No markdown formatting.";

/// Joins role, task and the JSON-only instruction into the text sent to a model.
pub fn compose_prompt(role: &str, task: &str) -> String {
    format!("{role}\n\nTask: {task}\n\n{JSON_ONLY_INSTRUCTION}")
}
