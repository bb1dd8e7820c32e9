// Interview service: résumé analysis, the chat loop, and progress tracking.
// All model calls go through ai::AiGateway; nothing here talks to the Gemini API.

pub mod analysis;
pub mod chat;
pub mod dashboard;
pub mod evaluation;
pub mod handlers;
pub mod prompts;
