// AI resilience layer: model cascade, JSON repair, and the deterministic mock.
// Handlers only ever see `AiGateway::generate`, which always yields a JSON object.

pub mod gateway;
pub mod mock;
pub mod repair;
pub mod topics;

pub use gateway::AiGateway;

/// A JSON object returned by the gateway. Shape depends on the task kind;
/// callers apply their own defaults for missing fields.
pub type AiResult = serde_json::Map<String, serde_json::Value>;
