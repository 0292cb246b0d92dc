//! Request bodies shared by the integration tests.

use serde_json::{json, Value};

/// Three cards, every one split by a different delimiter.
pub const THREE_CARDS: &str = "look | 看\ngood morning :: 早上好\nhello 你好";

pub fn start_request(text: &str, shuffle: bool) -> Value {
    json!({ "text": text, "shuffle": shuffle })
}

pub fn catalog_request(entries: &[(&str, &str)]) -> Value {
    let catalog: Vec<Value> = entries
        .iter()
        .map(|(english, chinese)| json!({ "english": english, "chinese": chinese }))
        .collect();
    json!({ "catalog": catalog })
}

pub fn classify(outcome: &str) -> Value {
    json!({ "outcome": outcome })
}

pub fn mode(mode: &str) -> Value {
    json!({ "mode": mode })
}
