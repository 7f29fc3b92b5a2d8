//! Wire types for the OpenAI-compatible chat-completions API.
//!
//! Only the fields this service reads are deserialized; the provider may
//! send more.

use serde::{Deserialize, Serialize};

/// A single chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completion request body.
///
/// Sampling parameters are fixed process-wide; every tool uses the same ones.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl ChatRequest {
    /// Build a request with the fixed sampling parameters and a
    /// (system, user) message pair.
    pub fn new(model: impl Into<String>, system: &str, user: &str) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// Chat-completion response envelope (subset we read).
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_carries_fixed_sampling_params() {
        let req = ChatRequest::new("mistralai/devstral-small", "sys", "usr");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["temperature"], json!(0.7));
        assert_eq!(value["max_tokens"], json!(2000));
        assert_eq!(value["top_p"], json!(1.0));
        assert_eq!(value["frequency_penalty"], json!(0.0));
        assert_eq!(value["presence_penalty"], json!(0.0));
        assert_eq!(value["messages"][0]["role"], json!("system"));
        assert_eq!(value["messages"][1]["role"], json!("user"));
    }

    #[test]
    fn response_with_missing_choices_deserializes_empty() {
        let resp: ChatResponse = serde_json::from_value(json!({"id": "gen-1"})).unwrap();
        assert!(resp.choices.is_empty());
    }
}
