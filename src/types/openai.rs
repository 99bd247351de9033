//! OpenAI-compatible wire types for the gateway's public surface.
//!
//! Only the fields the verifier asserts on are modeled; everything else the
//! gateway returns is tolerated and ignored.

use serde::{Deserialize, Serialize};

/// OpenAI-compatible model entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelEntry {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub owned_by: Option<String>,
}

/// OpenAI-compatible model list wrapper. Deserialization fails if the
/// list-valued `data` field is absent, which is exactly the shape check the
/// catalog probe wants.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelList {
    #[serde(default)]
    pub object: Option<String>,
    pub data: Vec<ModelEntry>,
}

impl ModelList {
    pub fn contains(&self, model_id: &str) -> bool {
        self.data.iter().any(|m| m.id == model_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if any choice carries one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .iter()
            .find_map(|c| c.message.content.as_deref())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_list_without_data_field_is_rejected() {
        let err = serde_json::from_str::<ModelList>(r#"{"object":"list"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn contains_matches_on_exact_id() {
        let list: ModelList = serde_json::from_str(
            r#"{"object":"list","data":[{"id":"gemini-pro-load-balanced","object":"model"},{"id":"other"}]}"#,
        )
        .unwrap();
        assert!(list.contains("gemini-pro-load-balanced"));
        assert!(!list.contains("gemini-pro"));
    }

    #[test]
    fn first_content_skips_choices_without_content() {
        let resp: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant"}},{"message":{"role":"assistant","content":"4"}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_content(), Some("4"));

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(empty.first_content(), None);
    }

    #[test]
    fn temperature_is_omitted_unless_set() {
        let req = ChatCompletionRequest {
            model: "m".to_string(),
            messages: vec![ChatMessage::user("hi")],
            max_tokens: 100,
            temperature: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("temperature").is_none());
    }
}
