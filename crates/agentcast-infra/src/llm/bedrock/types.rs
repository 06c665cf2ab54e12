//! AWS Bedrock Converse API request/response types.
//!
//! Converse is model-agnostic: every model takes the same message shape
//! and the model id travels in the URL path, not the body.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseRequest {
    pub messages: Vec<ConverseMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub system: Vec<TextBlock>,
    pub inference_config: InferenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverseMessage {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
}

/// A content block in a Converse message.
///
/// Only text blocks are produced or consumed; reasoning and tool blocks in
/// a response deserialize with `text == None` and are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseResponse {
    pub output: ConverseOutput,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: ConverseUsage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConverseOutput {
    pub message: ConverseMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverseUsage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let req = ConverseRequest {
            messages: vec![ConverseMessage {
                role: "user".to_string(),
                content: vec![ContentBlock {
                    text: Some("Hello".to_string()),
                }],
            }],
            system: vec![TextBlock {
                text: "Be helpful.".to_string(),
            }],
            inference_config: InferenceConfig {
                max_tokens: 1024,
                temperature: Some(0.7),
            },
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["messages"][0]["content"][0]["text"], "Hello");
        assert_eq!(json["system"][0]["text"], "Be helpful.");
        assert_eq!(json["inferenceConfig"]["maxTokens"], 1024);
        assert!(json.get("model").is_none());
    }

    #[test]
    fn test_empty_system_skipped() {
        let req = ConverseRequest {
            messages: vec![],
            system: vec![],
            inference_config: InferenceConfig {
                max_tokens: 16,
                temperature: None,
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("system").is_none());
        assert!(json["inferenceConfig"].get("temperature").is_none());
    }

    #[test]
    fn test_response_with_reasoning_block() {
        let json = r#"{
            "output": {"message": {"role": "assistant", "content": [
                {"reasoningContent": {"reasoningText": {"text": "thinking..."}}},
                {"text": "Paris."}
            ]}},
            "stopReason": "end_turn",
            "usage": {"inputTokens": 12, "outputTokens": 3, "totalTokens": 15}
        }"#;
        let resp: ConverseResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.output.message.content.len(), 2);
        assert!(resp.output.message.content[0].text.is_none());
        assert_eq!(resp.output.message.content[1].text.as_deref(), Some("Paris."));
        assert_eq!(resp.stop_reason.as_deref(), Some("end_turn"));
        assert_eq!(resp.usage.output_tokens, 3);
    }
}
