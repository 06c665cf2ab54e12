//! BedrockProvider -- concrete [`LlmProvider`] implementation for AWS Bedrock.
//!
//! Sends requests to the Bedrock Runtime Converse API using Bearer token
//! authentication.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use agentcast_core::llm::provider::LlmProvider;
use agentcast_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, Usage,
};

use super::types::{
    ContentBlock, ConverseMessage, ConverseRequest, ConverseResponse, InferenceConfig, TextBlock,
};

/// Per-request HTTP timeout. Agent-level deadlines are enforced separately.
const HTTP_TIMEOUT: Duration = Duration::from_secs(300);

/// AWS Bedrock LLM provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing HTTP request headers. It never appears in Debug output.
pub struct BedrockProvider {
    client: reqwest::Client,
    api_key: SecretString,
    region: String,
    model_id: String,
}

impl BedrockProvider {
    /// Prefix used to identify Bedrock API keys.
    const KEY_PREFIX: &'static str = "bedrock-api-key-";

    /// Create a new Bedrock provider.
    ///
    /// If `api_key` starts with `bedrock-api-key-`, the prefix is stripped
    /// and the remainder is used as the Bearer token. When the token embeds
    /// a credential scope for a different region, that region wins.
    pub fn new(api_key: SecretString, model_id: String, region: String) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        let raw_key = api_key.expose_secret();
        let token_part = raw_key.strip_prefix(Self::KEY_PREFIX).unwrap_or(raw_key);
        let region = Self::detect_region_from_token(token_part).unwrap_or(region);

        Ok(Self {
            client,
            api_key: SecretString::from(token_part.to_string()),
            region,
            model_id,
        })
    }

    /// Try to extract the AWS region from a base64-encoded presigned URL token.
    ///
    /// The token decodes to a URL like:
    /// `bedrock.amazonaws.com/?...&X-Amz-Credential=AKIA.../20260212/us-east-1/bedrock/aws4_request&...`
    fn detect_region_from_token(token: &str) -> Option<String> {
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD.decode(token).ok()?;
        let text = String::from_utf8(decoded).ok()?;

        let cred_start = text.find("X-Amz-Credential=")?;
        let cred_value = &text[cred_start + "X-Amz-Credential=".len()..];
        // <access-key>/<date>/<region>/<service>/aws4_request
        let region = cred_value.split('/').nth(2)?;
        let region = region.split('&').next().unwrap_or(region);
        tracing::info!(region = %region, "Detected region from Bedrock bearer token");
        Some(region.to_string())
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Build the full Bedrock Runtime URL for a given action.
    fn url(&self, action: &str) -> String {
        format!(
            "https://bedrock-runtime.{}.amazonaws.com/model/{}/{}",
            self.region, self.model_id, action
        )
    }

    /// Convert a generic [`CompletionRequest`] into a [`ConverseRequest`].
    fn to_converse_request(request: &CompletionRequest) -> ConverseRequest {
        let messages = request
            .messages
            .iter()
            .map(|m| ConverseMessage {
                role: m.role.to_string(),
                content: vec![ContentBlock {
                    text: Some(m.content.clone()),
                }],
            })
            .collect();

        let system = request
            .system
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| TextBlock { text: s.clone() })
            .collect();

        ConverseRequest {
            messages,
            system,
            inference_config: InferenceConfig {
                max_tokens: request.max_tokens,
                temperature: request.temperature,
            },
        }
    }

    fn map_stop_reason(reason: Option<&str>) -> StopReason {
        match reason {
            Some("guardrail_intervened") | Some("content_filtered") => StopReason::ContentFiltered,
            Some(other) => other.parse().unwrap_or(StopReason::EndTurn),
            None => StopReason::EndTurn,
        }
    }
}

// BedrockProvider intentionally does NOT derive Debug.

impl LlmProvider for BedrockProvider {
    fn name(&self) -> &str {
        "bedrock"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = Self::to_converse_request(request);
        let url = self.url("converse");

        tracing::debug!(url = %url, model_id = %self.model_id, region = %self.region, "Bedrock converse request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %error_body, url = %url, "Bedrock API error response");
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed(format!("HTTP {status}: {error_body}")),
                429 => LlmError::RateLimited,
                400 | 404 | 422 => LlmError::InvalidRequest(format!("HTTP {status}: {error_body}")),
                s if s >= 500 => LlmError::Provider {
                    message: format!("Bedrock server error HTTP {status}: {error_body}"),
                },
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let converse: ConverseResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        let content = converse
            .output
            .message
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        Ok(CompletionResponse {
            content,
            model: self.model_id.clone(),
            stop_reason: Self::map_stop_reason(converse.stop_reason.as_deref()),
            usage: Usage {
                input_tokens: converse.usage.input_tokens,
                output_tokens: converse.usage.output_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentcast_types::llm::Message;

    fn make_provider() -> BedrockProvider {
        BedrockProvider::new(
            SecretString::from("bedrock-api-key-test-not-real"),
            "openai.gpt-oss-120b-1:0".to_string(),
            "us-west-2".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(make_provider().name(), "bedrock");
    }

    #[test]
    fn test_url_construction() {
        assert_eq!(
            make_provider().url("converse"),
            "https://bedrock-runtime.us-west-2.amazonaws.com/model/openai.gpt-oss-120b-1:0/converse"
        );
    }

    #[test]
    fn test_region_detected_from_token() {
        use base64::Engine;
        let presigned = "bedrock.amazonaws.com/?Action=CallWithBearerToken\
            &X-Amz-Credential=AKIAEXAMPLE/20260212/eu-central-1/bedrock/aws4_request&X-Amz-Date=x";
        let token = base64::engine::general_purpose::STANDARD.encode(presigned);
        let provider = BedrockProvider::new(
            SecretString::from(format!("bedrock-api-key-{token}")),
            "m".to_string(),
            "us-west-2".to_string(),
        )
        .unwrap();

        assert_eq!(provider.region(), "eu-central-1");
        assert_eq!(provider.api_key.expose_secret(), token);
    }

    #[test]
    fn test_unparseable_token_keeps_configured_region() {
        assert_eq!(make_provider().region(), "us-west-2");
    }

    #[test]
    fn test_to_converse_request() {
        let request = CompletionRequest {
            model: "openai.gpt-oss-120b-1:0".to_string(),
            messages: vec![Message::user("Hello"), Message::assistant("Hi"), Message::user("Bye")],
            system: Some("Be helpful".to_string()),
            max_tokens: 1024,
            temperature: Some(0.7),
        };

        let converse = BedrockProvider::to_converse_request(&request);
        assert_eq!(converse.messages.len(), 3);
        assert_eq!(converse.messages[1].role, "assistant");
        assert_eq!(converse.messages[2].content[0].text.as_deref(), Some("Bye"));
        assert_eq!(converse.system[0].text, "Be helpful");
        assert_eq!(converse.inference_config.max_tokens, 1024);
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(BedrockProvider::map_stop_reason(Some("max_tokens")), StopReason::MaxTokens);
        assert_eq!(
            BedrockProvider::map_stop_reason(Some("guardrail_intervened")),
            StopReason::ContentFiltered
        );
        assert_eq!(BedrockProvider::map_stop_reason(Some("weird")), StopReason::EndTurn);
        assert_eq!(BedrockProvider::map_stop_reason(None), StopReason::EndTurn);
    }
}
