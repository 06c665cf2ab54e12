//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`LlmProvider`] trait defined
//! in `agentcast-core`, and a factory ([`build_provider`]) that picks one
//! from the model configuration.
//!
//! [`LlmProvider`]: agentcast_core::llm::provider::LlmProvider

pub mod bedrock;
pub mod echo;

use secrecy::SecretString;

use agentcast_core::llm::box_provider::BoxLlmProvider;
use agentcast_types::config::{ModelConfig, ProviderKind};
use agentcast_types::llm::LlmError;

use self::bedrock::BedrockProvider;
use self::echo::EchoProvider;

/// Create a [`BoxLlmProvider`] from a [`ModelConfig`].
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] if Bedrock is selected but no
/// bearer token was provided.
pub fn build_provider(
    config: &ModelConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    match config.provider {
        ProviderKind::Bedrock => {
            let key = api_key.ok_or_else(|| {
                LlmError::AuthenticationFailed(
                    "no Bedrock bearer token (set AWS_BEARER_TOKEN_BEDROCK)".to_string(),
                )
            })?;
            let provider =
                BedrockProvider::new(key, config.model_id.clone(), config.region.clone())?;
            Ok(BoxLlmProvider::new(provider))
        }
        ProviderKind::Echo => Ok(BoxLlmProvider::new(EchoProvider)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_echo_provider() {
        let config = ModelConfig {
            provider: ProviderKind::Echo,
            ..ModelConfig::default()
        };
        let provider = build_provider(&config, None).unwrap();
        assert_eq!(provider.name(), "echo");
    }

    #[test]
    fn test_build_bedrock_provider() {
        let config = ModelConfig::default();
        let provider =
            build_provider(&config, Some(SecretString::from("bedrock-api-key-test"))).unwrap();
        assert_eq!(provider.name(), "bedrock");
    }

    #[test]
    fn test_bedrock_missing_key() {
        let result = build_provider(&ModelConfig::default(), None);
        match result {
            Err(LlmError::AuthenticationFailed(msg)) => {
                assert!(msg.contains("AWS_BEARER_TOKEN_BEDROCK"))
            }
            Err(other) => panic!("Expected AuthenticationFailed, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }
}
