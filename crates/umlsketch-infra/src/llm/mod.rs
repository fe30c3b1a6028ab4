//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `umlsketch-core`, and a factory ([`create_provider`])
//! that builds it from the service configuration.
//!
//! [`LlmProvider`]: umlsketch_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use umlsketch_core::llm::box_provider::BoxLlmProvider;
use umlsketch_types::config::ServiceConfig;

use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] from the service configuration.
///
/// `api_key` is the resolved generation credential. The base URL comes from
/// [`ServiceConfig::api_base_url`], so any OpenAI-compatible endpoint works.
pub fn create_provider(config: &ServiceConfig, api_key: SecretString) -> BoxLlmProvider {
    let oai_config =
        openai_compat::config::compatible_defaults(&config.api_base_url, api_key, &config.model);

    tracing::debug!(
        provider = %oai_config.provider_name,
        base_url = %oai_config.base_url,
        model = %oai_config.model,
        "Creating LLM provider"
    );

    BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai_config))
}
