//! Configuration for OpenAI-compatible providers.

use secrecy::SecretString;

/// Default OpenAI chat completions base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Default model identifier (e.g., "gpt-5-mini").
    pub model: String,
}

/// OpenAI default configuration.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: OPENAI_BASE_URL.into(),
        api_key,
        model: model.into(),
    }
}

/// Configuration for any other OpenAI-compatible endpoint.
///
/// The provider name is `openai` when `base_url` is the OpenAI endpoint and
/// `openai_compatible` otherwise.
pub fn compatible_defaults(base_url: &str, api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    let base_url = base_url.trim_end_matches('/');
    let provider_name = if base_url == OPENAI_BASE_URL {
        "openai"
    } else {
        "openai_compatible"
    };

    OpenAiCompatConfig {
        provider_name: provider_name.into(),
        base_url: base_url.into(),
        api_key,
        model: model.into(),
    }
}
