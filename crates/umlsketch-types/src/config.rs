//! Service configuration types for umlsketch.
//!
//! `ServiceConfig` holds the non-secret settings read from `umlsketch.toml`.
//! Secrets (the generation credential and the shared access code) never live
//! here; they are read from the environment at startup.

use serde::{Deserialize, Serialize};

/// Non-secret service settings. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Model identifier sent with every generation call.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible chat completions API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Rendering-service image endpoint; the encoded markup is appended.
    #[serde(default = "default_render_base_url")]
    pub render_base_url: String,

    /// Upper bound on a single generation call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Longest accepted description, in characters.
    #[serde(default = "default_max_description_chars")]
    pub max_description_chars: usize,

    /// Output token cap for the generation call; unset leaves it to the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

fn default_model() -> String {
    "gpt-5-mini".to_string()
}

fn default_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_render_base_url() -> String {
    "http://www.plantuml.com/plantuml/img/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_max_description_chars() -> usize {
    8_000
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            render_base_url: default_render_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_description_chars: default_max_description_chars(),
            max_output_tokens: None,
        }
    }
}
