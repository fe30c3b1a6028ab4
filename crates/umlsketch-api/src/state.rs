//! Application state wiring the services together.
//!
//! AppState holds the concrete service instances used by both the CLI and the
//! HTTP API. The services are generic over the markup encoder; AppState pins
//! them to the PlantUML implementation.

use std::path::Path;
use std::sync::Arc;

use secrecy::SecretString;

use umlsketch_core::diagram::link::ImageLinkBuilder;
use umlsketch_core::llm::box_provider::BoxLlmProvider;
use umlsketch_core::service::generator::{DiagramGenerator, GeneratorSettings};
use umlsketch_core::service::renderer::DiagramRenderer;
use umlsketch_infra::config::load_service_config;
use umlsketch_infra::encoding::PlantUmlEncoder;
use umlsketch_infra::llm::create_provider;
use umlsketch_infra::secret::{OPENAI_API_KEY_VAR, ServiceSecrets};
use umlsketch_types::config::ServiceConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteGenerator = DiagramGenerator<PlantUmlEncoder>;
pub type ConcreteRenderer = DiagramRenderer<PlantUmlEncoder>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ConcreteGenerator>,
    pub renderer: Arc<ConcreteRenderer>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Load configuration and secrets, then wire the services.
    pub async fn init(config_path: Option<&Path>) -> Self {
        let config = load_service_config(config_path).await;
        Self::build(config, ServiceSecrets::from_env())
    }

    /// Wire services from already-loaded configuration and secrets.
    pub fn build(config: ServiceConfig, secrets: ServiceSecrets) -> Self {
        let provider = match secrets.openai_api_key {
            Some(api_key) => Some(create_provider(&config, api_key)),
            None => {
                tracing::warn!(
                    "{OPENAI_API_KEY_VAR} is not set; generation requests will fail until it is configured"
                );
                None
            }
        };

        if secrets.access_code.is_none() {
            tracing::info!("No access code configured; generation is open to all callers");
        }

        Self::from_parts(config, provider, secrets.access_code)
    }

    /// Wire services around an explicit provider (tests use a mock here).
    pub fn from_parts(
        config: ServiceConfig,
        provider: Option<BoxLlmProvider>,
        access_code: Option<SecretString>,
    ) -> Self {
        let links = ImageLinkBuilder::new(config.render_base_url.clone(), PlantUmlEncoder::new());

        let generator = DiagramGenerator::new(
            provider,
            access_code,
            links.clone(),
            GeneratorSettings::from_config(&config),
        );
        let renderer = DiagramRenderer::new(links);

        Self {
            generator: Arc::new(generator),
            renderer: Arc::new(renderer),
            config: Arc::new(config),
        }
    }
}
