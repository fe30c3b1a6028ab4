//! Diagram generation service.
//!
//! `DiagramGenerator` validates a use-case description, checks the shared
//! access code, asks the LLM for a schema-constrained [`DiagramResult`],
//! normalizes the returned markup and attaches an image URL.
//!
//! Validation order is fixed: description, then credential, then access
//! code. Nothing reaches the provider until all three pass.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, debug, error, info_span};

use umlsketch_types::config::ServiceConfig;
use umlsketch_types::diagram::{
    DiagramResult, GeneratedDiagram, GenerationRequest, PresentedCode,
};
use umlsketch_types::error::DiagramError;
use umlsketch_types::llm::{CompletionRequest, Message, MessageRole};

use crate::diagram::link::{ImageLinkBuilder, MarkupEncoder};
use crate::diagram::markup::normalize_markup;
use crate::diagram::prompt::{SEQUENCE_SYSTEM_PROMPT, build_user_prompt};
use crate::diagram::schema::diagram_output_config;
use crate::llm::box_provider::BoxLlmProvider;

/// Tunables for the generation call.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub model: String,
    pub max_output_tokens: Option<u32>,
    pub timeout: Duration,
    pub max_description_chars: usize,
}

impl GeneratorSettings {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
            timeout: Duration::from_secs(config.request_timeout_secs),
            max_description_chars: config.max_description_chars,
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::from_config(&ServiceConfig::default())
    }
}

/// Generates sequence diagrams from natural-language use cases.
///
/// `provider` is `None` when no generation credential was configured; every
/// generate call with a valid description then fails with
/// [`DiagramError::NotConfigured`]. `access_code` is `None` when the shared
/// secret is unset, which disables the access check.
pub struct DiagramGenerator<E: MarkupEncoder> {
    provider: Option<BoxLlmProvider>,
    access_code: Option<SecretString>,
    links: ImageLinkBuilder<E>,
    settings: GeneratorSettings,
}

impl<E: MarkupEncoder> DiagramGenerator<E> {
    pub fn new(
        provider: Option<BoxLlmProvider>,
        access_code: Option<SecretString>,
        links: ImageLinkBuilder<E>,
        settings: GeneratorSettings,
    ) -> Self {
        Self {
            provider,
            access_code,
            links,
            settings,
        }
    }

    /// Whether callers must present an access code.
    pub fn requires_access_code(&self) -> bool {
        self.access_code.is_some()
    }

    /// Generate a diagram for `request`.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedDiagram, DiagramError> {
        let description = self.validate_description(request.description.as_deref())?;
        let provider = self.provider.as_ref().ok_or(DiagramError::NotConfigured)?;
        self.authorize(request.access_code.as_ref().and_then(PresentedCode::as_text))?;

        let completion = self.build_request(description);
        let span = info_span!(
            "gen_ai.generate_diagram",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %completion.model,
            gen_ai.request.max_tokens = ?completion.max_tokens,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
        );

        let response = tokio::time::timeout(self.settings.timeout, provider.complete(&completion))
            .instrument(span.clone())
            .await
            .map_err(|_| DiagramError::Timeout(self.settings.timeout))??;

        span.record("gen_ai.usage.input_tokens", response.usage.input_tokens);
        span.record("gen_ai.usage.output_tokens", response.usage.output_tokens);
        debug!(
            response_id = %response.id,
            stop_reason = %response.stop_reason,
            "Generation call completed"
        );

        let result = parse_diagram_result(&response.content)?;
        let code = normalize_markup(&result.plantuml_code);
        let image_url = self.links.image_url(&code)?;

        Ok(GeneratedDiagram {
            code,
            image_url,
            diagram_type: result.diagram_type,
            explanation: result.explanation,
        })
    }

    /// Build the completion request sent for `description`.
    pub fn build_request(&self, description: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![Message {
                role: MessageRole::User,
                content: build_user_prompt(description),
            }],
            system: Some(SEQUENCE_SYSTEM_PROMPT.to_string()),
            max_tokens: self.settings.max_output_tokens,
            temperature: None,
            output_config: Some(diagram_output_config()),
        }
    }

    fn validate_description<'a>(
        &self,
        description: Option<&'a str>,
    ) -> Result<&'a str, DiagramError> {
        let description = description
            .filter(|d| !d.is_empty())
            .ok_or(DiagramError::MissingDescription)?;

        let max = self.settings.max_description_chars;
        if description.chars().count() > max {
            return Err(DiagramError::DescriptionTooLong { max });
        }
        Ok(description)
    }

    fn authorize(&self, presented: Option<&str>) -> Result<(), DiagramError> {
        match &self.access_code {
            Some(expected) if presented != Some(expected.expose_secret()) => {
                Err(DiagramError::Forbidden)
            }
            _ => Ok(()),
        }
    }
}

/// Parse the model's structured output, logging the raw content on failure.
fn parse_diagram_result(content: &str) -> Result<DiagramResult, DiagramError> {
    serde_json::from_str::<DiagramResult>(content).map_err(|e| {
        error!(error = %e, raw_content = %content, "Failed to parse model response");
        DiagramError::UpstreamParse(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use umlsketch_types::error::EncodeError;
    use umlsketch_types::llm::{CompletionResponse, LlmError, StopReason, Usage};

    use crate::llm::provider::LlmProvider;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Mock provider returning a fixed reply and recording the last request.
    struct MockLlmProvider {
        reply: Result<String, String>,
        delay: Option<Duration>,
        last_request: Arc<Mutex<Option<CompletionRequest>>>,
    }

    impl MockLlmProvider {
        fn with_response(content: &str) -> Self {
            Self {
                reply: Ok(content.to_string()),
                delay: None,
                last_request: Arc::new(Mutex::new(None)),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                ..Self::with_response("")
            }
        }
    }

    impl LlmProvider for MockLlmProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match &self.reply {
                Ok(content) => Ok(CompletionResponse {
                    id: "chatcmpl-mock".to_string(),
                    content: content.clone(),
                    model: "mock-model".to_string(),
                    stop_reason: StopReason::EndTurn,
                    usage: Usage {
                        input_tokens: 900,
                        output_tokens: 300,
                    },
                }),
                Err(message) => Err(LlmError::Provider {
                    message: message.clone(),
                }),
            }
        }
    }

    /// Hex encoder standing in for the rendering-service encoding.
    struct HexEncoder;

    impl MarkupEncoder for HexEncoder {
        fn encode(&self, markup: &str) -> Result<String, EncodeError> {
            Ok(markup.bytes().map(|b| format!("{b:02x}")).collect())
        }

        fn decode(&self, _segment: &str) -> Result<String, EncodeError> {
            Err(EncodeError::InvalidSegment("decode unused in tests".to_string()))
        }
    }

    fn diagram_json(code: &str) -> String {
        serde_json::to_string(&DiagramResult {
            plantuml_code: code.to_string(),
            diagram_type: "Диаграмма последовательности".to_string(),
            explanation: "Пользователь входит в систему".to_string(),
        })
        .unwrap()
    }

    fn generator(
        provider: Option<MockLlmProvider>,
        secret: Option<&str>,
    ) -> DiagramGenerator<HexEncoder> {
        DiagramGenerator::new(
            provider.map(BoxLlmProvider::new),
            secret.map(|s| SecretString::from(s.to_string())),
            ImageLinkBuilder::new("http://render.test/img/", HexEncoder),
            GeneratorSettings::default(),
        )
    }

    const LOGIN: &str = "User logs in with email and password";

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_generate_login_scenario() {
        let provider = MockLlmProvider::with_response(&diagram_json(
            "actor User\nUser -> Backend: Войти POST /login\nactivate Backend\nBackend --> User: token\ndeactivate Backend",
        ));
        let generated = generator(Some(provider), None)
            .generate(&GenerationRequest::new(LOGIN))
            .await
            .unwrap();

        assert!(generated.code.starts_with("@startuml"));
        assert!(generated.code.ends_with("@enduml"));
        assert!(!generated.diagram_type.is_empty());
        assert!(!generated.explanation.is_empty());

        let expected_segment: String =
            generated.code.bytes().map(|b| format!("{b:02x}")).collect();
        assert_eq!(
            generated.image_url,
            format!("http://render.test/img/{expected_segment}")
        );
    }

    #[tokio::test]
    async fn test_generate_keeps_wrapped_markup() {
        let code = "@startuml\nAlice -> Bob: Hi\n@enduml";
        let provider = MockLlmProvider::with_response(&diagram_json(&format!("\n{code}\n\n")));
        let generated = generator(Some(provider), None)
            .generate(&GenerationRequest::new(LOGIN))
            .await
            .unwrap();
        assert_eq!(generated.code, code);
    }

    #[tokio::test]
    async fn test_request_carries_house_prompt_and_schema() {
        let provider = MockLlmProvider::with_response(&diagram_json("@startuml\n@enduml"));
        let recorded = Arc::clone(&provider.last_request);

        generator(Some(provider), None)
            .generate(&GenerationRequest::new(LOGIN))
            .await
            .unwrap();

        let request = recorded.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "gpt-5-mini");
        assert_eq!(request.system.as_deref(), Some(SEQUENCE_SYSTEM_PROMPT));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert!(request.messages[0].content.ends_with(LOGIN));
        assert!(request.temperature.is_none());

        let output = request.output_config.unwrap();
        assert_eq!(output.format.json_schema.name, "diagram_response");
        assert_eq!(output.format.json_schema.strict, Some(true));
    }

    #[tokio::test]
    async fn test_empty_description_rejected() {
        let provider = MockLlmProvider::with_response(&diagram_json("x"));
        let result = generator(Some(provider), None)
            .generate(&GenerationRequest::new(""))
            .await;
        assert!(matches!(result, Err(DiagramError::MissingDescription)));
    }

    #[tokio::test]
    async fn test_missing_description_rejected() {
        let provider = MockLlmProvider::with_response(&diagram_json("x"));
        let result = generator(Some(provider), None)
            .generate(&GenerationRequest::default())
            .await;
        assert!(matches!(result, Err(DiagramError::MissingDescription)));
    }

    #[tokio::test]
    async fn test_whitespace_description_reaches_provider() {
        let provider = MockLlmProvider::with_response(&diagram_json("x"));
        let recorded = provider.last_request.clone();
        let result = generator(Some(provider), None)
            .generate(&GenerationRequest::new("   "))
            .await;
        assert!(result.is_ok());

        let request = recorded.lock().unwrap().clone().unwrap();
        assert!(request.messages[0].content.ends_with("Use Case:    "));
    }

    #[tokio::test]
    async fn test_overlong_description_rejected() {
        let provider = MockLlmProvider::with_response(&diagram_json("x"));
        let long = "я".repeat(8_001);
        let result = generator(Some(provider), None)
            .generate(&GenerationRequest::new(long))
            .await;
        assert!(matches!(
            result,
            Err(DiagramError::DescriptionTooLong { max: 8_000 })
        ));
    }

    #[tokio::test]
    async fn test_description_at_limit_accepted() {
        let provider = MockLlmProvider::with_response(&diagram_json("x"));
        let exact = "я".repeat(8_000);
        let result = generator(Some(provider), None)
            .generate(&GenerationRequest::new(exact))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_missing_credential_is_not_configured() {
        let result = generator(None, None)
            .generate(&GenerationRequest::new(LOGIN))
            .await;
        assert!(matches!(result, Err(DiagramError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_description_checked_before_credential() {
        let result = generator(None, Some("S3CR3T"))
            .generate(&GenerationRequest::new(""))
            .await;
        assert!(matches!(result, Err(DiagramError::MissingDescription)));
    }

    #[tokio::test]
    async fn test_credential_checked_before_access_code() {
        let result = generator(None, Some("S3CR3T"))
            .generate(&GenerationRequest::new(LOGIN).with_access_code("wrong"))
            .await;
        assert!(matches!(result, Err(DiagramError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_wrong_access_code_forbidden_without_calling_provider() {
        let provider = MockLlmProvider::with_response(&diagram_json("x"));
        let recorded = Arc::clone(&provider.last_request);
        let result = generator(Some(provider), Some("S3CR3T"))
            .generate(&GenerationRequest::new(LOGIN).with_access_code("wrong"))
            .await;
        assert!(matches!(result, Err(DiagramError::Forbidden)));
        assert!(recorded.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_access_code_forbidden_when_secret_set() {
        let provider = MockLlmProvider::with_response(&diagram_json("x"));
        let result = generator(Some(provider), Some("S3CR3T"))
            .generate(&GenerationRequest::new(LOGIN))
            .await;
        assert!(matches!(result, Err(DiagramError::Forbidden)));
    }

    #[tokio::test]
    async fn test_access_code_must_match_exactly() {
        for presented in ["s3cr3t", "S3CR3T ", " S3CR3T", ""] {
            let provider = MockLlmProvider::with_response(&diagram_json("x"));
            let result = generator(Some(provider), Some("S3CR3T"))
                .generate(&GenerationRequest::new(LOGIN).with_access_code(presented))
                .await;
            assert!(
                matches!(result, Err(DiagramError::Forbidden)),
                "{presented:?} should be forbidden"
            );
        }
    }

    #[tokio::test]
    async fn test_non_string_access_code_forbidden() {
        let provider = MockLlmProvider::with_response(&diagram_json("x"));
        let mut request = GenerationRequest::new(LOGIN);
        request.access_code = Some(PresentedCode::Other(serde_json::json!(1234)));
        let result = generator(Some(provider), Some("1234")).generate(&request).await;
        assert!(matches!(result, Err(DiagramError::Forbidden)));
    }

    #[tokio::test]
    async fn test_matching_access_code_accepted() {
        let provider = MockLlmProvider::with_response(&diagram_json("x"));
        let generator = generator(Some(provider), Some("S3CR3T"));
        assert!(generator.requires_access_code());
        let result = generator
            .generate(&GenerationRequest::new(LOGIN).with_access_code("S3CR3T"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_open_access_ignores_any_code() {
        for code in [None, Some(""), Some("anything")] {
            let provider = MockLlmProvider::with_response(&diagram_json("x"));
            let mut request = GenerationRequest::new(LOGIN);
            request.access_code = code.map(|c| PresentedCode::from(c.to_string()));
            let result = generator(Some(provider), None).generate(&request).await;
            assert!(!matches!(result, Err(DiagramError::Forbidden)));
        }
    }

    #[tokio::test]
    async fn test_unparsable_model_output() {
        let provider = MockLlmProvider::with_response("Sure! Here is your diagram: @startuml");
        let result = generator(Some(provider), None)
            .generate(&GenerationRequest::new(LOGIN))
            .await;
        assert!(matches!(result, Err(DiagramError::UpstreamParse(_))));
    }

    #[tokio::test]
    async fn test_model_output_missing_field() {
        let provider =
            MockLlmProvider::with_response(r#"{"plantuml_code": "@startuml\n@enduml"}"#);
        let result = generator(Some(provider), None)
            .generate(&GenerationRequest::new(LOGIN))
            .await;
        assert!(matches!(result, Err(DiagramError::UpstreamParse(_))));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = MockLlmProvider::failing("upstream exploded");
        let result = generator(Some(provider), None)
            .generate(&GenerationRequest::new(LOGIN))
            .await;
        match result {
            Err(DiagramError::Llm(e)) => assert!(e.to_string().contains("upstream exploded")),
            other => panic!("expected Llm error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let mut provider = MockLlmProvider::with_response(&diagram_json("x"));
        provider.delay = Some(Duration::from_secs(5));
        let generator = DiagramGenerator::new(
            Some(BoxLlmProvider::new(provider)),
            None,
            ImageLinkBuilder::new("http://render.test/img/", HexEncoder),
            GeneratorSettings {
                timeout: Duration::from_millis(20),
                ..GeneratorSettings::default()
            },
        );
        let result = generator.generate(&GenerationRequest::new(LOGIN)).await;
        match result {
            Err(e @ DiagramError::Timeout(limit)) => {
                assert_eq!(limit, Duration::from_millis(20));
                assert_eq!(e.to_string(), "generation timed out after 20ms");
            }
            other => panic!("expected timeout, got: {other:?}"),
        }
    }

    #[test]
    fn test_settings_from_config() {
        let config = ServiceConfig {
            model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 30,
            max_description_chars: 100,
            max_output_tokens: Some(4_096),
            ..ServiceConfig::default()
        };
        let settings = GeneratorSettings::from_config(&config);
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.max_description_chars, 100);
        assert_eq!(settings.max_output_tokens, Some(4_096));
    }
}
