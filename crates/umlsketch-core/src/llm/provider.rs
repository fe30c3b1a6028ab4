//! LlmProvider trait definition.
//!
//! This is the core abstraction that all LLM providers implement. It is kept
//! deliberately narrow: one non-streaming completion call that may carry a
//! JSON-schema output constraint.

use umlsketch_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends.
///
/// Uses native async fn in traits (RPITIT). Implementations live in
/// umlsketch-infra (e.g., `OpenAiCompatibleProvider`); tests substitute a
/// mock that records the request.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
