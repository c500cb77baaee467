//! Completion client: one model call per generation request.

use tracing::{info, warn};

use crate::config::ModelConfig;
use crate::models::GenerationRequest;
use crate::playlist::prompt::build_prompt;
use crate::ports::llm::{CompletionRequest, LlmClient};

/// Wraps the `LlmClient` port with the configured model parameters.
pub struct CompletionClient<'a> {
    llm: &'a dyn LlmClient,
    model: &'a ModelConfig,
}

impl<'a> CompletionClient<'a> {
    /// Creates a client calling `llm` with the parameters in `model`.
    #[must_use]
    pub fn new(llm: &'a dyn LlmClient, model: &'a ModelConfig) -> Self {
        Self { llm, model }
    }

    /// The request that [`CompletionClient::complete`] sends.
    #[must_use]
    pub fn request_for(&self, request: &GenerationRequest) -> CompletionRequest {
        CompletionRequest {
            model: self.model.model.clone(),
            prompt: build_prompt(request.count(), request.seed_description()),
            temperature: self.model.temperature,
            max_tokens: self.model.max_tokens,
            top_p: self.model.top_p,
            frequency_penalty: self.model.frequency_penalty,
            presence_penalty: self.model.presence_penalty,
            stop: self.model.stop_sequences(request.count()),
        }
    }

    /// Asks the model for suggestions.
    ///
    /// Provider failures and blank output are logged and reported as `None`.
    pub async fn complete(&self, request: &GenerationRequest) -> Option<String> {
        let completion_request = self.request_for(request);

        match self.llm.complete(&completion_request).await {
            Ok(response) if response.text.trim().is_empty() => {
                warn!(model = %completion_request.model, "model returned an empty completion");
                None
            }
            Ok(response) => {
                info!(
                    model = %completion_request.model,
                    prompt_tokens = response.prompt_tokens,
                    completion_tokens = response.completion_tokens,
                    "received completion"
                );
                Some(response.text)
            }
            Err(e) => {
                warn!(model = %completion_request.model, error = %e, "completion call failed");
                None
            }
        }
    }
}
