//! Replaying adapter for the `LlmClient` port.

use std::sync::{Arc, Mutex};

use super::{exact_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{CompletionFuture, CompletionRequest, LlmClient};

/// Serves recorded completions from a cassette.
///
/// A completion is only served for the request it was recorded with, so a
/// cassette taken with a different prompt, model or stop sequence fails
/// loudly instead of replaying stale text.
pub struct ReplayingLlmClient {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingLlmClient {
    /// Create a replaying LLM client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Create a replaying LLM client with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl LlmClient for ReplayingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let input = serde_json::to_value(request).unwrap_or_default();
        let output = exact_output(self.replayer.as_ref(), "llm", "complete", &input);
        Box::pin(async move { replay_result(output) })
    }
}
