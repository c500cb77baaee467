//! Live adapter for the `LlmClient` port using the OpenAI completions API.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

const OPENAI_COMPLETIONS_URL: &str = "https://api.openai.com/v1/completions";

/// Live LLM client that calls the OpenAI text-completion endpoint.
pub struct LiveLlmClient {
    client: Client,
    api_key: Option<String>,
}

impl LiveLlmClient {
    /// Creates a new live LLM client authenticating with `api_key`.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self { client: Client::new(), api_key }
    }
}

/// Request body sent to the completions API.
#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

/// Top-level response from the completions API.
#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

/// A single generated choice.
#[derive(Deserialize)]
struct Choice {
    text: String,
}

/// Token usage reported by the API.
#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Error response from the API.
#[derive(Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

/// Detail inside an error response.
#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let api_key = self.api_key.as_deref().ok_or_else(|| {
                Box::<dyn std::error::Error + Send + Sync>::from("OPENAI_KEY is not configured")
            })?;

            let body = OpenAiRequest {
                model: &request.model,
                prompt: &request.prompt,
                temperature: request.temperature,
                max_tokens: request.max_tokens,
                top_p: request.top_p,
                frequency_penalty: request.frequency_penalty,
                presence_penalty: request.presence_penalty,
                stop: (!request.stop.is_empty()).then_some(request.stop.as_slice()),
            };

            let response = self
                .client
                .post(OPENAI_COMPLETIONS_URL)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("OpenAI API request failed: {e}").into()
                })?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read OpenAI API response: {e}").into()
                })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<OpenAiError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(format!("OpenAI API error ({}): {msg}", status.as_u16()).into());
            }

            let api_response: OpenAiResponse = serde_json::from_str(&response_text).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse OpenAI API response: {e}").into()
                },
            )?;

            let text = api_response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.text)
                .unwrap_or_default();
            let (prompt_tokens, completion_tokens) = api_response
                .usage
                .map_or((0, 0), |usage| (usage.prompt_tokens, usage.completion_tokens));

            Ok(CompletionResponse { text, prompt_tokens, completion_tokens })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_fails_without_network() {
        let client = LiveLlmClient::new(None);
        let request = CompletionRequest {
            model: "text-davinci-003".into(),
            prompt: "List:".into(),
            temperature: 0.7,
            max_tokens: 16,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: vec!["4.".into()],
        };

        let err = client.complete(&request).await.unwrap_err();
        assert!(err.to_string().contains("OPENAI_KEY"));
    }

    #[test]
    fn request_body_omits_empty_stop() {
        let body = OpenAiRequest {
            model: "m",
            prompt: "p",
            temperature: 0.5,
            max_tokens: 8,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("stop").is_none());
        assert_eq!(json["max_tokens"], 8);
    }

    #[test]
    fn parses_completion_response() {
        let raw = r#"{"choices":[{"text":"\n1. Weightless,Marconi Union"}],
                      "usage":{"prompt_tokens":120,"completion_tokens":9}}"#;
        let parsed: OpenAiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].text, "\n1. Weightless,Marconi Union");
        assert_eq!(parsed.usage.unwrap().completion_tokens, 9);
    }
}
