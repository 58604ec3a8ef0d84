use std::time::Duration;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Sampling parameters sent with every completion request. The defaults are
/// the values the fine-tuned model expects; in particular `stop` must always
/// contain `"\n"` and `"->"` so generation halts at the end of a single
/// reply instead of continuing into the next human turn.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationParams {
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stop: Vec<String>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            presence_penalty: 0.0,
            frequency_penalty: 0.3,
            max_tokens: 100,
            temperature: 0.0,
            stop: vec!["\n".to_string(), "->".to_string()],
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(flatten)]
    params: &'a GenerationParams,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Choice {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl CompletionResponse {
    /// The generated text of the first choice, verbatim. A response with no
    /// choices is an error; an empty `text` in the first choice is not.
    pub fn first_text(&self) -> Result<&str> {
        match self.choices.first() {
            Some(choice) => Ok(&choice.text),
            None => bail!("completion response contained no choices"),
        }
    }
}

/// Request a single completion for `prompt` from an OpenAI compatible legacy
/// completions API (prompt in, text out, not the chat messages format).
pub async fn completion(
    prompt: &str,
    params: &GenerationParams,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<CompletionResponse> {
    let url = format!("{}/v1/completions", api_hostname.trim_end_matches("/"));
    let payload = CompletionRequest {
        model,
        prompt,
        params,
    };

    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60))
        .json(&payload)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        tracing::error!(%status, %body, "Completion request failed");
        bail!("Completion request failed with status {}: {}", status, body);
    }

    let parsed = response.json::<CompletionResponse>().await?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_params_match_the_tuned_model() {
        let params = GenerationParams::default();
        assert_eq!(params.presence_penalty, 0.0);
        assert_eq!(params.frequency_penalty, 0.3);
        assert_eq!(params.max_tokens, 100);
        assert_eq!(params.temperature, 0.0);
        assert_eq!(params.stop, vec!["\n", "->"]);
    }

    #[test]
    fn test_request_serializes_with_flattened_params() {
        let params = GenerationParams::default();
        let payload = CompletionRequest {
            model: "davinci:ft-wcc-2023-06-21-01-13-35",
            prompt: " Hello ->",
            params: &params,
        };
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["model"], "davinci:ft-wcc-2023-06-21-01-13-35");
        assert_eq!(value["prompt"], " Hello ->");
        assert_eq!(value["stop"], json!(["\n", "->"]));
        assert_eq!(value["max_tokens"], 100);
    }

    #[test]
    fn test_first_text_returns_the_first_choice_verbatim() {
        let resp = CompletionResponse {
            choices: vec![
                Choice {
                    text: " Hi there".to_string(),
                },
                Choice {
                    text: "unused".to_string(),
                },
            ],
        };
        assert_eq!(resp.first_text().unwrap(), " Hi there");
    }

    #[test]
    fn test_first_text_errors_when_choices_missing() {
        let resp: CompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.first_text().is_err());
    }

    #[tokio::test]
    async fn test_completion_basic_response() {
        let mut server = mockito::Server::new_async().await;

        let response_body = r#"{
            "id": "cmpl-123",
            "object": "text_completion",
            "created": 1694268190,
            "model": "davinci:ft-wcc-2023-06-21-01-13-35",
            "choices": [{
                "text": " Hi there",
                "index": 0,
                "logprobs": null,
                "finish_reason": "stop"
            }]
        }"#;

        let mock = server
            .mock("POST", "/v1/completions")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "davinci:ft-wcc-2023-06-21-01-13-35",
                "prompt": " Hello ->",
                "stop": ["\n", "->"],
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body)
            .create();

        let params = GenerationParams::default();
        let resp = completion(
            " Hello ->",
            &params,
            &server.url(),
            "test-key",
            "davinci:ft-wcc-2023-06-21-01-13-35",
        )
        .await
        .unwrap();

        mock.assert();
        assert_eq!(resp.first_text().unwrap(), " Hi there");
    }

    #[tokio::test]
    async fn test_completion_non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v1/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create();

        let params = GenerationParams::default();
        let result = completion(" X ->", &params, &server.url(), "test-key", "davinci").await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("upstream exploded"));
    }
}
