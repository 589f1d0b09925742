use crate::domain::ports::{AssistantGateway, ChatTurn};
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{error, instrument, warn};
use std::time::Duration;
use tokio::time::sleep;

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

/// OpenAI-compatible chat-completions client. The model is instructed to
/// answer in JSON, so requests pin response_format to json_object.
pub struct AiGatewayService {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl AiGatewayService {
    pub fn new(url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            url,
            api_key,
            model,
        }
    }

    async fn send_request_with_retry(&self, payload: &Value) -> Result<String, AppError> {
        let mut retries = 0;
        let mut backoff = INITIAL_BACKOFF_MS;

        loop {
            let res = self.client.post(&self.url)
                .bearer_auth(&self.api_key)
                .header("Content-Type", "application/json")
                .json(payload)
                .send()
                .await;

            match res {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body: Value = response.json().await.map_err(|e| {
                            error!("Failed to parse AI gateway response JSON: {:?}", e);
                            AppError::Internal
                        })?;
                        return extract_content(body);
                    } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if retries >= MAX_RETRIES {
                            error!("AI gateway failed after {} retries. Status: {}", retries, status);
                            let text = response.text().await.unwrap_or_default();
                            return Err(AppError::InternalWithMsg(format!("AI Provider Error: {} - {}", status, text)));
                        }
                        warn!("AI gateway transient error {}. Retrying in {}ms...", status, backoff);
                    } else {
                        let text = response.text().await.unwrap_or_default();
                        error!("AI gateway terminal error {}: {}", status, text);
                        return Err(AppError::InternalWithMsg(format!("AI Request Rejected: {} - {}", status, text)));
                    }
                },
                Err(e) => {
                    if retries >= MAX_RETRIES {
                        error!("AI gateway network error after {} retries: {:?}", retries, e);
                        return Err(AppError::InternalWithMsg(format!("AI Network Error: {}", e)));
                    }
                    warn!("AI gateway network error. Retrying in {}ms... {:?}", backoff, e);
                }
            }

            sleep(Duration::from_millis(backoff)).await;
            retries += 1;
            backoff *= 2;
        }
    }
}

fn extract_content(body: Value) -> Result<String, AppError> {
    if let Some(choices) = body.get("choices").and_then(|c| c.as_array())
        && let Some(first) = choices.first()
        && let Some(content) = first.pointer("/message/content").and_then(|c| c.as_str())
    {
        // Some models still wrap the JSON in code fences.
        let cleaned = content.trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();
        return Ok(cleaned.to_string());
    }

    error!("Invalid or unexpected response structure from AI gateway: {:?}", body);
    Err(AppError::InternalWithMsg("AI response missing content".to_string()))
}

#[async_trait]
impl AssistantGateway for AiGatewayService {
    #[instrument(skip(self, turns), fields(turn_count = turns.len()))]
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, AppError> {
        let messages: Vec<Value> = turns.iter()
            .map(|t| json!({ "role": t.role, "content": t.content }))
            .collect();

        let payload = json!({
            "model": self.model,
            "messages": messages,
            "response_format": { "type": "json_object" },
        });

        self.send_request_with_retry(&payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_chat_completion_content() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "{\"response\":\"Oi\"}" } }]
        });
        assert_eq!(extract_content(body).unwrap(), "{\"response\":\"Oi\"}");
    }

    #[test]
    fn strips_code_fences() {
        let body = json!({
            "choices": [{ "message": { "content": "```json\n{\"response\":\"Oi\"}\n```" } }]
        });
        assert_eq!(extract_content(body).unwrap(), "{\"response\":\"Oi\"}");
    }

    #[test]
    fn missing_content_is_an_error() {
        let body = json!({ "choices": [] });
        assert!(extract_content(body).is_err());
    }
}
