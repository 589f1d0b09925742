use crate::domain::ports::MessageGateway;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{error, info, instrument};
use std::time::Duration;

/// WhatsApp Cloud API sender (graph.facebook.com). Outbound only: inbound
/// traffic arrives through the webhook handler.
pub struct WhatsAppService {
    client: Client,
    api_token: String,
    phone_number_id: String,
}

impl WhatsAppService {
    pub fn new(api_token: String, phone_number_id: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_token,
            phone_number_id,
        }
    }
}

#[async_trait]
impl MessageGateway for WhatsAppService {
    #[instrument(skip(self, body))]
    async fn send_text(&self, to: &str, body: &str) -> Result<(), AppError> {
        let url = format!(
            "https://graph.facebook.com/v17.0/{}/messages",
            self.phone_number_id
        );

        let payload = json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "text",
            "text": { "body": body },
        });

        let response = self.client.post(&url)
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::InternalWithMsg(format!("WhatsApp network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("WhatsApp API error {}: {}", status, text);
            return Err(AppError::InternalWithMsg(format!("WhatsApp API error: {}", status)));
        }

        info!("WhatsApp message sent to {}", to);
        Ok(())
    }
}
