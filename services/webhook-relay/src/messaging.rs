use reqwest::StatusCode;

use crate::models::OutboundMessage;

#[derive(Clone)]
pub struct MessagingClient {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl MessagingClient {
    pub fn new(http: reqwest::Client, url: String, token: String) -> Self {
        Self { http, url, token }
    }

    /// Send a text message; `true` only when the provider answers 200.
    pub async fn send_text(&self, recipient: &str, body: &str) -> bool {
        let response = match self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&OutboundMessage::text(recipient, body))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, recipient, "messaging request failed");
                return false;
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        tracing::info!(status = status.as_u16(), body = %text, "messaging provider response");
        status == StatusCode::OK
    }
}
