use anyhow::Context;
use async_trait::async_trait;

use super::MailProvider;

/// Sends mail through the resort's HTTP relay in front of the actual SMTP
/// transport. The relay accepts a JSON message and queues delivery.
pub struct HttpRelayMailer {
    relay_url: String,
    api_token: String,
    from_address: String,
    client: reqwest::Client,
}

impl HttpRelayMailer {
    pub fn new(relay_url: String, api_token: String, from_address: String) -> Self {
        Self {
            relay_url,
            api_token,
            from_address,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MailProvider for HttpRelayMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let url = format!("{}/messages", self.relay_url.trim_end_matches('/'));

        self.client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&serde_json::json!({
                "from": self.from_address,
                "to": to,
                "subject": subject,
                "text": body,
            }))
            .send()
            .await
            .context("failed to reach mail relay")?
            .error_for_status()
            .context("mail relay rejected message")?;

        Ok(())
    }
}
