pub mod relay;

use async_trait::async_trait;

#[async_trait]
pub trait MailProvider: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}
