//! Webhook-based notification senders.
//!
//! Thin clients for the two delivery channels the watcher can announce on: a
//! Discord webhook and a Telegram bot chat. Both take a pre-rendered message
//! string; formatting is the caller's concern.

pub mod error;

pub use error::{NotifyError, Result};

pub struct DiscordWebhook {
    client: reqwest::Client,
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Post one message to the webhook. Discord renders its own markdown
    /// dialect; the content is sent verbatim.
    pub async fn post(&self, content: &str) -> Result<()> {
        let resp = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        tracing::debug!(len = content.len(), "Delivered Discord webhook message");
        Ok(())
    }
}

pub struct TelegramBot {
    client: reqwest::Client,
    token: String,
    chat_id: String,
}

impl TelegramBot {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Send one HTML-formatted message to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "HTML",
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        tracing::debug!(chat_id = %self.chat_id, "Delivered Telegram message");
        Ok(())
    }
}
