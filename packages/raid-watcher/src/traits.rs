use async_trait::async_trait;

use boshu_client::{BoshuClient, BoshuError};
use webhook_notify::{DiscordWebhook, NotifyError, TelegramBot};

// ============================================================================
// RAID BOARD: remote fetch seam
// ============================================================================

/// Read access to the raid board. The poll loop is written against this seam
/// so cycles can be driven from canned bytes in tests.
#[async_trait]
pub trait RaidBoard: Send + Sync {
    /// Fetch the raw items bundle for one query. A non-success HTTP status
    /// surfaces as [`BoshuError::Api`] with the status code.
    async fn fetch_raw(&self, query: &[(&'static str, String)]) -> Result<Vec<u8>, BoshuError>;
}

#[async_trait]
impl RaidBoard for BoshuClient {
    async fn fetch_raw(&self, query: &[(&'static str, String)]) -> Result<Vec<u8>, BoshuError> {
        self.fetch_items_bundle(query).await
    }
}

// ============================================================================
// NOTIFIER: outbound delivery seam
// ============================================================================

/// Delivery of one pre-rendered message. Fire-and-forget; the caller logs
/// failures and moves on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> Result<(), NotifyError>;
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.post(message).await
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.send_message(message).await
    }
}
