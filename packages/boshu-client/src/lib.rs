//! Pure boshu board REST client.
//!
//! A minimal client for the boshu recruitment-board API. Fetches the
//! `items_bundle` endpoint of one board and decodes its length-prefixed
//! document stream.
//!
//! # Example
//!
//! ```rust,ignore
//! use boshu_client::{BoshuClient, BundleElement};
//!
//! let client = BoshuClient::new("pokemonTeraraid");
//!
//! let elements: Vec<BundleElement> = client
//!     .fetch_items(&[("limit", "30".to_string())])
//!     .await?;
//! ```

pub mod decode;
pub mod error;
pub mod types;

pub use decode::decode_bundle;
pub use error::{BoshuError, Result};
pub use types::{ArrayValue, BundleElement, Document, FieldValue, TimestampValue};

use serde::de::DeserializeOwned;

const DEFAULT_BASE_URL: &str = "https://asia-northeast1-boshu-prod.cloudfunctions.net/boshu";

pub struct BoshuClient {
    client: reqwest::Client,
    base_url: String,
    board: String,
}

impl BoshuClient {
    pub fn new(board: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, board)
    }

    pub fn with_base_url(base_url: impl Into<String>, board: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            board: board.into(),
        }
    }

    /// Fetch the raw items bundle for one board query. The body is a
    /// concatenation of length-prefixed JSON documents; see [`decode_bundle`].
    pub async fn fetch_items_bundle(&self, query: &[(&str, String)]) -> Result<Vec<u8>> {
        let url = format!("{}/boards/{}/items_bundle", self.base_url, self.board);
        let resp = self.client.get(&url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BoshuError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = resp.bytes().await?;
        tracing::debug!(board = %self.board, len = bytes.len(), "Fetched items bundle");
        Ok(bytes.to_vec())
    }

    /// Fetch and decode in one step.
    pub async fn fetch_items<T: DeserializeOwned>(&self, query: &[(&str, String)]) -> Result<Vec<T>> {
        let raw = self.fetch_items_bundle(query).await?;
        decode_bundle(&raw)
    }
}
