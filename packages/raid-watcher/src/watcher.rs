//! The poll-filter-dedupe-notify loop.

use std::sync::Arc;

use boshu_client::{decode_bundle, BoshuError, BundleElement};
use chrono::Utc;
use tokio::time::sleep;

use crate::config::WatcherConfig;
use crate::dedupe::{announce_new, NotifyChannel, SubscriptionState};
use crate::project::project_listings;
use crate::query::build_query;
use crate::subscription::Subscription;
use crate::traits::RaidBoard;
use crate::vocab::Vocabulary;

/// Polls the board for every subscription, sequentially, forever.
///
/// Per-subscription history lives in `states`, indexed by subscription
/// position; no error escapes the subscription that caused it.
pub struct Watcher {
    config: WatcherConfig,
    vocab: Vocabulary,
    subscriptions: Vec<Subscription>,
    states: Vec<SubscriptionState>,
    board: Arc<dyn RaidBoard>,
    channels: Vec<NotifyChannel>,
}

impl Watcher {
    pub fn new(
        config: WatcherConfig,
        vocab: Vocabulary,
        subscriptions: Vec<Subscription>,
        board: Arc<dyn RaidBoard>,
        channels: Vec<NotifyChannel>,
    ) -> Self {
        let states = subscriptions
            .iter()
            .map(|_| SubscriptionState::default())
            .collect();
        Self {
            config,
            vocab,
            subscriptions,
            states,
            board,
            channels,
        }
    }

    /// Run until the process is killed.
    pub async fn run(&mut self) {
        loop {
            self.run_cycle().await;
            sleep(self.config.fetch_interval).await;
        }
    }

    /// One pass over every subscription, in declaration order.
    pub async fn run_cycle(&mut self) {
        for idx in 0..self.subscriptions.len() {
            self.poll_subscription(idx).await;
        }
    }

    async fn poll_subscription(&mut self, idx: usize) {
        let sub = &self.subscriptions[idx];

        let query = match build_query(sub, &self.vocab, self.config.fetch_limit) {
            Ok(query) => query,
            Err(e) => {
                tracing::warn!(subscription = idx, error = %e, "Cannot build query, skipping subscription this cycle");
                return;
            }
        };

        let raw = match self.board.fetch_raw(&query).await {
            Ok(raw) => raw,
            Err(BoshuError::Api { status, .. }) => {
                tracing::warn!(subscription = idx, status, "Board returned an error status");
                return;
            }
            Err(e) => {
                tracing::warn!(subscription = idx, error = %e, "Fetch failed");
                return;
            }
        };

        let elements: Vec<BundleElement> = match decode_bundle(&raw) {
            Ok(elements) => elements,
            Err(e) => {
                tracing::warn!(subscription = idx, error = %e, "Discarding undecodable items bundle");
                return;
            }
        };

        let (listings, errors) = project_listings(
            &elements,
            &self.vocab,
            Utc::now(),
            self.config.raid_ttl_secs,
        );
        for e in &errors {
            tracing::warn!(subscription = idx, error = %e, "Skipped a listing");
        }
        tracing::debug!(
            subscription = idx,
            live = listings.len(),
            skipped = errors.len(),
            "Projected cycle fetch"
        );
        if !listings.is_empty() {
            tracing::debug!(
                subscription = idx,
                listings = %serde_json::to_string(&listings).unwrap_or_default(),
                "Live matching listings"
            );
        }

        let announced = announce_new(&listings, &mut self.states[idx], &self.channels).await;
        if announced > 0 {
            tracing::info!(subscription = idx, announced, "Announced new raids");
        }
    }
}
