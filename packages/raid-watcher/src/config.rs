use std::env;
use std::time::Duration;

use anyhow::Context;

/// Board the watcher polls.
pub const DEFAULT_BOARD: &str = "pokemonTeraraid";

/// Tunables for the poll loop. The defaults mirror the board's listing
/// lifetime and the original poll cadence.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Page size for each items_bundle fetch.
    pub fetch_limit: u32,
    /// Sleep between full cycles.
    pub fetch_interval: Duration,
    /// Listing lifetime from creation; anything older has already closed.
    pub raid_ttl_secs: i64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            fetch_limit: 30,
            fetch_interval: Duration::from_secs(5),
            raid_ttl_secs: 180,
        }
    }
}

impl WatcherConfig {
    /// Read overrides from `FETCH_LIMIT`, `FETCH_INTERVAL_SECS` and
    /// `RAID_TTL_SECS`; anything unset keeps its default.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("FETCH_LIMIT") {
            cfg.fetch_limit = v.parse().context("FETCH_LIMIT must be an integer")?;
        }
        if let Ok(v) = env::var("FETCH_INTERVAL_SECS") {
            let secs: u64 = v.parse().context("FETCH_INTERVAL_SECS must be an integer")?;
            cfg.fetch_interval = Duration::from_secs(secs);
        }
        if let Ok(v) = env::var("RAID_TTL_SECS") {
            cfg.raid_ttl_secs = v.parse().context("RAID_TTL_SECS must be an integer")?;
        }
        Ok(cfg)
    }
}
