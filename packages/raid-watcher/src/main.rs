//! raid-watcher binary: wire the vocabulary, subscriptions, board client and
//! notification channels, then poll forever.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use boshu_client::BoshuClient;
use raid_watcher::config::{WatcherConfig, DEFAULT_BOARD};
use raid_watcher::dedupe::NotifyChannel;
use raid_watcher::format::Markup;
use raid_watcher::subscription::load_subscriptions;
use raid_watcher::vocab::Vocabulary;
use raid_watcher::Watcher;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webhook_notify::{DiscordWebhook, TelegramBot};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,raid_watcher=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    dotenvy::dotenv().ok();

    let config = WatcherConfig::from_env()?;

    let vocab = Vocabulary::from_files(
        &env_path("POKEMON_NAMES_PATH", "pokemon-names.json"),
        &env_path("META_NAMES_PATH", "meta-names.json"),
    )?;

    let subscriptions = load_subscriptions(&env_path("SUBSCRIPTIONS_PATH", "subscriptions.json"))?;
    anyhow::ensure!(!subscriptions.is_empty(), "no subscriptions configured");

    let mut channels = Vec::new();
    if let Ok(url) = std::env::var("DISCORD_WEBHOOK_URL") {
        channels.push(NotifyChannel {
            name: "discord",
            markup: Markup::Markdown,
            sender: Arc::new(DiscordWebhook::new(url)),
        });
    }
    if let (Ok(token), Ok(chat_id)) = (
        std::env::var("TELEGRAM_BOT_TOKEN"),
        std::env::var("TELEGRAM_CHAT_ID"),
    ) {
        channels.push(NotifyChannel {
            name: "telegram",
            markup: Markup::Html,
            sender: Arc::new(TelegramBot::new(token, chat_id)),
        });
    }
    anyhow::ensure!(
        !channels.is_empty(),
        "no notification channel configured; set DISCORD_WEBHOOK_URL and/or TELEGRAM_BOT_TOKEN + TELEGRAM_CHAT_ID"
    );

    let board = match std::env::var("BOSHU_BASE_URL") {
        Ok(base) => BoshuClient::with_base_url(base, DEFAULT_BOARD),
        Err(_) => BoshuClient::new(DEFAULT_BOARD),
    };

    tracing::info!(
        subscriptions = subscriptions.len(),
        channels = channels.len(),
        interval_secs = config.fetch_interval.as_secs(),
        "Starting raid watcher"
    );

    let mut watcher = Watcher::new(config, vocab, subscriptions, Arc::new(board), channels);
    watcher.run().await;
    Ok(())
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
