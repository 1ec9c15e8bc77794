//! Watches the boshu tera raid board and announces new listings.
//!
//! The core loop: build a board query per subscription, fetch and decode the
//! items bundle, project live listings, deduplicate by passcode against the
//! previous cycle, and deliver one message per genuinely new listing.

pub mod config;
pub mod dedupe;
pub mod format;
pub mod project;
pub mod query;
pub mod subscription;
pub mod traits;
pub mod vocab;
pub mod watcher;

pub use config::WatcherConfig;
pub use dedupe::{NotifyChannel, SubscriptionState};
pub use format::Markup;
pub use project::{project_listings, ProjectError, RaidListing};
pub use query::build_query;
pub use subscription::{load_subscriptions, Criterion, Subscription};
pub use traits::{Notifier, RaidBoard};
pub use vocab::{Category, VocabError, Vocabulary};
pub use watcher::Watcher;
