//! Per-subscription deduplication and announcement.

use std::collections::HashSet;
use std::sync::Arc;

use crate::format::{render, Markup};
use crate::project::RaidListing;
use crate::traits::Notifier;

/// What the previous successful cycle saw for one subscription.
#[derive(Debug, Default)]
pub struct SubscriptionState {
    passcodes: HashSet<String>,
}

impl SubscriptionState {
    pub fn is_known(&self, passcode: &str) -> bool {
        self.passcodes.contains(passcode)
    }

    /// Unconditional replace: passcodes absent this cycle are forgotten even
    /// if the listing never expired on our side.
    pub fn replace(&mut self, listings: &[RaidListing]) {
        self.passcodes = listings.iter().map(|l| l.passcode.clone()).collect();
    }

    pub fn passcodes(&self) -> &HashSet<String> {
        &self.passcodes
    }
}

/// One wired delivery channel: a sender plus the markup it expects.
pub struct NotifyChannel {
    pub name: &'static str,
    pub markup: Markup,
    pub sender: Arc<dyn Notifier>,
}

/// Announce every listing not seen in the previous cycle, in source order,
/// then replace the stored passcode set. A failed delivery is logged and the
/// remaining listings are still attempted. Returns the number of new
/// listings.
pub async fn announce_new(
    listings: &[RaidListing],
    state: &mut SubscriptionState,
    channels: &[NotifyChannel],
) -> usize {
    let mut announced = 0;

    for listing in listings {
        if state.is_known(&listing.passcode) {
            continue;
        }
        announced += 1;
        for channel in channels {
            let message = render(listing, channel.markup);
            if let Err(e) = channel.sender.send(&message).await {
                tracing::warn!(
                    channel = channel.name,
                    passcode = %listing.passcode,
                    error = %e,
                    "Notification delivery failed"
                );
            }
        }
    }

    state.replace(listings);
    announced
}
