//! Per-channel rendering of listing announcements.

use crate::project::RaidListing;

/// Markup dialect a notification channel expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Telegram-flavoured HTML.
    Html,
    /// Discord-flavoured markdown.
    Markdown,
}

/// Render one listing announcement in the given markup.
pub fn render(listing: &RaidListing, markup: Markup) -> String {
    match markup {
        Markup::Html => render_html(listing),
        Markup::Markdown => render_markdown(listing),
    }
}

fn render_html(l: &RaidListing) -> String {
    format!(
        "Pokemon: <b>{}</b>\nTera type: <b>{}</b>\nDifficulty: <b>{}</b>\n\
         Join conditions: <b>{}</b>\nCode: <code>{}</code>\n\
         Time left: <b>{}</b> <i>(at {})</i>",
        l.pokemon,
        l.tera_type,
        l.stars,
        l.join_conditions.join(", "),
        l.passcode,
        l.remaining_time,
        l.observed_at,
    )
}

fn render_markdown(l: &RaidListing) -> String {
    format!(
        "--------------------------\nPokemon: **{}**\nTera type: **{}**\n\
         Difficulty: **{}**\nJoin conditions: **{}**\nCode: `{}`\n\
         Time left: **{}** *(at {})*",
        l.pokemon,
        l.tera_type,
        l.stars,
        l.join_conditions.join(", "),
        l.passcode,
        l.remaining_time,
        l.observed_at,
    )
}
