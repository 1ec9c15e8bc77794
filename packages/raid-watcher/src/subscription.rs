use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// One field of a subscription: either the wildcard or a concrete name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Any,
    Only(String),
}

impl Criterion {
    pub fn as_only(&self) -> Option<&str> {
        match self {
            Criterion::Any => None,
            Criterion::Only(name) => Some(name),
        }
    }
}

impl<'de> Deserialize<'de> for Criterion {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(de)?;
        Ok(if s == "Any" {
            Criterion::Any
        } else {
            Criterion::Only(s)
        })
    }
}

/// A raid the user wants to hear about. Fixed at startup, never mutated.
///
/// The serialized form uses the human-facing keys of the subscription file:
/// `"Pokemon name"`, `"Tera type"`, `"No. of ★"` (values `"1★"`–`"7★"`) and
/// `"Join conditions"`, each admitting `"Any"`.
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    #[serde(rename = "Pokemon name")]
    pub pokemon: Criterion,
    #[serde(rename = "Tera type")]
    pub tera_type: Criterion,
    #[serde(rename = "No. of ★")]
    pub stars: Criterion,
    #[serde(rename = "Join conditions")]
    pub join_condition: Criterion,
}

/// Load the subscription list. An empty or malformed file is a startup error.
pub fn load_subscriptions(path: &Path) -> anyhow::Result<Vec<Subscription>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading subscriptions from {}", path.display()))?;
    let subs: Vec<Subscription> =
        serde_json::from_str(&text).context("subscriptions file is not a valid JSON list")?;
    Ok(subs)
}
