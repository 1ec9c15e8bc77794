//! English/Japanese name tables for the three vocabularies the board speaks.
//!
//! Subscriptions are written in English; the board stores and filters by the
//! Japanese names. The tables are loaded once at startup and are read-only
//! for the life of the process.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Pokemon,
    TeraType,
    JoinLabel,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Pokemon => "pokemon",
            Category::TeraType => "tera type",
            Category::JoinLabel => "join label",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabError {
    #[error("unknown {category} name: {name:?}")]
    UnknownTerm { category: Category, name: String },
}

/// One record of `pokemon-names.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonNameEntry {
    pub english_name: String,
    pub japanese_name: String,
}

/// One record of `meta-names.json`; `type` distinguishes tera type names
/// from join-condition labels.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaNameEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub english_name: String,
    pub japanese_name: String,
}

/// Bidirectional name tables, one bijection per category.
pub struct Vocabulary {
    to_jpn: HashMap<Category, HashMap<String, String>>,
    to_eng: HashMap<Category, HashMap<String, String>>,
}

impl Vocabulary {
    pub fn new(pokemon: Vec<PokemonNameEntry>, meta: Vec<MetaNameEntry>) -> Self {
        let mut vocab = Self {
            to_jpn: HashMap::new(),
            to_eng: HashMap::new(),
        };
        for entry in pokemon {
            vocab.insert(Category::Pokemon, entry.english_name, entry.japanese_name);
        }
        for entry in meta {
            match entry.kind.as_str() {
                "type" => vocab.insert(Category::TeraType, entry.english_name, entry.japanese_name),
                "label" => {
                    vocab.insert(Category::JoinLabel, entry.english_name, entry.japanese_name)
                }
                other => {
                    tracing::warn!(kind = other, "Skipping meta name entry of unknown kind");
                }
            }
        }
        vocab
    }

    /// Load both tables. A missing or malformed table is a startup error.
    pub fn from_files(pokemon_path: &Path, meta_path: &Path) -> anyhow::Result<Self> {
        let pokemon_text = std::fs::read_to_string(pokemon_path)
            .with_context(|| format!("reading pokemon names from {}", pokemon_path.display()))?;
        let pokemon: Vec<PokemonNameEntry> =
            serde_json::from_str(&pokemon_text).context("pokemon names table is malformed")?;

        let meta_text = std::fs::read_to_string(meta_path)
            .with_context(|| format!("reading meta names from {}", meta_path.display()))?;
        let meta: Vec<MetaNameEntry> =
            serde_json::from_str(&meta_text).context("meta names table is malformed")?;

        Ok(Self::new(pokemon, meta))
    }

    fn insert(&mut self, category: Category, english: String, japanese: String) {
        self.to_jpn
            .entry(category)
            .or_default()
            .insert(english.clone(), japanese.clone());
        self.to_eng
            .entry(category)
            .or_default()
            .insert(japanese, english);
    }

    pub fn to_japanese(&self, category: Category, name: &str) -> Result<&str, VocabError> {
        Self::lookup(&self.to_jpn, category, name)
    }

    pub fn to_english(&self, category: Category, name: &str) -> Result<&str, VocabError> {
        Self::lookup(&self.to_eng, category, name)
    }

    fn lookup<'a>(
        map: &'a HashMap<Category, HashMap<String, String>>,
        category: Category,
        name: &str,
    ) -> Result<&'a str, VocabError> {
        map.get(&category)
            .and_then(|names| names.get(name))
            .map(String::as_str)
            .ok_or_else(|| VocabError::UnknownTerm {
                category,
                name: name.to_string(),
            })
    }
}
