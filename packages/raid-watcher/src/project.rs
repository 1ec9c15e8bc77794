//! Filtering and projection of decoded bundle elements into listings.

use boshu_client::{BundleElement, Document};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::vocab::{Category, VocabError, Vocabulary};

/// Marker shown when a listing carries no tera type.
const UNKNOWN_TYPE: &str = "???";

/// A listing ready to announce. Rebuilt from scratch every cycle, keyed by
/// passcode for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaidListing {
    pub pokemon: String,
    pub tera_type: String,
    /// Raw level digits with the `★` suffix restored, e.g. `"6★"`.
    pub stars: String,
    pub join_conditions: Vec<String>,
    pub passcode: String,
    pub remaining_secs: i64,
    /// `H:MM:SS` countdown for display.
    pub remaining_time: String,
    /// Local wall-clock time of this cycle, `HH:MM:SS`.
    pub observed_at: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("listing is missing required field {0:?}")]
    MissingField(&'static str),
    #[error(transparent)]
    UnknownTerm(#[from] VocabError),
}

/// Filter decoded bundle elements down to live, unexpired listings.
///
/// Tombstones and deleted listings are dropped silently. A record that cannot
/// be projected (missing field, untranslatable name) contributes an error but
/// does not fail the batch. Source order is preserved.
pub fn project_listings(
    elements: &[BundleElement],
    vocab: &Vocabulary,
    now: DateTime<Utc>,
    ttl_secs: i64,
) -> (Vec<RaidListing>, Vec<ProjectError>) {
    let mut listings = Vec::new();
    let mut errors = Vec::new();

    for element in elements {
        let Some(doc) = &element.document else { continue };
        // Only a present-and-false deletion flag marks a live listing.
        if doc.bool_field("isDeleted") != Some(false) {
            continue;
        }
        match project_one(doc, vocab, now, ttl_secs) {
            Ok(Some(listing)) => listings.push(listing),
            Ok(None) => {} // already expired
            Err(e) => errors.push(e),
        }
    }

    (listings, errors)
}

fn project_one(
    doc: &Document,
    vocab: &Vocabulary,
    now: DateTime<Utc>,
    ttl_secs: i64,
) -> Result<Option<RaidListing>, ProjectError> {
    let pokemon_jpn = doc
        .str_field("pokemonName")
        .ok_or(ProjectError::MissingField("pokemonName"))?;
    let pokemon = vocab.to_english(Category::Pokemon, pokemon_jpn)?.to_string();

    let tera_type = match doc.str_field("terasType") {
        Some(jpn) => vocab.to_english(Category::TeraType, jpn)?.to_string(),
        None => UNKNOWN_TYPE.to_string(),
    };

    let level = doc
        .int_field("difficultyLevel")
        .ok_or(ProjectError::MissingField("difficultyLevel"))?;
    let stars = format!("{level}★");

    let mut join_conditions = Vec::new();
    if let Some(tags) = doc.array_field("requestTags") {
        for value in &tags.values {
            let jpn = value
                .string_value
                .as_deref()
                .ok_or(ProjectError::MissingField("requestTags"))?;
            join_conditions.push(vocab.to_english(Category::JoinLabel, jpn)?.to_string());
        }
    }

    let passcode = doc
        .str_field("passcode")
        .ok_or(ProjectError::MissingField("passcode"))?
        .to_string();

    let created = doc
        .timestamp_field("createdAt")
        .ok_or(ProjectError::MissingField("createdAt"))?;
    let remaining_secs = ttl_secs - (now.timestamp() - created.seconds);
    if remaining_secs <= 0 {
        return Ok(None);
    }

    Ok(Some(RaidListing {
        pokemon,
        tera_type,
        stars,
        join_conditions,
        passcode,
        remaining_secs,
        remaining_time: format_clock(remaining_secs),
        observed_at: now.with_timezone(&Local).format("%H:%M:%S").to_string(),
    }))
}

/// `H:MM:SS` with unpadded hours, e.g. `0:02:45`.
fn format_clock(secs: i64) -> String {
    format!("{}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{MetaNameEntry, PokemonNameEntry};
    use serde_json::{json, Value};

    fn vocab() -> Vocabulary {
        Vocabulary::new(
            vec![PokemonNameEntry {
                english_name: "Ditto".into(),
                japanese_name: "メタモン".into(),
            }],
            vec![
                MetaNameEntry {
                    kind: "type".into(),
                    english_name: "Fire".into(),
                    japanese_name: "ほのお".into(),
                },
                MetaNameEntry {
                    kind: "label".into(),
                    english_name: "Lvl. 100 Only".into(),
                    japanese_name: "LV100のみ".into(),
                },
            ],
        )
    }

    fn element(fields: Value) -> BundleElement {
        serde_json::from_value(json!({ "document": { "fields": fields } })).unwrap()
    }

    fn raid_fields(passcode: &str, created_secs: i64) -> Value {
        json!({
            "isDeleted": {"booleanValue": false},
            "pokemonName": {"stringValue": "メタモン"},
            "terasType": {"stringValue": "ほのお"},
            "difficultyLevel": {"integerValue": "6"},
            "requestTags": {"arrayValue": {"values": [{"stringValue": "LV100のみ"}]}},
            "passcode": {"stringValue": passcode},
            "createdAt": {"timestampValue": {"seconds": created_secs.to_string(), "nanos": 0}}
        })
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_projects_a_live_listing() {
        let elements = vec![element(raid_fields("ABC123", now().timestamp() - 15))];
        let (listings, errors) = project_listings(&elements, &vocab(), now(), 180);

        assert!(errors.is_empty());
        assert_eq!(listings.len(), 1);
        let listing = &listings[0];
        assert_eq!(listing.pokemon, "Ditto");
        assert_eq!(listing.tera_type, "Fire");
        assert_eq!(listing.stars, "6★");
        assert_eq!(listing.join_conditions, vec!["Lvl. 100 Only".to_string()]);
        assert_eq!(listing.passcode, "ABC123");
        assert_eq!(listing.remaining_secs, 165);
        assert_eq!(listing.remaining_time, "0:02:45");
    }

    #[test]
    fn test_deleted_listing_is_skipped_silently() {
        let mut fields = raid_fields("ABC123", now().timestamp());
        fields["isDeleted"] = json!({"booleanValue": true});
        let (listings, errors) = project_listings(&[element(fields)], &vocab(), now(), 180);

        assert!(listings.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_deletion_flag_is_skipped_silently() {
        let mut fields = raid_fields("ABC123", now().timestamp());
        fields.as_object_mut().unwrap().remove("isDeleted");
        let (listings, errors) = project_listings(&[element(fields)], &vocab(), now(), 180);

        assert!(listings.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_element_without_envelope_is_skipped() {
        let tombstone: BundleElement =
            serde_json::from_value(json!({"metadata": {"count": 1}})).unwrap();
        let (listings, errors) = project_listings(&[tombstone], &vocab(), now(), 180);

        assert!(listings.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_expiry_boundary() {
        // remaining == 0: excluded. remaining == 1: included.
        let expired = element(raid_fields("GONE", now().timestamp() - 180));
        let alive = element(raid_fields("LAST", now().timestamp() - 179));
        let (listings, errors) = project_listings(&[expired, alive], &vocab(), now(), 180);

        assert!(errors.is_empty());
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].passcode, "LAST");
        assert_eq!(listings[0].remaining_secs, 1);
    }

    #[test]
    fn test_unknown_pokemon_fails_only_that_record() {
        let mut bad = raid_fields("BAD111", now().timestamp());
        bad["pokemonName"] = json!({"stringValue": "ヒトカゲ"});
        let good = raid_fields("GOOD22", now().timestamp());
        let (listings, errors) =
            project_listings(&[element(bad), element(good)], &vocab(), now(), 180);

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].passcode, "GOOD22");
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ProjectError::UnknownTerm(VocabError::UnknownTerm {
                category: Category::Pokemon,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_tera_type_projects_unknown_marker() {
        let mut fields = raid_fields("ABC123", now().timestamp());
        fields.as_object_mut().unwrap().remove("terasType");
        let (listings, _) = project_listings(&[element(fields)], &vocab(), now(), 180);

        assert_eq!(listings[0].tera_type, "???");
    }

    #[test]
    fn test_absent_request_tags_project_empty_conditions() {
        let mut no_field = raid_fields("ONE111", now().timestamp());
        no_field.as_object_mut().unwrap().remove("requestTags");
        let mut no_values = raid_fields("TWO222", now().timestamp());
        no_values["requestTags"] = json!({"arrayValue": {}});

        let (listings, errors) =
            project_listings(&[element(no_field), element(no_values)], &vocab(), now(), 180);

        assert!(errors.is_empty());
        assert_eq!(listings.len(), 2);
        assert!(listings[0].join_conditions.is_empty());
        assert!(listings[1].join_conditions.is_empty());
    }

    #[test]
    fn test_unknown_label_fails_the_whole_record() {
        let mut fields = raid_fields("ABC123", now().timestamp());
        fields["requestTags"] =
            json!({"arrayValue": {"values": [{"stringValue": "未知のタグ"}]}});
        let (listings, errors) = project_listings(&[element(fields)], &vocab(), now(), 180);

        assert!(listings.is_empty());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_missing_passcode_is_a_record_error() {
        let mut fields = raid_fields("ABC123", now().timestamp());
        fields.as_object_mut().unwrap().remove("passcode");
        let (listings, errors) = project_listings(&[element(fields)], &vocab(), now(), 180);

        assert!(listings.is_empty());
        assert_eq!(errors, vec![ProjectError::MissingField("passcode")]);
    }

    #[test]
    fn test_source_order_is_preserved() {
        let elements: Vec<BundleElement> = ["AAA111", "BBB222", "CCC333"]
            .iter()
            .map(|code| element(raid_fields(code, now().timestamp())))
            .collect();
        let (listings, _) = project_listings(&elements, &vocab(), now(), 180);

        let codes: Vec<&str> = listings.iter().map(|l| l.passcode.as_str()).collect();
        assert_eq!(codes, vec!["AAA111", "BBB222", "CCC333"]);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(165), "0:02:45");
        assert_eq!(format_clock(3725), "1:02:05");
        assert_eq!(format_clock(59), "0:00:59");
    }
}
