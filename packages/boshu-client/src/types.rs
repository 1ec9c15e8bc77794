//! Firestore-bundle document types as the boshu board emits them.

use std::collections::HashMap;

use serde::Deserialize;

/// One element of an items bundle. Elements without a `document` envelope are
/// bundle metadata or deletion tombstones and carry no listing.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleElement {
    #[serde(default)]
    pub document: Option<Document>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, FieldValue>,
}

impl Document {
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name)?.string_value.as_deref()
    }

    /// Firestore integers arrive as decimal strings; returned verbatim.
    pub fn int_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name)?.integer_value.as_deref()
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.fields.get(name)?.boolean_value
    }

    pub fn timestamp_field(&self, name: &str) -> Option<&TimestampValue> {
        self.fields.get(name)?.timestamp_value.as_ref()
    }

    pub fn array_field(&self, name: &str) -> Option<&ArrayValue> {
        self.fields.get(name)?.array_value.as_ref()
    }
}

/// A Firestore-typed field value. At most one variant is populated per field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldValue {
    pub string_value: Option<String>,
    pub integer_value: Option<String>,
    pub boolean_value: Option<bool>,
    pub timestamp_value: Option<TimestampValue>,
    pub array_value: Option<ArrayValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampValue {
    #[serde(deserialize_with = "seconds_from_string_or_number")]
    pub seconds: i64,
    #[serde(default)]
    pub nanos: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayValue {
    /// Absent in the wire format when the array is empty.
    #[serde(default)]
    pub values: Vec<FieldValue>,
}

/// Bundle timestamps carry seconds as a JSON string, direct document reads as
/// a bare number. Accept both.
fn seconds_from_string_or_number<'de, D>(de: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    match Raw::deserialize(de)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
