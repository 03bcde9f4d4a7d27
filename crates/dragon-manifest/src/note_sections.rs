//! # Note Sections
//!
//! Connector manifests map each clinical note section to one or more
//! section identifiers in the partner's EHR. Every manifest carries all ten
//! keys in a fixed order; a section the partner does not map holds its
//! default value.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Marker for "no mapping supplied"; replaced by the key's default.
pub const EMPTY_NOTE_PLACEHOLDER: &str = "__NOTE_EMPTY__";

/// Section keys with their display labels, in manifest order.
pub const NOTE_SECTIONS: [(&str, &str); 10] = [
    ("hpi", "History of Present Illness"),
    ("chief-complaint", "Chief Complaint"),
    ("past-medical-history", "Past Medical History"),
    ("assessment", "Assessment"),
    ("medications", "Medications"),
    ("allergies", "Allergies"),
    ("review-of-systems", "Review of Systems"),
    ("physical-exam", "Physical Exam"),
    ("procedures", "Procedures"),
    ("results", "Results"),
];

/// Display label for a section key.
pub fn note_section_label(key: &str) -> Option<&'static str> {
    NOTE_SECTIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
}

/// A section mapping: one identifier or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteSectionValue {
    Single(String),
    Many(Vec<String>),
}

impl NoteSectionValue {
    fn default_for(key: &str) -> Self {
        match key {
            "hpi" => Self::Many(vec!["hpi".into(), "chief-complaint".into()]),
            "assessment" => Self::Many(vec!["assessment".into(), "plan".into()]),
            "physical-exam" | "procedures" | "results" => Self::Single(key.to_string()),
            _ => Self::Single(EMPTY_NOTE_PLACEHOLDER.to_string()),
        }
    }

    /// Clean a raw manifest value. `None` means "use the default".
    fn cleanse(raw: &Value) -> Option<Self> {
        match raw {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed == EMPTY_NOTE_PLACEHOLDER {
                    None
                } else {
                    Some(Self::Single(trimmed.to_string()))
                }
            }
            Value::Array(items) => {
                let strings: Vec<String> = items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                if strings.iter().any(|s| !s.is_empty()) {
                    Some(Self::Many(strings))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Single(s) if s == EMPTY_NOTE_PLACEHOLDER)
    }
}

/// All ten sections, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSections {
    entries: Vec<(&'static str, NoteSectionValue)>,
}

impl NoteSections {
    pub fn get(&self, key: &str) -> Option<&NoteSectionValue> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &NoteSectionValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

impl Serialize for NoteSections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Produce every section key in order from a raw `note-sections` object.
///
/// Strings are trimmed. Blank strings, nulls, arrays without a non-empty
/// string, the placeholder and values of any other type all fall back to
/// the key's default. Unknown keys are dropped.
pub fn normalize_note_sections(input: &Value) -> NoteSections {
    let entries = NOTE_SECTIONS
        .iter()
        .map(|(key, _)| {
            let value = input
                .get(*key)
                .and_then(NoteSectionValue::cleanse)
                .unwrap_or_else(|| NoteSectionValue::default_for(key));
            (*key, value)
        })
        .collect();
    NoteSections { entries }
}

pub fn default_note_sections() -> NoteSections {
    normalize_note_sections(&Value::Null)
}
