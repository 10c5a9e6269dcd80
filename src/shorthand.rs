//! Packed shorthand values for `ring-sh` and `transition-sh`
//!
//! Hosts match utility suffixes against a flat value table, so multi-field
//! shorthands are packed into a single token when the table is generated and
//! unpacked again when a utility resolves. Two encodings exist:
//!
//! 1. JSON objects, produced for every generated table entry.
//! 2. `;`-delimited positional fields, for arbitrary values such as
//!    `ring-sh-[inset;2px;red]` that never went through the table.
//!
//! Decoding tries JSON first and falls back to the positional split. Nothing
//! here fails: fields that can't be recovered are left unset so the base
//! defaults apply.

use crate::core::{DEFAULT_KEY, RING_INSET_KEYWORD, SHORTHAND_DELIMITER};
use crate::types::ValueTable;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub trait Shorthand: Default + Serialize + DeserializeOwned {
    const NAME: &'static str;
    const MAX_FIELDS: usize;

    /// Build from positional fields; `fields.len()` is at most `MAX_FIELDS`.
    fn from_fields(fields: &[&str]) -> Self;

    fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn decode(raw: &str) -> Self {
        match Self::decode_json(raw) {
            Some(decoded) => {
                log::trace!("{} token '{}' decoded as JSON", Self::NAME, raw);
                decoded
            }
            None => Self::decode_delimited(raw),
        }
    }

    fn decode_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    fn decode_delimited(raw: &str) -> Self {
        let fields: Vec<&str> = raw
            .split(SHORTHAND_DELIMITER)
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect();

        if fields.len() > Self::MAX_FIELDS {
            log::warn!(
                "{} value '{}' has {} fields, only the first {} are used",
                Self::NAME,
                raw,
                fields.len(),
                Self::MAX_FIELDS
            );
        } else {
            log::trace!("{} value '{}' decoded from {} fields", Self::NAME, raw, fields.len());
        }

        Self::from_fields(&fields[..fields.len().min(Self::MAX_FIELDS)])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingShorthand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Shorthand for RingShorthand {
    const NAME: &'static str = "ring-sh";
    const MAX_FIELDS: usize = 3;

    fn from_fields(fields: &[&str]) -> Self {
        let owned = |field: &&str| Some(field.to_string());
        match fields {
            [inset, width, color] => Self {
                inset: owned(inset),
                width: owned(width),
                color: owned(color),
            },
            [width, color] => Self {
                inset: None,
                width: owned(width),
                color: owned(color),
            },
            [width] => Self {
                width: owned(width),
                ..Self::default()
            },
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionShorthand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
}

impl Shorthand for TransitionShorthand {
    const NAME: &'static str = "transition-sh";
    const MAX_FIELDS: usize = 3;

    fn from_fields(fields: &[&str]) -> Self {
        let owned = |field: &&str| Some(field.to_string());
        match fields {
            [property, duration, timing] => Self {
                property: owned(property),
                duration: owned(duration),
                timing: owned(timing),
            },
            [property, duration] => Self {
                property: owned(property),
                duration: owned(duration),
                timing: None,
            },
            [property] => Self {
                property: owned(property),
                ..Self::default()
            },
            _ => Self::default(),
        }
    }
}

/// Join the non-default key segments of a table entry; all-default entries
/// become `DEFAULT`.
fn table_key(segments: &[Option<&str>]) -> String {
    let key = segments
        .iter()
        .flatten()
        .filter(|segment| **segment != DEFAULT_KEY)
        .copied()
        .collect::<Vec<_>>()
        .join("-");

    if key.is_empty() {
        DEFAULT_KEY.to_string()
    } else {
        key
    }
}

fn explicit<'a>(key: &str, value: &'a str) -> Option<&'a str> {
    (key != DEFAULT_KEY).then_some(value)
}

/// `[inset-][width-][color]` entries for every ring width and color.
pub fn ring_table(widths: &ValueTable, colors: &ValueTable) -> ValueTable {
    let mut table = ValueTable::new();
    let color_entries: Vec<Option<(&String, &String)>> = std::iter::once(None)
        .chain(
            colors
                .iter()
                .filter(|(key, _)| key.as_str() != DEFAULT_KEY)
                .map(Some),
        )
        .collect();

    for inset in [false, true] {
        for (width_key, width) in widths {
            for color in &color_entries {
                let key = table_key(&[
                    inset.then_some(RING_INSET_KEYWORD),
                    Some(width_key.as_str()),
                    color.map(|(color_key, _)| color_key.as_str()),
                ]);
                let token = RingShorthand {
                    inset: inset.then(|| RING_INSET_KEYWORD.to_string()),
                    width: explicit(width_key, width).map(str::to_string),
                    color: color.map(|(_, color)| color.to_string()),
                };
                table.insert(key, token.encode());
            }
        }
    }

    table
}

/// `[property-][duration]` entries for every transition property and duration.
pub fn transition_table(properties: &ValueTable, durations: &ValueTable) -> ValueTable {
    let mut table = ValueTable::new();
    let with_default = |values: &ValueTable| -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> =
            values.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        if !values.contains_key(DEFAULT_KEY) {
            entries.insert(0, (DEFAULT_KEY.to_string(), String::new()));
        }
        entries
    };

    for (property_key, property) in with_default(properties) {
        for (duration_key, duration) in with_default(durations) {
            let key = table_key(&[Some(property_key.as_str()), Some(duration_key.as_str())]);
            let token = TransitionShorthand {
                property: explicit(&property_key, &property).map(str::to_string),
                duration: explicit(&duration_key, &duration).map(str::to_string),
                timing: None,
            };
            table.insert(key, token.encode());
        }
    }

    table
}
