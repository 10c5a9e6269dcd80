//! Utility functions for the generator and the reference host

use crate::core::DEFAULT_KEY;
use crate::types::{Declarations, ValueTable};
use serde_json::Value;

/// Builds `@apply` statements with the host's class prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Apply {
    prefix: String,
}

impl Apply {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `"w-full  h-full"` → `{ "@apply tw-w-full tw-h-full": {} }`
    pub fn apply(&self, classes: &str) -> Declarations {
        let statement = classes
            .split_whitespace()
            .map(|class| self.prefixed(class))
            .collect::<Vec<_>>()
            .join(" ");

        Declarations::new().with_block(format!("@apply {}", statement), Declarations::new())
    }

    /// Prefix goes after any variants and after a leading negation:
    /// `sm:-mt-2` → `sm:-tw-mt-2`.
    pub fn prefixed(&self, class: &str) -> String {
        if self.prefix.is_empty() {
            return class.to_string();
        }

        let (variants, utility) = match class.rfind(':') {
            Some(index) => class.split_at(index + 1),
            None => ("", class),
        };

        match utility.strip_prefix('-') {
            Some(positive) => format!("{}-{}{}", variants, self.prefix, positive),
            None => format!("{}{}{}", variants, self.prefix, utility),
        }
    }
}

/// Arbitrary values can't contain spaces inside a class name.
pub fn to_arbitrary(value: &str) -> String {
    format!("[{}]", value.trim().replace(' ', "_"))
}

/// Inverse of [`to_arbitrary`] for a bracketed segment, if it is one.
pub fn from_arbitrary(segment: &str) -> Option<String> {
    segment
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(|inner| inner.replace('_', " "))
}

/// CSS identifier check used for namespaces and prefixes.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !first.is_ascii_alphabetic() && first != '_' && first != '-' {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Escape a class name for use in a selector: `d-1/2` → `d-1\/2`.
pub fn escape_class_name(class: &str) -> String {
    let mut escaped = String::with_capacity(class.len());
    for (index, c) in class.chars().enumerate() {
        let needs_escape = match c {
            'a'..='z' | 'A'..='Z' | '_' | '-' => false,
            '0'..='9' => index == 0,
            c if !c.is_ascii() => false,
            _ => true,
        };

        if needs_escape && c.is_ascii_digit() {
            escaped.push_str(&format!("\\3{} ", c));
        } else if needs_escape {
            escaped.push('\\');
            escaped.push(c);
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Flatten a theme section into a suffix table.
///
/// Nested objects join their keys with `-` (`red.500` → `red-500`), a nested
/// `DEFAULT` collapses onto its parent key (`red.DEFAULT` → `red`), numbers
/// are stringified and arrays are comma-joined. Anything else is skipped.
pub fn flatten_table(value: &Value) -> ValueTable {
    let mut table = ValueTable::new();
    if let Value::Object(entries) = value {
        for (key, entry) in entries {
            flatten_into(&mut table, key, entry);
        }
    }
    table
}

fn flatten_into(table: &mut ValueTable, key: &str, value: &Value) {
    match value {
        Value::String(text) => {
            table.insert(key.to_string(), text.clone());
        }
        Value::Number(number) => {
            table.insert(key.to_string(), number.to_string());
        }
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.clone()),
                    Value::Number(number) => Some(number.to_string()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(", ");
            table.insert(key.to_string(), joined);
        }
        Value::Object(entries) => {
            for (child_key, child) in entries {
                let nested = if child_key == DEFAULT_KEY {
                    key.to_string()
                } else {
                    format!("{}-{}", key, child_key)
                };
                flatten_into(table, &nested, child);
            }
        }
        Value::Null | Value::Bool(_) => {}
    }
}

/// Spread tables left to right; later keys win.
pub fn merge_tables(tables: &[ValueTable]) -> ValueTable {
    let mut merged = ValueTable::new();
    for table in tables {
        merged.extend(table.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_without_prefix() {
        let apply = Apply::new("");
        let declarations = apply.apply("w-full h-full");
        assert_eq!(declarations.keys().collect::<Vec<_>>(), vec!["@apply w-full h-full"]);
        assert_eq!(declarations.block("@apply w-full h-full"), Some(&Declarations::new()));
    }

    #[test]
    fn test_apply_with_prefix() {
        let apply = Apply::new("tw-");
        assert!(apply.apply("w-full h-full").contains_key("@apply tw-w-full tw-h-full"));
    }

    #[test]
    fn test_apply_collapses_whitespace() {
        let apply = Apply::new("tw-");
        let declarations = apply.apply("w-full  \n  \n\n  h-full\n\n  ");
        assert_eq!(
            declarations.keys().collect::<Vec<_>>(),
            vec!["@apply tw-w-full tw-h-full"]
        );
    }

    #[test]
    fn test_prefix_respects_variants_and_negation() {
        let apply = Apply::new("tw-");
        assert_eq!(apply.prefixed("sm:hover:w-full"), "sm:hover:tw-w-full");
        assert_eq!(apply.prefixed("-translate-x-1/2"), "-tw-translate-x-1/2");
        assert_eq!(apply.prefixed("md:-mt-2"), "md:-tw-mt-2");
    }

    #[test]
    fn test_arbitrary_round_trip() {
        assert_eq!(to_arbitrary("calc(100% - 2rem)"), "[calc(100%_-_2rem)]");
        assert_eq!(from_arbitrary("[calc(100%_-_2rem)]").as_deref(), Some("calc(100% - 2rem)"));
        assert_eq!(from_arbitrary("prose"), None);
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("baleada"));
        assert!(is_valid_identifier("my-ns_2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2fast"));
        assert!(!is_valid_identifier("has space"));
    }

    #[test]
    fn test_escape_class_name() {
        assert_eq!(escape_class_name("d-1/2"), "d-1\\/2");
        assert_eq!(escape_class_name("ring-sh-[2px;red]"), "ring-sh-\\[2px\\;red\\]");
        assert_eq!(escape_class_name("d-50v%"), "d-50v\\%");
        assert_eq!(escape_class_name("center"), "center");
    }

    #[test]
    fn test_flatten_table() {
        let theme = json!({
            "red": { "DEFAULT": "#f00", "500": "#ef4444" },
            "white": "#fff",
            "1": 4,
            "sans": ["Inter", "sans-serif"],
            "ignored": true
        });

        let table = flatten_table(&theme);
        assert_eq!(table["red"], "#f00");
        assert_eq!(table["red-500"], "#ef4444");
        assert_eq!(table["white"], "#fff");
        assert_eq!(table["1"], "4");
        assert_eq!(table["sans"], "Inter, sans-serif");
        assert!(!table.contains_key("ignored"));
        assert!(flatten_table(&Value::Null).is_empty());
    }

    #[test]
    fn test_merge_tables_later_wins() {
        let width: ValueTable = [("screen".to_string(), "100vw".to_string())].into_iter().collect();
        let height: ValueTable = [("screen".to_string(), "100vh".to_string())].into_iter().collect();
        assert_eq!(merge_tables(&[width, height])["screen"], "100vh");
    }
}
