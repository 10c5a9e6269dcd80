//! Theme values for the reference host
//!
//! The embedded default theme covers the sections the utilities read. User
//! overrides follow the usual utility-CSS convention: a top-level section
//! replaces the default section outright, while sections under `extend` are
//! merged into it key by key.

use serde_json::{Map, Value};
use std::sync::OnceLock;

const DEFAULT_THEME_JSON: &str = include_str!("default_theme.json");
const EXTEND_KEY: &str = "extend";

fn default_theme() -> &'static Value {
    static DEFAULT_THEME: OnceLock<Value> = OnceLock::new();
    DEFAULT_THEME.get_or_init(|| match serde_json::from_str(DEFAULT_THEME_JSON) {
        Ok(theme) => theme,
        Err(e) => {
            log::error!("embedded default theme is invalid: {}", e);
            Value::Object(Map::new())
        }
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    root: Value,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            root: default_theme().clone(),
        }
    }
}

impl Theme {
    pub fn empty() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Apply user overrides on top of this theme.
    pub fn with_overrides(mut self, overrides: &Value) -> Self {
        let Value::Object(overrides) = overrides else {
            if !overrides.is_null() {
                log::warn!("theme overrides must be an object, ignoring {}", overrides);
            }
            return self;
        };

        for (section, value) in overrides {
            if section == EXTEND_KEY {
                continue;
            }
            log::debug!("theme section '{}' replaced", section);
            self.set(section, value.clone());
        }

        if let Some(Value::Object(extensions)) = overrides.get(EXTEND_KEY) {
            for (section, value) in extensions {
                log::debug!("theme section '{}' extended", section);
                let mut merged = self.get(section).cloned().unwrap_or(Value::Null);
                deep_merge(&mut merged, value);
                self.set(section, merged);
            }
        }

        self
    }

    /// Lookup by dotted path, e.g. `colors.red.500`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.root, |value, segment| value.get(segment))
    }

    fn set(&mut self, section: &str, value: Value) {
        if !self.root.is_object() {
            self.root = Value::Object(Map::new());
        }
        if let Value::Object(sections) = &mut self.root {
            sections.insert(section.to_string(), value);
        }
    }
}

fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                deep_merge(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target, source) => *target = source.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_theme_has_utility_sections() {
        let theme = Theme::default();
        for section in ["spacing", "width", "height", "maxWidth", "ringWidth", "transitionDuration"] {
            assert!(theme.get(section).is_some(), "missing {}", section);
        }
        assert_eq!(theme.get("ringWidth.DEFAULT"), Some(&json!("3px")));
        assert_eq!(theme.get("colors.red.500"), Some(&json!("#ef4444")));
    }

    #[test]
    fn test_top_level_override_replaces_section() {
        let theme = Theme::default().with_overrides(&json!({
            "maxWidth": { "narrow": "40rem" }
        }));

        assert_eq!(theme.get("maxWidth.narrow"), Some(&json!("40rem")));
        assert!(theme.get("maxWidth.prose").is_none());
    }

    #[test]
    fn test_extend_merges_section() {
        let theme = Theme::default().with_overrides(&json!({
            "extend": {
                "dimension": { "half": "50v%" },
                "colors": { "red": { "950": "#450a0a" } }
            }
        }));

        assert_eq!(theme.get("dimension.half"), Some(&json!("50v%")));
        assert_eq!(theme.get("colors.red.950"), Some(&json!("#450a0a")));
        assert_eq!(theme.get("colors.red.500"), Some(&json!("#ef4444")));
    }

    #[test]
    fn test_non_object_overrides_are_ignored() {
        let theme = Theme::empty().with_overrides(&json!("nope"));
        assert_eq!(theme.root, json!({}));
        assert!(theme.get("spacing").is_none());
    }
}
