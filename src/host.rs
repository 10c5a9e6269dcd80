//! The registration surface of the utility-CSS framework hosting the plugin

use crate::types::{Declarations, MatchUtility, ValueTable};
use crate::utils::flatten_table;
use serde_json::Value;

/// Callbacks a host framework hands to the plugin.
///
/// Top-level keys passed to [`Host::add_utilities`] are unprefixed class
/// selectors (`.center`); the host applies its class prefix to them and to
/// [`MatchUtility::name`]. Selectors nested inside a block are emitted as-is,
/// with the prefix already applied by the plugin.
pub trait Host {
    /// Global defaults, e.g. `*, ::before, ::after` or `@property` rules.
    fn add_base(&mut self, rules: Declarations);

    /// Fixed rules keyed by class selector.
    fn add_utilities(&mut self, rules: Declarations);

    /// A parametric family resolved per `name-value[/modifier]` candidate.
    fn match_utilities(&mut self, utility: MatchUtility);

    /// Theme lookup by dotted path (`spacing`, `ringWidth.DEFAULT`).
    fn theme(&self, path: &str) -> Option<Value>;

    fn config(&self, key: &str) -> Option<Value>;

    fn core_plugin_enabled(&self, name: &str) -> bool;
}

/// A theme section as a flat suffix table; missing sections are empty.
pub fn theme_table(host: &dyn Host, path: &str) -> ValueTable {
    match host.theme(path) {
        Some(value) => flatten_table(&value),
        None => {
            log::debug!("theme section '{}' not found", path);
            ValueTable::new()
        }
    }
}

/// A single theme value, stringified.
pub fn theme_string(host: &dyn Host, path: &str) -> Option<String> {
    match host.theme(path)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub fn config_string(host: &dyn Host, key: &str) -> Option<String> {
    match host.config(key)? {
        Value::String(text) => Some(text),
        _ => None,
    }
}
