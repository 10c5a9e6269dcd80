//! In-process reference host
//!
//! [`Stylesheet`] collects everything the plugin registers, resolves class
//! candidates against those registrations and serializes the matches to CSS.
//! It covers the subset of a utility-CSS framework the plugin relies on:
//! static classes, `name-value[/modifier]` families, bracketed arbitrary
//! values and nested `&` selectors. Variants (`sm:`, `hover:`) are left to
//! the real framework; `@apply` statements are passed through verbatim for
//! the downstream pipeline to expand.

use crate::core::DEFAULT_KEY;
use crate::host::Host;
use crate::theme::Theme;
use crate::types::{Declarations, MatchUtility, Node};
use crate::utils::{escape_class_name, from_arbitrary};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt::Write;

/// A resolved class: its escaped selector and declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub declarations: Declarations,
}

#[derive(Debug, Default)]
pub struct Stylesheet {
    theme: Theme,
    prefix: String,
    disabled_core_plugins: HashSet<String>,
    base: Vec<Declarations>,
    utilities: Vec<(String, Declarations)>,
    /// Longest names first so `grid-sh-cols-3` isn't read as `grid`.
    families: Vec<MatchUtility>,
}

impl Stylesheet {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_disabled_core_plugins<I, S>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled_core_plugins
            .extend(plugins.into_iter().map(Into::into));
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Every class the stylesheet can resolve without an arbitrary value,
    /// prefixed, static classes first.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .utilities
            .iter()
            .map(|(class, _)| format!("{}{}", self.prefix, class))
            .collect();

        for family in &self.families {
            for key in family.values.keys() {
                if key == DEFAULT_KEY {
                    names.push(format!("{}{}", self.prefix, family.name));
                } else {
                    names.push(format!("{}{}-{}", self.prefix, family.name, key));
                }
            }
        }
        names
    }

    pub fn family_names(&self) -> Vec<&str> {
        self.families.iter().map(|family| family.name.as_str()).collect()
    }

    /// Resolve a single class candidate, prefix included.
    pub fn resolve(&self, candidate: &str) -> Option<Rule> {
        let Some(class) = candidate.strip_prefix(self.prefix.as_str()) else {
            log::trace!("'{}' lacks prefix '{}'", candidate, self.prefix);
            return None;
        };

        let declarations = self
            .resolve_static(class)
            .or_else(|| self.resolve_family(class));

        match declarations {
            Some(declarations) => Some(Rule {
                selector: format!(".{}", escape_class_name(candidate)),
                declarations,
            }),
            None => {
                log::trace!("'{}' matched no utility", candidate);
                None
            }
        }
    }

    fn resolve_static(&self, class: &str) -> Option<Declarations> {
        self.utilities
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, declarations)| declarations.clone())
    }

    fn resolve_family(&self, class: &str) -> Option<Declarations> {
        self.families
            .iter()
            .find_map(|family| resolve_candidate(family, class))
    }

    /// Resolve candidates in order, skipping duplicates and misses.
    pub fn rules<'a, I>(&self, candidates: I) -> Vec<Rule>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|candidate| seen.insert(*candidate))
            .filter_map(|candidate| self.resolve(candidate))
            .collect()
    }

    pub fn to_css<'a, I>(&self, candidates: I, minify: bool) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut writer = CssWriter::new(minify);

        for rules in &self.base {
            for (key, node) in rules.iter() {
                if let Node::Block(block) = node {
                    writer.rule(key, block);
                }
            }
        }
        for rule in self.rules(candidates) {
            writer.rule(&rule.selector, &rule.declarations);
        }

        writer.finish()
    }

    /// Selector → declarations, for inspection.
    pub fn to_json<'a, I>(&self, candidates: I) -> Value
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = Map::new();
        for rule in self.rules(candidates) {
            let value = serde_json::to_value(&rule.declarations).unwrap_or(Value::Null);
            map.insert(rule.selector, value);
        }
        Value::Object(map)
    }
}

impl Host for Stylesheet {
    fn add_base(&mut self, rules: Declarations) {
        self.base.push(rules);
    }

    fn add_utilities(&mut self, rules: Declarations) {
        for (key, node) in rules.iter() {
            match (key.strip_prefix('.'), node) {
                (Some(class), Node::Block(block)) => {
                    self.utilities.push((class.to_string(), block.clone()));
                }
                _ => log::warn!("ignoring utility rule '{}': not a class block", key),
            }
        }
    }

    fn match_utilities(&mut self, utility: MatchUtility) {
        log::trace!("family '{}' registered", utility.name);
        let index = self
            .families
            .partition_point(|family| family.name.len() >= utility.name.len());
        self.families.insert(index, utility);
    }

    fn theme(&self, path: &str) -> Option<Value> {
        self.theme.get(path).cloned()
    }

    fn config(&self, key: &str) -> Option<Value> {
        match key {
            "prefix" => Some(Value::String(self.prefix.clone())),
            _ => None,
        }
    }

    fn core_plugin_enabled(&self, name: &str) -> bool {
        !self.disabled_core_plugins.contains(name)
    }
}

/// Split `rest` (everything after `name-`) into a value and an optional
/// modifier. Bracketed segments are kept whole so `[1/2]` isn't split.
fn split_value(family: &MatchUtility, rest: &str) -> Option<(String, Option<String>)> {
    if rest.starts_with('[') {
        let close = rest.find(']')?;
        let (value, remainder) = rest.split_at(close + 1);
        return match remainder {
            "" => Some((value.to_string(), None)),
            _ => remainder
                .strip_prefix('/')
                .map(|modifier| (value.to_string(), Some(modifier.to_string()))),
        };
    }

    if family.values.contains_key(rest) {
        return Some((rest.to_string(), None));
    }

    match rest.rsplit_once('/') {
        Some((value, modifier)) => Some((value.to_string(), Some(modifier.to_string()))),
        None => Some((rest.to_string(), None)),
    }
}

fn resolve_candidate(family: &MatchUtility, class: &str) -> Option<Declarations> {
    let rest = class.strip_prefix(family.name.as_str())?;

    let (value_key, modifier_key) = if rest.is_empty() {
        (DEFAULT_KEY.to_string(), None)
    } else if let Some(modifier) = rest.strip_prefix('/') {
        (DEFAULT_KEY.to_string(), Some(modifier.to_string()))
    } else {
        split_value(family, rest.strip_prefix('-')?)?
    };

    let value = match from_arbitrary(&value_key) {
        Some(arbitrary) if family.value_type.accepts(&arbitrary) => arbitrary,
        Some(arbitrary) => {
            log::debug!(
                "'{}' is not a valid {} for '{}'",
                arbitrary,
                family.value_type.as_str(),
                family.name
            );
            return None;
        }
        None => family.values.get(&value_key)?.clone(),
    };

    let modifier = match modifier_key {
        None => None,
        Some(key) => match from_arbitrary(&key) {
            Some(arbitrary) => Some(arbitrary),
            None => Some(family.modifiers.as_ref()?.get(&key)?.clone()),
        },
    };

    Some(family.resolve(&value, modifier.as_deref()))
}

struct CssWriter {
    out: String,
    minify: bool,
}

impl CssWriter {
    fn new(minify: bool) -> Self {
        Self {
            out: String::new(),
            minify,
        }
    }

    fn finish(self) -> String {
        self.out
    }

    /// Write `selector { ... }` for own declarations, then one rule per
    /// nested block with `&` replaced by the selector.
    fn rule(&mut self, selector: &str, declarations: &Declarations) {
        let mut body: Vec<String> = Vec::new();
        let mut nested: Vec<(String, &Declarations)> = Vec::new();

        for (key, node) in declarations.iter() {
            match node {
                Node::Value(value) => body.push(format!("{}: {};", key, value)),
                Node::Block(_) if key.starts_with("@apply ") => body.push(format!("{};", key)),
                Node::Block(block) if key.contains('&') => {
                    nested.push((key.replace('&', selector), block))
                }
                Node::Block(block) if key.starts_with('@') => {
                    // Conditional at-rule around the same selector.
                    self.open(key);
                    self.rule(selector, block);
                    self.close();
                }
                Node::Block(block) => nested.push((format!("{} {}", selector, key), block)),
            }
        }

        if !body.is_empty() {
            self.open(selector);
            for line in &body {
                self.line(line);
            }
            self.close();
        }

        for (selector, block) in nested {
            self.rule(&selector, block);
        }
    }

    fn open(&mut self, prelude: &str) {
        if self.minify {
            let _ = write!(self.out, "{}{{", prelude);
        } else {
            let _ = writeln!(self.out, "{} {{", prelude);
        }
    }

    fn line(&mut self, line: &str) {
        if self.minify {
            self.out.push_str(line);
        } else {
            let _ = writeln!(self.out, "  {}", line);
        }
    }

    fn close(&mut self) {
        if self.minify {
            self.out.push('}');
        } else {
            self.out.push_str("}\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::Plugin;
    use crate::types::ValueTable;
    use crate::PluginOptions;

    fn stylesheet(prefix: &str) -> Stylesheet {
        let mut stylesheet = Stylesheet::new(Theme::default()).with_prefix(prefix);
        Plugin::new(PluginOptions::default()).register(&mut stylesheet);
        stylesheet
    }

    #[test]
    fn test_resolve_static_class() {
        let stylesheet = stylesheet("");
        let rule = stylesheet.resolve("absolute").unwrap();

        assert_eq!(rule.selector, ".absolute");
        assert_eq!(rule.declarations.value("position"), Some("absolute"));
    }

    #[test]
    fn test_resolve_default_and_modifier() {
        let stylesheet = stylesheet("");

        let flex = stylesheet.resolve("flex").unwrap();
        assert_eq!(flex.declarations.value("display"), Some("flex"));
        assert!(flex.declarations.value("gap").is_none());

        let flex = stylesheet.resolve("flex/4").unwrap();
        assert_eq!(flex.selector, ".flex\\/4");
        assert_eq!(flex.declarations.value("gap"), Some("1rem"));

        assert!(stylesheet.resolve("flex/nope").is_none());
    }

    #[test]
    fn test_longest_family_wins() {
        let stylesheet = stylesheet("");

        let col = stylesheet.resolve("flex-col").unwrap();
        assert_eq!(col.declarations.value("flex-direction"), Some("column"));

        let grid = stylesheet.resolve("grid-sh-cols-3").unwrap();
        assert_eq!(
            grid.declarations.value("grid-template-columns"),
            Some("repeat(3, minmax(0, 1fr))")
        );
    }

    #[test]
    fn test_fraction_key_is_not_a_modifier() {
        let stylesheet = stylesheet("");

        let half = stylesheet.resolve("d-1/2").unwrap();
        assert_eq!(half.declarations.value("width"), Some("50%"));
        assert_eq!(half.declarations.value("height"), Some("50%"));

        let split = stylesheet.resolve("d-64/32").unwrap();
        assert_eq!(split.declarations.value("width"), Some("16rem"));
        assert_eq!(split.declarations.value("height"), Some("8rem"));
    }

    #[test]
    fn test_arbitrary_values() {
        let stylesheet = stylesheet("");

        let d = stylesheet.resolve("d-[50v%]/[25v%]").unwrap();
        assert_eq!(d.declarations.value("width"), Some("50vw"));
        assert_eq!(d.declarations.value("height"), Some("25vh"));

        let ring = stylesheet.resolve("ring-sh-[inset;2px;red]").unwrap();
        assert_eq!(ring.declarations.value("--baleada-ring-inset"), Some("inset"));
        assert_eq!(ring.declarations.value("--baleada-ring-color"), Some("red"));

        // stretch-w only takes lengths
        assert!(stretch_rejects(&stylesheet, "stretch-w-[banana]"));
        assert!(stylesheet.resolve("stretch-w-[calc(100%_-_2rem)]").is_some());
    }

    fn stretch_rejects(stylesheet: &Stylesheet, candidate: &str) -> bool {
        stylesheet.resolve(candidate).is_none()
    }

    #[test]
    fn test_prefix_is_required() {
        let stylesheet = stylesheet("tw-");

        assert!(stylesheet.resolve("center").is_none());
        let rule = stylesheet.resolve("tw-center").unwrap();
        assert_eq!(rule.selector, ".tw-center");
        assert!(rule
            .declarations
            .keys()
            .any(|key| key.contains(".tw-flex-col")));
    }

    #[test]
    fn test_css_flattens_nested_selectors() {
        let stylesheet = stylesheet("");
        let css = stylesheet.to_css(["center"], false);

        assert!(css.contains("@property --baleada-flex {\n  syntax: \"*\";\n  inherits: false;\n}"));
        assert!(css.contains(".center:where(:is(.flex-col, "));
        assert!(css.contains("> .center) {\n  align-self: center;\n  margin-top: auto;"));
        assert!(!css.contains('&'));
    }

    #[test]
    fn test_css_keeps_apply_statements() {
        let stylesheet = stylesheet("");
        let css = stylesheet.to_css(["stretch-w-prose"], true);

        assert!(css.contains(".stretch-w-prose{@apply w-full max-w-[65ch];}"));
    }

    #[test]
    fn test_unknown_and_duplicate_candidates() {
        let stylesheet = stylesheet("");
        let rules = stylesheet.rules(["center", "bogus", "center", "d-[]"]);
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_to_json() {
        let stylesheet = stylesheet("");
        let json = stylesheet.to_json(["relative"]);
        assert_eq!(json[".relative"]["position"], "relative");
    }

    #[test]
    fn test_class_names_cover_families() {
        let stylesheet = stylesheet("tw-");
        let names = stylesheet.class_names();

        assert!(names.contains(&"tw-center".to_string()));
        assert!(names.contains(&"tw-flex".to_string()));
        assert!(names.contains(&"tw-grid-sh-rows-none".to_string()));
    }

    #[test]
    fn test_longer_family_wins_regardless_of_order() {
        let family = |name: &str, key: &str, value: &str| {
            let mut values = ValueTable::new();
            values.insert(key.to_string(), value.to_string());
            MatchUtility::new(name, |value, _| Declarations::new().with("grid-template-columns", value))
                .with_values(values)
        };

        let mut stylesheet = Stylesheet::new(Theme::empty());
        stylesheet.match_utilities(family("grid", "sh-cols-3", "wrong"));
        stylesheet.match_utilities(family("d", "1", "1px"));
        stylesheet.match_utilities(family("grid-sh", "cols-3", "right"));

        assert_eq!(stylesheet.family_names(), vec!["grid-sh", "grid", "d"]);
        let rule = stylesheet.resolve("grid-sh-cols-3").unwrap();
        assert_eq!(rule.declarations.value("grid-template-columns"), Some("right"));
    }

    #[test]
    fn test_disabled_core_plugin() {
        let mut stylesheet = Stylesheet::new(Theme::default())
            .with_disabled_core_plugins(["ringOpacity"]);
        Plugin::new(PluginOptions::default()).register(&mut stylesheet);

        assert!(stylesheet.resolve("ring-sh-2").is_some());
        assert!(stylesheet.resolve("ring-sh-2/50").is_none());
        assert!(self::stylesheet("").resolve("ring-sh-2/50").is_some());
    }
}
