//! Core data structures shared by the generator and its hosts

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Theme-derived mapping from utility suffix to CSS value.
pub type ValueTable = BTreeMap<String, String>;

/// One entry of a declaration object: either a CSS value or a nested block
/// (nested selector, at-rule, or `@apply` statement).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Value(String),
    Block(Declarations),
}

impl Node {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Node::Value(value) => Some(value.as_str()),
            Node::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&Declarations> {
        match self {
            Node::Value(_) => None,
            Node::Block(block) => Some(block),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Value(value) => serializer.serialize_str(value),
            Node::Block(block) => block.serialize(serializer),
        }
    }
}

/// Insertion-ordered declaration object.
///
/// Keys are CSS property names (`align-self`, `--baleada-flex`), nested
/// selectors (`&:where(.flex > &)`), or at-rule statements. Inserting an
/// existing key replaces its value in place, so later spreads win the way
/// object spreads do in CSS-in-JS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<(String, Node)>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.put(key.into(), Node::Value(value.into()));
    }

    pub fn nest(&mut self, key: impl Into<String>, block: Declarations) {
        self.put(key.into(), Node::Block(block));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_block(mut self, key: impl Into<String>, block: Declarations) -> Self {
        self.nest(key, block);
        self
    }

    /// Merge `other` into `self`; keys already present are overwritten.
    pub fn extend(&mut self, other: Declarations) {
        for (key, node) in other.entries {
            self.put(key, node);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, node)| node)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Node::as_value)
    }

    pub fn block(&self, key: &str) -> Option<&Declarations> {
        self.get(key).and_then(Node::as_block)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn put(&mut self, key: String, node: Node) {
        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            slot.1 = node;
        } else {
            self.entries.push((key, node));
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Declarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut declarations = Declarations::new();
        for (key, value) in iter {
            declarations.insert(key, value);
        }
        declarations
    }
}

impl Serialize for Declarations {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

/// CSS value type hint attached to a parametric utility. Hosts use it to
/// validate arbitrary (bracketed) values; table values are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Any,
    Length,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Any => "any",
            ValueType::Length => "length",
        }
    }

    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        match self {
            ValueType::Any => true,
            ValueType::Length => is_css_function(value) || length_regex().is_match(value),
        }
    }
}

fn is_css_function(value: &str) -> bool {
    value.ends_with(')') && value.contains('(')
}

fn length_regex() -> &'static Regex {
    static LENGTH: OnceLock<Regex> = OnceLock::new();
    LENGTH.get_or_init(|| {
        Regex::new(
            r"^-?(\d+\.?\d*|\.\d+)(px|rem|em|%|ch|ex|lh|rlh|vw|vh|vmin|vmax|dvw|dvh|svw|svh|lvw|lvh|cqw|cqh|cqi|cqb|cqmin|cqmax|pt|pc|cm|mm|in|q)?$",
        )
        .expect("length pattern is valid")
    })
}

/// Resolver invoked by the host for each `name-value[/modifier]` candidate.
pub type Resolver = Box<dyn Fn(&str, Option<&str>) -> Declarations + Send + Sync>;

/// A family of parametric utilities (`d-64`, `stretch-w-prose`, `flex/4`).
pub struct MatchUtility {
    pub name: String,
    pub values: ValueTable,
    pub modifiers: Option<ValueTable>,
    pub value_type: ValueType,
    resolver: Resolver,
}

impl MatchUtility {
    pub fn new<F>(name: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> Declarations + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            values: ValueTable::new(),
            modifiers: None,
            value_type: ValueType::Any,
            resolver: Box::new(resolver),
        }
    }

    pub fn with_values(mut self, values: ValueTable) -> Self {
        self.values = values;
        self
    }

    pub fn with_modifiers(mut self, modifiers: ValueTable) -> Self {
        self.modifiers = Some(modifiers);
        self
    }

    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn resolve(&self, value: &str, modifier: Option<&str>) -> Declarations {
        (self.resolver)(value, modifier)
    }
}

impl fmt::Debug for MatchUtility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchUtility")
            .field("name", &self.name)
            .field("values", &self.values.len())
            .field("modifiers", &self.modifiers.as_ref().map(|m| m.len()))
            .field("value_type", &self.value_type)
            .finish()
    }
}
