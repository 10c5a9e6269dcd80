//! Space-toggle condition variables
//!
//! A condition is published as two custom properties: `--{ns}-{name}` and
//! `--{ns}-not-{name}`. The true side holds a whitespace token, the false side
//! holds `initial`, which makes any `var()` referencing it without a fallback
//! invalid at computed-value time.
//!
//! - OR: `var(--a, var(--b, var(--c)))`. The first active variable wins.
//! - AND: `var(--a) var(--b)`. Any inactive operand invalidates the whole
//!   declaration.
//!
//! Conditions are modelled as [`Condition`] and [`Flag`] values and only
//! turned into `var()` text by [`SpaceToggle`].

use crate::core::{INITIAL, NOT_PREFIX, WHITESPACE_COMMENT, WHITESPACE_SPACE};
use crate::types::Declarations;
use serde::{Deserialize, Serialize};

/// Token written into the active side of a condition pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Whitespace {
    #[default]
    Space,
    Comment,
}

impl Whitespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Whitespace::Space => WHITESPACE_SPACE,
            Whitespace::Comment => WHITESPACE_COMMENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Absolute,
    Fixed,
    Sticky,
    Relative,
    Static,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::Absolute,
        Position::Fixed,
        Position::Sticky,
        Position::Relative,
        Position::Static,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Absolute => "absolute",
            Position::Fixed => "fixed",
            Position::Sticky => "sticky",
            Position::Relative => "relative",
            Position::Static => "static",
        }
    }

    /// Positions whose offsets move the element out of flow, so centering
    /// math with `top`/`left`/`translate` applies.
    pub fn is_out_of_flow(&self) -> bool {
        match self {
            Position::Absolute | Position::Fixed | Position::Sticky => true,
            Position::Relative | Position::Static => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Flex,
    FlexRow,
    FlexCol,
    Grid,
    Position(Position),
}

impl Condition {
    /// Container conditions published together by every layout utility.
    pub const CONTAINERS: [Condition; 4] = [
        Condition::Flex,
        Condition::FlexRow,
        Condition::FlexCol,
        Condition::Grid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Condition::Flex => "flex",
            Condition::FlexRow => "flex-row",
            Condition::FlexCol => "flex-col",
            Condition::Grid => "grid",
            Condition::Position(position) => position.as_str(),
        }
    }

    pub fn is(self) -> Flag {
        Flag {
            condition: self,
            negated: false,
        }
    }

    pub fn not(self) -> Flag {
        Flag {
            condition: self,
            negated: true,
        }
    }

    /// Every condition the generator knows about, containers first.
    pub fn all() -> Vec<Condition> {
        Self::CONTAINERS
            .into_iter()
            .chain(Position::ALL.into_iter().map(Condition::Position))
            .collect()
    }
}

/// One side of a condition pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flag {
    pub condition: Condition,
    pub negated: bool,
}

impl Flag {
    pub fn name(&self) -> String {
        if self.negated {
            format!("{}{}", NOT_PREFIX, self.condition.name())
        } else {
            self.condition.name().to_string()
        }
    }
}

/// A single composition step over flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Or(Vec<Flag>),
    And(Vec<Flag>),
}

/// A value that only applies when every gate resolves true. Gates are
/// concatenated, so consecutive gates are AND-ed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gated {
    pub gates: Vec<Gate>,
    pub value: String,
}

impl Gated {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            gates: Vec::new(),
            value: value.into(),
        }
    }

    pub fn when(mut self, gate: Gate) -> Self {
        self.gates.push(gate);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceToggle {
    namespace: String,
    whitespace: Whitespace,
}

impl SpaceToggle {
    pub fn new(namespace: impl Into<String>, whitespace: Whitespace) -> Self {
        Self {
            namespace: namespace.into(),
            whitespace,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn whitespace(&self) -> Whitespace {
        self.whitespace
    }

    pub fn to_namespaced(&self, name: &str) -> String {
        format!("--{}-{}", self.namespace, name)
    }

    pub fn to_var(&self, name: &str) -> String {
        format!("var({})", self.to_namespaced(name))
    }

    pub fn to_or<S: AsRef<str>>(&self, names: &[S]) -> String {
        names
            .iter()
            .rev()
            .fold(None, |inner: Option<String>, name| {
                let namespaced = self.to_namespaced(name.as_ref());
                Some(match inner {
                    Some(fallback) => format!("var({}, {})", namespaced, fallback),
                    None => format!("var({})", namespaced),
                })
            })
            .unwrap_or_default()
    }

    pub fn to_and<S: AsRef<str>>(&self, names: &[S]) -> String {
        names
            .iter()
            .map(|name| self.to_var(name.as_ref()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_value<S: AsRef<str>>(parts: &[S]) -> String {
        parts
            .iter()
            .map(|part| part.as_ref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_condition(&self, name: &str, is_true: bool) -> Declarations {
        let (active, inactive) = if is_true {
            (self.whitespace.as_str(), INITIAL)
        } else {
            (INITIAL, self.whitespace.as_str())
        };

        Declarations::new()
            .with(self.to_namespaced(name), active)
            .with(self.to_namespaced(&format!("{}{}", NOT_PREFIX, name)), inactive)
    }

    pub fn condition(&self, condition: Condition, is_true: bool) -> Declarations {
        self.to_condition(condition.name(), is_true)
    }

    /// Publish a whole family of mutually exclusive conditions, with
    /// `active` true and every other member false.
    pub fn exclusive(&self, family: &[Condition], active: &[Condition]) -> Declarations {
        let mut declarations = Declarations::new();
        for condition in family {
            declarations.extend(self.condition(*condition, active.contains(condition)));
        }
        declarations
    }

    pub fn gate(&self, gate: &Gate) -> String {
        match gate {
            Gate::Or(flags) => self.to_or(&flag_names(flags)),
            Gate::And(flags) => self.to_and(&flag_names(flags)),
        }
    }

    pub fn gated(&self, gated: &Gated) -> String {
        let mut parts: Vec<String> = gated.gates.iter().map(|gate| self.gate(gate)).collect();
        parts.push(gated.value.clone());
        Self::to_value(&parts)
    }
}

fn flag_names(flags: &[Flag]) -> Vec<String> {
    flags.iter().map(Flag::name).collect()
}
