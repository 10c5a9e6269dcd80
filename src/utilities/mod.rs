// FILE: src/utilities/mod.rs

// Declaration synthesis, one module per utility category. Every `register_*`
// function reads what it needs from the host, then hands rules back through
// `add_utilities` / `match_utilities` / `add_base`.

pub mod alignment;
pub mod effects;
pub mod layout;
pub mod sizing;

use crate::selectors::LayoutSelectors;
use crate::space_toggle::SpaceToggle;
use crate::utils::Apply;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Utility categories that can be switched on or off with `only` / `except`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Utility {
    Center,
    Corner,
    Edge,
    Dimension,
    Stretch,
    #[serde(alias = "gap modifiers")]
    Layout,
    Position,
    Ring,
    Transition,
}

impl Utility {
    pub const ALL: [Utility; 9] = [
        Utility::Center,
        Utility::Corner,
        Utility::Edge,
        Utility::Dimension,
        Utility::Stretch,
        Utility::Layout,
        Utility::Position,
        Utility::Ring,
        Utility::Transition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Utility::Center => "center",
            Utility::Corner => "corner",
            Utility::Edge => "edge",
            Utility::Dimension => "dimension",
            Utility::Stretch => "stretch",
            Utility::Layout => "layout",
            Utility::Position => "position",
            Utility::Ring => "ring",
            Utility::Transition => "transition",
        }
    }
}

impl fmt::Display for Utility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a category needs at registration time, built once per
/// `Plugin::register` call.
#[derive(Debug, Clone)]
pub struct Context {
    pub toggle: SpaceToggle,
    pub selectors: LayoutSelectors,
    pub apply: Apply,
    pub max_grid_template: u32,
}
