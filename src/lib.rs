//! Baleada Utilities
//!
//! Layout utilities for a utility-CSS framework whose behavior depends on the
//! other classes sitting on the same element or its parent, resolved entirely
//! at CSS cascade time.
//!
//! # Features
//!
//! - `center`, `corner-*` and `edge-*` utilities that adapt to flex-row,
//!   flex-col, grid and positioned layouts
//! - `*-all` variants that align every child of a container
//! - `d-<width>/<height>` dimensions with viewport and container unit swapping
//! - `stretch-w` / `stretch-h` bounded fills
//! - Gap modifiers (`flex/4`) and a `grid-sh` grid template shorthand
//! - `ring-sh` and `transition-sh` packed shorthands
//!
//! # Basic Usage
//!
//! ```rust
//! use baleada_utilities::{generate_css, PluginOptions, Result};
//!
//! fn main() -> Result<()> {
//!     let css = generate_css(&["flex", "center", "d-64/32"], PluginOptions::default())?;
//!     assert!(css.contains(".center"));
//!     Ok(())
//! }
//! ```
//!
//! # How conditions work
//!
//! Each layout utility publishes a set of "space toggle" custom properties,
//! e.g. `--baleada-flex-row: ;` and `--baleada-not-flex-row: initial;`.
//! Values referencing them through `var()` collapse to nothing when the
//! condition holds and become invalid when it doesn't, so the browser picks
//! the right declaration without any script.

pub mod core;
pub mod error;
pub mod grid_template;
pub mod host;
pub mod plugin;
pub mod selectors;
pub mod shorthand;
pub mod space_toggle;
pub mod stylesheet;
pub mod theme;
pub mod transpose;
pub mod types;
pub mod utilities;
pub mod utils;
pub mod cli;

use serde::{Deserialize, Serialize};

// Re-export commonly used types and functions
pub use error::{Result, UtilitiesError};
pub use grid_template::GridKind;
pub use host::Host;
pub use plugin::Plugin;
pub use selectors::{LayoutSelectors, SelectorSet};
pub use shorthand::{RingShorthand, Shorthand, TransitionShorthand};
pub use space_toggle::{Condition, Gate, Gated, Position, SpaceToggle, Whitespace};
pub use stylesheet::{Rule, Stylesheet};
pub use theme::Theme;
pub use transpose::{to_height, to_width, Axis};
pub use types::{Declarations, MatchUtility, Node, ValueTable, ValueType};
pub use utilities::sizing::{to_dimension_theme, to_stretch_height_theme, to_stretch_width_theme};
pub use utilities::Utility;
pub use utils::Apply;
pub use cli::Cli;

/// Package version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Plugin options, in the camelCase shape the host framework passes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    /// Custom property namespace: `--{namespace}-flex-row`
    pub variable_namespace: String,
    /// Largest `cols-N` / `rows-N` entry in the grid template tables
    pub max_grid_template: u32,
    /// Token written into active condition variables
    pub whitespace: Whitespace,
    pub only: Vec<Utility>,
    pub except: Vec<Utility>,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            variable_namespace: crate::core::DEFAULT_VARIABLE_NAMESPACE.to_string(),
            max_grid_template: crate::core::DEFAULT_MAX_GRID_TEMPLATE,
            whitespace: Whitespace::default(),
            only: Utility::ALL.to_vec(),
            except: Vec::new(),
        }
    }
}

impl PluginOptions {
    pub fn validate(&self) -> Result<()> {
        if !utils::is_valid_identifier(&self.variable_namespace) {
            return Err(UtilitiesError::invalid_option(
                "variableNamespace",
                format!("'{}' is not a CSS identifier", self.variable_namespace),
            ));
        }
        Ok(())
    }
}

/// Register the plugin against a fresh [`Stylesheet`] built from `theme`.
pub fn build_stylesheet(options: PluginOptions, theme: Theme, prefix: &str) -> Result<Stylesheet> {
    options.validate()?;

    let mut stylesheet = Stylesheet::new(theme).with_prefix(prefix);
    Plugin::new(options).register(&mut stylesheet);

    log::debug!(
        "stylesheet ready with {} utility families",
        stylesheet.family_names().len()
    );
    Ok(stylesheet)
}

/// Generate CSS for `candidates` with the default theme and no prefix.
pub fn generate_css(candidates: &[&str], options: PluginOptions) -> Result<String> {
    let stylesheet = build_stylesheet(options, Theme::default(), "")?;
    Ok(stylesheet.to_css(candidates.iter().copied(), false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stylesheet() -> Stylesheet {
        build_stylesheet(PluginOptions::default(), Theme::default(), "").unwrap()
    }

    #[test]
    fn test_flex_publishes_exclusive_toggles() {
        let rule = stylesheet().resolve("flex").unwrap();
        let declarations = &rule.declarations;

        assert_eq!(declarations.value("display"), Some("flex"));
        assert_eq!(declarations.value("--baleada-flex"), Some(" "));
        assert_eq!(declarations.value("--baleada-not-flex"), Some("initial"));
        assert_eq!(declarations.value("--baleada-flex-row"), Some(" "));
        assert_eq!(declarations.value("--baleada-flex-col"), Some("initial"));
        assert_eq!(declarations.value("--baleada-not-flex-col"), Some(" "));
        assert_eq!(declarations.value("--baleada-grid"), Some("initial"));
    }

    #[test]
    fn test_dimension_pass_through() {
        let rule = stylesheet().resolve("d-64/32").unwrap();

        assert_eq!(rule.declarations.value("width"), Some("16rem"));
        assert_eq!(rule.declarations.value("height"), Some("8rem"));
    }

    #[test]
    fn test_apply_collapses_whitespace() {
        let apply = Apply::new("tw-");
        let declarations = apply.apply("w-full  \n  \n\n  h-full\n\n  ");

        assert_eq!(
            serde_json::to_value(&declarations).unwrap(),
            json!({ "@apply tw-w-full tw-h-full": {} })
        );
    }

    #[test]
    fn test_options_from_camel_case() {
        let options: PluginOptions = serde_json::from_value(json!({
            "variableNamespace": "ui",
            "maxGridTemplate": 4,
            "whitespace": "comment",
            "except": ["gap modifiers", "ring"]
        }))
        .unwrap();

        assert_eq!(options.variable_namespace, "ui");
        assert_eq!(options.max_grid_template, 4);
        assert_eq!(options.whitespace, Whitespace::Comment);
        assert_eq!(options.only, Utility::ALL.to_vec());
        assert_eq!(options.except, vec![Utility::Layout, Utility::Ring]);
    }

    #[test]
    fn test_comment_whitespace_and_small_grid() {
        let options = PluginOptions {
            whitespace: Whitespace::Comment,
            max_grid_template: 4,
            ..Default::default()
        };
        let stylesheet = build_stylesheet(options, Theme::default(), "").unwrap();

        let grid = stylesheet.resolve("grid").unwrap();
        assert_eq!(grid.declarations.value("--baleada-grid"), Some("/**/"));
        assert!(!stylesheet.class_names().contains(&"grid-sh-cols-5".to_string()));
        // Counts past the table still resolve as arbitrary values.
        assert!(stylesheet.resolve("grid-sh-[cols-5]").is_some());
    }

    #[test]
    fn test_invalid_namespace_is_rejected() {
        let options = PluginOptions {
            variable_namespace: "has space".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            options.validate(),
            Err(UtilitiesError::InvalidOption { .. })
        ));
        assert!(generate_css(&["center"], options).is_err());
    }

    #[test]
    fn test_generate_css() {
        let css = generate_css(&["center-all", "absolute"], PluginOptions::default()).unwrap();

        assert!(css.contains(".center-all {\n  align-items: var(--baleada-flex, var(--baleada-grid)) center;"));
        assert!(css.contains(".absolute {\n  position: absolute;"));
        assert!(css.contains("@property --baleada-not-absolute"));
    }

    #[test]
    fn test_center_alone_still_centers_positioned() {
        let options = PluginOptions {
            only: vec![Utility::Center],
            ..Default::default()
        };
        let css = generate_css(&["center", "absolute"], options).unwrap();

        assert!(css.contains("top: var(--baleada-not-static) var(--baleada-not-relative) 50%;"));
        assert!(css.contains(".absolute {\n  position: absolute;"));
        assert!(css.contains("--baleada-not-static:  ;"));
    }

    #[test]
    fn test_except_removes_category() {
        let options = PluginOptions {
            except: vec![Utility::Center],
            ..Default::default()
        };
        let stylesheet = build_stylesheet(options, Theme::default(), "").unwrap();

        assert!(stylesheet.resolve("center").is_none());
        assert!(stylesheet.resolve("corner-t-l").is_some());
    }
}
