// FILE: src/core/constants.rs

// Plugin defaults
pub const DEFAULT_VARIABLE_NAMESPACE: &str = "baleada";
pub const DEFAULT_MAX_GRID_TEMPLATE: u32 = 12;

// Space toggle tokens
pub const WHITESPACE_SPACE: &str = " ";
pub const WHITESPACE_COMMENT: &str = "/**/";
pub const INITIAL: &str = "initial";
pub const NOT_PREFIX: &str = "not-";

// Value tables
pub const DEFAULT_KEY: &str = "DEFAULT";
pub const NONE_KEY: &str = "none";
pub const SHORTHAND_DELIMITER: char = ';';

// Ring shorthand
pub const RING_INSET_KEYWORD: &str = "inset";
pub const DEFAULT_RING_WIDTH: &str = "3px";
pub const DEFAULT_RING_COLOR: &str = "rgb(59 130 246 / 0.5)";

// Transition shorthand
pub const DEFAULT_TRANSITION_PROPERTY: &str = "color, background-color, border-color, text-decoration-color, fill, stroke, opacity, box-shadow, transform, filter, backdrop-filter";
pub const DEFAULT_TRANSITION_DURATION: &str = "150ms";
pub const DEFAULT_TRANSITION_TIMING_FUNCTION: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

// Host core plugins consulted by the generator
pub const CORE_PLUGIN_RING_OPACITY: &str = "ringOpacity";

// Selector used for base custom property defaults
pub const BASE_SELECTOR: &str = "*, ::before, ::after";
