//! Axis transposition for relative units
//!
//! `d-50v%` sets both width and height from one value, so relative units are
//! rewritten for the axis they end up on: `50v%` becomes `50vw` as a width and
//! `50vh` as a height. `v%` and `cq%` are shorthand units that only exist in
//! utility values and never reach the stylesheet untransposed.

use regex::{Captures, Regex};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    fn unit_for(&self, unit: &str) -> Option<&'static str> {
        let transposed = match (self, unit) {
            (Axis::Width, "vh") | (Axis::Width, "v%") => "vw",
            (Axis::Width, "dvh") => "dvw",
            (Axis::Width, "svh") => "svw",
            (Axis::Width, "lvh") => "lvw",
            (Axis::Width, "cqh") | (Axis::Width, "cq%") => "cqw",
            (Axis::Height, "vw") | (Axis::Height, "v%") => "vh",
            (Axis::Height, "dvw") => "dvh",
            (Axis::Height, "svw") => "svh",
            (Axis::Height, "lvw") => "lvh",
            (Axis::Height, "cqw") | (Axis::Height, "cq%") => "cqh",
            _ => return None,
        };
        Some(transposed)
    }
}

fn relative_unit_regex() -> &'static Regex {
    static RELATIVE_UNIT: OnceLock<Regex> = OnceLock::new();
    RELATIVE_UNIT.get_or_init(|| {
        Regex::new(r"(\d*\.?\d+)(dvh|dvw|svh|svw|lvh|lvw|cqh|cqw|cq%|vh|vw|v%)")
            .expect("relative unit pattern is valid")
    })
}

pub fn transpose(value: &str, axis: Axis) -> String {
    relative_unit_regex()
        .replace_all(value, |captures: &Captures| {
            let magnitude = &captures[1];
            let unit = &captures[2];
            match axis.unit_for(unit) {
                Some(transposed) => format!("{}{}", magnitude, transposed),
                None => format!("{}{}", magnitude, unit),
            }
        })
        .into_owned()
}

pub fn to_width(value: &str) -> String {
    transpose(value, Axis::Width)
}

pub fn to_height(value: &str) -> String {
    transpose(value, Axis::Height)
}
