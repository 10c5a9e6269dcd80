//! Dimension and stretch utilities

use super::Context;
use crate::host::{theme_table, Host};
use crate::transpose::{to_height, to_width};
use crate::types::{Declarations, MatchUtility, ValueTable, ValueType};
use crate::utils::{merge_tables, to_arbitrary};
use serde_json::{json, Value};

/// Wrap a dimension table under its theme key, ready to spread into a
/// theme extension.
pub fn to_dimension_theme(dimension: &ValueTable) -> Value {
    json!({ "dimension": dimension })
}

pub fn to_stretch_width_theme(stretch_width: &ValueTable) -> Value {
    json!({ "stretchWidth": stretch_width })
}

pub fn to_stretch_height_theme(stretch_height: &ValueTable) -> Value {
    json!({ "stretchHeight": stretch_height })
}

/// `d-<value>[/<modifier>]`. The value sizes both axes unless a modifier
/// overrides the height; relative units are swapped onto each axis.
pub fn register_dimension(_ctx: &Context, host: &mut dyn Host) {
    let values = merge_tables(&[
        theme_table(host, "width"),
        theme_table(host, "height"),
        theme_table(host, "dimension"),
    ]);
    log::debug!("registering 'd' with {} values", values.len());

    // Custom `v%` and `cq%` units aren't lengths to the host.
    let utility = MatchUtility::new("d", |value, modifier| dimension(value, modifier))
        .with_values(values.clone())
        .with_modifiers(values)
        .with_type(ValueType::Any);

    host.match_utilities(utility);
}

pub fn dimension(value: &str, modifier: Option<&str>) -> Declarations {
    let height = modifier.filter(|modifier| !modifier.is_empty()).unwrap_or(value);

    Declarations::new()
        .with("width", to_width(value))
        .with("height", to_height(height))
}

pub fn register_stretch(ctx: &Context, host: &mut dyn Host) {
    let axes = [
        ("stretch-w", "w-full", "max-w-", "maxWidth", "stretchWidth"),
        ("stretch-h", "h-full", "max-h-", "maxHeight", "stretchHeight"),
    ];

    for (name, fill, max, core_key, stretch_key) in axes {
        let values = merge_tables(&[theme_table(host, core_key), theme_table(host, stretch_key)]);
        log::debug!("registering '{}' with {} values", name, values.len());

        let apply = ctx.apply.clone();
        let utility = MatchUtility::new(name, move |value, _| {
            apply.apply(&format!("{} {}{}", fill, max, to_arbitrary(value)))
        })
        .with_values(values)
        .with_type(ValueType::Length);

        host.match_utilities(utility);
    }
}
