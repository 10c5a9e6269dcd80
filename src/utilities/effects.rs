//! `ring-sh` and `transition-sh` shorthands
//!
//! Each shorthand writes whichever longhand custom properties its token
//! carries, then sets the real properties from a fixed formula over those
//! custom properties. Fields a token leaves out fall through to the base
//! defaults registered on every element.

use super::Context;
use crate::core::{
    BASE_SELECTOR, CORE_PLUGIN_RING_OPACITY, DEFAULT_KEY, DEFAULT_RING_COLOR, DEFAULT_RING_WIDTH,
    DEFAULT_TRANSITION_DURATION, DEFAULT_TRANSITION_PROPERTY, DEFAULT_TRANSITION_TIMING_FUNCTION,
};
use crate::host::{theme_string, theme_table, Host};
use crate::shorthand::{ring_table, transition_table, RingShorthand, Shorthand, TransitionShorthand};
use crate::space_toggle::SpaceToggle;
use crate::types::{Declarations, MatchUtility, ValueType};

fn theme_default(host: &dyn Host, section: &str, fallback: &str) -> String {
    theme_string(host, &format!("{}.{}", section, DEFAULT_KEY)).unwrap_or_else(|| fallback.to_string())
}

/// `color` at `opacity`, e.g. `0.5` → 50% of the color mixed over transparent.
pub fn with_opacity(color: &str, opacity: &str) -> String {
    format!("color-mix(in srgb, {} calc({} * 100%), transparent)", color, opacity)
}

pub fn ring(
    toggle: &SpaceToggle,
    token: &str,
    opacity: Option<&str>,
    default_color: &str,
) -> Declarations {
    let ring = RingShorthand::decode(token);
    let mut declarations = Declarations::new();

    if let Some(inset) = &ring.inset {
        declarations.insert(toggle.to_namespaced("ring-inset"), inset.as_str());
    }
    if let Some(width) = &ring.width {
        declarations.insert(toggle.to_namespaced("ring-width"), width.as_str());
    }

    let opacity = opacity.filter(|opacity| !opacity.is_empty());
    match (&ring.color, opacity) {
        (Some(color), Some(opacity)) => {
            declarations.insert(toggle.to_namespaced("ring-color"), with_opacity(color, opacity))
        }
        (Some(color), None) => declarations.insert(toggle.to_namespaced("ring-color"), color.as_str()),
        (None, Some(opacity)) => declarations.insert(
            toggle.to_namespaced("ring-color"),
            with_opacity(default_color, opacity),
        ),
        (None, None) => {}
    }

    declarations.insert(
        "box-shadow",
        format!(
            "{} 0 0 0 {} {}",
            toggle.to_var("ring-inset"),
            toggle.to_var("ring-width"),
            toggle.to_var("ring-color")
        ),
    );
    declarations
}

pub fn register_ring(ctx: &Context, host: &mut dyn Host) {
    let default_width = theme_default(host, "ringWidth", DEFAULT_RING_WIDTH);
    let default_color = theme_default(host, "ringColor", DEFAULT_RING_COLOR);

    let base = Declarations::new()
        .with(ctx.toggle.to_namespaced("ring-inset"), ctx.toggle.whitespace().as_str())
        .with(ctx.toggle.to_namespaced("ring-width"), default_width)
        .with(ctx.toggle.to_namespaced("ring-color"), default_color.clone());
    host.add_base(Declarations::new().with_block(BASE_SELECTOR, base));

    let mut colors = theme_table(host, "ringColor");
    if colors.is_empty() {
        colors = theme_table(host, "colors");
    }
    let values = ring_table(&theme_table(host, "ringWidth"), &colors);
    log::debug!("registering 'ring-sh' with {} values", values.len());

    let toggle = ctx.toggle.clone();
    let mut utility = MatchUtility::new("ring-sh", move |token, opacity| {
        ring(&toggle, token, opacity, &default_color)
    })
    .with_values(values)
    .with_type(ValueType::Any);

    if host.core_plugin_enabled(CORE_PLUGIN_RING_OPACITY) {
        let mut opacities = theme_table(host, "ringOpacity");
        if opacities.is_empty() {
            opacities = theme_table(host, "opacity");
        }
        utility = utility.with_modifiers(opacities);
    } else {
        log::debug!("'{}' disabled, ring-sh takes no opacity modifier", CORE_PLUGIN_RING_OPACITY);
    }

    host.match_utilities(utility);
}

pub fn transition(toggle: &SpaceToggle, token: &str, timing: Option<&str>) -> Declarations {
    let transition = TransitionShorthand::decode(token);
    let mut declarations = Declarations::new();

    if let Some(property) = &transition.property {
        declarations.insert(toggle.to_namespaced("transition-property"), property.as_str());
    }
    if let Some(duration) = &transition.duration {
        declarations.insert(toggle.to_namespaced("transition-duration"), duration.as_str());
    }
    // A modifier outranks whatever timing the token carried.
    let timing = timing
        .filter(|timing| !timing.is_empty())
        .or(transition.timing.as_deref());
    if let Some(timing) = timing {
        declarations.insert(toggle.to_namespaced("transition-timing"), timing);
    }

    declarations.insert("transition-property", toggle.to_var("transition-property"));
    declarations.insert("transition-duration", toggle.to_var("transition-duration"));
    declarations.insert("transition-timing-function", toggle.to_var("transition-timing"));
    declarations
}

pub fn register_transition(ctx: &Context, host: &mut dyn Host) {
    let base = Declarations::new()
        .with(
            ctx.toggle.to_namespaced("transition-property"),
            theme_default(host, "transitionProperty", DEFAULT_TRANSITION_PROPERTY),
        )
        .with(
            ctx.toggle.to_namespaced("transition-duration"),
            theme_default(host, "transitionDuration", DEFAULT_TRANSITION_DURATION),
        )
        .with(
            ctx.toggle.to_namespaced("transition-timing"),
            theme_default(
                host,
                "transitionTimingFunction",
                DEFAULT_TRANSITION_TIMING_FUNCTION,
            ),
        );
    host.add_base(Declarations::new().with_block(BASE_SELECTOR, base));

    let values = transition_table(
        &theme_table(host, "transitionProperty"),
        &theme_table(host, "transitionDuration"),
    );
    let timings = theme_table(host, "transitionTimingFunction");
    log::debug!(
        "registering 'transition-sh' with {} values and {} timing functions",
        values.len(),
        timings.len()
    );

    let toggle = ctx.toggle.clone();
    let utility = MatchUtility::new("transition-sh", move |token, timing| {
        transition(&toggle, token, timing)
    })
    .with_values(values)
    .with_modifiers(timings)
    .with_type(ValueType::Any);

    host.match_utilities(utility);
}
