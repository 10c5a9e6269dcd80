//! Layout containers, grid shorthand and position utilities
//!
//! Every container utility publishes the full set of container conditions,
//! so an element carrying `center-all` (or any other parent-applied utility)
//! can read which layout it ended up with. Position utilities do the same
//! for the five CSS positions.

use super::Context;
use crate::core::{DEFAULT_KEY, NOT_PREFIX};
use crate::grid_template::{self, GridKind};
use crate::host::{theme_table, Host};
use crate::space_toggle::{Condition, Position, SpaceToggle};
use crate::types::{Declarations, MatchUtility, ValueTable, ValueType};
use crate::utils::merge_tables;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Flex,
    FlexRow,
    FlexCol,
    Grid,
}

impl Layout {
    pub const ALL: [Layout; 4] = [Layout::Flex, Layout::FlexRow, Layout::FlexCol, Layout::Grid];

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Flex => "flex",
            Layout::FlexRow => "flex-row",
            Layout::FlexCol => "flex-col",
            Layout::Grid => "grid",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Layout::Flex | Layout::FlexRow | Layout::FlexCol => "flex",
            Layout::Grid => "grid",
        }
    }

    pub fn direction(&self) -> Option<&'static str> {
        match self {
            Layout::FlexRow => Some("row"),
            Layout::FlexCol => Some("column"),
            Layout::Flex | Layout::Grid => None,
        }
    }

    /// Container conditions that hold once this layout applies. A bare
    /// `flex` lays out in a row.
    pub fn active(&self) -> &'static [Condition] {
        match self {
            Layout::Flex | Layout::FlexRow => &[Condition::Flex, Condition::FlexRow],
            Layout::FlexCol => &[Condition::Flex, Condition::FlexCol],
            Layout::Grid => &[Condition::Grid],
        }
    }
}

/// Declarations for a container utility with an optional gap.
pub fn container(toggle: &SpaceToggle, layout: Layout, gap: Option<&str>) -> Declarations {
    let mut declarations = Declarations::new().with("display", layout.display());

    if let Some(direction) = layout.direction() {
        declarations.insert("flex-direction", direction);
    }
    if let Some(gap) = gap.filter(|gap| !gap.is_empty()) {
        declarations.insert("gap", gap);
    }

    declarations.extend(toggle.exclusive(&Condition::CONTAINERS, layout.active()));
    declarations
}

fn gap_modifiers(host: &dyn Host) -> ValueTable {
    merge_tables(&[theme_table(host, "spacing"), theme_table(host, "gap")])
}

pub fn register_layout(ctx: &Context, host: &mut dyn Host) {
    let modifiers = gap_modifiers(host);
    let values: ValueTable = [(DEFAULT_KEY.to_string(), String::new())].into_iter().collect();

    for layout in Layout::ALL {
        let toggle = ctx.toggle.clone();
        let utility = MatchUtility::new(layout.name(), move |_, modifier| {
            container(&toggle, layout, modifier)
        })
        .with_values(values.clone())
        .with_modifiers(modifiers.clone())
        .with_type(ValueType::Length);

        log::debug!("registering '{}' with {} gap modifiers", layout.name(), modifiers.len());
        host.match_utilities(utility);
    }

    register_grid_shorthand(ctx, host, modifiers);
}

/// `grid-sh-cols-3`, `grid-sh-rows-none`, `grid-sh-[cols-16]/4`
fn register_grid_shorthand(ctx: &Context, host: &mut dyn Host, modifiers: ValueTable) {
    let generated: ValueTable = GridKind::ALL
        .into_iter()
        .map(|kind| grid_template::generate(kind, ctx.max_grid_template))
        .fold(ValueTable::new(), |mut merged, table| {
            merged.extend(table);
            merged
        });

    // Keys stand in for their own values so the resolver still knows the kind.
    let values: ValueTable = generated.keys().map(|key| (key.clone(), key.clone())).collect();
    log::debug!("registering 'grid-sh' with {} templates", values.len());

    let toggle = ctx.toggle.clone();
    let utility = MatchUtility::new("grid-sh", move |value, modifier| {
        let mut declarations = container(&toggle, Layout::Grid, modifier);

        let template = GridKind::from_key(value)
            .zip(generated.get(value))
            .map(|((kind, _), template)| (kind, template.clone()))
            .or_else(|| grid_template::resolve(value));

        if let Some((kind, template)) = template {
            declarations.insert(kind.property(), template);
        } else {
            log::debug!("'{}' is not a grid template", value);
        }
        declarations
    })
    .with_values(values)
    .with_modifiers(modifiers)
    .with_type(ValueType::Any);

    host.match_utilities(utility);
}

pub fn position(toggle: &SpaceToggle, position: Position) -> Declarations {
    let family: Vec<Condition> = Position::ALL.into_iter().map(Condition::Position).collect();

    let mut declarations = Declarations::new().with("position", position.as_str());
    declarations.extend(toggle.exclusive(&family, &[Condition::Position(position)]));
    declarations
}

pub fn register_position(ctx: &Context, host: &mut dyn Host) {
    let mut rules = Declarations::new();
    for variant in Position::ALL {
        rules.nest(format!(".{}", variant.as_str()), position(&ctx.toggle, variant));
    }

    log::debug!("registered {} position utilities", rules.len());
    host.add_utilities(rules);
}

/// `@property` rules that stop condition variables from inheriting, so a
/// container's toggles never reach its children.
pub fn register_condition_properties(ctx: &Context, host: &mut dyn Host) {
    let mut rules = Declarations::new();

    for condition in Condition::all() {
        for name in [condition.name().to_string(), format!("{}{}", NOT_PREFIX, condition.name())] {
            rules.nest(
                format!("@property {}", ctx.toggle.to_namespaced(&name)),
                Declarations::new()
                    .with("syntax", "\"*\"")
                    .with("inherits", "false"),
            );
        }
    }

    log::debug!("registered {} condition properties", rules.len());
    host.add_base(rules);
}
