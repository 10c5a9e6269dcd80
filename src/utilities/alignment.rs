//! Center, corner and edge utilities
//!
//! Child-applied utilities (`center`, `corner-t-r`, `edge-b`) align an element
//! inside its parent. They match the parent's layout classes through
//! selector sets and, when the element itself is positioned, fall back to
//! offsets plus a translate gated on the element's position toggles.
//!
//! Parent-applied utilities (`center-all`, `corner-all-t-r`, `edge-all-b`)
//! align every child of a container. The container publishes its own layout
//! toggles, so each property is a gated value chosen by condition variables.

use super::Context;
use crate::host::Host;
use crate::selectors::Parent;
use crate::space_toggle::{Condition, Flag, Gate, Gated, Position};
use crate::types::Declarations;

type Pairs = &'static [(&'static str, &'static str)];

/// A utility that aligns the element it is applied to.
pub struct ChildAlignment {
    pub name: &'static str,
    pub parents: &'static [(Parent, Pairs)],
    pub offsets: Pairs,
    pub translate: Option<&'static str>,
}

/// A utility that aligns the children of the container it is applied to.
pub struct ParentAlignment {
    pub name: &'static str,
    pub containers: &'static [(Condition, Pairs)],
}

pub const CENTER: &[ChildAlignment] = &[
    ChildAlignment {
        name: "center",
        parents: &[
            (Parent::FlexRow, &[("align-self", "center"), ("margin-left", "auto"), ("margin-right", "auto")]),
            (Parent::FlexCol, &[("align-self", "center"), ("margin-top", "auto"), ("margin-bottom", "auto")]),
            (Parent::Grid, &[("place-self", "center")]),
        ],
        offsets: &[("top", "50%"), ("left", "50%")],
        translate: Some("-50% -50%"),
    },
    ChildAlignment {
        name: "center-x",
        parents: &[
            (Parent::FlexRow, &[("margin-left", "auto"), ("margin-right", "auto")]),
            (Parent::FlexCol, &[("align-self", "center")]),
            (Parent::Grid, &[("justify-self", "center")]),
        ],
        offsets: &[("left", "50%")],
        translate: Some("-50% 0"),
    },
    ChildAlignment {
        name: "center-y",
        parents: &[
            (Parent::FlexRow, &[("align-self", "center")]),
            (Parent::FlexCol, &[("margin-top", "auto"), ("margin-bottom", "auto")]),
            (Parent::Grid, &[("align-self", "center")]),
        ],
        offsets: &[("top", "50%")],
        translate: Some("0 -50%"),
    },
];

pub const CENTER_ALL: &[ParentAlignment] = &[
    ParentAlignment {
        name: "center-all",
        containers: &[
            (Condition::Flex, &[("align-items", "center"), ("justify-content", "center")]),
            (Condition::Grid, &[("align-items", "center"), ("justify-items", "center")]),
        ],
    },
    ParentAlignment {
        name: "center-all-x",
        containers: &[
            (Condition::FlexRow, &[("justify-content", "center")]),
            (Condition::FlexCol, &[("align-items", "center")]),
            (Condition::Grid, &[("justify-items", "center")]),
        ],
    },
    ParentAlignment {
        name: "center-all-y",
        containers: &[
            (Condition::FlexRow, &[("align-items", "center")]),
            (Condition::FlexCol, &[("justify-content", "center")]),
            (Condition::Grid, &[("align-items", "center")]),
        ],
    },
];

pub const CORNER: &[ChildAlignment] = &[
    ChildAlignment {
        name: "corner-t-l",
        parents: &[
            (Parent::Flex, &[("align-self", "flex-start")]),
            (Parent::Grid, &[("place-self", "start")]),
        ],
        offsets: &[("top", "0"), ("left", "0")],
        translate: None,
    },
    ChildAlignment {
        name: "corner-t-r",
        parents: &[
            (Parent::FlexRow, &[("align-self", "flex-start"), ("margin-left", "auto")]),
            (Parent::FlexCol, &[("align-self", "flex-end")]),
            (Parent::Grid, &[("align-self", "start"), ("justify-self", "end")]),
        ],
        offsets: &[("top", "0"), ("right", "0")],
        translate: None,
    },
    ChildAlignment {
        name: "corner-b-r",
        parents: &[
            (Parent::FlexRow, &[("align-self", "flex-end"), ("margin-left", "auto")]),
            (Parent::FlexCol, &[("align-self", "flex-end"), ("margin-top", "auto")]),
            (Parent::Grid, &[("place-self", "end")]),
        ],
        offsets: &[("bottom", "0"), ("right", "0")],
        translate: None,
    },
    ChildAlignment {
        name: "corner-b-l",
        parents: &[
            (Parent::FlexRow, &[("align-self", "flex-end")]),
            (Parent::FlexCol, &[("align-self", "flex-start"), ("margin-top", "auto")]),
            (Parent::Grid, &[("align-self", "end"), ("justify-self", "start")]),
        ],
        offsets: &[("bottom", "0"), ("left", "0")],
        translate: None,
    },
];

pub const CORNER_ALL: &[ParentAlignment] = &[
    ParentAlignment {
        name: "corner-all-t-l",
        containers: &[
            (Condition::Flex, &[("align-items", "flex-start"), ("justify-content", "flex-start")]),
            (Condition::Grid, &[("align-items", "start"), ("justify-items", "start")]),
        ],
    },
    ParentAlignment {
        name: "corner-all-t-r",
        containers: &[
            (Condition::FlexRow, &[("align-items", "flex-start"), ("justify-content", "flex-end")]),
            (Condition::FlexCol, &[("align-items", "flex-end"), ("justify-content", "flex-start")]),
            (Condition::Grid, &[("align-items", "start"), ("justify-items", "end")]),
        ],
    },
    ParentAlignment {
        name: "corner-all-b-r",
        containers: &[
            (Condition::Flex, &[("align-items", "flex-end"), ("justify-content", "flex-end")]),
            (Condition::Grid, &[("align-items", "end"), ("justify-items", "end")]),
        ],
    },
    ParentAlignment {
        name: "corner-all-b-l",
        containers: &[
            (Condition::FlexRow, &[("align-items", "flex-end"), ("justify-content", "flex-start")]),
            (Condition::FlexCol, &[("align-items", "flex-start"), ("justify-content", "flex-end")]),
            (Condition::Grid, &[("align-items", "end"), ("justify-items", "start")]),
        ],
    },
];

pub const EDGE: &[ChildAlignment] = &[
    ChildAlignment {
        name: "edge-t",
        parents: &[
            (Parent::FlexRow, &[("align-self", "flex-start"), ("margin-left", "auto"), ("margin-right", "auto")]),
            (Parent::FlexCol, &[("align-self", "center")]),
            (Parent::Grid, &[("align-self", "start"), ("justify-self", "center")]),
        ],
        offsets: &[("top", "0"), ("left", "50%")],
        translate: Some("-50% 0"),
    },
    ChildAlignment {
        name: "edge-r",
        parents: &[
            (Parent::FlexRow, &[("align-self", "center"), ("margin-left", "auto")]),
            (Parent::FlexCol, &[("align-self", "flex-end"), ("margin-top", "auto"), ("margin-bottom", "auto")]),
            (Parent::Grid, &[("align-self", "center"), ("justify-self", "end")]),
        ],
        offsets: &[("top", "50%"), ("right", "0")],
        translate: Some("0 -50%"),
    },
    ChildAlignment {
        name: "edge-b",
        parents: &[
            (Parent::FlexRow, &[("align-self", "flex-end"), ("margin-left", "auto"), ("margin-right", "auto")]),
            (Parent::FlexCol, &[("align-self", "center"), ("margin-top", "auto")]),
            (Parent::Grid, &[("align-self", "end"), ("justify-self", "center")]),
        ],
        offsets: &[("bottom", "0"), ("left", "50%")],
        translate: Some("-50% 0"),
    },
    ChildAlignment {
        name: "edge-l",
        parents: &[
            (Parent::FlexRow, &[("align-self", "center")]),
            (Parent::FlexCol, &[("align-self", "flex-start"), ("margin-top", "auto"), ("margin-bottom", "auto")]),
            (Parent::Grid, &[("align-self", "center"), ("justify-self", "start")]),
        ],
        offsets: &[("top", "50%"), ("left", "0")],
        translate: Some("0 -50%"),
    },
];

pub const EDGE_ALL: &[ParentAlignment] = &[
    ParentAlignment {
        name: "edge-all-t",
        containers: &[
            (Condition::FlexRow, &[("align-items", "flex-start"), ("justify-content", "center")]),
            (Condition::FlexCol, &[("align-items", "center"), ("justify-content", "flex-start")]),
            (Condition::Grid, &[("align-items", "start"), ("justify-items", "center")]),
        ],
    },
    ParentAlignment {
        name: "edge-all-r",
        containers: &[
            (Condition::FlexRow, &[("align-items", "center"), ("justify-content", "flex-end")]),
            (Condition::FlexCol, &[("align-items", "flex-end"), ("justify-content", "center")]),
            (Condition::Grid, &[("align-items", "center"), ("justify-items", "end")]),
        ],
    },
    ParentAlignment {
        name: "edge-all-b",
        containers: &[
            (Condition::FlexRow, &[("align-items", "flex-end"), ("justify-content", "center")]),
            (Condition::FlexCol, &[("align-items", "center"), ("justify-content", "flex-end")]),
            (Condition::Grid, &[("align-items", "end"), ("justify-items", "center")]),
        ],
    },
    ParentAlignment {
        name: "edge-all-l",
        containers: &[
            (Condition::FlexRow, &[("align-items", "center"), ("justify-content", "flex-start")]),
            (Condition::FlexCol, &[("align-items", "flex-start"), ("justify-content", "center")]),
            (Condition::Grid, &[("align-items", "center"), ("justify-items", "start")]),
        ],
    },
];

pub fn register_center(ctx: &Context, host: &mut dyn Host) {
    register(ctx, host, CENTER, CENTER_ALL);
}

pub fn register_corner(ctx: &Context, host: &mut dyn Host) {
    register(ctx, host, CORNER, CORNER_ALL);
}

pub fn register_edge(ctx: &Context, host: &mut dyn Host) {
    register(ctx, host, EDGE, EDGE_ALL);
}

fn register(
    ctx: &Context,
    host: &mut dyn Host,
    children: &[ChildAlignment],
    parents: &[ParentAlignment],
) {
    let mut rules = Declarations::new();

    for utility in children {
        rules.nest(format!(".{}", utility.name), child_declarations(ctx, utility));
    }
    for utility in parents {
        rules.nest(format!(".{}", utility.name), parent_declarations(ctx, utility));
    }

    log::debug!("registered {} alignment utilities", rules.len());
    host.add_utilities(rules);
}

/// Offsets only apply while the element isn't overridden back into flow.
fn in_flow_guard() -> Gate {
    Gate::And(vec![
        Condition::Position(Position::Static).not(),
        Condition::Position(Position::Relative).not(),
    ])
}

fn out_of_flow() -> Gate {
    Gate::Or(
        Position::ALL
            .into_iter()
            .filter(Position::is_out_of_flow)
            .map(|position| Condition::Position(position).is())
            .collect(),
    )
}

pub fn child_declarations(ctx: &Context, utility: &ChildAlignment) -> Declarations {
    let mut declarations = Declarations::new();

    for (parent, pairs) in utility.parents {
        declarations.nest(
            ctx.selectors.parent(*parent).on_child(),
            pairs.iter().copied().collect(),
        );
    }

    let mut positioned = Declarations::new();
    for (property, value) in utility.offsets {
        positioned.insert(
            *property,
            ctx.toggle.gated(&Gated::new(*value).when(in_flow_guard())),
        );
    }
    if let Some(translate) = utility.translate {
        positioned.insert(
            "translate",
            ctx.toggle
                .gated(&Gated::new(translate).when(out_of_flow()).when(in_flow_guard())),
        );
    }
    declarations.nest(ctx.selectors.positioned.on_self(), positioned);

    declarations
}

/// Group each property's values by container, keeping first-seen order, so
/// containers that agree on a value share one OR-gated branch.
fn branches(utility: &ParentAlignment) -> Vec<(&'static str, Vec<(&'static str, Vec<Flag>)>)> {
    let mut properties: Vec<(&'static str, Vec<(&'static str, Vec<Flag>)>)> = Vec::new();

    for (condition, pairs) in utility.containers {
        for (property, value) in pairs.iter() {
            let index = match properties.iter().position(|(existing, _)| existing == property) {
                Some(index) => index,
                None => {
                    properties.push((*property, Vec::new()));
                    properties.len() - 1
                }
            };

            let values = &mut properties[index].1;
            match values.iter_mut().find(|(existing, _)| existing == value) {
                Some((_, flags)) => flags.push(condition.is()),
                None => values.push((*value, vec![condition.is()])),
            }
        }
    }

    properties
}

pub fn parent_declarations(ctx: &Context, utility: &ParentAlignment) -> Declarations {
    let mut declarations = Declarations::new();

    for (property, values) in branches(utility) {
        if let [(value, flags)] = values.as_slice() {
            declarations.insert(
                property,
                ctx.toggle.gated(&Gated::new(*value).when(Gate::Or(flags.clone()))),
            );
            continue;
        }

        // Containers disagree: stage each branch in its own custom property,
        // then pick the first branch that survived.
        let mut staged = Vec::with_capacity(values.len());
        for (index, (value, flags)) in values.iter().enumerate() {
            let name = format!("{}-{}-{}", utility.name, property, index);
            declarations.insert(
                ctx.toggle.to_namespaced(&name),
                ctx.toggle.gated(&Gated::new(*value).when(Gate::Or(flags.clone()))),
            );
            staged.push(name);
        }
        declarations.insert(property, ctx.toggle.to_or(&staged));
    }

    declarations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::testing::{context, RecordingHost};

    fn positioned_selector(ctx: &Context) -> String {
        ctx.selectors.positioned.on_self()
    }

    #[test]
    fn test_center_declarations() {
        let ctx = context();
        let declarations = child_declarations(&ctx, &CENTER[0]);

        let flex_row = declarations
            .block(&ctx.selectors.flex_row.on_child())
            .unwrap();
        assert_eq!(flex_row.value("margin-left"), Some("auto"));
        assert_eq!(flex_row.value("align-self"), Some("center"));

        let grid = declarations.block(&ctx.selectors.grid.on_child()).unwrap();
        assert_eq!(grid.value("place-self"), Some("center"));

        let positioned = declarations.block(&positioned_selector(&ctx)).unwrap();
        assert_eq!(
            positioned.value("top"),
            Some("var(--baleada-not-static) var(--baleada-not-relative) 50%")
        );
        assert_eq!(
            positioned.value("translate"),
            Some("var(--baleada-absolute, var(--baleada-fixed, var(--baleada-sticky))) var(--baleada-not-static) var(--baleada-not-relative) -50% -50%")
        );
    }

    #[test]
    fn test_corner_has_no_translate() {
        let ctx = context();
        let declarations = child_declarations(&ctx, &CORNER[0]);
        let positioned = declarations.block(&positioned_selector(&ctx)).unwrap();

        assert!(positioned.value("translate").is_none());
        assert!(positioned.value("left").unwrap().ends_with(" 0"));
        assert!(declarations.block(&ctx.selectors.flex.on_child()).is_some());
    }

    #[test]
    fn test_shared_value_is_single_or_branch() {
        let ctx = context();
        let declarations = parent_declarations(&ctx, &CENTER_ALL[0]);

        assert_eq!(
            declarations.value("align-items"),
            Some("var(--baleada-flex, var(--baleada-grid)) center")
        );
        assert_eq!(declarations.value("justify-content"), Some("var(--baleada-flex) center"));
        assert_eq!(declarations.value("justify-items"), Some("var(--baleada-grid) center"));
        assert_eq!(declarations.len(), 3);
    }

    #[test]
    fn test_grouping_preserves_priority_order() {
        let ctx = context();
        let declarations = parent_declarations(&ctx, &CENTER_ALL[2]);

        assert_eq!(
            declarations.value("align-items"),
            Some("var(--baleada-flex-row, var(--baleada-grid)) center")
        );
        assert_eq!(declarations.value("justify-content"), Some("var(--baleada-flex-col) center"));
    }

    #[test]
    fn test_disagreeing_containers_are_staged() {
        let ctx = context();
        let declarations = parent_declarations(&ctx, &CORNER_ALL[1]);

        assert_eq!(
            declarations.value("--baleada-corner-all-t-r-align-items-0"),
            Some("var(--baleada-flex-row) flex-start")
        );
        assert_eq!(
            declarations.value("--baleada-corner-all-t-r-align-items-1"),
            Some("var(--baleada-flex-col) flex-end")
        );
        assert_eq!(
            declarations.value("--baleada-corner-all-t-r-align-items-2"),
            Some("var(--baleada-grid) start")
        );
        assert_eq!(
            declarations.value("align-items"),
            Some("var(--baleada-corner-all-t-r-align-items-0, var(--baleada-corner-all-t-r-align-items-1, var(--baleada-corner-all-t-r-align-items-2)))")
        );
    }

    #[test]
    fn test_register_center() {
        let ctx = context();
        let mut host = RecordingHost::default();
        register_center(&ctx, &mut host);

        for name in [".center", ".center-x", ".center-y", ".center-all", ".center-all-x", ".center-all-y"] {
            assert!(host.rule(name).is_some(), "missing {}", name);
        }
        assert!(host.rule(".corner-t-l").is_none());
    }

    #[test]
    fn test_every_alignment_is_unique() {
        let mut names: Vec<&str> = CENTER
            .iter()
            .chain(CORNER)
            .chain(EDGE)
            .map(|utility| utility.name)
            .chain(CENTER_ALL.iter().chain(CORNER_ALL).chain(EDGE_ALL).map(|utility| utility.name))
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 22);
    }
}
