//! Grid template tables for the `grid-sh` shorthand

use crate::core::NONE_KEY;
use crate::types::ValueTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    Cols,
    Rows,
}

impl GridKind {
    pub const ALL: [GridKind; 2] = [GridKind::Cols, GridKind::Rows];

    pub fn as_str(&self) -> &'static str {
        match self {
            GridKind::Cols => "cols",
            GridKind::Rows => "rows",
        }
    }

    pub fn property(&self) -> &'static str {
        match self {
            GridKind::Cols => "grid-template-columns",
            GridKind::Rows => "grid-template-rows",
        }
    }

    pub fn from_key(key: &str) -> Option<(GridKind, &str)> {
        Self::ALL.into_iter().find_map(|kind| {
            key.strip_prefix(kind.as_str())
                .and_then(|rest| rest.strip_prefix('-'))
                .map(|rest| (kind, rest))
        })
    }
}

pub fn template(count: u32) -> String {
    format!("repeat({}, minmax(0, 1fr))", count)
}

/// `{kind}-1` through `{kind}-{max}` plus `{kind}-none`.
pub fn generate(kind: GridKind, max: u32) -> ValueTable {
    let mut table: ValueTable = (1..=max)
        .map(|count| (format!("{}-{}", kind.as_str(), count), template(count)))
        .collect();
    table.insert(format!("{}-{}", kind.as_str(), NONE_KEY), NONE_KEY.to_string());
    table
}

/// Resolve a `cols-3` / `rows-none` key to its property and value. Counts
/// past the generated maximum still resolve so bracketed values like
/// `grid-sh-[cols-16]` work.
pub fn resolve(key: &str) -> Option<(GridKind, String)> {
    let (kind, rest) = GridKind::from_key(key.trim())?;
    if rest == NONE_KEY {
        return Some((kind, NONE_KEY.to_string()));
    }

    match rest.parse::<u32>() {
        Ok(count) if count > 0 => Some((kind, template(count))),
        _ => None,
    }
}
