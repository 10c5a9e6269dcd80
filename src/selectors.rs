//! Selector sets for layout containers and positioned elements
//!
//! Child-applied utilities (`center`, `corner-t-l`, ...) look at their parent,
//! so they can't read the parent's condition variables once those stop
//! inheriting. They match the parent's classes directly instead, including
//! variant-prefixed (`sm:flex`) and gap-modified (`flex/4`) spellings.

/// How a class name is matched inside a `class` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMatch {
    /// `.absolute`, `sm:absolute`
    Keyword(String),
    /// `.flex`, `sm:flex`, `flex/4`, `sm:flex/4`
    Modifiable(String),
    /// Any class starting with the prefix, e.g. `grid-sh-cols-3`
    Prefix(String),
}

impl ClassMatch {
    fn fragments(&self, prefix: &str) -> Vec<String> {
        match self {
            ClassMatch::Keyword(name) => {
                let class = format!("{}{}", prefix, name);
                vec![
                    format!(".{}", class),
                    format!("[class$=\":{}\"]", class),
                    format!("[class*=\":{} \"]", class),
                ]
            }
            ClassMatch::Modifiable(name) => {
                let class = format!("{}{}", prefix, name);
                let mut fragments = ClassMatch::Keyword(name.clone()).fragments(prefix);
                fragments.extend([
                    format!("[class^=\"{}/\"]", class),
                    format!("[class*=\" {}/\"]", class),
                    format!("[class*=\":{}/\"]", class),
                ]);
                fragments
            }
            ClassMatch::Prefix(name) => {
                let class = format!("{}{}", prefix, name);
                vec![
                    format!("[class^=\"{}\"]", class),
                    format!("[class*=\" {}\"]", class),
                    format!("[class*=\":{}\"]", class),
                ]
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSet {
    fragments: Vec<String>,
    excluded: Vec<String>,
}

impl SelectorSet {
    pub fn new(prefix: &str, matches: &[ClassMatch]) -> Self {
        let mut fragments = Vec::new();
        for class_match in matches {
            for fragment in class_match.fragments(prefix) {
                if !fragments.contains(&fragment) {
                    fragments.push(fragment);
                }
            }
        }

        Self {
            fragments,
            excluded: Vec::new(),
        }
    }

    pub fn excluding(mut self, other: &SelectorSet) -> Self {
        for fragment in &other.fragments {
            if !self.excluded.contains(fragment) {
                self.excluded.push(fragment.clone());
            }
        }
        self
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn to_selector(&self) -> String {
        let included = format!(":is({})", self.fragments.join(", "));
        if self.excluded.is_empty() {
            included
        } else {
            format!("{}:not(:is({}))", included, self.excluded.join(", "))
        }
    }

    /// Nested selector matching the utility element itself.
    pub fn on_self(&self) -> String {
        format!("&:where({})", self.to_selector())
    }

    /// Nested selector matching the utility element as a direct child.
    pub fn on_child(&self) -> String {
        format!("&:where({} > &)", self.to_selector())
    }
}

/// Parent containers a child-applied utility can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Flex,
    FlexRow,
    FlexCol,
    Grid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSelectors {
    pub flex: SelectorSet,
    pub flex_row: SelectorSet,
    pub flex_col: SelectorSet,
    pub grid: SelectorSet,
    pub positioned: SelectorSet,
}

impl LayoutSelectors {
    pub fn new(prefix: &str) -> Self {
        let modifiable = |name: &str| ClassMatch::Modifiable(name.to_string());

        let flex_col = SelectorSet::new(prefix, &[modifiable("flex-col")]);
        let flex_row = SelectorSet::new(prefix, &[modifiable("flex"), modifiable("flex-row")])
            .excluding(&flex_col);
        let flex = SelectorSet::new(
            prefix,
            &[modifiable("flex"), modifiable("flex-row"), modifiable("flex-col")],
        );
        let grid = SelectorSet::new(
            prefix,
            &[modifiable("grid"), ClassMatch::Prefix("grid-sh-".to_string())],
        );
        let positioned = SelectorSet::new(
            prefix,
            &crate::space_toggle::Position::ALL
                .iter()
                .filter(|position| position.is_out_of_flow())
                .map(|position| ClassMatch::Keyword(position.as_str().to_string()))
                .collect::<Vec<_>>(),
        );

        Self {
            flex,
            flex_row,
            flex_col,
            grid,
            positioned,
        }
    }

    pub fn parent(&self, parent: Parent) -> &SelectorSet {
        match parent {
            Parent::Flex => &self.flex,
            Parent::FlexRow => &self.flex_row,
            Parent::FlexCol => &self.flex_col,
            Parent::Grid => &self.grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiable_fragments() {
        let set = SelectorSet::new("", &[ClassMatch::Modifiable("flex".to_string())]);
        assert_eq!(
            set.to_selector(),
            r#":is(.flex, [class$=":flex"], [class*=":flex "], [class^="flex/"], [class*=" flex/"], [class*=":flex/"])"#
        );
    }

    #[test]
    fn test_flex_row_excludes_flex_col() {
        let selectors = LayoutSelectors::new("");
        let selector = selectors.flex_row.to_selector();

        assert!(selector.starts_with(":is(.flex, "));
        assert!(selector.contains(":not(:is(.flex-col, "));
        assert!(selector.contains(".flex-row"));
        assert_eq!(selectors.flex_row.excluded(), selectors.flex_col.fragments());
    }

    #[test]
    fn test_positioned_spans_out_of_flow_positions() {
        let selectors = LayoutSelectors::new("");
        let fragments = selectors.positioned.fragments();

        assert!(fragments.contains(&".absolute".to_string()));
        assert!(fragments.contains(&".fixed".to_string()));
        assert!(fragments.contains(&".sticky".to_string()));
        assert!(fragments.contains(&r#"[class$=":sticky"]"#.to_string()));
        assert!(!fragments.iter().any(|f| f.contains("relative") || f.contains("static")));
    }

    #[test]
    fn test_prefix_applies_to_every_fragment() {
        let selectors = LayoutSelectors::new("tw-");
        assert!(selectors.grid.fragments().contains(&".tw-grid".to_string()));
        assert!(selectors.grid.fragments().contains(&r#"[class^="tw-grid-sh-"]"#.to_string()));
        assert!(selectors.grid.fragments().contains(&r#"[class*=":tw-grid/"]"#.to_string()));
    }

    #[test]
    fn test_nested_forms() {
        let set = SelectorSet::new("", &[ClassMatch::Keyword("grid".to_string())]);
        assert_eq!(
            set.on_child(),
            r#"&:where(:is(.grid, [class$=":grid"], [class*=":grid "]) > &)"#
        );
        assert_eq!(
            set.on_self(),
            r#"&:where(:is(.grid, [class$=":grid"], [class*=":grid "]))"#
        );
    }
}
