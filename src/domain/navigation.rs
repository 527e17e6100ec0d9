//! Table-of-contents forest derived from document headings.

use serde::Serialize;

/// One node of the navigation forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub label: String,
    /// Fragment link, always `#` followed by the heading id.
    pub url: String,
    pub children: Vec<NavigationEntry>,
}

impl NavigationEntry {
    pub fn new(label: impl Into<String>, anchor: &str) -> Self {
        Self {
            label: label.into(),
            url: format!("#{anchor}"),
            children: Vec::new(),
        }
    }
}

/// Append `entry` at `depth` (1 = top level) below the most recent entries.
///
/// Descent follows the last entry of each level and stops early when a level
/// has no entries yet, so a heading that skips levels attaches to the nearest
/// available ancestor.
pub fn insert_at_depth(forest: &mut Vec<NavigationEntry>, depth: usize, entry: NavigationEntry) {
    let mut current = forest;
    for _ in 1..depth {
        if current.is_empty() {
            break;
        }
        let last = current.len() - 1;
        current = &mut current[last].children;
    }
    current.push(entry);
}

/// Flattened view of a forest with depth information, in document order.
pub fn flatten(forest: &[NavigationEntry]) -> Vec<(usize, &NavigationEntry)> {
    fn walk<'a>(
        entries: &'a [NavigationEntry],
        depth: usize,
        out: &mut Vec<(usize, &'a NavigationEntry)>,
    ) {
        for entry in entries {
            out.push((depth, entry));
            walk(&entry.children, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(forest, 1, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(forest: &[NavigationEntry]) -> Vec<(usize, String)> {
        flatten(forest)
            .into_iter()
            .map(|(depth, entry)| (depth, entry.label.clone()))
            .collect()
    }

    #[test]
    fn entries_nest_under_the_last_shallower_entry() {
        let mut forest = Vec::new();
        insert_at_depth(&mut forest, 1, NavigationEntry::new("Mid", "mid"));
        insert_at_depth(&mut forest, 2, NavigationEntry::new("Inner", "inner"));
        insert_at_depth(&mut forest, 2, NavigationEntry::new("Inner2", "inner2"));
        insert_at_depth(&mut forest, 3, NavigationEntry::new("Nested", "nested"));
        insert_at_depth(&mut forest, 1, NavigationEntry::new("Final", "final"));

        assert_eq!(
            labels(&forest),
            vec![
                (1, "Mid".to_string()),
                (2, "Inner".to_string()),
                (2, "Inner2".to_string()),
                (3, "Nested".to_string()),
                (1, "Final".to_string()),
            ]
        );
        assert_eq!(forest[0].children[1].children[0].url, "#nested");
    }

    #[test]
    fn skipped_levels_attach_to_nearest_ancestor() {
        let mut forest = Vec::new();
        insert_at_depth(&mut forest, 3, NavigationEntry::new("Orphan", "orphan"));
        insert_at_depth(&mut forest, 1, NavigationEntry::new("Top", "top"));
        insert_at_depth(&mut forest, 4, NavigationEntry::new("Deep", "deep"));

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].label, "Orphan");
        assert_eq!(forest[1].children.len(), 1);
        assert_eq!(forest[1].children[0].label, "Deep");
    }

    #[test]
    fn entry_url_is_fragment_link() {
        let entry = NavigationEntry::new("Getting Started", "getting-started");
        assert_eq!(entry.url, "#getting-started");
        assert!(entry.children.is_empty());
    }
}
