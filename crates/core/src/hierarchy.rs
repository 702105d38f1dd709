//! Reconstruction of a nested outline from the flat heading list the
//! analysis service returns.

use crate::models::{HeadingLevel, HeadingRecord, OutlineNode};

/// Where the currently open H2 lives inside the forest being built.
#[derive(Debug, Clone, Copy)]
enum OpenH2 {
    /// Child `child` of the root node at `root`.
    Nested { root: usize, child: usize },
    /// An orphan H2 promoted to the root list.
    Root(usize),
}

/// Builds a forest from page-ordered heading records in one pass.
///
/// An H1 opens a new root and closes any open H2. An H2 nests under the open
/// H1, or becomes a root when no H1 is open. An H3 nests under the open H2,
/// or becomes a root otherwise; it never attaches directly to an open H1.
pub fn build_hierarchy(records: &[HeadingRecord]) -> Vec<OutlineNode> {
    let mut forest: Vec<OutlineNode> = Vec::new();
    let mut current_h1: Option<usize> = None;
    let mut current_h2: Option<OpenH2> = None;

    for record in records {
        match record.level {
            HeadingLevel::H1 => {
                forest.push(OutlineNode::leaf(record.clone()));
                current_h1 = Some(forest.len() - 1);
                current_h2 = None;
            }
            HeadingLevel::H2 => match current_h1 {
                Some(root) => {
                    let children = &mut forest[root].children;
                    children.push(OutlineNode::leaf(record.clone()));
                    current_h2 = Some(OpenH2::Nested {
                        root,
                        child: children.len() - 1,
                    });
                }
                None => {
                    forest.push(OutlineNode::leaf(record.clone()));
                    current_h2 = Some(OpenH2::Root(forest.len() - 1));
                }
            },
            HeadingLevel::H3 => {
                let leaf = OutlineNode::leaf(record.clone());
                match current_h2 {
                    Some(OpenH2::Nested { root, child }) => {
                        forest[root].children[child].children.push(leaf)
                    }
                    Some(OpenH2::Root(index)) => forest[index].children.push(leaf),
                    None => forest.push(leaf),
                }
            }
        }
    }

    forest
}

/// Pre-order traversal of a forest back into a flat record list.
pub fn flatten(forest: &[OutlineNode]) -> Vec<&HeadingRecord> {
    let mut records = Vec::new();
    let mut stack: Vec<&OutlineNode> = forest.iter().rev().collect();

    while let Some(node) = stack.pop() {
        records.push(&node.record);
        stack.extend(node.children.iter().rev());
    }

    records
}

/// Total number of nodes in a forest, at every depth.
pub fn node_count(forest: &[OutlineNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + node_count(&node.children))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use HeadingLevel::{H1, H2, H3};

    fn heading(level: HeadingLevel, text: &str, page: u32) -> HeadingRecord {
        HeadingRecord::new(level, text, page)
    }

    fn titles(nodes: &[OutlineNode]) -> Vec<&str> {
        nodes.iter().map(|node| node.record.text.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        assert!(build_hierarchy(&[]).is_empty());
    }

    #[test]
    fn all_h1_input_stays_flat() {
        let records = vec![heading(H1, "A", 1), heading(H1, "B", 2), heading(H1, "C", 3)];
        let forest = build_hierarchy(&records);

        assert_eq!(titles(&forest), vec!["A", "B", "C"]);
        assert!(forest.iter().all(|node| node.children.is_empty()));
    }

    #[test]
    fn nests_three_levels_under_open_scopes() {
        let records = vec![
            heading(H1, "A", 1),
            heading(H2, "A.1", 1),
            heading(H3, "A.1.a", 2),
            heading(H1, "B", 3),
        ];
        let forest = build_hierarchy(&records);

        assert_eq!(titles(&forest), vec!["A", "B"]);
        assert_eq!(titles(&forest[0].children), vec!["A.1"]);
        assert_eq!(titles(&forest[0].children[0].children), vec!["A.1.a"]);
        assert!(forest[0].children[0].children[0].children.is_empty());
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn lone_h3_is_promoted_to_root() {
        let forest = build_hierarchy(&[heading(H3, "orphan", 1)]);

        assert_eq!(titles(&forest), vec!["orphan"]);
        assert!(forest[0].children.is_empty());
    }

    #[test]
    fn orphan_h2_keeps_its_h3_and_later_h1_stays_separate() {
        let records = vec![heading(H2, "X", 1), heading(H3, "X.a", 1), heading(H1, "Y", 2)];
        let forest = build_hierarchy(&records);

        assert_eq!(titles(&forest), vec!["X", "Y"]);
        assert_eq!(titles(&forest[0].children), vec!["X.a"]);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn h3_under_open_h1_without_h2_becomes_root() {
        let records = vec![heading(H1, "A", 1), heading(H3, "stray", 1), heading(H2, "A.1", 2)];
        let forest = build_hierarchy(&records);

        assert_eq!(titles(&forest), vec!["A", "stray"]);
        assert_eq!(titles(&forest[0].children), vec!["A.1"]);
    }

    #[test]
    fn new_h1_closes_open_h2_scope() {
        let records = vec![
            heading(H1, "A", 1),
            heading(H2, "A.1", 1),
            heading(H1, "B", 2),
            heading(H3, "after-B", 2),
        ];
        let forest = build_hierarchy(&records);

        assert_eq!(titles(&forest), vec!["A", "B", "after-B"]);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn flattening_restores_input_order() {
        let records = vec![
            heading(H1, "A", 1),
            heading(H2, "A.1", 1),
            heading(H3, "A.1.a", 2),
            heading(H3, "A.1.b", 2),
            heading(H2, "A.2", 3),
            heading(H1, "B", 4),
            heading(H2, "B.1", 5),
        ];
        let forest = build_hierarchy(&records);

        let flattened: Vec<HeadingRecord> = flatten(&forest).into_iter().cloned().collect();
        assert_eq!(flattened, records);
        assert_eq!(node_count(&forest), records.len());
    }
}
