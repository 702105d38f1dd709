use crate::hierarchy::build_hierarchy;
use crate::models::{HeadingRecord, OutlineDocument, OutlineNode};

pub const EMPTY_OUTLINE_NOTICE: &str =
    "No outline detected. Please ensure headings are extracted with levels (H1/H2/H3).";

/// Advisory for outlines whose records all share one level.
pub const DEGENERATE_OUTLINE_WARNING: &str =
    "All headings are marked as the same level. Please verify heading detection logic.";

/// Outline ready to display.
#[derive(Debug, Clone, PartialEq)]
pub enum OutlineView {
    /// The request succeeded but no headings came back.
    Empty { title: String },
    Tree {
        title: String,
        nodes: Vec<OutlineNode>,
        /// Every record sits at the same level, so level classification is suspect.
        degenerate: bool,
    },
}

impl OutlineView {
    pub fn from_document(document: OutlineDocument) -> Self {
        if document.outline.is_empty() {
            return OutlineView::Empty {
                title: document.title,
            };
        }

        OutlineView::Tree {
            degenerate: is_degenerate(&document.outline),
            nodes: build_hierarchy(&document.outline),
            title: document.title,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            OutlineView::Empty { title } | OutlineView::Tree { title, .. } => title,
        }
    }

    pub fn warning(&self) -> Option<&'static str> {
        match self {
            OutlineView::Tree {
                degenerate: true, ..
            } => Some(DEGENERATE_OUTLINE_WARNING),
            _ => None,
        }
    }
}

/// True when there is at least one record and all of them share a level.
pub fn is_degenerate(records: &[HeadingRecord]) -> bool {
    match records.split_first() {
        Some((first, rest)) => rest.iter().all(|record| record.level == first.level),
        None => false,
    }
}
