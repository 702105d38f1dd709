use crate::WorkflowError;
use serde::{Deserialize, Serialize};

pub const MIN_DOCUMENTS: usize = 3;
pub const MAX_DOCUMENTS: usize = 10;

/// Checks a document count against the [3, 10] window shared by batch
/// uploads and persona queries.
pub fn check_document_count(count: usize) -> Result<(), WorkflowError> {
    if (MIN_DOCUMENTS..=MAX_DOCUMENTS).contains(&count) {
        Ok(())
    } else {
        Err(WorkflowError::SelectionOutOfBounds {
            count,
            min: MIN_DOCUMENTS,
            max: MAX_DOCUMENTS,
        })
    }
}

/// Documents picked for a persona query, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSelection {
    names: Vec<String>,
}

impl DocumentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|selected| selected == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn select(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn deselect(&mut self, name: &str) {
        self.names.retain(|selected| selected != name);
    }

    pub fn toggle(&mut self, name: &str) {
        if self.contains(name) {
            self.deselect(name);
        } else {
            self.select(name);
        }
    }

    /// True when every known document is selected.
    pub fn covers(&self, known: &[String]) -> bool {
        self.names.len() == known.len() && known.iter().all(|name| self.contains(name))
    }

    /// Bulk toggle: clears the selection if it already covers `known`,
    /// otherwise replaces it with the full list.
    pub fn toggle_all(&mut self, known: &[String]) {
        if self.covers(known) {
            self.names.clear();
        } else {
            self.names.clear();
            for name in known {
                self.select(name.as_str());
            }
        }
    }

    pub fn bulk_label(&self, known: &[String]) -> &'static str {
        if self.covers(known) {
            "Deselect All"
        } else {
            "Select All"
        }
    }

    pub fn check_bounds(&self) -> Result<(), WorkflowError> {
        check_document_count(self.len())
    }
}
