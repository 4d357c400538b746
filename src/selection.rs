// Selection state: the ordered, name-unique set of records being compared.
//
// Insertion order is significant: index i gets palette color i, so the same
// sequence of selections always renders with the same colors.

use std::sync::Arc;

use crate::record::StatRecord;

/// What a `toggle` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Selected,
    Deselected,
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    entries: Vec<Arc<StatRecord>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `record` (keyed by name). A new entry goes to the end.
    pub fn toggle(&mut self, record: Arc<StatRecord>) -> Toggled {
        match self.position(record.name()) {
            Some(idx) => {
                self.entries.remove(idx);
                Toggled::Deselected
            }
            None => {
                self.entries.push(record);
                Toggled::Selected
            }
        }
    }

    /// Remove the entry named `name`. Returns whether anything was removed;
    /// removing an absent name is a no-op.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Current selections in insertion order.
    pub fn all(&self) -> &[Arc<StatRecord>] {
        &self.entries
    }

    /// Index used for palette color assignment.
    pub fn color_index(&self, name: &str) -> Option<usize> {
        self.position(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|r| r.name() == name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
