//! Selection session: menu-driven symptom picking for one conversation.

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::catalog::SymptomIndex;
use crate::domain::foundation::{ConversationId, ValidationError};

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_MAX_SELECTED: usize = 5;

/// Menu limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    pub page_size: usize,
    pub max_selected: usize,
}

impl SelectionLimits {
    pub fn new(page_size: usize, max_selected: usize) -> Result<Self, ValidationError> {
        if page_size == 0 {
            return Err(ValidationError::out_of_range("page_size", 1, i64::MAX, 0));
        }
        if max_selected == 0 {
            return Err(ValidationError::out_of_range("max_selected", 1, i64::MAX, 0));
        }
        Ok(Self {
            page_size,
            max_selected,
        })
    }

    /// Number of pages needed for `total` items; an empty list still has one.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_selected: DEFAULT_MAX_SELECTED,
        }
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The cap was reached; the selection is unchanged.
    CapReached,
}

impl ToggleOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, ToggleOutcome::CapReached)
    }
}

/// Per-conversation menu state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSession {
    pub conversation_id: ConversationId,
    selected: IndexSet<String>,
    page: usize,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SelectionSession {
    /// Fresh session: nothing selected, first page.
    pub fn start(conversation_id: ConversationId) -> Self {
        let now = Utc::now();
        Self {
            conversation_id,
            selected: IndexSet::new(),
            page: 0,
            started_at: now,
            updated_at: now,
        }
    }

    /// Selected symptoms in the order they were picked.
    pub fn selected(&self) -> &IndexSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, symptom: &str) -> bool {
        self.selected.contains(symptom)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Removes a selected symptom, or adds it while under the cap.
    pub fn toggle(&mut self, symptom: &str, limits: &SelectionLimits) -> ToggleOutcome {
        let outcome = if self.selected.shift_remove(symptom) {
            ToggleOutcome::Removed
        } else if self.selected.len() < limits.max_selected {
            self.selected.insert(symptom.to_string());
            ToggleOutcome::Added
        } else {
            ToggleOutcome::CapReached
        };

        if outcome.changed() {
            self.touch();
        }
        outcome
    }

    /// Advances one page if another page exists.
    pub fn next_page(&mut self, total: usize, limits: &SelectionLimits) -> bool {
        if self.page + 1 < limits.page_count(total) {
            self.page += 1;
            self.touch();
            true
        } else {
            false
        }
    }

    /// Goes back one page unless on the first.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            self.touch();
            true
        } else {
            false
        }
    }

    /// Done is offered only once something is selected.
    pub fn can_complete(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Renders the current page against the symptom index.
    pub fn current_page(&self, index: &SymptomIndex, limits: &SelectionLimits) -> SymptomPage {
        let total = index.len();
        let last_page = limits.page_count(total) - 1;
        let page = self.page.min(last_page);

        let items = index
            .symptoms()
            .skip(page * limits.page_size)
            .take(limits.page_size)
            .map(|symptom| PageItem {
                symptom: symptom.to_string(),
                checked: self.is_selected(symptom),
            })
            .collect();

        SymptomPage {
            page,
            items,
            has_prev: page > 0,
            has_next: page < last_page,
            can_complete: self.can_complete(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// One symptom row of a menu page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    pub symptom: String,
    pub checked: bool,
}

/// One page of the symptom menu, with the controls that apply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomPage {
    pub page: usize,
    pub items: Vec<PageItem>,
    pub has_prev: bool,
    pub has_next: bool,
    pub can_complete: bool,
}
