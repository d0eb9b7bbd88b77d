use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;
use crate::selection::Selection;
use crate::sort::SortOrder;

/// Per-screen table state: one sort column and direction, the selected
/// row ids, and the visible page. Created with defaults when a screen
/// mounts and dropped with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableState<Id> {
    pub order: SortOrder,
    pub order_by: String,
    pub selection: Selection<Id>,
    pub pagination: Pagination,
}

impl<Id: Copy + Eq> TableState<Id> {
    pub fn new(order_by: &str) -> Self {
        Self {
            order: SortOrder::Asc,
            order_by: order_by.to_string(),
            selection: Selection::new(),
            pagination: Pagination::default(),
        }
    }

    /// Header click: a second click on the active column flips the
    /// direction, a click elsewhere sorts that column ascending.
    pub fn on_sort(&mut self, key: &str) {
        if self.order_by == key {
            self.order = self.order.toggled();
        } else {
            self.order_by = key.to_string();
            self.order = SortOrder::Asc;
        }
    }

    pub fn on_select_row(&mut self, id: Id) {
        self.selection.toggle(id);
    }

    /// Header checkbox: checking selects every id passed in (the whole
    /// filtered list, not just the visible page), unchecking clears.
    pub fn on_select_all(&mut self, checked: bool, ids: impl IntoIterator<Item = Id>) {
        if checked {
            self.selection.set_all(ids);
        } else {
            self.selection.clear();
        }
    }

    pub fn on_change_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    pub fn on_change_rows_per_page(&mut self, rows_per_page: usize) {
        self.pagination.set_rows_per_page(rows_per_page);
    }
}

/// Free-text filter over one chosen attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub attribute: String,
}

impl FilterState {
    pub fn new(attribute: &str) -> Self {
        Self {
            query: String::new(),
            attribute: attribute.to_string(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }
}
