// Immutable per-model query state
// Author: Gabriel Demetrios Lafis

use crate::query::{
    self, FilterList, GroupSpec, PaginationWindow, QueryDescriptor, SearchState, SortSpec,
};
use crate::schema::Model;

/// The complete query state of one selected model.
///
/// The state is a plain value object: every UI event produces the next
/// state through a small transition on the owning session, and the
/// descriptor is recomputed from scratch on every change rather than
/// patched. Discarded wholesale when the selected model changes.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub model: Model,
    pub fields: Option<Vec<String>>,
    pub filters: FilterList,
    pub search: SearchState,
    pub sort: Option<SortSpec>,
    pub group: Option<GroupSpec>,
    pub window: PaginationWindow,
}

impl QueryState {
    /// Create the empty query state for a freshly selected model
    pub fn new(model: Model, page_size: u32) -> Self {
        QueryState {
            model,
            fields: None,
            filters: FilterList::new(),
            search: SearchState::Inactive,
            sort: None,
            group: None,
            window: PaginationWindow::new(page_size),
        }
    }

    /// Compile the state into a query descriptor
    pub fn descriptor(&self) -> QueryDescriptor {
        query::compile(
            &self.model,
            self.fields.as_deref(),
            &self.filters,
            &self.search,
            self.sort.as_ref(),
            self.group.as_ref(),
            &self.window,
        )
    }
}
