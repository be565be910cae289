// Session module owning per-model query state and request sequencing
// Author: Gabriel Demetrios Lafis

mod debounce;
mod state;

pub use debounce::*;
pub use state::*;

use log::debug;
use serde_json::{Map as JsonMap, Value as JsonValue};
use thiserror::Error;

use crate::client::QueryResponse;
use crate::query::{FilterOperator, GroupSpec, QueryDescriptor, SearchState, SortSpec};
use crate::schema::{coerce, ModelCatalog};

/// Represents an error in the session module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no model selected")]
    NoModelSelected,
    #[error("unknown model: {0}")]
    UnknownModel(String),
    #[error("a filter needs a field, an operator and a non-empty value")]
    IncompleteFilter,
}

/// What became of a query response handed to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDisposition {
    /// The response was the latest issued request and was applied
    Applied,
    /// A newer request had already been issued; the response was discarded
    Stale,
}

/// One user's exploration session.
///
/// The session owns the model catalog, the query state of the currently
/// selected model, and the display state the last applied response
/// produced. All mutation goes through the event methods below; each one
/// leaves the state ready for `next_request` to compile a fresh
/// descriptor. Responses are applied only when their sequence number is
/// the latest issued, so a slow early request can never overwrite the
/// result of a fast later one.
#[derive(Debug, Clone, Default)]
pub struct ExplorerSession {
    catalog: ModelCatalog,
    state: Option<QueryState>,
    page_size: u32,
    last_seq: u64,
    rows: Vec<JsonMap<String, JsonValue>>,
    error: Option<String>,
}

impl ExplorerSession {
    /// Create a session over a loaded model catalog
    pub fn new(catalog: ModelCatalog, page_size: u32) -> Self {
        ExplorerSession {
            catalog,
            state: None,
            page_size,
            last_seq: 0,
            rows: Vec::new(),
            error: None,
        }
    }

    /// Get the model catalog
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Get the current query state, if a model is selected
    pub fn state(&self) -> Option<&QueryState> {
        self.state.as_ref()
    }

    /// Get the rows of the last applied result page
    pub fn rows(&self) -> &[JsonMap<String, JsonValue>] {
        &self.rows
    }

    /// Get the inline error of the last applied response, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Select a model, discarding all query and display state of the
    /// previous one
    pub fn select_model(&mut self, name: &str) -> Result<(), SessionError> {
        let model = self
            .catalog
            .get(name)
            .cloned()
            .ok_or_else(|| SessionError::UnknownModel(name.to_string()))?;

        self.state = Some(QueryState::new(model, self.page_size));
        self.rows.clear();
        self.error = None;
        Ok(())
    }

    /// Set or clear the field projection
    pub fn set_fields(&mut self, fields: Option<Vec<String>>) -> Result<(), SessionError> {
        self.mutate(|state| state.fields = fields)
    }

    /// Add a filter leaf, coercing the raw value by the field's declared
    /// category. Returns the leaf's identifier.
    pub fn add_filter(
        &mut self,
        field: &str,
        op: FilterOperator,
        raw_value: &str,
    ) -> Result<u64, SessionError> {
        if field.is_empty() || raw_value.trim().is_empty() {
            return Err(SessionError::IncompleteFilter);
        }

        let state = self.state.as_mut().ok_or(SessionError::NoModelSelected)?;
        let value = coerce(raw_value, state.model.category_of(field));
        let id = state.filters.add(field, op, value);
        state.window.reset();
        Ok(id)
    }

    /// Remove a filter leaf by identifier
    pub fn remove_filter(&mut self, id: u64) -> Result<bool, SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NoModelSelected)?;
        let removed = state.filters.remove(id);
        if removed {
            state.window.reset();
        }
        Ok(removed)
    }

    /// Enter global search mode with a settled term. An empty term clears
    /// the search.
    pub fn set_global_search(&mut self, term: &str) -> Result<(), SessionError> {
        let next = if term.trim().is_empty() {
            SearchState::Inactive
        } else {
            SearchState::Global {
                term: term.to_string(),
            }
        };
        self.mutate(|state| state.search = next)
    }

    /// Enter column search mode with a settled term on one field,
    /// clearing any global term. An empty term clears the search.
    pub fn set_column_search(&mut self, field: &str, term: &str) -> Result<(), SessionError> {
        let next = if term.trim().is_empty() || field.is_empty() {
            SearchState::Inactive
        } else {
            SearchState::Column {
                term: term.to_string(),
                field: field.to_string(),
            }
        };
        self.mutate(|state| state.search = next)
    }

    /// Leave search mode entirely
    pub fn clear_search(&mut self) -> Result<(), SessionError> {
        self.mutate(|state| state.search = SearchState::Inactive)
    }

    /// Apply one column-header click to the sort state
    pub fn toggle_sort(&mut self, field: &str) -> Result<(), SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NoModelSelected)?;
        state.sort = SortSpec::toggle(state.sort.as_ref(), field);
        state.window.reset();
        Ok(())
    }

    /// Set or clear the sort key directly, bypassing the click cycle
    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Result<(), SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NoModelSelected)?;
        state.sort = sort;
        state.window.reset();
        Ok(())
    }

    /// Set or clear the grouping field
    pub fn set_group_by(&mut self, field: Option<&str>) -> Result<(), SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NoModelSelected)?;
        state.group = field.map(GroupSpec::new);
        Ok(())
    }

    /// Navigate to a page
    pub fn set_page(&mut self, page: u32) -> Result<(), SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NoModelSelected)?;
        state.window.go_to_page(page);
        Ok(())
    }

    /// Change the page size
    pub fn set_page_size(&mut self, page_size: u32) -> Result<(), SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NoModelSelected)?;
        state.window.set_page_size(page_size);
        Ok(())
    }

    /// Compile the current state into a descriptor tagged with the next
    /// request sequence number
    pub fn next_request(&mut self) -> Result<(u64, QueryDescriptor), SessionError> {
        let state = self.state.as_ref().ok_or(SessionError::NoModelSelected)?;
        self.last_seq += 1;
        Ok((self.last_seq, state.descriptor()))
    }

    /// Fold a query response into display state.
    ///
    /// Only the response to the latest issued request is applied; anything
    /// older is discarded. A response carrying an `error` keeps the
    /// previous rows and the full query state so the user can adjust and
    /// retry.
    pub fn apply_response(&mut self, seq: u64, response: &QueryResponse) -> ResponseDisposition {
        if seq != self.last_seq {
            debug!(
                "discarding stale response {} (latest request is {})",
                seq, self.last_seq
            );
            return ResponseDisposition::Stale;
        }

        if let Some(message) = &response.error {
            self.error = Some(message.clone());
            return ResponseDisposition::Applied;
        }

        self.error = None;
        self.rows = response.data.clone().unwrap_or_default();

        if let Some(state) = self.state.as_mut() {
            state
                .window
                .on_result(self.rows.len(), response.reported_total());
        }

        ResponseDisposition::Applied
    }

    fn mutate<F>(&mut self, apply: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut QueryState),
    {
        let state = self.state.as_mut().ok_or(SessionError::NoModelSelected)?;
        apply(state);
        state.window.reset();
        Ok(())
    }
}
