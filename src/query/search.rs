// Search translator: free-text terms to filter clauses
// Author: Gabriel Demetrios Lafis

use crate::schema::Value;
use super::{FilterClause, FilterOperator};

/// Search input state of a session.
///
/// The two search modes are mutually exclusive by construction: a session
/// is either searching across all text fields, searching one chosen
/// column, or not searching at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Inactive,
    Global {
        term: String,
    },
    Column {
        term: String,
        field: String,
    },
}

impl SearchState {
    /// Check whether any search is active
    pub fn is_active(&self) -> bool {
        !matches!(self, SearchState::Inactive)
    }

    /// Get the raw term of the active mode, if any
    pub fn term(&self) -> Option<&str> {
        match self {
            SearchState::Inactive => None,
            SearchState::Global { term } => Some(term),
            SearchState::Column { term, .. } => Some(term),
        }
    }
}

/// Translate the search state into a filter clause.
///
/// Global mode matches when ANY candidate field contains the term, so it
/// compiles to an OR group of `contains` leaves over the candidates; an
/// empty trimmed term or an empty candidate list yields no clause. Column
/// mode compiles to the single `contains` leaf on the chosen field and
/// ignores the candidates entirely. Case sensitivity is the backend's
/// `contains` semantics, not decided here.
pub fn build_search(state: &SearchState, candidate_fields: &[String]) -> Option<FilterClause> {
    match state {
        SearchState::Inactive => None,
        SearchState::Global { term } => {
            let term = term.trim();
            if term.is_empty() || candidate_fields.is_empty() {
                return None;
            }
            let leaves = candidate_fields
                .iter()
                .map(|field| {
                    FilterClause::leaf(field, FilterOperator::Contains, Value::from(term))
                })
                .collect();
            Some(FilterClause::or(leaves))
        }
        SearchState::Column { term, field } => {
            let term = term.trim();
            if term.is_empty() || field.is_empty() {
                return None;
            }
            Some(FilterClause::leaf(
                field,
                FilterOperator::Contains,
                Value::from(term),
            ))
        }
    }
}
