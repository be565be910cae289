// Filter model: comparison operators, clause trees and the flat leaf list
// Author: Gabriel Demetrios Lafis

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::schema::Value;
use super::QueryError;

/// Comparison operator of a filter leaf.
///
/// The enumeration is closed and shared between the filter model and the
/// wire encoder; the serialized form is the backend's operator symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "starts_with")]
    StartsWith,
    #[serde(rename = "ends_with")]
    EndsWith,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
}

impl FilterOperator {
    /// Get the operator symbol sent to the execution backend
    pub fn wire_symbol(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "=",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "starts_with",
            FilterOperator::EndsWith => "ends_with",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
            FilterOperator::Gte => ">=",
            FilterOperator::Lte => "<=",
        }
    }

    /// Get the name the operator carries in the UI vocabulary
    pub fn ui_name(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "startswith",
            FilterOperator::EndsWith => "endswith",
            FilterOperator::Gt => "gt",
            FilterOperator::Lt => "lt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lte => "lte",
        }
    }
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    /// Parse an operator from the UI vocabulary. Unknown names are an
    /// error, never a silent identity mapping.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(FilterOperator::Equals),
            "contains" => Ok(FilterOperator::Contains),
            "startswith" => Ok(FilterOperator::StartsWith),
            "endswith" => Ok(FilterOperator::EndsWith),
            "gt" => Ok(FilterOperator::Gt),
            "lt" => Ok(FilterOperator::Lt),
            "gte" => Ok(FilterOperator::Gte),
            "lte" => Ok(FilterOperator::Lte),
            other => Err(QueryError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.wire_symbol())
    }
}

/// A single field comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterLeaf {
    pub field: String,
    pub op: FilterOperator,
    pub value: Value,
}

impl FilterLeaf {
    /// Create a new filter leaf
    pub fn new(field: &str, op: FilterOperator, value: Value) -> Self {
        FilterLeaf {
            field: field.to_string(),
            op,
            value,
        }
    }
}

/// A filter expression: a leaf comparison or an AND/OR group of
/// sub-expressions. Groups are non-empty and order preserving; the tree is
/// immutable once compiled into a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterClause {
    Leaf(FilterLeaf),
    And { and: Vec<FilterClause> },
    Or { or: Vec<FilterClause> },
}

impl FilterClause {
    /// Create a leaf clause
    pub fn leaf(field: &str, op: FilterOperator, value: Value) -> Self {
        FilterClause::Leaf(FilterLeaf::new(field, op, value))
    }

    /// Create an AND group
    pub fn and(clauses: Vec<FilterClause>) -> Self {
        FilterClause::And { and: clauses }
    }

    /// Create an OR group
    pub fn or(clauses: Vec<FilterClause>) -> Self {
        FilterClause::Or { or: clauses }
    }
}

/// An active filter in the UI's flat list, tagged with a locally-unique
/// identifier so it can be removed later. The identifier never reaches a
/// compiled descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveFilter {
    pub id: u64,
    pub leaf: FilterLeaf,
}

/// The flat ordered list of filter leaves a session holds. The compiler
/// assembles the tree from this list, not the reverse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterList {
    next_id: u64,
    filters: Vec<ActiveFilter>,
}

impl FilterList {
    /// Create an empty filter list
    pub fn new() -> Self {
        FilterList::default()
    }

    /// Append a leaf and return its identifier
    pub fn add(&mut self, field: &str, op: FilterOperator, value: Value) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.filters.push(ActiveFilter {
            id,
            leaf: FilterLeaf::new(field, op, value),
        });
        id
    }

    /// Remove a leaf by identifier, returning whether one was removed
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.id != id);
        self.filters.len() != before
    }

    /// Get the number of active filters
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Iterate over the active filters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ActiveFilter> {
        self.filters.iter()
    }

    /// Compile the list into a canonical clause: no filter for an empty
    /// list, the bare leaf for a single entry, an AND group otherwise.
    pub fn compile(&self) -> Option<FilterClause> {
        self.compile_with(None)
    }

    /// Compile the list with an optional search clause prepended.
    ///
    /// The search clause joins the leaves *before* canonicalization, so a
    /// search plus one explicit filter yields a two-member AND rather than
    /// a nested group, and a search with no explicit filters yields the
    /// search clause unwrapped.
    pub fn compile_with(&self, search: Option<FilterClause>) -> Option<FilterClause> {
        let mut clauses: Vec<FilterClause> = Vec::with_capacity(self.filters.len() + 1);

        if let Some(clause) = search {
            clauses.push(clause);
        }
        for f in &self.filters {
            clauses.push(FilterClause::Leaf(f.leaf.clone()));
        }

        match clauses.len() {
            0 => None,
            1 => clauses.pop(),
            _ => Some(FilterClause::and(clauses)),
        }
    }
}
