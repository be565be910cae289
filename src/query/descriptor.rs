// Query descriptor: the canonical serialized query contract
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};

use crate::schema::Model;
use super::{
    build_search, Aggregate, FilterClause, FilterList, GroupSpec, PaginationWindow, SearchState,
    SortSpec,
};

/// The row window of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u64,
}

/// The compiled, serializable representation of one query.
///
/// A descriptor is pure data: reproducible for identical inputs, free of
/// UI-local identifiers, and structurally canonical so the backend's
/// translation layer stays simple. Optional sections are omitted rather
/// than sent empty; in particular an empty field projection means "all
/// fields" and must never serialize as an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterClause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<SortSpec>>,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregates: Option<Vec<Aggregate>>,
}

/// Compile the session's query state into one canonical descriptor.
///
/// The search clause, when present, is prepended to the explicit filter
/// leaves before the single/multi canonicalization, so search and filters
/// combine into one flat AND. Grouping emits the fixed aggregate pair and
/// composes with any active filter. This function cannot fail: a leaf
/// naming an unknown field or operator is the backend's to reject.
pub fn compile(
    model: &Model,
    fields: Option<&[String]>,
    filters: &FilterList,
    search: &SearchState,
    sort: Option<&SortSpec>,
    group: Option<&GroupSpec>,
    window: &PaginationWindow,
) -> QueryDescriptor {
    let search_clause = build_search(search, &model.searchable_fields());

    let projection = fields
        .filter(|f| !f.is_empty())
        .map(|f| f.to_vec());

    let (group_by, aggregates) = match group {
        Some(g) => (
            Some(vec![g.field.clone()]),
            Some(g.aggregates(&model.primary_key)),
        ),
        None => (None, None),
    };

    QueryDescriptor {
        model: model.name.clone(),
        fields: projection,
        filters: filters.compile_with(search_clause),
        sort: sort.map(|s| vec![s.clone()]),
        pagination: Pagination {
            limit: window.limit(),
            offset: window.offset(),
        },
        group_by,
        aggregates,
    }
}
