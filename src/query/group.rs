// Grouping specification and aggregate emission
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};

/// Aggregate function vocabulary shared with the execution backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

/// One aggregate column of a grouped query. An empty `field` with `count`
/// is the backend's `count(*)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    #[serde(rename = "fn")]
    pub function: AggregateFunction,
    pub field: String,
    pub alias: String,
}

impl Aggregate {
    /// Create an aggregate column
    pub fn new(function: AggregateFunction, field: &str, alias: &str) -> Self {
        Aggregate {
            function,
            field: field.to_string(),
            alias: alias.to_string(),
        }
    }
}

/// The single grouping field of a query. Nested grouping is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    pub field: String,
}

impl GroupSpec {
    /// Create a grouping on a field
    pub fn new(field: &str) -> Self {
        GroupSpec {
            field: field.to_string(),
        }
    }

    /// Get the fixed aggregate pair every grouped query carries: a row
    /// count per group and a primary-key count aliased `total_rows`.
    pub fn aggregates(&self, primary_key: &str) -> Vec<Aggregate> {
        vec![
            Aggregate::new(AggregateFunction::Count, "", "count"),
            Aggregate::new(AggregateFunction::Count, primary_key, "total_rows"),
        ]
    }
}
