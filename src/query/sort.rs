// Sort specification and the column-header click cycle
// Author: Gabriel Demetrios Lafis

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::QueryError;

/// Sort order of the single active sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(QueryError::UnknownDirection(other.to_string())),
        }
    }
}

/// The active sort key of a session. At most one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create an ascending sort on a field
    pub fn asc(field: &str) -> Self {
        SortSpec {
            field: field.to_string(),
            direction: SortDirection::Asc,
        }
    }

    /// Create a descending sort on a field
    pub fn desc(field: &str) -> Self {
        SortSpec {
            field: field.to_string(),
            direction: SortDirection::Desc,
        }
    }

    /// Apply one column-header click to the current sort state.
    ///
    /// Clicking the active ascending column flips to descending, clicking
    /// it again clears the sort, and clicking any other column starts an
    /// ascending sort on that column.
    pub fn toggle(current: Option<&SortSpec>, field: &str) -> Option<SortSpec> {
        match current {
            Some(s) if s.field == field && s.direction == SortDirection::Asc => {
                Some(SortSpec::desc(field))
            }
            Some(s) if s.field == field => None,
            _ => Some(SortSpec::asc(field)),
        }
    }
}
