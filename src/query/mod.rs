// Query model: filters, search, sort, grouping, pagination and the
// descriptor compiler
// Author: Gabriel Demetrios Lafis

mod descriptor;
mod filter;
mod group;
mod page;
mod search;
mod sort;

pub use descriptor::*;
pub use filter::*;
pub use group::*;
pub use page::*;
pub use search::*;
pub use sort::*;

use thiserror::Error;

/// Represents an error in the query module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown filter operator: {0}")]
    UnknownOperator(String),
    #[error("unknown sort direction: {0}")]
    UnknownDirection(String),
}
