// Rust Data Explorer
// Author: Gabriel Demetrios Lafis

//! # Rust Data Explorer
//!
//! A schema-driven data exploration engine written in Rust.
//!
//! ## Features
//!
//! - Model catalog with declared-type classification
//! - Composable filters with a closed operator vocabulary
//! - Free-text search across all text fields or one chosen column
//! - Sorting, grouping with aggregates, and clamped pagination
//! - One canonical query descriptor compiled from session state
//! - Typed HTTP client for the execution backend
//!
//! ## Example
//!
//! ```rust
//! use rust_data_explorer::{
//!     query::FilterOperator,
//!     schema::{Field, Model, ModelCatalog},
//!     session::ExplorerSession,
//! };
//!
//! // Describe a model
//! let orders = Model::new(
//!     "orders",
//!     "orders",
//!     "id",
//!     vec![
//!         Field::new("id", "serial"),
//!         Field::new("status", "varchar"),
//!         Field::new("total", "integer"),
//!     ],
//! );
//!
//! // Start a session and narrow the view
//! let mut session = ExplorerSession::new(ModelCatalog::new(vec![orders]), 10);
//! session.select_model("orders").unwrap();
//! session.add_filter("total", FilterOperator::Gt, "100").unwrap();
//! session.toggle_sort("status").unwrap();
//!
//! // Compile the descriptor the execution backend receives
//! let (seq, descriptor) = session.next_request().unwrap();
//! assert_eq!(seq, 1);
//! assert_eq!(descriptor.model, "orders");
//! assert_eq!(descriptor.pagination.limit, 10);
//! assert_eq!(descriptor.pagination.offset, 0);
//! ```

pub mod client;
pub mod forms;
pub mod query;
pub mod schema;
pub mod session;
pub mod utils;

// Re-export main types
pub use client::{ExecutionBackend, HttpBackend};
pub use query::QueryDescriptor;
pub use schema::{Field, FieldCategory, Model, ModelCatalog, Value};
pub use session::ExplorerSession;
pub use utils::Config;
