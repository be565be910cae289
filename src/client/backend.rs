// Execution backend trait
// Author: Gabriel Demetrios Lafis

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::query::QueryDescriptor;
use crate::schema::Model;
use super::{ClientError, QueryResponse};

/// The execution collaborator this crate compiles queries for.
///
/// The backend owns SQL translation and execution; this trait is the
/// whole surface the session layer sees, so tests can substitute a
/// scripted implementation for the HTTP one.
pub trait ExecutionBackend {
    /// Fetch the model catalog. Called once at session start.
    fn fetch_models(&self) -> Result<Vec<Model>, ClientError>;

    /// Execute one compiled query descriptor
    fn execute(&self, query: &QueryDescriptor) -> Result<QueryResponse, ClientError>;

    /// Create a record from a submission built by the forms module
    fn create_record(
        &self,
        model: &str,
        data: &JsonMap<String, JsonValue>,
    ) -> Result<(), ClientError>;

    /// Update a record with a diff built by the forms module
    fn update_record(
        &self,
        model: &str,
        id: &JsonValue,
        diff: &JsonMap<String, JsonValue>,
    ) -> Result<(), ClientError>;

    /// Delete a record by primary key
    fn delete_record(&self, model: &str, id: &JsonValue) -> Result<(), ClientError>;
}
