// Wire models of the execution backend contract
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::schema::{Field, Model};

/// One field as announced by the models endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: String,
}

/// One model as announced by the models endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDef {
    pub name: String,
    pub table: String,
    pub primary_key: String,
    pub fields: Vec<FieldDef>,
}

impl From<ModelDef> for Model {
    fn from(def: ModelDef) -> Self {
        let fields = def
            .fields
            .iter()
            .map(|f| Field::new(&f.name, &f.declared_type))
            .collect();
        Model::new(&def.name, &def.table, &def.primary_key, fields)
    }
}

/// Pagination echo some backends attach to a query response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub total: u64,
    pub limit: u32,
    pub offset: u64,
}

/// Response of the query endpoint. A present `error` is a recoverable
/// query failure; otherwise `data` is the result page and `total` or
/// `meta.total`, when present, is authoritative for pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    pub sql: Option<String>,
    pub params: Option<Vec<JsonValue>>,
    pub data: Option<Vec<JsonMap<String, JsonValue>>>,
    pub error: Option<String>,
    pub total: Option<u64>,
    pub meta: Option<ResponseMeta>,
}

impl QueryResponse {
    /// Get the explicit total row count, preferring the top-level field
    /// over the meta echo
    pub fn reported_total(&self) -> Option<u64> {
        self.total.or_else(|| self.meta.as_ref().map(|m| m.total))
    }
}

/// Uniform response of the mutation endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationResponse {
    pub error: Option<String>,
}
