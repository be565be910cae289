// HTTP implementation of the execution backend
// Author: Gabriel Demetrios Lafis

use std::time::Duration;

use log::debug;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::query::QueryDescriptor;
use crate::schema::Model;
use super::{ClientError, ExecutionBackend, ModelDef, MutationResponse, QueryResponse};

/// Execution backend reached over HTTP
pub struct HttpBackend {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpBackend {
    /// Create a backend client for the given base URL
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        HttpBackend {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check a mutation response body for the uniform error field
    fn check_mutation(response: ureq::Response) -> Result<(), ClientError> {
        let body: MutationResponse = response.into_json()?;
        match body.error {
            Some(message) => Err(ClientError::Mutation(message)),
            None => Ok(()),
        }
    }

    /// Map a failed mutation call: a JSON body with an error field is a
    /// backend rejection, anything else is a transport problem
    fn mutation_failure(err: ureq::Error) -> ClientError {
        match err {
            ureq::Error::Status(_, response) => match response.into_json::<MutationResponse>() {
                Ok(MutationResponse { error: Some(message) }) => ClientError::Mutation(message),
                _ => ClientError::Transport("backend rejected the mutation".to_string()),
            },
            other => ClientError::Transport(other.to_string()),
        }
    }
}

impl ExecutionBackend for HttpBackend {
    fn fetch_models(&self) -> Result<Vec<Model>, ClientError> {
        let defs: Vec<ModelDef> = self
            .agent
            .get(&self.url("/models"))
            .call()
            .map_err(|e| ClientError::SchemaLoad(e.to_string()))?
            .into_json()
            .map_err(|e| ClientError::SchemaLoad(e.to_string()))?;

        debug!("loaded {} models", defs.len());
        Ok(defs.into_iter().map(Model::from).collect())
    }

    fn execute(&self, query: &QueryDescriptor) -> Result<QueryResponse, ClientError> {
        let response = self
            .agent
            .post(&self.url("/query"))
            .send_json(query)?
            .into_json()?;
        Ok(response)
    }

    fn create_record(
        &self,
        model: &str,
        data: &JsonMap<String, JsonValue>,
    ) -> Result<(), ClientError> {
        let path = format!("/records/{}", model);
        self.agent
            .post(&self.url(&path))
            .send_json(data)
            .map_err(Self::mutation_failure)
            .and_then(Self::check_mutation)
    }

    fn update_record(
        &self,
        model: &str,
        id: &JsonValue,
        diff: &JsonMap<String, JsonValue>,
    ) -> Result<(), ClientError> {
        let path = format!("/records/{}/{}", model, id_segment(id));
        self.agent
            .put(&self.url(&path))
            .send_json(diff)
            .map_err(Self::mutation_failure)
            .and_then(Self::check_mutation)
    }

    fn delete_record(&self, model: &str, id: &JsonValue) -> Result<(), ClientError> {
        let path = format!("/records/{}/{}", model, id_segment(id));
        self.agent
            .delete(&self.url(&path))
            .call()
            .map_err(Self::mutation_failure)
            .and_then(Self::check_mutation)
    }
}

/// Render a primary-key value as a URL path segment
fn id_segment(id: &JsonValue) -> String {
    match id {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
