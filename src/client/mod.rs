// Client module for talking to the execution backend
// Author: Gabriel Demetrios Lafis

mod backend;
mod http;
mod models;

pub use backend::*;
pub use http::*;
pub use models::*;

use thiserror::Error;

/// Represents an error in the client module
#[derive(Debug, Error)]
pub enum ClientError {
    /// The model catalog could not be loaded. Fatal to the view: there is
    /// no fallback schema to browse.
    #[error("schema load failed: {0}")]
    SchemaLoad(String),
    /// The backend was unreachable or answered with a non-success status
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend's response body was not the expected shape
    #[error("invalid response body: {0}")]
    Decode(String),
    /// The backend rejected a create, update or delete
    #[error("mutation rejected: {0}")]
    Mutation(String),
}

impl From<ureq::Error> for ClientError {
    fn from(err: ureq::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
