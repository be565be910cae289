// Error handling utilities
// Author: Gabriel Demetrios Lafis

use thiserror::Error;

use crate::client::ClientError;
use crate::forms::FormError;
use crate::query::QueryError;
use crate::session::SessionError;
use crate::utils::ConfigError;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("client error: {0}")]
    Client(#[from] ClientError),
    #[error("query error: {0}")]
    Query(#[from] QueryError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("form error: {0}")]
    Form(#[from] FormError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Other(String),
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;
