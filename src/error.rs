use thiserror::Error;

use crate::model::PropertyId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Property not found: {0}")]
    NotFound(PropertyId),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;
