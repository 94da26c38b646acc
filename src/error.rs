use thiserror::Error;

use crate::domain::utils::id::ConnectivityId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    /// A caller handed in an argument that violates a precondition, e.g. a missing realizing link.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Unknown connectivity request {0}")]
    UnknownConnectivity(ConnectivityId),

    #[error("Connectivity request {0} is already registered")]
    DuplicateConnectivity(ConnectivityId),

    #[error("Failed to build domain model: {0}")]
    ConversionError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
