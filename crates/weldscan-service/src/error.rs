//! Error types for the service layer

use thiserror::Error;

/// Errors that can occur during scan submission and history retrieval
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Credential rejected by the identity provider
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Pipeline failure (decode, enhancement, or backend)
    #[error(transparent)]
    Detect(#[from] weldscan_detect::DetectError),

    /// Record store failure
    #[error("record store: {0}")]
    Record(String),

    /// Blob store failure
    #[error("blob store: {0}")]
    Blob(String),
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
