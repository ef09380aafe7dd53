//! Typed error handling for the worklist crate
//!
//! # Error Categories
//!
//! - [`EntityError`]: product lookup and submission failures
//! - [`ConfigError`]: configuration, manifest and fixture loading
//! - [`RequestError`]: malformed requests against the mock data service
//!
//! Every category knows its HTTP status and a stable error code, so the mock
//! server can render any [`WorklistError`] directly.
//!
//! # Example
//!
//! ```rust,ignore
//! match model.submit_changes() {
//!     Ok(created) => host.show_toast("Product created"),
//!     Err(WorklistError::Entity(EntityError::AlreadyExists { id, .. })) => {
//!         tracing::warn!(id, "duplicate product");
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T, E = WorklistError> = std::result::Result<T, E>;

/// The main error type for the worklist crate
#[derive(Debug, Error)]
pub enum WorklistError {
    /// Product-related errors (lookup, creation)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Configuration, manifest and fixture errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed request parameters
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl WorklistError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WorklistError::Entity(e) => e.status_code(),
            WorklistError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WorklistError::Request(e) => e.status_code(),
            WorklistError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            WorklistError::Entity(e) => e.error_code(),
            WorklistError::Config(_) => "CONFIG_ERROR",
            WorklistError::Request(e) => e.error_code(),
            WorklistError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            WorklistError::Entity(EntityError::NotFound { entity_set, id })
            | WorklistError::Entity(EntityError::AlreadyExists { entity_set, id }) => {
                Some(serde_json::json!({
                    "entity_set": entity_set,
                    "id": id
                }))
            }
            WorklistError::Request(RequestError::InvalidParameter { name, .. }) => {
                Some(serde_json::json!({ "parameter": name }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for WorklistError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to product operations
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_set} with key '{id}' not found")]
    NotFound { entity_set: String, id: i64 },

    /// Entity with the same key already exists
    #[error("{entity_set} with key '{id}' already exists")]
    AlreadyExists { entity_set: String, id: i64 },

    /// A draft entry was submitted without a required property
    #[error("{entity_set} entry is missing required property '{property}'")]
    MissingProperty {
        entity_set: String,
        property: String,
    },

    /// There is no pending entry for the given context
    #[error("No pending entry at '{path}'")]
    NoPendingEntry { path: String },

    /// Submission failed
    #[error("Failed to submit {entity_set}: {message}")]
    SubmitFailed { entity_set: String, message: String },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
            EntityError::MissingProperty { .. } => StatusCode::BAD_REQUEST,
            EntityError::NoPendingEntry { .. } => StatusCode::BAD_REQUEST,
            EntityError::SubmitFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::MissingProperty { .. } => "ENTITY_MISSING_PROPERTY",
            EntityError::NoPendingEntry { .. } => "ENTITY_NO_PENDING_ENTRY",
            EntityError::SubmitFailed { .. } => "ENTITY_SUBMIT_FAILED",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while loading configuration, manifest, metadata or fixtures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration could not be parsed
    #[error("Failed to parse configuration '{path}': {message}")]
    ParseError { path: String, message: String },

    /// The application manifest could not be loaded
    #[error("Failed to load application manifest '{path}': {message}")]
    ManifestLoad { path: String, message: String },

    /// The manifest lacks the main data source
    #[error("Application manifest has no data source '{name}'")]
    MissingDataSource { name: String },

    /// The service metadata document could not be loaded
    #[error("Failed to load service metadata '{path}': {message}")]
    MetadataLoad { path: String, message: String },

    /// A mock data fixture could not be loaded
    #[error("Failed to load mock data '{path}': {message}")]
    FixtureLoad { path: String, message: String },

    /// A resource bundle could not be parsed
    #[error("Invalid resource bundle: {message}")]
    InvalidBundle { message: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors caused by malformed requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Unknown entity property
    #[error("Unknown property '{field}'")]
    UnknownField { field: String },

    /// A query parameter could not be interpreted
    #[error("Invalid query parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// The resource path does not address a known entity set or key
    #[error("Invalid resource path '{path}'")]
    InvalidPath { path: String },

    /// The request body is not a valid entity
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidPath { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::UnknownField { .. } => "UNKNOWN_FIELD",
            RequestError::InvalidParameter { .. } => "INVALID_PARAMETER",
            RequestError::InvalidPath { .. } => "INVALID_PATH",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

impl From<serde_json::Error> for WorklistError {
    fn from(err: serde_json::Error) -> Self {
        WorklistError::Request(RequestError::InvalidBody {
            message: err.to_string(),
        })
    }
}
