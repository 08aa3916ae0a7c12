//! Error types for the scene engine.
//!
//! The engine degrades silently on the real-time path (placeholders, skipped
//! operations) and only surfaces errors at its boundaries: drawing backends,
//! persistence, configuration and record decoding.

use crate::scene::ShapeId;

/// Grepable error code for logs and host-side reporting.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

/// A drawing backend call failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    #[error("drawing backend failed: {0}")]
    Backend(String),
    #[error("image not available: {0}")]
    MissingImage(String),
}

/// The persistence port failed.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage backend failed: {0}")]
    Backend(String),
    #[error("stored scene is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Engine configuration could not be built.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// The collaboration transport rejected an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollabError {
    #[error("transport closed")]
    Closed,
    #[error("transport send failed: {0}")]
    Send(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown shape type: {0}")]
    UnknownShapeType(String),
    #[error("malformed shape record: {0}")]
    MalformedRecord(#[from] serde_json::Error),
    #[error("shape not found: {0}")]
    ShapeNotFound(ShapeId),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("draw error: {0}")]
    Draw(#[from] DrawError),
}

impl ErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownShapeType(_) => "E_UNKNOWN_SHAPE_TYPE",
            Self::MalformedRecord(_) => "E_MALFORMED_RECORD",
            Self::ShapeNotFound(_) => "E_SHAPE_NOT_FOUND",
            Self::Storage(_) => "E_STORAGE",
            Self::Draw(_) => "E_DRAW",
        }
    }
}
