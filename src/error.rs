//! Error types for the animation core.
//!
//! Only the asset-loading paths and camera start can fail. Missing rig
//! parameters and unresolvable emotions are normal outcomes, not errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    /// No face-tracking library is registered with the controller.
    #[error("Face tracking library not loaded")]
    LibraryUnavailable,
    /// Camera tracking was requested without a capture surface to draw into.
    #[error("No capture surface available for camera tracking")]
    MissingSurface,
    /// The library reported an error while initialising (device, permission...).
    #[error("Face tracking init error: {0}")]
    InitFailed(String),
    /// `stop()` ran while this start was still pending; its result was discarded.
    #[error("Camera tracking start superseded by stop")]
    Superseded,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read expression file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse expression {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to write config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize config: {0}")]
    Json(#[from] serde_json::Error),
}
