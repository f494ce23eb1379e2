//! Errors from the rendering layer.

use thiserror::Error;

/// Convenience alias for results within the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering documentation.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown document format: '{name}'. Available formats: markdown, text, json")]
    UnknownFormat { name: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
