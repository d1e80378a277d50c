//! Error types for the adaptive rendering core
//!
//! None of these are fatal to the host: components catch them at their
//! boundary and degrade (flat textures, placeholder geometry, discarded
//! samples) instead of aborting the frame.

use thiserror::Error;

/// Main error type for the pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("invalid entity '{id}': {reason}")]
    InvalidEntity { id: String, reason: String },

    #[error("geometry error for entity '{id}': {reason}")]
    Geometry { id: String, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_entity_id() {
        let err = Error::Geometry {
            id: "marker-7".into(),
            reason: "non-finite height".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("marker-7"));
        assert!(msg.contains("non-finite height"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
