//! Error types shared across AirMenu crates.
//!
//! Per-frame conditions (no hand in view, a transition to the current
//! screen, an empty back-history, an unknown animation handle) are steady
//! state inputs and never surface here. Only acquisition, configuration,
//! catalog, and script failures do.

use std::path::PathBuf;

/// Top-level error type for AirMenu operations.
#[derive(Debug, thiserror::Error)]
pub enum AirmenuError {
    #[error("Camera error: {message}")]
    Camera { message: String },

    #[error("Hand tracking error: {message}")]
    HandTracking { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Catalog error: {message}")]
    Catalog { message: String },

    #[error("Script error at line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using AirmenuError.
pub type AirmenuResult<T> = Result<T, AirmenuError>;

impl AirmenuError {
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::Camera {
            message: msg.into(),
        }
    }

    pub fn hand_tracking(msg: impl Into<String>) -> Self {
        Self::HandTracking {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog {
            message: msg.into(),
        }
    }

    pub fn script(line: usize, msg: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: msg.into(),
        }
    }

    /// Whether the error comes from the external frame/hand-pose side and
    /// should end the run rather than be reported and ignored.
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(self, Self::Camera { .. } | Self::HandTracking { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AirmenuError::camera("device busy").to_string(),
            "Camera error: device busy"
        );
        assert_eq!(
            AirmenuError::script(3, "bad landmark").to_string(),
            "Script error at line 3: bad landmark"
        );
    }

    #[test]
    fn test_acquisition_failure_classification() {
        assert!(AirmenuError::camera("x").is_acquisition_failure());
        assert!(AirmenuError::hand_tracking("x").is_acquisition_failure());
        assert!(!AirmenuError::config("x").is_acquisition_failure());
    }
}
