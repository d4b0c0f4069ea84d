//! Error types for colorwiz.
//!
//! Contract violations on the model (unknown labels, empty names, a continuous
//! scale without numeric candidates) surface as [`ColorwizError::Precondition`]
//! or [`ColorwizError::LabelNotFound`] and are propagated to the caller. Scheme
//! loading failures are reported as [`ColorwizError::SchemeLoad`] and are
//! usually recovered locally with a warning.

use thiserror::Error;

/// The main error type for colorwiz operations.
#[derive(Error, Debug)]
pub enum ColorwizError {
    /// A programming-contract violation on the model
    #[error("Precondition failed: {message}")]
    Precondition { message: String },

    /// A label that is not part of the color map
    #[error("Label '{label}' not found in property '{property}'")]
    LabelNotFound { property: String, label: String },

    /// Color values that cannot be represented as #RRGGBB
    #[error("Invalid color '{value}': {message}")]
    InvalidColor { value: String, message: String },

    /// Missing or unparseable persisted color scheme
    #[error("Cannot load color scheme for '{property}': {message}")]
    SchemeLoad { property: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ColorwizError {
    /// Shorthand for a [`ColorwizError::Precondition`]
    pub fn precondition(message: impl Into<String>) -> Self {
        ColorwizError::Precondition {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with ColorwizError
pub type Result<T> = std::result::Result<T, ColorwizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ColorwizError::LabelNotFound {
            property: "status".to_string(),
            label: "archived".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Label 'archived' not found in property 'status'"
        );

        let err = ColorwizError::precondition("No property found");
        assert_eq!(err.to_string(), "Precondition failed: No property found");
    }
}
