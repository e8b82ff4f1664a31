//! Error types

use thiserror::Error;

/// Errors reported by an editor widget implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    /// The anchor element cannot host an editor
    #[error("Anchor rejected: {0}")]
    AnchorRejected(String),

    /// An option value the widget cannot accept at creation time
    #[error("Invalid option `{key}`: {reason}")]
    InvalidOption { key: String, reason: String },
}

/// Errors surfaced by the field control
#[derive(Error, Debug)]
pub enum FieldError {
    /// Creating the widget from its anchor failed
    #[error("Failed to create editor widget: {0}")]
    WidgetCreation(#[from] WidgetError),

    /// Configuration could not be parsed
    #[error("Invalid field configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Options were given as something other than a map
    #[error("Editor options must be a table, got {0}")]
    InvalidOptions(String),
}
