use std::path::PathBuf;

use cart_discounts_admin::PanelError;
use cart_discounts_core::ValidationErrors;
use thiserror::Error;

/// Errors a command can end with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// The form was checked and has field errors.
    #[error("Form has validation errors: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Panel(#[from] PanelError),
}
