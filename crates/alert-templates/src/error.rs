//! Error types for template loading and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or rendering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A template file exists but could not be read.
    #[error("Failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template did not parse.
    #[error("Invalid template '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// A template failed while rendering.
    #[error("Failed to render template '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// The render context could not be built.
    #[error("Failed to build render context: {0}")]
    Context(#[from] serde_json::Error),
}
