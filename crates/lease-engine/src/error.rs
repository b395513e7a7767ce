//! Error types for page rendering and document generation

use thiserror::Error;

use crate::composer::DocumentSet;
use crate::pages::PageId;

/// Errors raised while rendering fields into a single page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Malformed template: label '{label}' for field '{field}' has no {expected} slot")]
    MalformedTemplate {
        field: String,
        label: String,
        expected: String,
    },

    #[error("Invalid numeral input for '{field}': {value} is negative")]
    InvalidNumeralInput { field: String, value: i64 },

    #[error("Invalid value for '{field}': {value}")]
    InvalidFieldValue { field: String, value: String },

    #[error("Invalid label pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Template source failures
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output sink failures
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Output rejected: {0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Terminal error of a generation run
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to load template for {page}: {source}")]
    TemplateLoad {
        page: PageId,
        #[source]
        source: TemplateError,
    },

    #[error("Failed to render {page}: {source}")]
    Render {
        page: PageId,
        #[source]
        source: RenderError,
    },

    /// The page rendered but could not be delivered. Pages delivered before
    /// it are returned in `delivered`.
    #[error("Failed to deliver {page}: {source}")]
    OutputSink {
        page: PageId,
        #[source]
        source: SinkError,
        delivered: DocumentSet,
    },

    #[error("Generation cancelled before {page}")]
    Cancelled { page: PageId },
}

impl GenerationError {
    /// The page the run stopped at
    pub fn page(&self) -> PageId {
        match self {
            GenerationError::TemplateLoad { page, .. }
            | GenerationError::Render { page, .. }
            | GenerationError::OutputSink { page, .. }
            | GenerationError::Cancelled { page } => *page,
        }
    }
}
