//! Error types for session and view operations.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by session transitions and view rendering.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// No presentations have been uploaded yet.
    #[error("No presentations loaded; upload a file first")]
    NoPresentations,

    /// An operation needs an active document but none is selected.
    #[error("No document selected")]
    NoDocumentSelected,

    /// Document index does not exist in the session.
    #[error("Document {index} does not exist ({count} loaded)")]
    DocumentOutOfRange { index: usize, count: usize },

    /// Slide or page index does not exist in the active document.
    #[error("Slide {number} does not exist ({count} available)")]
    SlideOutOfRange { number: usize, count: usize },

    /// The operation needs a slide or page on screen.
    #[error("No slide or page is being shown")]
    NoSlideShown,

    /// The operation only applies to PDF documents.
    #[error("{0} is not a PDF document")]
    NotAPdf(String),

    /// The file extension is not one the backend accepts.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}
