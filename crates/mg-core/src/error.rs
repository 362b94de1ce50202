//! Unified error type for the gallery.
//!
//! All crates funnel their failures into [`Error`], which carries enough
//! context for API handlers to derive an HTTP status code via
//! [`Error::http_status`] and a client-facing reason via
//! [`Error::public_message`].

use std::fmt;

use crate::validation::ValidationError;

/// Unified error type covering all failure modes in the gallery.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "image").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// An upload or request failed validation. The message is shown to the
    /// client verbatim.
    #[error("{0}")]
    Validation(String),

    /// Decoding, resizing or re-encoding a thumbnail failed.
    #[error("Thumbnail error: {0}")]
    Thumbnail(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::Validation(_) => 400,
            Error::Thumbnail(_) => 500,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// The reason string returned to HTTP clients.
    ///
    /// Validation messages pass through unchanged; everything else collapses
    /// to a fixed phrase so internals never leak into responses.
    pub fn public_message(&self) -> String {
        match self {
            Error::NotFound { .. } => "Not found".into(),
            Error::Validation(msg) => msg.clone(),
            Error::Thumbnail(_) => "Failed to create thumbnail".into(),
            Error::Io { .. } | Error::Internal(_) => "Internal server error".into(),
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Thumbnail`].
    pub fn thumbnail(message: impl fmt::Display) -> Self {
        Error::Thumbnail(message.to_string())
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e.to_string())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
