//! # Error Types
//!
//! This module defines the error type used throughout the library.
//!
//! Two failure classes coexist:
//!
//! - **Configuration errors** (`InvalidAlignment`, `InvalidLanguage`,
//!   `InvalidNumber`) are caller mistakes. They are returned immediately and
//!   the command-line front end aborts the run on them.
//! - **Tolerated input** (out-of-range font sizes, unknown barcode formats,
//!   malformed image parameters) never reaches this type at all. Those
//!   operations degrade to a no-op and return the session unchanged.

use thiserror::Error;

/// Main error type for escpos-press operations
#[derive(Debug, Error)]
pub enum EscposError {
    /// Alignment name outside `left`, `center`, `right`
    #[error("Invalid alignment: {0}")]
    InvalidAlignment(String),

    /// Language code outside the supported table
    #[error("Invalid language: {0}")]
    InvalidLanguage(String),

    /// A numeric node parameter that does not parse as an integer
    #[error("Invalid {param} param: {value}")]
    InvalidNumber { param: &'static str, value: String },

    /// A node document that cannot be read
    #[error("Invalid node document: {0}")]
    InvalidNode(String),

    /// Transport-level errors (connection, HTTP)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The IPP server answered with a non-success status
    #[error("IPP error {status:#06x}: {message}")]
    Ipp { status: u16, message: String },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EscposError {
    /// Whether this error belongs to the fail-fast configuration class.
    pub fn is_fatal_config(&self) -> bool {
        matches!(
            self,
            EscposError::InvalidAlignment(_)
                | EscposError::InvalidLanguage(_)
                | EscposError::InvalidNumber { .. }
        )
    }
}
