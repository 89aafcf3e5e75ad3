//! Medlook - desktop search client for medical code lookup.
//!
//! This library provides the search widget behind the Medlook UI:
//! debounced search-as-you-type against a code-search HTTP endpoint,
//! result rendering, and clipboard copy of individual codes.

pub mod api;
pub mod ui;
pub mod widget;

use thiserror::Error;

/// Medlook error types covering all failure modes.
#[derive(Error, Debug)]
pub enum MedlookError {
    /// Search endpoint errors (transport failure, bad status, or malformed JSON)
    #[error("Search endpoint error: {0}")]
    Endpoint(#[from] reqwest::Error),

    /// Clipboard access errors
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using MedlookError
pub type Result<T> = std::result::Result<T, MedlookError>;
