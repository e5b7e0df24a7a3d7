//! Error types for loading a skill tree.
//!
//! Only two things can stop a tree from being shown: the source could not be read, or it was
//! read but held nothing to show. Malformed lines inside a source are never errors.

use thiserror::Error;

/// Terminal failures of a load attempt. Neither is retried and nothing is partially rendered.
#[derive(Error, Debug)]
pub enum LoadError {
    /// No candidate location produced outline text.
    #[error("failed to load skill tree from {location}: {reason}")]
    SourceUnavailable {
        /// Location of the last attempt (file path or inline page).
        location: String,
        /// Underlying failure text.
        reason: String,
    },

    /// The source loaded but contained no headings.
    #[error("no headings or lists found in the skill tree source")]
    EmptyForest,
}

/// Result type alias for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;
