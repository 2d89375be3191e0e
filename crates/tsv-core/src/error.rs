//! Error types for tsv-core

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing
///
/// Out-of-range lookups are not errors; accessors return `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The source text had zero length
    #[error("cannot parse empty input")]
    EmptyInput,
}
