//! Error taxonomy for the playlist generation pipeline.

use thiserror::Error;

/// Errors produced by the generation pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaylistError {
    /// Caller-supplied parameters were rejected before any external call.
    #[error("invalid playlist parameters: {0}")]
    InvalidParams(String),

    /// A non-blank line of model output could not be split into title and artist.
    #[error("malformed line {line} in model output: {content:?}")]
    MalformedLine {
        /// 1-based line number in the raw completion.
        line: usize,
        /// The offending line, after ordinal stripping.
        content: String,
    },

    /// Neither the cache nor the model produced any track candidates.
    #[error("no track suggestions were generated")]
    EmptyGeneration,

    /// No candidate matched anything in the catalog.
    #[error("none of the {0} suggested tracks were found in the catalog")]
    NoTracksResolved(usize),

    /// Catalog credentials are not fully configured.
    #[error("missing catalog credentials: {}", missing.join(", "))]
    MissingCredentials {
        /// Names of the settings that are absent.
        missing: Vec<&'static str>,
    },

    /// A completion or catalog provider call failed.
    #[error("{service} call failed: {message}")]
    ExternalCall {
        /// Which provider failed (e.g. "catalog").
        service: &'static str,
        /// Provider error text.
        message: String,
    },
}

impl PlaylistError {
    /// Wraps a catalog port error.
    pub(crate) fn catalog<E: std::fmt::Display>(err: E) -> Self {
        Self::ExternalCall { service: "catalog", message: err.to_string() }
    }
}
