//! Error taxonomy for a single check operation.
//!
//! Every failure is scoped to one request; nothing here is process-fatal.

use thiserror::Error;

/// Failure modes of [`crate::checker::Checker::check`]
#[derive(Debug, Error)]
pub enum CheckError {
    /// Input text missing or empty. A client error; no scan runs.
    #[error("text is required")]
    InvalidInput,

    /// The external annotator call failed or its output did not validate.
    ///
    /// Deliberately opaque: the short code does not distinguish a transport
    /// fault from a schema violation. The source chain carries the detail
    /// for logs.
    #[error("analysis_failed")]
    AnnotationFailure(#[source] anyhow::Error),
}

impl CheckError {
    /// Short stable error code for callers that surface errors over a wire
    pub fn code(&self) -> &'static str {
        match self {
            CheckError::InvalidInput => "text_required",
            CheckError::AnnotationFailure(_) => "analysis_failed",
        }
    }

    /// True for errors caused by the caller rather than the pipeline
    pub fn is_client_error(&self) -> bool {
        matches!(self, CheckError::InvalidInput)
    }
}
