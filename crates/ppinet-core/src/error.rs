//! Error taxonomy for the pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline failures. Non-fatal conditions (zero intermediates, zero
/// initial edges) are logged and collected as warnings instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input path does not exist.
    #[error("input path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Candidate and annotation sets are both empty after resolution.
    #[error("no usable input genes: candidate and annotation sets are both empty")]
    NoInputGenes,

    /// The working graph has zero edges after selection and expansion.
    #[error("working network has no edges after {stage}")]
    EmptyNetwork { stage: &'static str },

    /// A malformed row in the network file or an invalid schema string.
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
