//! Error types shared across the crate.
//!
//! Two kinds are kept deliberately distinct:
//! - [`ValidationError`]: the caller handed us something malformed. These
//!   are raised synchronously and are fixable at the call site.
//! - [`RuntimeFailure`]: a transform file could not be read or written.
//!   The underlying cause is preserved as the error source.
use std::path::PathBuf;
use thiserror::Error;

/// Caller-side input problems detected before any state is touched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("transform has dimension {found}, only 2D transforms are supported")]
    UnsupportedDimension { found: usize },

    #[error("scaling factors must be a scalar or two values, got {len}")]
    BadScalingFactorShape { len: usize },

    #[error("transform parameter vector has {found} entries, need at least {needed}")]
    ShortParameterVector { found: usize, needed: usize },

    #[error("transform fixed parameters have {found} entries, need at least {needed}")]
    ShortFixedParameters { found: usize, needed: usize },

    #[error("multiscale image has no level `{label}`")]
    UnknownScaleLevel { label: String },

    #[error("scale ratio matrix between levels is singular")]
    SingularRatioMatrix,
}

/// Failure surfaced while reading or writing a transform file.
///
/// Wraps the underlying cause unchanged; the message names the operation
/// and the path involved.
#[derive(Debug, Error)]
#[error("{context} ({})", .path.display())]
pub struct RuntimeFailure {
    context: String,
    path: PathBuf,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl RuntimeFailure {
    pub fn new(
        context: impl Into<String>,
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            context: context.into(),
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Path of the transform file involved in the failed operation.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Runtime(#[from] RuntimeFailure),
}

pub type Result<T> = std::result::Result<T, Error>;
