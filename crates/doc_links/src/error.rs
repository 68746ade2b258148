//! Construction-time errors.
//!
//! Per-reference problems are never errors; they are reported as [`Verdict`](crate::Verdict)
//! values. Only an unusable [`LinkConfig`](crate::LinkConfig) fails.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a [`LinkValidator`](crate::LinkValidator).
#[derive(Debug, Error)]
pub enum LinkError {
    /// No document suffix was configured, so no reference could ever match.
    #[error("at least one document suffix must be configured")]
    NoDocumentSuffixes,
    /// Root-relative targets need an absolute anchor.
    #[error("workspace root `{}` must be an absolute path", .0.display())]
    RelativeWorkspaceRoot(PathBuf),
    /// A pattern derived from the configuration failed to compile.
    #[error("failed to build {what} pattern: {source}")]
    Pattern {
        /// Which pattern failed.
        what: &'static str,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// Convenience result type for construction-time operations.
pub type LinkResult<T> = Result<T, LinkError>;
