//! Internal cross-reference validation for markdown document trees.
//!
//! A pass takes a set of documents, finds every `[text](target.md#label)` reference, resolves the
//! target against the source document (or the workspace root for `/`-prefixed targets) and checks
//! that the file exists and, when a label is given, that a heading or explicit anchor declares it.
//!
//! Discovery of documents, report rendering and exit-status policy are left to callers; the
//! `xtask docs links` command is the in-tree consumer.
//!
//! ```rust,no_run
//! use doc_links::{LinkConfig, LinkValidator};
//! use std::path::PathBuf;
//!
//! let validator = LinkValidator::new(LinkConfig::new("/workspace"))?;
//! let pass = validator.validate_files(&[PathBuf::from("/workspace/docs/index.md")]);
//! for broken in pass.results.iter().filter(|r| r.verdict.is_broken()) {
//!     println!("{}:{} {}", broken.source.display(), broken.line, broken.target);
//! }
//! # Ok::<(), doc_links::LinkError>(())
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod extract;
pub mod label;
pub mod model;
pub mod resolve;
pub mod target;
pub mod validator;

pub use config::LinkConfig;
pub use error::{LinkError, LinkResult};
pub use extract::{ReferenceExtractor, References};
pub use label::LabelCanonicalizer;
pub use model::{
    Document, MissingReason, Reference, ResolvedTarget, UnreadableSource, ValidationPass,
    ValidationResult, Verdict,
};
pub use resolve::{normalize_path, rel_posix, split_target, PathResolver};
pub use target::{LabelIndex, TargetValidator};
pub use validator::LinkValidator;
