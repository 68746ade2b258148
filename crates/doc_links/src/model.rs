//! Value types produced and consumed by a validation pass.

use serde::Serialize;
use std::path::PathBuf;

/// A document to validate: an absolute path and its text content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Absolute path of the document.
    pub path: PathBuf,
    /// Full text content, read once for the pass.
    pub content: String,
}

impl Document {
    /// Create a document from a path and its content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// One internal reference occurrence found in a line of text.
///
/// Extraction works on bare text, so a reference does not record its source document. The
/// validator pairs it with the source when building a [`ValidationResult`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// 1-based line number.
    pub line: usize,
    /// Text between the square brackets.
    pub text: String,
    /// Raw target between the parentheses, including any `#label` fragment.
    pub target: String,
}

/// Where a reference points after path resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    /// Normalized absolute path of the target file.
    pub path: PathBuf,
    /// Raw label fragment, when the target carried a non-empty one.
    pub label: Option<String>,
}

/// Why a target file counts as missing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MissingReason {
    /// Nothing exists at the resolved path.
    NotFound,
    /// The path exists but could not be read for label lookup.
    Unreadable(String),
}

/// Outcome of validating a single reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// Target file exists and any requested label was found.
    Valid,
    /// Target file does not exist or could not be read.
    FileMissing {
        /// Missing or unreadable.
        reason: MissingReason,
    },
    /// Target file exists but has no heading or anchor matching the label.
    LabelMissing {
        /// The label as written in the reference.
        label: String,
    },
}

impl Verdict {
    /// Returns whether the reference needs attention.
    pub fn is_broken(&self) -> bool {
        !matches!(self, Verdict::Valid)
    }
}

/// A fully validated reference with enough context to render a report entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Document containing the reference.
    pub source: PathBuf,
    /// 1-based line number within `source`.
    pub line: usize,
    /// Display text of the reference.
    pub text: String,
    /// Raw target string as written.
    pub target: String,
    /// Resolved absolute target path.
    pub resolved: PathBuf,
    /// Validation outcome.
    pub verdict: Verdict,
}

/// A source document that could not be read during [`LinkValidator::validate_files`](crate::LinkValidator::validate_files).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnreadableSource {
    /// Path that failed to load.
    pub path: PathBuf,
    /// Underlying I/O error message.
    pub error: String,
}

/// Everything produced by one validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationPass {
    /// Results sorted by source path, then line number.
    pub results: Vec<ValidationResult>,
    /// Source documents skipped because they could not be read, sorted by path.
    pub unreadable: Vec<UnreadableSource>,
}

impl ValidationPass {
    /// Number of references checked.
    pub fn checked(&self) -> usize {
        self.results.len()
    }

    /// Results whose target file is missing or unreadable.
    pub fn file_missing(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.verdict, Verdict::FileMissing { .. }))
    }

    /// Results whose target file exists but lacks the requested label.
    pub fn label_missing(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.verdict, Verdict::LabelMissing { .. }))
    }

    /// Returns whether every reference was valid and every source was readable.
    pub fn is_clean(&self) -> bool {
        self.unreadable.is_empty() && !self.results.iter().any(|r| r.verdict.is_broken())
    }
}
