//! Structured xtask error types.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// Stable error categories for xtask workflows.
///
/// Categories stay coarse so user-facing failures remain readable and map cleanly onto a
/// machine-readable summary later.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum XtaskErrorCategory {
    /// Invalid or unreadable configuration.
    Config,
    /// Missing or mismatched local environment prerequisites.
    Environment,
    /// Invalid user input.
    Usage,
    /// Checks ran and found problems in the workspace.
    Validation,
    /// Filesystem or general I/O failure.
    Io,
}

/// Structured xtask error with contextual metadata.
///
/// The formatted display output is CLI-friendly. Optional `operation`, `target`, and `hint`
/// fields can be attached as the error propagates so failures remain actionable where they are
/// shown.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XtaskError {
    /// High-level error category.
    pub category: XtaskErrorCategory,
    /// Human-readable message.
    pub message: String,
    /// Optional operation name.
    pub operation: Option<String>,
    /// Optional path target.
    pub target: Option<String>,
    /// Optional remediation hint.
    pub hint: Option<String>,
}

/// Convenience result type for xtask internals.
pub type XtaskResult<T> = Result<T, XtaskError>;

impl XtaskError {
    /// Create an error with the given category and message.
    pub fn new(category: XtaskErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            operation: None,
            target: None,
            hint: None,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Config, message)
    }

    /// Create an environment error.
    pub fn environment(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Environment, message)
    }

    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Usage, message)
    }

    /// Create a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Validation, message)
    }

    /// Create an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Io, message)
    }

    /// Attach an operation label.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attach a target path.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Process exit code for this error.
    ///
    /// Usage errors exit with `2`, everything else with `1`.
    pub fn exit_code(&self) -> u8 {
        match self.category {
            XtaskErrorCategory::Usage => 2,
            _ => 1,
        }
    }
}

impl Display for XtaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(operation) = &self.operation {
            write!(f, " [operation: {operation}]")?;
        }
        if let Some(target) = &self.target {
            write!(f, " [target: {target}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " [hint: {hint}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for XtaskError {}

impl From<std::io::Error> for XtaskError {
    fn from(value: std::io::Error) -> Self {
        XtaskError::io(value.to_string())
    }
}

impl From<walkdir::Error> for XtaskError {
    fn from(value: walkdir::Error) -> Self {
        let err = XtaskError::io(value.to_string());
        match value.path() {
            Some(path) => err.with_path(path),
            None => err,
        }
    }
}

impl From<doc_links::LinkError> for XtaskError {
    fn from(value: doc_links::LinkError) -> Self {
        XtaskError::config(value.to_string()).with_hint("check tools/docs/links.toml")
    }
}

impl From<clap::Error> for XtaskError {
    fn from(value: clap::Error) -> Self {
        let rendered = value.to_string();
        XtaskError::usage(
            rendered
                .trim_end()
                .trim_start_matches("error: ")
                .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_appends_context_fields() {
        let err = XtaskError::io("failed to write report")
            .with_operation("docs links")
            .with_path(Path::new("/tmp/report.md"))
            .with_hint("check permissions");
        assert_eq!(
            err.to_string(),
            "failed to write report [operation: docs links] [target: /tmp/report.md] [hint: check permissions]"
        );
    }

    #[test]
    fn usage_errors_exit_with_two() {
        assert_eq!(XtaskError::usage("bad flag").exit_code(), 2);
        assert_eq!(XtaskError::validation("broken links").exit_code(), 1);
    }

    #[test]
    fn link_config_errors_map_to_config_category() {
        let err = XtaskError::from(doc_links::LinkError::NoDocumentSuffixes);
        assert_eq!(err.category, XtaskErrorCategory::Config);
        assert!(err.hint.is_some());
    }
}
