//! Artifact path management for xtask workflows.

use crate::runtime::error::{XtaskError, XtaskResult};
use std::fs;
use std::path::{Path, PathBuf};

const LINKS_REPORT: &str = ".artifacts/docs/link-validation-report.md";
const LINKS_AUDIT: &str = ".artifacts/docs/link-validation.json";

/// Central artifact path policy for xtask.
///
/// Keeps workspace-relative output locations consistent across commands. Commands should use it
/// instead of hard-coding joins from `ctx.root()`.
#[derive(Clone, Debug)]
pub struct ArtifactManager {
    root: PathBuf,
}

impl ArtifactManager {
    /// Create an artifact manager rooted at the workspace.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve a possibly-relative workspace path.
    ///
    /// Absolute paths are preserved, while relative paths are anchored to the workspace root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Default markdown link report location.
    pub fn links_report(&self) -> PathBuf {
        self.root.join(LINKS_REPORT)
    }

    /// Default JSON link audit location.
    pub fn links_audit(&self) -> PathBuf {
        self.root.join(LINKS_AUDIT)
    }

    /// Write `body` to `path`, creating parent directories as needed.
    pub fn write_text(&self, path: &Path, body: &str) -> XtaskResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                XtaskError::io(format!("failed to create {}: {err}", parent.display()))
            })?;
        }
        fs::write(path, body)
            .map_err(|err| XtaskError::io(format!("failed to write {}: {err}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_outputs_live_under_artifacts() {
        let root = PathBuf::from("/tmp/xtask-artifacts-root");
        let manager = ArtifactManager::new(root.clone());
        assert_eq!(
            manager.links_report(),
            root.join(".artifacts/docs/link-validation-report.md")
        );
        assert_eq!(
            manager.links_audit(),
            root.join(".artifacts/docs/link-validation.json")
        );
    }

    #[test]
    fn write_text_creates_missing_parents() {
        let root = TempDir::new().expect("temp root");
        let manager = ArtifactManager::new(root.path().to_path_buf());
        let target = root.path().join("nested/output/report.md");
        manager.write_text(&target, "# Report\n").expect("write");
        assert_eq!(fs::read_to_string(target).expect("read"), "# Report\n");
    }

    #[test]
    fn resolve_path_keeps_absolute_and_expands_relative() {
        let root = PathBuf::from("/tmp/xtask-artifacts-root");
        let manager = ArtifactManager::new(root.clone());
        assert_eq!(
            manager.resolve_path(Path::new("nested/output.json")),
            root.join("nested/output.json")
        );
        assert_eq!(
            manager.resolve_path(Path::new("/tmp/already-absolute.json")),
            PathBuf::from("/tmp/already-absolute.json")
        );
    }
}
