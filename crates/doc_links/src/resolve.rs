//! Raw reference target to absolute file path resolution.

use crate::model::ResolvedTarget;
use std::path::{Component, Path, PathBuf};

/// Resolves raw targets against a source document or the workspace root.
///
/// A file part starting with `/` is root-relative; anything else is relative to the directory
/// containing the source document. Results are normalized lexically, so resolution never touches
/// the filesystem and the same input always yields the same output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResolver {
    workspace_root: PathBuf,
}

impl PathResolver {
    /// Create a resolver anchored at `workspace_root`.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: normalize_path(&workspace_root.into()),
        }
    }

    /// Workspace root used for root-relative targets.
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Resolve `raw_target` as written in `source`.
    pub fn resolve(&self, source: &Path, raw_target: &str) -> ResolvedTarget {
        let (file_part, label) = split_target(raw_target);

        let path = if let Some(rooted) = file_part.strip_prefix('/') {
            self.workspace_root.join(rooted.trim_start_matches('/'))
        } else if file_part.is_empty() {
            source.to_path_buf()
        } else {
            let base = source
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.workspace_root.clone());
            base.join(file_part)
        };

        ResolvedTarget {
            path: normalize_path(&path),
            label,
        }
    }
}

/// Split a target on the first `#` into its file part and non-empty label.
pub fn split_target(target: &str) -> (&str, Option<String>) {
    match target.split_once('#') {
        Some((path, label)) if !label.is_empty() => (path, Some(label.to_string())),
        Some((path, _)) => (path, None),
        None => (target, None),
    }
}

/// Collapse `.` and `..` components without consulting the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => {
                has_root = true;
                out.push(Path::new("/"));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let at_relative_floor = matches!(
                    out.components().next_back(),
                    None | Some(Component::ParentDir)
                );
                if at_relative_floor && !has_root {
                    out.push("..");
                } else {
                    out.pop();
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }

    out
}

/// Render `path` relative to `root` with `/` separators, for reports.
///
/// Paths outside `root` keep their absolute form so they cannot be mistaken for workspace files.
pub fn rel_posix(root: &Path, path: &Path) -> String {
    let (rel, absolute) = match path.strip_prefix(root) {
        Ok(rel) => (rel, false),
        Err(_) => (path, path.has_root()),
    };
    let joined = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::CurDir => Some(".".to_string()),
            Component::ParentDir => Some("..".to_string()),
            Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}
