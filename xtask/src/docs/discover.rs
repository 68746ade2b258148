//! Document discovery under the configured docs roots.

use crate::runtime::error::XtaskResult;
use doc_links::normalize_path;
use std::collections::BTreeSet;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Collect every file under `roots` whose name ends with one of `suffixes`.
///
/// Missing roots are skipped. The result is sorted and free of duplicates, so overlapping roots
/// do not validate a document twice.
pub fn collect_documents<S: AsRef<str>>(
    roots: &[PathBuf],
    suffixes: &[S],
) -> XtaskResult<Vec<PathBuf>> {
    let mut out = BTreeSet::new();

    for root in roots {
        if !root.exists() {
            tracing::debug!(root = %root.display(), "docs root missing; skipping");
            continue;
        }
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if suffixes.iter().any(|s| name.ends_with(s.as_ref())) {
                out.insert(normalize_path(entry.path()));
            }
        }
    }

    Ok(out.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn collects_matching_files_recursively_in_sorted_order() {
        let root = TempDir::new().expect("temp root");
        let docs = root.path().join("docs");
        for rel in ["b.md", "a/nested.md", "a/image.png", "z/notes.markdown"] {
            let path = docs.join(rel);
            fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            fs::write(path, "x").expect("write");
        }

        let found = collect_documents(&[docs.clone(), docs.join("a")], &[".md"]).expect("collect");
        assert_eq!(found, vec![docs.join("a/nested.md"), docs.join("b.md")]);
    }

    #[test]
    fn missing_roots_are_skipped() {
        let root = TempDir::new().expect("temp root");
        let found = collect_documents(&[root.path().join("absent")], &[".md"]).expect("collect");
        assert!(found.is_empty());
    }
}
