//! Target existence and label presence checks.

use crate::error::{LinkError, LinkResult};
use crate::extract::is_fence_delimiter;
use crate::label::LabelCanonicalizer;
use crate::model::{MissingReason, Verdict};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Labels a target document declares.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelIndex {
    /// Canonicalized heading labels.
    pub headings: HashSet<String>,
    /// Explicit anchor identifiers, verbatim.
    pub anchors: HashSet<String>,
}

impl LabelIndex {
    /// Returns whether `raw_label` is satisfied by a heading or an explicit anchor.
    ///
    /// Headings compare canonicalized forms; anchors compare the raw label literally.
    pub fn contains(&self, labels: &LabelCanonicalizer, raw_label: &str) -> bool {
        let wanted = labels.canonicalize(raw_label);
        (!wanted.is_empty() && self.headings.contains(&wanted)) || self.anchors.contains(raw_label)
    }
}

type CachedIndex = Arc<Result<LabelIndex, String>>;

/// Checks resolved targets on disk.
///
/// Label indexes are parsed at most once per target path for the lifetime of the validator and
/// shared between worker threads.
#[derive(Debug)]
pub struct TargetValidator {
    labels: LabelCanonicalizer,
    heading: Regex,
    anchor: Option<Regex>,
    skip_fenced_code: bool,
    cache: RwLock<HashMap<PathBuf, CachedIndex>>,
}

impl TargetValidator {
    /// Create a validator. `anchor_attributes` lists attribute names (e.g. `id`) whose quoted
    /// value declares an explicit anchor.
    pub fn new<S: AsRef<str>>(
        labels: LabelCanonicalizer,
        anchor_attributes: &[S],
        skip_fenced_code: bool,
    ) -> LinkResult<Self> {
        let heading = Regex::new(r"^#+\s+(.+)$").map_err(|source| LinkError::Pattern {
            what: "heading",
            source,
        })?;
        let anchor = if anchor_attributes.is_empty() {
            None
        } else {
            let names = anchor_attributes
                .iter()
                .map(|a| regex::escape(a.as_ref()))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r#"\b(?:{names})="([^"]*)"|\b(?:{names})='([^']*)'"#);
            Some(Regex::new(&pattern).map_err(|source| LinkError::Pattern {
                what: "anchor",
                source,
            })?)
        };
        Ok(Self {
            labels,
            heading,
            anchor,
            skip_fenced_code,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Canonicalizer used for heading comparison.
    pub fn labels(&self) -> &LabelCanonicalizer {
        &self.labels
    }

    /// Validate a resolved target path and optional raw label.
    pub fn validate(&self, path: &Path, label: Option<&str>) -> Verdict {
        if !path.exists() {
            return Verdict::FileMissing {
                reason: MissingReason::NotFound,
            };
        }
        let Some(label) = label.filter(|l| !l.is_empty()) else {
            return Verdict::Valid;
        };

        match &*self.index_for(path) {
            Err(err) => Verdict::FileMissing {
                reason: MissingReason::Unreadable(err.clone()),
            },
            Ok(index) if index.contains(&self.labels, label) => Verdict::Valid,
            Ok(_) => Verdict::LabelMissing {
                label: label.to_string(),
            },
        }
    }

    /// Build the label index for already-loaded content.
    pub fn index_content(&self, content: &str) -> LabelIndex {
        let mut index = LabelIndex::default();
        let mut in_fence = false;

        for line in content.lines() {
            if self.skip_fenced_code && is_fence_delimiter(line) {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            if let Some(caps) = self.heading.captures(line) {
                let label = self.labels.canonicalize(caps[1].trim());
                if !label.is_empty() {
                    index.headings.insert(label);
                }
            }
        }

        if let Some(anchor) = &self.anchor {
            for caps in anchor.captures_iter(content) {
                if let Some(id) = caps.get(1).or_else(|| caps.get(2)) {
                    index.anchors.insert(id.as_str().to_string());
                }
            }
        }

        index
    }

    fn index_for(&self, path: &Path) -> CachedIndex {
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
        {
            return Arc::clone(hit);
        }

        let loaded = match fs::read_to_string(path) {
            Ok(content) => Ok(self.index_content(&content)),
            Err(err) => {
                tracing::warn!(path = %path.display(), "failed to read link target: {err}");
                Err(err.to_string())
            }
        };

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            cache
                .entry(path.to_path_buf())
                .or_insert_with(|| Arc::new(loaded)),
        )
    }

    /// Number of target files whose labels have been loaded.
    pub fn cached_targets(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn validator() -> TargetValidator {
        TargetValidator::new(LabelCanonicalizer::default(), &["id"], false).expect("validator")
    }

    #[test]
    fn missing_file_wins_over_label() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("absent.md");
        let missing = Verdict::FileMissing {
            reason: MissingReason::NotFound,
        };
        assert_eq!(validator().validate(&path, None), missing);
        assert_eq!(validator().validate(&path, Some("anything")), missing);
    }

    #[test]
    fn existing_file_without_label_is_valid_regardless_of_content() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("empty.md");
        fs::write(&path, "").expect("write");
        assert_eq!(validator().validate(&path, None), Verdict::Valid);
        assert_eq!(validator().validate(&path, Some("")), Verdict::Valid);
    }

    #[test]
    fn heading_match_is_case_and_whitespace_insensitive() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("install.md");
        fs::write(&path, "# Install\n\n## Configure Env\n\ntext\n").expect("write");
        let v = validator();
        assert_eq!(v.validate(&path, Some("configure-env")), Verdict::Valid);
        assert_eq!(v.validate(&path, Some("Configure-Env")), Verdict::Valid);
        assert_eq!(
            v.validate(&path, Some("missing-section")),
            Verdict::LabelMissing {
                label: "missing-section".into()
            }
        );
    }

    #[test]
    fn explicit_anchor_matches_literally() {
        let v = validator();
        let index = v.index_content("<a id=\"Custom_Anchor\"></a>\n<span id='other'></span>\n");
        assert!(index.contains(v.labels(), "Custom_Anchor"));
        assert!(index.contains(v.labels(), "other"));
        assert!(!index.contains(v.labels(), "custom_anchor"));
    }

    #[test]
    fn headings_need_whitespace_after_markers() {
        let v = validator();
        let index = v.index_content("#hashtag\n### Real Heading\n");
        assert_eq!(
            index.headings,
            ["real-heading".to_string()].into_iter().collect::<HashSet<_>>()
        );
    }

    #[test]
    fn empty_canonical_label_never_matches() {
        let v = validator();
        let index = v.index_content("## (:)\n");
        assert!(index.headings.is_empty());
        assert!(!index.contains(v.labels(), ":"));
    }

    #[test]
    fn fenced_headings_are_ignored_when_configured() {
        let fenced =
            TargetValidator::new(LabelCanonicalizer::default(), &["id"], true).expect("validator");
        let index = fenced.index_content("```md\n## Inside\n```\n## Outside\n");
        assert!(index.contains(fenced.labels(), "outside"));
        assert!(!index.contains(fenced.labels(), "inside"));
    }

    #[test]
    fn unreadable_target_degrades_to_file_missing() {
        let dir = TempDir::new().expect("tempdir");
        let verdict = validator().validate(dir.path(), Some("section"));
        assert!(matches!(
            verdict,
            Verdict::FileMissing {
                reason: MissingReason::Unreadable(_)
            }
        ));
    }

    #[test]
    fn label_index_is_loaded_once_per_target() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("a.md");
        fs::write(&path, "## One\n").expect("write");
        let v = validator();
        assert_eq!(v.validate(&path, Some("one")), Verdict::Valid);
        fs::write(&path, "## Two\n").expect("rewrite");
        assert_eq!(
            v.validate(&path, Some("two")),
            Verdict::LabelMissing { label: "two".into() }
        );
        assert_eq!(v.cached_targets(), 1);
    }
}
