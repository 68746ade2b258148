//! `tools/docs/links.toml` schema.

use doc_links::{normalize_path, LinkConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Link validation settings for a workspace.
///
/// Dialect options (`document_suffixes`, `stripped_punctuation`, `network_schemes`,
/// `anchor_attributes`, `skip_fenced_code`, `workspace_root`) sit at the top level of the file
/// and are passed straight to [`LinkConfig`].
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocsLinksConfig {
    /// Directories scanned for documents, relative to the workspace root.
    pub docs_roots: Vec<PathBuf>,
    /// Path fragments of retired directory layouts, called out in report recommendations.
    pub legacy_prefixes: Vec<String>,
    /// Markdown report written on every run when set.
    pub report_output: Option<PathBuf>,
    /// JSON results written on every run when set.
    pub json_output: Option<PathBuf>,
    /// Core validator options.
    #[serde(flatten)]
    pub links: LinkConfig,
}

impl Default for DocsLinksConfig {
    fn default() -> Self {
        Self {
            docs_roots: vec![PathBuf::from("docs")],
            legacy_prefixes: Vec::new(),
            report_output: None,
            json_output: None,
            links: LinkConfig::default(),
        }
    }
}

impl DocsLinksConfig {
    /// Core configuration with the workspace root anchored at `root`.
    ///
    /// An unset root means `root` itself; a relative one is taken relative to `root`.
    pub fn link_config(&self, root: &Path) -> LinkConfig {
        let mut links = self.links.clone();
        links.workspace_root = if links.workspace_root.as_os_str().is_empty() {
            root.to_path_buf()
        } else {
            normalize_path(&root.join(&links.workspace_root))
        };
        links
    }

    /// Absolute document roots to scan.
    pub fn absolute_docs_roots(&self, root: &Path) -> Vec<PathBuf> {
        self.docs_roots
            .iter()
            .map(|dir| normalize_path(&root.join(dir)))
            .collect()
    }
}
