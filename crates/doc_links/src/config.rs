//! Construction-time configuration for a validation pass.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Characters removed from heading text before it is turned into a label.
pub const DEFAULT_STRIPPED_PUNCTUATION: &[char] = &['(', ')', ':', '/'];

/// Target prefixes treated as network-addressed and excluded from validation.
pub const DEFAULT_NETWORK_SCHEMES: &[&str] = &["http://", "https://"];

/// File suffixes a reference target must end with to be considered a document reference.
pub const DEFAULT_DOCUMENT_SUFFIXES: &[&str] = &[".md"];

/// Attribute names whose quoted value declares an explicit anchor.
pub const DEFAULT_ANCHOR_ATTRIBUTES: &[&str] = &["id"];

/// Explicit configuration for [`LinkValidator`](crate::LinkValidator).
///
/// All dialect knobs live here so a pass never depends on process-wide state. The struct
/// deserializes with every field optional, which lets the CLI embed it directly in its TOML file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinkConfig {
    /// Absolute directory that root-relative targets (`/docs/x.md`) resolve against.
    pub workspace_root: PathBuf,
    /// Suffixes that identify document targets, e.g. `.md`.
    pub document_suffixes: Vec<String>,
    /// Characters stripped from headings and labels before comparison.
    pub stripped_punctuation: BTreeSet<char>,
    /// Prefixes that mark a target as network-addressed.
    pub network_schemes: Vec<String>,
    /// Attribute names recognized as explicit anchor declarations.
    pub anchor_attributes: Vec<String>,
    /// Ignore references and headings inside fenced code blocks.
    pub skip_fenced_code: bool,
}

impl LinkConfig {
    /// Default configuration rooted at `workspace_root`.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            ..Self::default()
        }
    }

    /// Returns whether `raw_target` is network-addressed: it starts with one of the configured
    /// schemes (ASCII case-insensitive) or is a `//host/...` network-path reference.
    pub fn is_network_target(&self, raw_target: &str) -> bool {
        if raw_target.starts_with("//") {
            return true;
        }
        self.network_schemes.iter().any(|scheme| {
            raw_target
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        })
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::new(),
            document_suffixes: DEFAULT_DOCUMENT_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            stripped_punctuation: DEFAULT_STRIPPED_PUNCTUATION.iter().copied().collect(),
            network_schemes: DEFAULT_NETWORK_SCHEMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            anchor_attributes: DEFAULT_ANCHOR_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skip_fenced_code: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_targets_match_configured_prefixes_only() {
        let config = LinkConfig::new("/workspace");
        assert!(config.is_network_target("https://example.com/guide.md"));
        assert!(config.is_network_target("http://example.com/guide.md"));
        assert!(!config.is_network_target("guide/https.md"));
        assert!(!config.is_network_target("/docs/guide.md"));
    }

    #[test]
    fn network_path_and_uppercase_schemes_are_network_targets() {
        let config = LinkConfig::default();
        assert!(config.is_network_target("//example.com/guide.md"));
        assert!(config.is_network_target("HTTPS://example.com/guide.md"));
        assert!(config.is_network_target("Http://example.com/guide.md"));
        assert!(!config.is_network_target("/example.com/guide.md"));
        assert!(!config.is_network_target("ht.md"));
    }

    #[test]
    fn default_strips_parentheses_colons_and_slashes() {
        let config = LinkConfig::default();
        let expected: BTreeSet<char> = ['(', ')', ':', '/'].into_iter().collect();
        assert_eq!(config.stripped_punctuation, expected);
        assert!(!config.skip_fenced_code);
    }
}
