//! Validation pass orchestration.

use crate::config::LinkConfig;
use crate::error::{LinkError, LinkResult};
use crate::extract::ReferenceExtractor;
use crate::label::LabelCanonicalizer;
use crate::model::{Document, UnreadableSource, ValidationPass, ValidationResult};
use crate::resolve::PathResolver;
use crate::target::TargetValidator;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Runs extraction, resolution and target validation over a set of documents.
///
/// One validator corresponds to one pass: the target label cache lives as long as the
/// validator, so construct a fresh one to observe edits made between runs.
#[derive(Debug)]
pub struct LinkValidator {
    config: LinkConfig,
    extractor: ReferenceExtractor,
    resolver: PathResolver,
    targets: TargetValidator,
}

impl LinkValidator {
    /// Build a validator from explicit configuration.
    pub fn new(config: LinkConfig) -> LinkResult<Self> {
        if !config.workspace_root.is_absolute() {
            return Err(LinkError::RelativeWorkspaceRoot(
                config.workspace_root.clone(),
            ));
        }
        let extractor =
            ReferenceExtractor::new(&config.document_suffixes, config.skip_fenced_code)?;
        let resolver = PathResolver::new(config.workspace_root.clone());
        let labels = LabelCanonicalizer::new(config.stripped_punctuation.iter().copied());
        let targets =
            TargetValidator::new(labels, &config.anchor_attributes, config.skip_fenced_code)?;
        Ok(Self {
            config,
            extractor,
            resolver,
            targets,
        })
    }

    /// Configuration this validator was built with.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Path resolver in use.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Number of distinct target files whose labels this validator has loaded.
    pub fn cached_targets(&self) -> usize {
        self.targets.cached_targets()
    }

    /// Validate every internal reference in one document.
    ///
    /// Results come back in line order. Network-addressed targets are dropped before resolution.
    pub fn validate_document(&self, path: &Path, content: &str) -> Vec<ValidationResult> {
        let _span = tracing::debug_span!("document", path = %path.display()).entered();
        let results: Vec<_> = self
            .extractor
            .extract(content)
            .filter(|reference| !self.config.is_network_target(&reference.target))
            .map(|reference| {
                let resolved = self.resolver.resolve(path, &reference.target);
                let verdict = self
                    .targets
                    .validate(&resolved.path, resolved.label.as_deref());
                ValidationResult {
                    source: path.to_path_buf(),
                    line: reference.line,
                    text: reference.text,
                    target: reference.target,
                    resolved: resolved.path,
                    verdict,
                }
            })
            .collect();
        tracing::debug!(references = results.len(), "validated document");
        results
    }

    /// Validate already-loaded documents in parallel and return sorted results.
    pub fn validate_documents<I>(&self, documents: I) -> Vec<ValidationResult>
    where
        I: IntoParallelIterator<Item = Document>,
    {
        let mut results: Vec<_> = documents
            .into_par_iter()
            .flat_map_iter(|doc| self.validate_document(&doc.path, &doc.content))
            .collect();
        sort_results(&mut results);
        results
    }

    /// Read and validate documents from disk in parallel.
    ///
    /// Each worker loads its own document and drops it once validated, so only in-flight
    /// documents are held in memory. Unreadable sources are recorded and skipped.
    pub fn validate_files(&self, paths: &[PathBuf]) -> ValidationPass {
        let outcomes: Vec<Result<Vec<ValidationResult>, UnreadableSource>> = paths
            .par_iter()
            .map(|path| match fs::read_to_string(path) {
                Ok(content) => Ok(self.validate_document(path, &content)),
                Err(err) => {
                    tracing::warn!(source = %path.display(), "failed to read document: {err}");
                    Err(UnreadableSource {
                        path: path.clone(),
                        error: err.to_string(),
                    })
                }
            })
            .collect();

        let mut pass = ValidationPass::default();
        for outcome in outcomes {
            match outcome {
                Ok(results) => pass.results.extend(results),
                Err(unreadable) => pass.unreadable.push(unreadable),
            }
        }
        sort_results(&mut pass.results);
        pass.unreadable.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::info!(
            documents = paths.len(),
            references = pass.results.len(),
            cached_targets = self.targets.cached_targets(),
            "validation pass complete"
        );
        pass
    }
}

/// Stable sort by source path, then line; references on the same line keep their order.
fn sort_results(results: &mut [ValidationResult]) {
    results.sort_by(|a, b| (&a.source, a.line).cmp(&(&b.source, b.line)));
}
