//! Line-oriented reference extraction.

use crate::error::{LinkError, LinkResult};
use crate::model::Reference;
use regex::Regex;
use std::collections::VecDeque;
use std::io::BufRead;
use std::iter::Enumerate;
use std::str::Lines;

/// Finds `[display](target.md#label)` references in text.
///
/// Matching is per line: a reference split across two lines is never reported. The target must
/// end with one of the configured document suffixes, optionally followed by a `#label` fragment.
#[derive(Clone, Debug)]
pub struct ReferenceExtractor {
    pattern: Regex,
    skip_fenced_code: bool,
}

impl ReferenceExtractor {
    /// Build an extractor recognizing targets that end with any of `suffixes`.
    pub fn new<S: AsRef<str>>(suffixes: &[S], skip_fenced_code: bool) -> LinkResult<Self> {
        if suffixes.is_empty() {
            return Err(LinkError::NoDocumentSuffixes);
        }
        let alternatives = suffixes
            .iter()
            .map(|s| regex::escape(s.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"\[([^\]\n]+)\]\(([^)\n]*?(?:{alternatives})(?:#[^)\n]*)?)\)"
        ))
        .map_err(|source| LinkError::Pattern {
            what: "reference",
            source,
        })?;
        Ok(Self {
            pattern,
            skip_fenced_code,
        })
    }

    /// Lazily iterate the references in `text`, in line order.
    ///
    /// Each call starts a fresh scan, and the returned iterator can be cloned to replay the
    /// remaining sequence.
    pub fn extract<'a>(&'a self, text: &'a str) -> References<'a> {
        References {
            extractor: self,
            lines: text.lines().enumerate(),
            pending: VecDeque::new(),
            in_fence: false,
        }
    }

    /// Extract references from a stream, reading one line at a time.
    pub fn extract_from_reader<R: BufRead>(&self, reader: R) -> std::io::Result<Vec<Reference>> {
        let mut out = Vec::new();
        let mut in_fence = false;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if self.skips_line(&line, &mut in_fence) {
                continue;
            }
            out.extend(self.scan_line(idx + 1, &line));
        }
        Ok(out)
    }

    fn skips_line(&self, line: &str, in_fence: &mut bool) -> bool {
        if !self.skip_fenced_code {
            return false;
        }
        if is_fence_delimiter(line) {
            *in_fence = !*in_fence;
            return true;
        }
        *in_fence
    }

    fn scan_line<'l>(&'l self, line_no: usize, line: &'l str) -> impl Iterator<Item = Reference> + 'l {
        self.pattern.captures_iter(line).map(move |caps| Reference {
            line: line_no,
            text: caps[1].to_string(),
            target: caps[2].to_string(),
        })
    }
}

/// Lazy iterator returned by [`ReferenceExtractor::extract`].
#[derive(Clone, Debug)]
pub struct References<'a> {
    extractor: &'a ReferenceExtractor,
    lines: Enumerate<Lines<'a>>,
    pending: VecDeque<Reference>,
    in_fence: bool,
}

impl Iterator for References<'_> {
    type Item = Reference;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(reference) = self.pending.pop_front() {
                return Some(reference);
            }
            let (idx, line) = self.lines.next()?;
            if self.extractor.skips_line(line, &mut self.in_fence) {
                continue;
            }
            self.pending.extend(self.extractor.scan_line(idx + 1, line));
        }
    }
}

/// Returns whether `line` opens or closes a fenced code block.
pub(crate) fn is_fence_delimiter(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extractor() -> ReferenceExtractor {
        ReferenceExtractor::new(&[".md"], false).expect("extractor")
    }

    fn reference(line: usize, text: &str, target: &str) -> Reference {
        Reference {
            line,
            text: text.into(),
            target: target.into(),
        }
    }

    #[test]
    fn extracts_references_with_line_numbers_in_order() {
        let text = "# Guide\n\
                    See [Setup](../setup/install.md) and [Env](../setup/install.md#configure-env).\n\
                    \n\
                    Back to [home](/docs/index.md).\n";
        let found: Vec<_> = extractor().extract(text).collect();
        assert_eq!(
            found,
            vec![
                reference(2, "Setup", "../setup/install.md"),
                reference(2, "Env", "../setup/install.md#configure-env"),
                reference(4, "home", "/docs/index.md"),
            ]
        );
    }

    #[test]
    fn ignores_targets_without_document_suffix() {
        let text = "[site](https://example.com) [image](logo.png) [near](guide.mdx) [dir](guide/)";
        assert_eq!(extractor().extract(text).count(), 0);
    }

    #[test]
    fn network_document_targets_are_still_extracted() {
        let text = "[remote](https://example.com/readme.md)";
        let found: Vec<_> = extractor().extract(text).collect();
        assert_eq!(found, vec![reference(1, "remote", "https://example.com/readme.md")]);
    }

    #[test]
    fn never_matches_across_lines() {
        let text = "[split\ntext](guide.md)\n[text]\n(guide.md)";
        assert_eq!(extractor().extract(text).count(), 0);
    }

    #[test]
    fn extraction_restarts_on_each_call() {
        let ex = extractor();
        let text = "[a](a.md)\n[b](b.md)";
        let mut first = ex.extract(text);
        assert_eq!(first.next().map(|r| r.target), Some("a.md".to_string()));
        let replay = first.clone();
        assert_eq!(replay.map(|r| r.target).collect::<Vec<_>>(), vec!["b.md"]);
        assert_eq!(ex.extract(text).count(), 2);
    }

    #[test]
    fn fenced_code_is_skipped_only_when_configured() {
        let text = "```md\n[inside](inside.md)\n```\n[outside](outside.md)";
        assert_eq!(extractor().extract(text).count(), 2);

        let fenced = ReferenceExtractor::new(&[".md"], true).expect("extractor");
        let found: Vec<_> = fenced.extract(text).collect();
        assert_eq!(found, vec![reference(4, "outside", "outside.md")]);
    }

    #[test]
    fn reader_variant_matches_text_variant() {
        let text = "intro\n[One](one.md#top) [Two](two.md)\n";
        let ex = extractor();
        let streamed = ex
            .extract_from_reader(std::io::Cursor::new(text))
            .expect("read");
        assert_eq!(streamed, ex.extract(text).collect::<Vec<_>>());
    }

    #[test]
    fn multiple_suffixes_are_supported() {
        let ex = ReferenceExtractor::new(&[".md", ".markdown"], false).expect("extractor");
        let text = "[a](a.markdown#x) [b](b.md)";
        assert_eq!(ex.extract(text).count(), 2);
    }

    #[test]
    fn empty_suffix_list_is_rejected() {
        let err = ReferenceExtractor::new::<&str>(&[], false).expect_err("no suffixes");
        assert!(matches!(err, LinkError::NoDocumentSuffixes));
    }
}
