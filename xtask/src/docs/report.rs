//! Console, markdown, and JSON rendering of a link validation pass.

use crate::runtime::error::{XtaskError, XtaskResult};
use chrono::{DateTime, SecondsFormat, Utc};
use doc_links::{rel_posix, MissingReason, ValidationPass, ValidationResult, Verdict};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

/// One console-reportable issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub check: &'static str,
    pub path: String,
    pub message: String,
    pub line: Option<usize>,
}

impl Problem {
    fn new(
        check: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
        line: Option<usize>,
    ) -> Self {
        Self {
            check,
            path: path.into(),
            message: message.into(),
            line,
        }
    }
}

/// Convert a pass into console problems, with workspace-relative paths.
pub fn problems(root: &Path, pass: &ValidationPass) -> Vec<Problem> {
    let mut out: Vec<Problem> = pass
        .results
        .iter()
        .filter_map(|r| {
            let message = match &r.verdict {
                Verdict::Valid => return None,
                Verdict::FileMissing {
                    reason: MissingReason::NotFound,
                } => format!(
                    "broken link target `{}` (resolved `{}`)",
                    r.target,
                    rel_posix(root, &r.resolved)
                ),
                Verdict::FileMissing {
                    reason: MissingReason::Unreadable(err),
                } => format!(
                    "unreadable link target `{}` (resolved `{}`): {err}",
                    r.target,
                    rel_posix(root, &r.resolved)
                ),
                Verdict::LabelMissing { label } => format!(
                    "missing anchor `#{label}` in `{}`",
                    rel_posix(root, &r.resolved)
                ),
            };
            Some(Problem::new(
                "links",
                rel_posix(root, &r.source),
                message,
                Some(r.line),
            ))
        })
        .collect();

    out.extend(pass.unreadable.iter().map(|u| {
        Problem::new(
            "parse",
            rel_posix(root, &u.path),
            format!("failed to read document: {}", u.error),
            None,
        )
    }));
    out
}

/// Print problems in stable order and fail when any exist.
pub fn fail_if_problems(mut problems: Vec<Problem>) -> XtaskResult<()> {
    if problems.is_empty() {
        println!("OK");
        return Ok(());
    }
    problems.sort_by(|a, b| {
        (a.check, &a.path, a.line.unwrap_or(0), &a.message).cmp(&(
            b.check,
            &b.path,
            b.line.unwrap_or(0),
            &b.message,
        ))
    });
    for p in &problems {
        let loc = match p.line {
            Some(line) => format!("{}:{line}", p.path),
            None => p.path.clone(),
        };
        println!("[{}] {} - {}", p.check, loc, p.message);
    }
    println!("\nFAILED: {} issue(s)", problems.len());
    Err(XtaskError::validation("docs link validation failed")
        .with_hint("see the listed issues or the markdown report"))
}

/// Percentage of checked references that are valid, rounded down.
pub fn success_rate(pass: &ValidationPass) -> usize {
    let broken = pass.results.iter().filter(|r| r.verdict.is_broken()).count();
    100 - (broken * 100 / pass.checked().max(1))
}

/// Render the human-readable markdown report.
pub fn render_markdown(
    root: &Path,
    pass: &ValidationPass,
    documents: usize,
    legacy_prefixes: &[String],
    generated_at: DateTime<Utc>,
) -> String {
    let file_missing: Vec<_> = pass.file_missing().collect();
    let label_missing: Vec<_> = pass.label_missing().collect();
    let mut out = String::new();

    let _ = writeln!(out, "# Documentation Link Validation Report\n");
    let _ = writeln!(
        out,
        "**Generated**: {}\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    out.push_str("## Summary\n\n");
    let _ = writeln!(out, "- **Documents Scanned**: {documents}");
    let _ = writeln!(out, "- **Total Links Checked**: {}", pass.checked());
    let _ = writeln!(out, "- **Broken File Links**: {}", file_missing.len());
    let _ = writeln!(out, "- **Broken Anchor Links**: {}", label_missing.len());
    if !pass.unreadable.is_empty() {
        let _ = writeln!(out, "- **Unreadable Documents**: {}", pass.unreadable.len());
    }
    let _ = writeln!(out, "- **Success Rate**: {}%\n", success_rate(pass));

    if file_missing.is_empty() {
        out.push_str("## No Broken File Links Found\n\n");
    } else {
        out.push_str("## Broken File Links\n\n");
        out.push_str("These links point to files that don't exist:\n\n");
        for (source, links) in group_by_source(root, &file_missing) {
            let _ = writeln!(out, "### {source}\n");
            for link in links {
                let _ = writeln!(
                    out,
                    "- **Line {}**: `[{}]({})`",
                    link.line, link.text, link.target
                );
                let _ = writeln!(
                    out,
                    "  - Resolved to: `{}`",
                    rel_posix(root, &link.resolved)
                );
                let status = match &link.verdict {
                    Verdict::FileMissing {
                        reason: MissingReason::Unreadable(err),
                    } => format!("File unreadable ({err})"),
                    _ => "File not found".to_string(),
                };
                let _ = writeln!(out, "  - Status: {status}\n");
            }
        }
    }

    if label_missing.is_empty() {
        out.push_str("## No Broken Anchor Links Found\n\n");
    } else {
        out.push_str("## Broken Anchor Links\n\n");
        out.push_str("These links point to anchors that may not exist:\n\n");
        for (source, links) in group_by_source(root, &label_missing) {
            let _ = writeln!(out, "### {source}\n");
            for link in links {
                let _ = writeln!(
                    out,
                    "- **Line {}**: `[{}]({})`",
                    link.line, link.text, link.target
                );
                let _ = writeln!(
                    out,
                    "  - Target file: `{}`",
                    rel_posix(root, &link.resolved)
                );
                if let Verdict::LabelMissing { label } = &link.verdict {
                    let _ = writeln!(out, "  - Missing anchor: `#{label}`\n");
                }
            }
        }
    }

    if !pass.unreadable.is_empty() {
        out.push_str("## Unreadable Documents\n\n");
        for u in &pass.unreadable {
            let _ = writeln!(out, "- `{}`: {}", rel_posix(root, &u.path), u.error);
        }
        out.push('\n');
    }

    out.push_str("## Recommendations\n\n");
    if !file_missing.is_empty() {
        out.push_str("### Fix Broken File Links\n\n");
        let legacy = file_missing
            .iter()
            .filter(|r| legacy_prefixes.iter().any(|p| r.target.contains(p.as_str())))
            .count();
        if legacy > 0 {
            let prefixes = legacy_prefixes
                .iter()
                .map(|p| format!("`{p}`"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                out,
                "- **Old structure references** ({legacy}): links still point into retired directories: {prefixes}"
            );
        }
        let backtracking = file_missing
            .iter()
            .filter(|r| r.target.contains("../"))
            .count();
        if backtracking > 0 {
            let _ = writeln!(
                out,
                "- **Relative path issues** ({backtracking}): links using `../` that may need adjustment"
            );
        }
        out.push('\n');
    }
    if !label_missing.is_empty() {
        out.push_str("### Fix Broken Anchors\n\n");
        out.push_str(
            "Verify these sections exist in target files or update the anchor references.\n\n",
        );
    }
    if file_missing.is_empty() && label_missing.is_empty() {
        out.push_str("No action needed.\n\n");
    }

    out.push_str("## Next Steps\n\n");
    out.push_str("1. Review each broken link individually\n");
    out.push_str("2. Update links to point to the current structure\n");
    out.push_str("3. Verify anchor names match actual headings\n");
    out.push_str("4. Re-run `cargo xtask docs links` to confirm fixes\n");
    out
}

/// Machine-readable audit of a pass.
pub fn audit_json(
    root: &Path,
    pass: &ValidationPass,
    documents: usize,
    generated_at: DateTime<Utc>,
) -> Value {
    let entry = |r: &ValidationResult| {
        json!({
            "source": rel_posix(root, &r.source),
            "line": r.line,
            "text": r.text,
            "target": r.target,
            "resolved": rel_posix(root, &r.resolved),
            "verdict": r.verdict,
        })
    };
    json!({
        "generated_at": generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        "document_count": documents,
        "links_checked": pass.checked(),
        "broken_file_links": pass.file_missing().count(),
        "broken_anchor_links": pass.label_missing().count(),
        "success_rate": success_rate(pass),
        "unreadable_documents": pass
            .unreadable
            .iter()
            .map(|u| json!({ "path": rel_posix(root, &u.path), "error": u.error }))
            .collect::<Vec<_>>(),
        "results": pass.results.iter().map(entry).collect::<Vec<_>>(),
    })
}

fn group_by_source<'a>(
    root: &Path,
    results: &[&'a ValidationResult],
) -> BTreeMap<String, Vec<&'a ValidationResult>> {
    let mut grouped: BTreeMap<String, Vec<&ValidationResult>> = BTreeMap::new();
    for r in results {
        grouped.entry(rel_posix(root, &r.source)).or_default().push(r);
    }
    grouped
}
