use super::config::DocsLinksConfig;
use super::discover::collect_documents;
use super::report;
use crate::cli::LinksArgs;
use crate::runtime::config::ConfigLoader;
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;
use chrono::Utc;
use doc_links::{LinkValidator, ValidationPass};
use std::path::Path;

/// Outcome of a discovery + validation run, before anything is written.
pub(crate) struct LinkRun {
    pub config: DocsLinksConfig,
    pub documents: usize,
    pub pass: ValidationPass,
}

pub(crate) fn run_pass(ctx: &CommandContext, args: &LinksArgs) -> XtaskResult<LinkRun> {
    let loader = ConfigLoader::<DocsLinksConfig>::new(ctx.root(), &args.config);
    let mut config = loader.load_or_default()?;
    if !args.docs_roots.is_empty() {
        config.docs_roots = args.docs_roots.clone();
    }

    let roots = config.absolute_docs_roots(ctx.root());
    let documents = collect_documents(&roots, &config.links.document_suffixes)?;
    tracing::info!(
        roots = roots.len(),
        documents = documents.len(),
        "discovered documents"
    );

    let validator = LinkValidator::new(config.link_config(ctx.root()))?;
    let pass = validator.validate_files(&documents);
    Ok(LinkRun {
        config,
        documents: documents.len(),
        pass,
    })
}

/// `cargo xtask docs links`
pub(crate) fn validate(ctx: &CommandContext, args: &LinksArgs) -> XtaskResult<()> {
    let run = run_pass(ctx, args)?;
    println!("Documents scanned: {}", run.documents);
    println!("Links checked: {}", run.pass.checked());

    let markdown = args
        .report
        .clone()
        .or_else(|| run.config.report_output.clone())
        .unwrap_or_else(|| ctx.artifacts().links_report());
    write_markdown(ctx, &run, &markdown)?;
    let json = args.json.clone().or_else(|| run.config.json_output.clone());
    if let Some(path) = json {
        write_json(ctx, &run, &path)?;
    }

    report::fail_if_problems(report::problems(ctx.root(), &run.pass))
}

/// `cargo xtask docs audit-report --output <path>`
pub(crate) fn audit_report(
    ctx: &CommandContext,
    args: &LinksArgs,
    output: &Path,
) -> XtaskResult<()> {
    let run = run_pass(ctx, args)?;
    write_json(ctx, &run, output)?;
    report::fail_if_problems(report::problems(ctx.root(), &run.pass))
}

fn write_markdown(ctx: &CommandContext, run: &LinkRun, path: &Path) -> XtaskResult<()> {
    let path = ctx.artifacts().resolve_path(path);
    let body = report::render_markdown(
        ctx.root(),
        &run.pass,
        run.documents,
        &run.config.legacy_prefixes,
        Utc::now(),
    );
    ctx.artifacts()
        .write_text(&path, &body)
        .map_err(|err| err.with_operation("write link report"))?;
    println!("Wrote link report: {}", path.display());
    Ok(())
}

fn write_json(ctx: &CommandContext, run: &LinkRun, path: &Path) -> XtaskResult<()> {
    let path = ctx.artifacts().resolve_path(path);
    let audit = report::audit_json(ctx.root(), &run.pass, run.documents, Utc::now());
    let body = serde_json::to_string_pretty(&audit).map_err(|err| {
        crate::runtime::error::XtaskError::io(format!("failed to serialize link audit: {err}"))
    })?;
    ctx.artifacts()
        .write_text(&path, &format!("{body}\n"))
        .map_err(|err| err.with_operation("write link audit"))?;
    println!("Wrote link audit: {}", path.display());
    Ok(())
}
