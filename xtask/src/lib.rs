//! Workspace maintenance commands (`cargo xtask`).
//!
//! The crate is a small CLI layer over [`doc_links`]: command modules own discovery, reporting
//! and exit-status policy while [`runtime`] owns configuration loading, artifact paths, logging
//! and error formatting.

pub mod cli;
pub mod docs;
pub mod runtime;

use crate::cli::TopLevelCommand;
use crate::docs::DocsCommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;

/// Shared command contract for top-level xtask command families.
///
/// Argument parsing happens up front in [`cli::parse`]; implementations receive typed options
/// and keep their side effects in [`XtaskCommand::run`], using the runtime services exposed by
/// [`CommandContext`].
pub trait XtaskCommand {
    /// Typed options produced by CLI parsing for the command family.
    type Options;

    /// Execute the command family using the shared runtime context.
    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()>;
}

/// Executes the `xtask` binary using the current process arguments.
pub fn execute_from_env() -> XtaskResult<()> {
    let Some(parsed) = cli::parse(std::env::args_os())? else {
        return Ok(());
    };
    runtime::logging::init(parsed.verbose);

    let ctx = match parsed.root {
        Some(root) => {
            let root = std::path::absolute(&root)?;
            CommandContext::with_root(doc_links::normalize_path(&root))
        }
        None => CommandContext::new()?,
    };
    tracing::debug!(root = %ctx.root().display(), "xtask context ready");

    match parsed.command {
        TopLevelCommand::Docs { command } => DocsCommand::run(&ctx, command),
    }
}

/// Converts an xtask result into a stable process exit code.
///
/// Failures print the formatted [`XtaskError`](crate::runtime::error::XtaskError) to stderr.
pub fn exit_code(result: XtaskResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(err.exit_code())
        }
    }
}
