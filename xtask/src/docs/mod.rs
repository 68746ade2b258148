//! Documentation validation command family.

mod config;
mod discover;
mod links;
mod report;

pub use config::DocsLinksConfig;
pub use discover::collect_documents;

use crate::cli::DocsSubcommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;
use crate::XtaskCommand;

/// Default link validation config, relative to the workspace root.
pub const DEFAULT_CONFIG_PATH: &str = "tools/docs/links.toml";

/// `cargo xtask docs ...`
pub struct DocsCommand;

impl XtaskCommand for DocsCommand {
    type Options = DocsSubcommand;

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        match options {
            DocsSubcommand::Links(args) => links::validate(ctx, &args),
            DocsSubcommand::AuditReport { output, common } => {
                let output = match output {
                    Some(path) => ctx.artifacts().resolve_path(&path),
                    None => ctx.artifacts().links_audit(),
                };
                links::audit_report(ctx, &common, &output)
            }
        }
    }
}
