//! Top-level CLI parsing.

use crate::runtime::error::XtaskResult;
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Workspace maintenance commands.
#[derive(Debug, Parser)]
#[command(name = "cargo xtask", bin_name = "cargo xtask")]
#[command(about = "Workspace maintenance commands (Rust-native)")]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Workspace root to operate on (defaults to this repository)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: TopLevelCommand,
}

/// Top-level `xtask` command families.
#[derive(Debug, Subcommand)]
pub enum TopLevelCommand {
    /// Docs validation and audit commands
    Docs {
        #[command(subcommand)]
        command: DocsSubcommand,
    },
}

/// `cargo xtask docs ...` subcommands.
#[derive(Clone, Debug, Subcommand, PartialEq, Eq)]
pub enum DocsSubcommand {
    /// Validate internal markdown links and anchors
    Links(LinksArgs),
    /// Write the link audit JSON and fail on broken links
    AuditReport {
        /// Output path for the JSON audit (defaults to .artifacts/docs/link-validation.json)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
        #[command(flatten)]
        common: LinksArgs,
    },
}

/// Options shared by the link validation commands.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct LinksArgs {
    /// Config file, relative to the workspace root
    #[arg(long, value_name = "PATH", default_value = crate::docs::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Directory to scan for markdown documents (repeatable; overrides config)
    #[arg(long = "docs-root", value_name = "DIR")]
    pub docs_roots: Vec<PathBuf>,

    /// Write the markdown report to this path (overrides config)
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Write the JSON results to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

/// Parse raw command-line arguments.
///
/// Returns `Ok(None)` after printing help or version output.
pub fn parse<I, T>(args: I) -> XtaskResult<Option<Cli>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            let _ = err.print();
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::XtaskErrorCategory;
    use pretty_assertions::assert_eq;

    fn parse_ok(args: &[&str]) -> Cli {
        parse(std::iter::once("xtask").chain(args.iter().copied()))
            .expect("parse")
            .expect("command")
    }

    #[test]
    fn docs_links_uses_default_config_path() {
        let cli = parse_ok(&["docs", "links"]);
        let TopLevelCommand::Docs { command } = cli.command;
        assert_eq!(
            command,
            DocsSubcommand::Links(LinksArgs {
                config: PathBuf::from(crate::docs::DEFAULT_CONFIG_PATH),
                ..LinksArgs::default()
            })
        );
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = parse_ok(&[
            "docs",
            "links",
            "-vv",
            "--root",
            "/srv/site",
            "--docs-root",
            "guides",
            "--docs-root",
            "reference",
            "--report",
            "out/report.md",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, Some(PathBuf::from("/srv/site")));
        let TopLevelCommand::Docs {
            command: DocsSubcommand::Links(args),
        } = cli.command
        else {
            panic!("expected docs links");
        };
        assert_eq!(
            args.docs_roots,
            vec![PathBuf::from("guides"), PathBuf::from("reference")]
        );
        assert_eq!(args.report, Some(PathBuf::from("out/report.md")));
    }

    #[test]
    fn audit_report_output_is_optional() {
        let cli = parse_ok(&["docs", "audit-report"]);
        let TopLevelCommand::Docs {
            command: DocsSubcommand::AuditReport { output, .. },
        } = cli.command
        else {
            panic!("expected docs audit-report");
        };
        assert_eq!(output, None);
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let err = parse(["xtask", "docs", "links", "--fix"]).expect_err("unknown flag");
        assert_eq!(err.category, XtaskErrorCategory::Usage);
        assert!(!err.message.starts_with("error: "));
    }

    #[test]
    fn unknown_command_is_a_usage_error() {
        let err = parse(["xtask", "deploy"]).expect_err("unknown command");
        assert_eq!(err.category, XtaskErrorCategory::Usage);
    }

    #[test]
    fn help_is_not_an_error() {
        assert!(parse(["xtask", "--help"]).expect("help").is_none());
    }
}
