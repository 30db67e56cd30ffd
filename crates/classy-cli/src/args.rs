//! Command-line surface for the `classy` binary (spec §9: `classy check
//! <file>` / `classy check -` for stdin, `--emit-explicit`, repeated `-v`).

use clap::{Parser, Subcommand, ValueEnum};
use classy_common::ReportStyle;

#[derive(Parser, Debug)]
#[command(name = "classy", version, about = "The classy type-class compiler front-end")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Increase logging verbosity; repeat for more detail (0 = warn, 3+ = trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a program through the full pipeline: generate, solve, elaborate.
    Check {
        /// Path to a JSON source document, or `-` to read from stdin.
        path: String,

        /// Print the elaborated, class-free program on success.
        #[arg(long)]
        emit_explicit: bool,

        /// How to render a failing diagnostic.
        #[arg(long, value_enum, default_value_t = ReportStyleArg::Plain)]
        report_style: ReportStyleArg,
    },
}

/// `clap`'s `ValueEnum` needs a concrete type of its own; [`classy_common::ReportStyle`]
/// stays free of a `clap` dependency, so this mirrors it at the CLI boundary.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportStyleArg {
    #[default]
    Plain,
    Json,
}

impl From<ReportStyleArg> for ReportStyle {
    fn from(value: ReportStyleArg) -> Self {
        match value {
            ReportStyleArg::Plain => ReportStyle::Plain,
            ReportStyleArg::Json => ReportStyle::Json,
        }
    }
}
