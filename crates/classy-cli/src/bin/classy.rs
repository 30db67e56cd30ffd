//! The `classy` binary: reads a JSON source document, runs it through
//! [`classy_cli::compile`], and reports the result.

use std::io::Read as _;

use clap::Parser as _;

use classy_cli::args::{CliArgs, Command};
use classy_cli::{ClassyConfig, compile, print_debug};
use classy_cli::source::{self, SourceProgram};
use classy_common::{Interner, WellKnownNames};
use classy_env::Environment;
use classy_solver::RobinsonSolver;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    classy_common::tracing_init::init(args.verbose);

    let Command::Check { path, emit_explicit, report_style } = args.command;
    let text = read_source(&path)?;
    let doc: SourceProgram = serde_json::from_str(&text)?;

    let mut interner = Interner::new();
    let well_known = WellKnownNames::intern(&mut interner);
    let program = source::lower_program(&mut interner, &doc);
    let env = Environment::new();
    let mut solver = RobinsonSolver::new();
    let config = ClassyConfig { report_style: report_style.into(), ..ClassyConfig::default() };

    match compile(&mut interner, well_known, &env, &program, &mut solver, &config) {
        Ok(explicit) => {
            tracing::info!("compiled {} block(s)", explicit.len());
            if emit_explicit {
                println!("{}", print_debug(&explicit));
            } else {
                println!("ok");
            }
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = ?err, "compile failed");
            let rendered = classy_common::diagnostics::render(&err, report_style.into());
            eprintln!("{rendered}");
            std::process::exit(1);
        }
    }
}

fn read_source(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
