use anyhow::Result;
use caplint::cli::{Cli, Commands};
use caplint::commands::{self, CheckConfig};
use clap::Parser;
use std::process::ExitCode;

const EXIT_VIOLATIONS: u8 = 1;
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(EXIT_VIOLATIONS),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Returns whether the command found a failing set of violations.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Check {
            paths,
            config,
            format,
            output,
            severity,
            strict,
            no_parallel,
            no_color,
            verbosity,
        } => {
            init_logging(verbosity);
            commands::run_check(CheckConfig {
                paths,
                config,
                format: format.map(Into::into),
                output,
                severity: severity.map(Into::into),
                strict,
                parallel: !no_parallel,
                color: !no_color,
            })
        }
        Commands::Init { force } => {
            init_logging(0);
            commands::init_config(force)?;
            Ok(false)
        }
    }
}

// RUST_LOG wins over -v
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = format!("warn,caplint={level}");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();
}
