use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "caplint")]
#[command(about = "Finds unused capture list entries in Swift closures", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check Swift files for unused capture list entries
    Check {
        /// Files or directories to check
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Configuration file (default: nearest .caplint.toml)
        #[arg(short, long, env = "CAPLINT_CONFIG")]
        config: Option<PathBuf>,

        /// Output format (default: from configuration, else terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the severity of reported violations
        #[arg(long, value_enum)]
        severity: Option<SeverityArg>,

        /// Exit with a failure status on warnings too
        #[arg(long)]
        strict: bool,

        /// Check files one at a time
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Disable colored output
        #[arg(long = "no-color")]
        no_color: bool,

        /// Increase log verbosity (-v info, -vv debug, -vvv trace)
        #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize a .caplint.toml configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SeverityArg {
    Warning,
    Error,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

impl From<SeverityArg> for crate::core::Severity {
    fn from(s: SeverityArg) -> Self {
        match s {
            SeverityArg::Warning => crate::core::Severity::Warning,
            SeverityArg::Error => crate::core::Severity::Error,
        }
    }
}
