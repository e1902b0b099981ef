use crate::config::{self, CaplintConfig};
use crate::core::{Report, Severity};
use crate::driver::lint_paths;
use crate::io::{create_writer, FileWalker, OutputFormat};
use crate::rules::enabled_rules;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Options of `caplint check`, resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    pub paths: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub severity: Option<Severity>,
    pub strict: bool,
    pub parallel: bool,
    pub color: bool,
}

/// Run a check and write its report. Returns whether the run failed.
pub fn run_check(check: CheckConfig) -> Result<bool> {
    let config = match &check.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config(),
    };
    let config = apply_overrides(config, check.severity);

    let files = FileWalker::new(check.paths.clone())
        .with_ignore_patterns(&config.get_ignore_patterns())?
        .walk()?;
    let rules = enabled_rules(&config);
    let report = lint_paths(&files, &rules, check.parallel)?;

    let format = check
        .format
        .or_else(|| configured_format(&config))
        .unwrap_or(OutputFormat::Terminal);
    let color = check.color && check.output.is_none() && config.use_color().unwrap_or(true);
    if !color {
        colored::control::set_override(false);
    }
    write_report(&report, format, check.output.as_ref())?;

    Ok(report.is_failure(check.strict))
}

fn apply_overrides(mut config: CaplintConfig, severity: Option<Severity>) -> CaplintConfig {
    if let Some(severity) = severity {
        config.unused_capture_list = Some(config.unused_capture_list().with_severity(severity));
    }
    config
}

fn configured_format(config: &CaplintConfig) -> Option<OutputFormat> {
    let name = config.default_format()?;
    name.parse()
        .map_err(|err| log::warn!("ignoring [output] default_format: {err}"))
        .ok()
}

fn write_report(report: &Report, format: OutputFormat, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            create_writer(format, &mut writer).write_report(report)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            create_writer(format, stdout.lock()).write_report(report)?;
        }
    }
    Ok(())
}
