use crate::core::{Report, Severity, Violation};
use colored::*;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "terminal" => Ok(OutputFormat::Terminal),
            other => Err(format!(
                "unknown output format '{other}' (expected 'terminal' or 'json')"
            )),
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// One line per violation followed by a summary. Colors follow the global
/// `colored` override set by the caller.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_violation(&mut self, violation: &Violation) -> anyhow::Result<()> {
        let file = violation
            .file
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input>".to_string());
        let severity = match violation.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        writeln!(
            self.writer,
            "{}:{}: {}: {} {}",
            file.bold(),
            violation.location,
            severity,
            violation.message,
            format!("({})", violation.rule_id).dimmed()
        )?;
        Ok(())
    }

    fn write_summary(&mut self, report: &Report) -> anyhow::Result<()> {
        let total = report.violation_count();
        if total == 0 {
            writeln!(
                self.writer,
                "{} No unused capture list entries in {} file(s)",
                "✓".green(),
                report.files_checked
            )?;
        } else {
            let errors = report.count_at(Severity::Error);
            let warnings = report.count_at(Severity::Warning);
            writeln!(
                self.writer,
                "{} Found {} violation(s) ({} error(s), {} warning(s)) in {} of {} file(s)",
                "✗".red(),
                total.to_string().bold(),
                errors,
                warnings,
                report.files.len(),
                report.files_checked
            )?;
        }
        if !report.failed_files.is_empty() {
            writeln!(
                self.writer,
                "{} {} file(s) could not be read",
                "!".yellow(),
                report.failed_files.len()
            )?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &Report) -> anyhow::Result<()> {
        for violation in report.violations() {
            self.write_violation(violation)?;
        }
        if report.violation_count() > 0 {
            writeln!(self.writer)?;
        }
        self.write_summary(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
