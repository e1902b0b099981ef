// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod driver;
pub mod errors;
pub mod io;
pub mod rules;
pub mod suppression;
pub mod syntax;

// Re-export commonly used types
pub use crate::common::{ByteRange, CharRange, Location, SourceFile};
pub use crate::config::{CaplintConfig, RuleConfig};
pub use crate::core::{FileReport, Report, Severity, Violation};
pub use crate::driver::{lint_paths, lint_source};
pub use crate::errors::{Error, Result};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::rules::{enabled_rules, LintFile, Rule, UnusedCaptureListRule};
pub use crate::suppression::{parse_suppression_comments, SuppressionContext, SuppressionStats};
pub use crate::syntax::{Structure, StructureNode, SyntaxMap};
