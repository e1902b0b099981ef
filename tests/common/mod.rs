// Test utility module for caplint integration tests
#![allow(dead_code)]

use caplint::{enabled_rules, lint_source, CaplintConfig, SourceFile, Violation};
use std::path::Path;
use std::process::{Command, Output};

/// Lint a snippet with the default configuration.
pub fn lint(code: &str) -> Vec<Violation> {
    lint_source(SourceFile::new(code), &enabled_rules(&CaplintConfig::default()))
}

pub fn reference_names(violations: &[Violation]) -> Vec<&str> {
    violations.iter().map(|v| v.reference_name.as_str()).collect()
}

/// Text of `source` starting at a character offset.
pub fn text_at(source: &str, character_offset: usize) -> String {
    source.chars().skip(character_offset).collect()
}

/// Run the caplint binary in `dir`, isolated from the caller's environment.
pub fn run_caplint(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_caplint"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("CAPLINT_CONFIG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute caplint")
}
