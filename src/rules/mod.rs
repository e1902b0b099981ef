//! Rule abstraction and the rules shipped with caplint.
//!
//! A rule is evaluated once per structure node of a [`LintFile`]. Rules are
//! stateless values holding their configuration, so one instance can be
//! shared by every thread of a parallel run.

pub mod unused_capture_list;

use crate::common::SourceFile;
use crate::config::CaplintConfig;
use crate::core::Violation;
use crate::syntax::{Structure, StructureNode, SyntaxMap};

pub use unused_capture_list::UnusedCaptureListRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Lint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescription {
    pub identifier: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: RuleKind,
}

/// A source file together with its tokens and expression structure.
#[derive(Debug, Clone)]
pub struct LintFile {
    pub source: SourceFile,
    pub syntax: SyntaxMap,
    pub structure: Structure,
}

impl LintFile {
    pub fn new(source: SourceFile) -> Self {
        let syntax = SyntaxMap::from_source(&source);
        let structure = Structure::build(&source, &syntax);
        Self {
            source,
            syntax,
            structure,
        }
    }
}

pub trait Rule: Send + Sync {
    fn description(&self) -> &'static RuleDescription;

    /// Violations for one node. Nodes the rule does not apply to yield none.
    fn validate(&self, file: &LintFile, node: &StructureNode) -> Vec<Violation>;
}

/// Enabled rules for a configuration.
pub fn enabled_rules(config: &CaplintConfig) -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();
    let capture_list = config.unused_capture_list();
    if capture_list.enabled {
        rules.push(Box::new(UnusedCaptureListRule::new(capture_list)));
    }
    rules
}
