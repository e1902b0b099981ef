use crate::core::Severity;
use serde::{Deserialize, Serialize};

/// Root configuration structure for caplint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CaplintConfig {
    /// Settings of the unused capture list rule
    #[serde(default)]
    pub unused_capture_list: Option<RuleConfig>,

    /// Ignore patterns
    #[serde(default)]
    pub ignore: Option<IgnoreConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl CaplintConfig {
    /// Settings of the unused capture list rule, defaulted when absent.
    pub fn unused_capture_list(&self) -> RuleConfig {
        self.unused_capture_list.clone().unwrap_or_default()
    }

    /// Get ignore patterns from configuration
    ///
    /// Returns the glob patterns of paths excluded from linting, or an empty
    /// vector when none are configured.
    pub fn get_ignore_patterns(&self) -> Vec<String> {
        self.ignore
            .as_ref()
            .map(|ig| ig.patterns.clone())
            .unwrap_or_default()
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.as_ref()?.default_format.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.as_ref()?.use_color
    }
}

/// Per-rule settings. The severity applies to every violation of the rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub severity: Severity,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Warning,
        }
    }
}

impl RuleConfig {
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreConfig {
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}
