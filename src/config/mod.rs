//! Configuration loaded from `.caplint.toml`.
//!
//! The configuration is read once at start-up and handed to rules as an
//! immutable value; nothing reads it from global state.

mod core;
mod loader;

pub use self::core::{CaplintConfig, IgnoreConfig, OutputConfig, RuleConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_dir,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

/// Contents written by `caplint init`.
pub const DEFAULT_CONFIG: &str = r#"# caplint configuration

[unused_capture_list]
enabled = true
severity = "warning"

[ignore]
patterns = [
    "Pods/**",
    "Carthage/**",
    ".build/**",
    "DerivedData/**",
]

[output]
default_format = "terminal"
"#;
