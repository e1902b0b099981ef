use std::fs;
use std::path::{Path, PathBuf};

use super::core::CaplintConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".caplint.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    fs::read_to_string(path)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<CaplintConfig> {
    let config = toml::from_str::<CaplintConfig>(contents)
        .map_err(|e| Error::Configuration(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;

    for pattern in config.get_ignore_patterns() {
        glob::Pattern::new(&pattern).map_err(|e| {
            Error::Configuration(format!("Invalid ignore pattern '{pattern}': {e}"))
        })?;
    }

    Ok(config)
}

/// Load a configuration file the user named explicitly. Any failure is an error.
pub fn load_config_from(path: &Path) -> Result<CaplintConfig> {
    let contents = read_config_file(path).map_err(|e| Error::FileSystem {
        message: format!("failed to read config file {}", path.display()),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })?;
    let config = parse_and_validate_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading a discovered config file; problems are logged, never fatal.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CaplintConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file
pub fn load_config_from_dir(start: &Path) -> CaplintConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            CaplintConfig::default()
        })
}

pub fn load_config() -> CaplintConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from_dir(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            CaplintConfig::default()
        }
    }
}
