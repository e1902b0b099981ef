//! CLI command implementations.
//!
//! Available commands:
//! - **check**: Lint Swift files for unused capture list entries
//! - **init**: Initialize a new caplint configuration file

pub mod check;
pub mod init;

pub use check::{run_check, CheckConfig};
pub use init::{init_config, init_config_in};
