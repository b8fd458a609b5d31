//! Configuration loading for rsync-output-compressor.
//!
//! This module handles:
//! - TOML config file parsing
//! - Per-user config discovery
//! - Merging config defaults with command-line options

pub mod parser;
pub mod settings;
pub mod types;

pub use parser::{parse_config_file, parse_config_str};
pub use settings::{discover_config, merge_settings, user_config_path};
pub use types::{CliOverrides, Config, LoadedConfig, OutputMode, Settings};
