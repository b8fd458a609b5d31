use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Defaults from a `.rsync-output-compressor.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// Rules file to use when `--rules` is not given.
	#[serde(default)]
	pub rules: Option<PathBuf>,

	/// File that receives a verbatim copy of the input.
	#[serde(default)]
	pub full: Option<PathBuf>,

	/// Group the results together.
	#[serde(default)]
	pub group: bool,

	/// Sort the grouped results (enables group mode).
	#[serde(default)]
	pub sort: bool,
}

impl Config {
	/// Make relative paths relative to the directory holding the config file.
	pub fn resolve_paths(&mut self, base_dir: &Path) {
		for path in [&mut self.rules, &mut self.full].into_iter().flatten() {
			if path.is_relative() {
				*path = base_dir.join(&*path);
			}
		}
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// How summary lines reach the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
	/// One line per run, written as soon as the run ends.
	Stream,

	/// Runs merged per key and written at the end of each file list.
	Group { sort: bool },
}

/// Options given on the command line; these win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub rules: Option<PathBuf>,
	pub full: Option<PathBuf>,
	pub group: bool,
	pub sort: bool,
}

/// Effective settings after merging the config file with the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	/// Rules file; required before any input is read.
	pub rules: Option<PathBuf>,

	/// Full-output copy destination.
	pub full: Option<PathBuf>,

	pub mode: OutputMode,
}
