use crate::config::parser::parse_config_file;
use crate::config::types::{CliOverrides, Config, LoadedConfig, OutputMode, Settings};
use crate::error::{CompressorError, Result};
use std::path::{Path, PathBuf};

/// File name of the per-user config in the home directory.
pub const USER_CONFIG_FILE: &str = ".rsync-output-compressor.toml";

/// Environment variable that, if truthy, skips the per-user config.
pub const NO_USER_CONFIG_ENV: &str = "RSYNC_OUTPUT_COMPRESSOR_NO_USER_CONFIG";

/// Find and load the config file, if there is one.
///
/// An explicit path must exist. Without one, `~/.rsync-output-compressor.toml`
/// is used when present and not disabled through [`NO_USER_CONFIG_ENV`].
pub fn discover_config(explicit: Option<&Path>) -> Result<Option<LoadedConfig>> {
	if let Some(path) = explicit {
		if !path.exists() {
			return Err(CompressorError::ConfigNotFound {
				path: path.to_path_buf(),
			});
		}
		return load(path).map(Some);
	}

	if is_env_truthy(NO_USER_CONFIG_ENV) {
		tracing::debug!("user config disabled by {}", NO_USER_CONFIG_ENV);
		return Ok(None);
	}

	let path = user_config_path()?;
	if path.exists() {
		load(&path).map(Some)
	} else {
		Ok(None)
	}
}

fn load(path: &Path) -> Result<LoadedConfig> {
	let config = parse_config_file(path)?;
	tracing::debug!(path = %path.display(), "loaded config");
	Ok(LoadedConfig {
		config,
		path: path.to_path_buf(),
	})
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(CompressorError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(USER_CONFIG_FILE))
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge the config file with command-line options.
///
/// Paths from the command line replace the config's; the flags are OR-ed.
/// Sorting always implies grouping.
pub fn merge_settings(config: Option<&Config>, cli: &CliOverrides) -> Settings {
	let defaults = Config::default();
	let config = config.unwrap_or(&defaults);

	let sort = cli.sort || config.sort;
	let group = sort || cli.group || config.group;

	Settings {
		rules: cli.rules.clone().or_else(|| config.rules.clone()),
		full: cli.full.clone().or_else(|| config.full.clone()),
		mode: if group {
			OutputMode::Group { sort }
		} else {
			OutputMode::Stream
		},
	}
}
