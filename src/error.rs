use std::path::PathBuf;

/// Library-level structured errors for rsync-output-compressor.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum CompressorError {
	#[error("Failed to read rules file: {path}")]
	RulesReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to read input: {name}")]
	InputReadError {
		name: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write full output file")]
	FullOutputError {
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write output")]
	OutputError {
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

impl CompressorError {
	/// True when the downstream reader of an output stream has gone away.
	pub fn is_broken_pipe(&self) -> bool {
		match self {
			CompressorError::OutputError { source } | CompressorError::FullOutputError { source } => {
				source.kind() == std::io::ErrorKind::BrokenPipe
			}
			_ => false,
		}
	}
}

impl From<std::io::Error> for CompressorError {
	fn from(source: std::io::Error) -> Self {
		CompressorError::OutputError { source }
	}
}

/// Result type alias using CompressorError.
pub type Result<T> = std::result::Result<T, CompressorError>;
