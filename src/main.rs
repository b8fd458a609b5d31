use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use rsync_output_compressor::CompressorError;
use rsync_output_compressor::config::{
	CliOverrides, OutputMode, Settings, discover_config, merge_settings,
};
use rsync_output_compressor::filter::LineFilter;
use rsync_output_compressor::output::{GroupOutput, Output, StreamOutput};
use rsync_output_compressor::pipeline::{Pipeline, STDIN_NAME};
use rsync_output_compressor::rules::load_rules_file;

/// Exit status when the reader of our output has gone away (EX_IOERR).
const EXIT_BROKEN_PIPE: u8 = 74;

#[derive(Parser)]
#[command(name = "rsync-output-compressor")]
#[command(
	version,
	about = "Compresses rsync -v output to a more human friendly (and smaller) format",
	after_help = "Usage: rsync -v ... | rsync-output-compressor --rules=rules.txt [options]"
)]
struct Cli {
	/// The rules file (required, here or in the config file)
	#[arg(short, long, value_name = "FILENAME")]
	rules: Option<PathBuf>,

	/// A file that is going to contain the full output
	#[arg(short, long, value_name = "FILENAME")]
	full: Option<PathBuf>,

	/// Group the results together
	#[arg(short, long)]
	group: bool,

	/// Sort the results (enables group mode!)
	#[arg(short, long)]
	sort: bool,

	/// Config file with defaults (default: ~/.rsync-output-compressor.toml)
	#[arg(short, long, value_name = "FILENAME")]
	config: Option<PathBuf>,

	/// Log level for diagnostics on stderr, overridden by RUST_LOG
	#[arg(long, value_name = "LEVEL", default_value = "warn")]
	log_level: String,

	/// Input files to read instead of stdin ("-" for stdin)
	#[arg(value_name = "INPUT")]
	inputs: Vec<PathBuf>,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) if is_broken_pipe(&e) => ExitCode::from(EXIT_BROKEN_PIPE),
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_tracing(&cli.log_level)?;

	let loaded = discover_config(cli.config.as_deref()).context("Failed to load configuration")?;
	let overrides = CliOverrides {
		rules: cli.rules,
		full: cli.full,
		group: cli.group,
		sort: cli.sort,
	};
	let settings = merge_settings(loaded.as_ref().map(|l| &l.config), &overrides);

	let Some(rules_path) = settings.rules.as_deref() else {
		eprintln!("This program requires a rules file! (see --help)");
		return Ok(ExitCode::FAILURE);
	};

	let patterns = load_rules_file(rules_path).context("Failed to load rules")?;
	let output = build_output(&settings);
	let full = open_full_output(settings.full.as_deref())?;

	let mut pipeline = Pipeline::new(LineFilter::new(patterns, output), full);

	let inputs = if cli.inputs.is_empty() {
		vec![PathBuf::from(STDIN_NAME)]
	} else {
		cli.inputs
	};
	for input in &inputs {
		pipeline
			.process_path(input)
			.with_context(|| format!("Failed to process {}", input.display()))?;
	}

	pipeline.finish().context("Failed to flush output")?;
	Ok(ExitCode::SUCCESS)
}

fn init_tracing(default_level: &str) -> Result<()> {
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init()
		.map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {}", e))
}

fn build_output(settings: &Settings) -> Box<dyn Output> {
	let stdout = std::io::stdout().lock();
	match settings.mode {
		OutputMode::Stream => Box::new(StreamOutput::new(stdout)),
		OutputMode::Group { sort } => Box::new(GroupOutput::new(stdout, sort)),
	}
}

fn open_full_output(path: Option<&Path>) -> Result<Option<BufWriter<File>>> {
	let Some(path) = path else {
		return Ok(None);
	};

	let file = File::create(path)
		.with_context(|| format!("Failed to create full output file {}", path.display()))?;
	tracing::debug!(path = %path.display(), "writing full output");
	Ok(Some(BufWriter::new(file)))
}

/// Check whether any error in the chain is a write to a closed pipe.
fn is_broken_pipe(error: &anyhow::Error) -> bool {
	error.chain().any(|cause| {
		cause
			.downcast_ref::<CompressorError>()
			.is_some_and(CompressorError::is_broken_pipe)
	})
}
