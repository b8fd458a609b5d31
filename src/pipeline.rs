//! Input handling for rsync-output-compressor.
//!
//! This module handles:
//! - Reading input sources line by line, byte-exact
//! - Copying every line to the full-output file before filtering
//! - The final flush once all input is consumed

use crate::error::{CompressorError, Result};
use crate::filter::LineFilter;
use crate::output::Output;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Input name that stands for standard input.
pub const STDIN_NAME: &str = "-";

/// Feeds input sources through a [`LineFilter`], teeing raw lines to an
/// optional full-output copy.
///
/// State carries across sources, so several files behave like one stream.
#[derive(Debug)]
pub struct Pipeline<O: Output, F: Write> {
	filter: LineFilter<O>,
	full: Option<F>,
}

impl<O: Output, F: Write> Pipeline<O, F> {
	pub fn new(filter: LineFilter<O>, full: Option<F>) -> Self {
		Pipeline { filter, full }
	}

	/// Process one input file, or standard input for `-`.
	pub fn process_path(&mut self, path: &Path) -> Result<()> {
		if path == Path::new(STDIN_NAME) {
			let stdin = std::io::stdin();
			return self.process(STDIN_NAME, stdin.lock());
		}

		let name = path.display().to_string();
		let file = File::open(path).map_err(|source| CompressorError::InputReadError {
			name: name.clone(),
			source,
		})?;
		self.process(&name, BufReader::new(file))
	}

	/// Process every line of a reader.
	pub fn process<R: BufRead>(&mut self, name: &str, mut reader: R) -> Result<()> {
		tracing::debug!(input = name, "reading input");
		let mut line = Vec::new();

		loop {
			line.clear();
			let read = reader
				.read_until(b'\n', &mut line)
				.map_err(|source| CompressorError::InputReadError {
					name: name.to_string(),
					source,
				})?;
			if read == 0 {
				return Ok(());
			}

			if let Some(full) = self.full.as_mut() {
				full.write_all(&line)
					.map_err(|source| CompressorError::FullOutputError { source })?;
			}

			self.filter.push(&line)?;
		}
	}

	/// Flush everything and hand back the output and the full-output copy.
	pub fn finish(self) -> Result<(O, Option<F>)> {
		let mut full = self.full;
		if let Some(full) = full.as_mut() {
			full.flush()
				.map_err(|source| CompressorError::FullOutputError { source })?;
		}

		let out = self.filter.finish()?;
		Ok((out, full))
	}
}
