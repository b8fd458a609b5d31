//! Output strategies for rsync-output-compressor.
//!
//! This module handles:
//! - Summary line formatting
//! - Streaming output (one line per flushed run)
//! - Grouped output (runs with the same key merged, optionally sorted)

pub mod group;
pub mod stream;

pub use group::GroupOutput;
pub use stream::StreamOutput;

use crate::error::Result;
use crate::filter::event::Totals;

/// Width of each count column, including its leading space.
pub const COLUMN_WIDTH: usize = 7;

/// Destination for filtered output.
pub trait Output {
	/// Record one summary entry.
	fn emit(&mut self, key: &str, totals: &Totals) -> Result<()>;

	/// Write anything still buffered and clear it.
	fn flush(&mut self) -> Result<()>;

	/// Write bytes through unchanged.
	fn write_raw(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<O: Output + ?Sized> Output for Box<O> {
	fn emit(&mut self, key: &str, totals: &Totals) -> Result<()> {
		(**self).emit(key, totals)
	}

	fn flush(&mut self) -> Result<()> {
		(**self).flush()
	}

	fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
		(**self).write_raw(bytes)
	}
}

/// Format one summary line: changed column, deleted column, key.
///
/// Zero counts leave their column blank; deletions are shown negative.
pub fn format_line(key: &str, totals: &Totals) -> String {
	let changed = if totals.changed != 0 {
		totals.changed.to_string()
	} else {
		String::new()
	};
	let deleted = if totals.deleted != 0 {
		format!("-{}", totals.deleted)
	} else {
		String::new()
	};

	let mut line = String::new();
	for column in [changed, deleted] {
		line.push_str(&format!(
			"{:>width$}",
			format!(" {column}"),
			width = COLUMN_WIDTH
		));
	}
	line.push(' ');
	line.push_str(key);
	line.push('\n');
	line
}
