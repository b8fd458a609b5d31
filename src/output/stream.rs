use crate::error::Result;
use crate::filter::event::Totals;
use crate::output::{Output, format_line};
use std::io::Write;

/// Writes every summary line as soon as it is emitted.
#[derive(Debug)]
pub struct StreamOutput<W: Write> {
	out: W,
}

impl<W: Write> StreamOutput<W> {
	pub fn new(out: W) -> Self {
		StreamOutput { out }
	}

	/// Consume the output and return the underlying writer.
	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> Output for StreamOutput<W> {
	fn emit(&mut self, key: &str, totals: &Totals) -> Result<()> {
		self.out.write_all(format_line(key, totals).as_bytes())?;
		Ok(())
	}

	fn flush(&mut self) -> Result<()> {
		self.out.flush()?;
		Ok(())
	}

	fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
		self.out.write_all(bytes)?;
		Ok(())
	}
}
