use crate::error::Result;
use crate::filter::event::Totals;
use crate::output::{Output, format_line};
use std::collections::HashMap;
use std::io::Write;

/// Collects totals per key and writes them on flush.
///
/// Uses more memory than [`StreamOutput`](crate::output::StreamOutput), but
/// runs that share a key end up on one line even when other lines came
/// between them.
#[derive(Debug)]
pub struct GroupOutput<W: Write> {
	out: W,
	sort: bool,

	/// Buckets in first-seen order.
	groups: Vec<(String, Totals)>,

	/// Key to position in `groups`.
	index: HashMap<String, usize>,
}

impl<W: Write> GroupOutput<W> {
	pub fn new(out: W, sort: bool) -> Self {
		GroupOutput {
			out,
			sort,
			groups: Vec::new(),
			index: HashMap::new(),
		}
	}

	/// Number of keys waiting for the next flush.
	pub fn pending(&self) -> usize {
		self.groups.len()
	}

	/// Consume the output and return the underlying writer.
	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> Output for GroupOutput<W> {
	fn emit(&mut self, key: &str, totals: &Totals) -> Result<()> {
		let slot = match self.index.get(key) {
			Some(&slot) => slot,
			None => {
				self.groups.push((key.to_string(), Totals::default()));
				self.index.insert(key.to_string(), self.groups.len() - 1);
				self.groups.len() - 1
			}
		};
		self.groups[slot].1.add(totals);
		Ok(())
	}

	fn flush(&mut self) -> Result<()> {
		let mut groups = std::mem::take(&mut self.groups);
		self.index.clear();

		if self.sort {
			groups.sort_by(|(a, _), (b, _)| a.cmp(b));
		}

		tracing::trace!(groups = groups.len(), sorted = self.sort, "flushing groups");
		for (key, totals) in &groups {
			self.out.write_all(format_line(key, totals).as_bytes())?;
		}
		self.out.flush()?;
		Ok(())
	}

	fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
		self.out.write_all(bytes)?;
		Ok(())
	}
}
