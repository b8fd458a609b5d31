/// Prefix rsync puts in front of removed entries.
pub const DELETING_PREFIX: &str = "deleting ";

/// What happened to a file in the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
	Changed,
	Deleted,
}

/// One line from inside an incremental file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent<'a> {
	pub kind: EventKind,

	/// The path with the `deleting ` prefix and line terminator removed.
	pub path: &'a str,
}

impl<'a> FileEvent<'a> {
	/// Classify a raw file-list line.
	pub fn parse(line: &'a str) -> Self {
		let line = trim_line_terminator(line);
		match line.strip_prefix(DELETING_PREFIX) {
			Some(path) => FileEvent {
				kind: EventKind::Deleted,
				path,
			},
			None => FileEvent {
				kind: EventKind::Changed,
				path: line,
			},
		}
	}
}

/// Running counts for a run or a group bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
	pub changed: u64,
	pub deleted: u64,
}

impl Totals {
	/// Totals for a single event.
	pub fn single(kind: EventKind) -> Self {
		let mut totals = Totals::default();
		totals.record(kind);
		totals
	}

	pub fn record(&mut self, kind: EventKind) {
		match kind {
			EventKind::Changed => self.changed += 1,
			EventKind::Deleted => self.deleted += 1,
		}
	}

	pub fn add(&mut self, other: &Totals) {
		self.changed += other.changed;
		self.deleted += other.deleted;
	}

	pub fn is_empty(&self) -> bool {
		self.changed == 0 && self.deleted == 0
	}
}

fn trim_line_terminator(line: &str) -> &str {
	let line = line.strip_suffix('\n').unwrap_or(line);
	line.strip_suffix('\r').unwrap_or(line)
}
