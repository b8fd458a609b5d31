use crate::error::Result;
use crate::filter::event::{FileEvent, Totals};
use crate::output::Output;
use crate::rules::{BoundPattern, Pattern, bind, find_first_match, split_segments};
use regex::Regex;
use std::sync::LazyLock;

/// Header rsync prints before the per-file listing.
static FILE_LIST_START: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^(receiving|sending) incremental file list")
		.expect("file list header regex is valid")
});

/// Where the filter is in the rsync transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
	/// Lines are passed through untouched.
	Outside,

	/// Lines are file events, until the next blank line.
	InFileList,
}

/// The run of consecutive lines currently being counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRun {
	pub pattern: BoundPattern,
	pub totals: Totals,
}

/// Counters for the debug summary at the end of a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
	/// Every line pushed into the filter.
	pub lines: u64,

	/// File-list blocks that were opened.
	pub blocks: u64,

	/// File events seen inside blocks.
	pub events: u64,

	/// Entries handed to the output (runs and unmatched paths).
	pub summaries: u64,
}

/// Compresses rsync output line by line.
///
/// Detects the start and end of each incremental file list and, inside it,
/// folds consecutive lines that keep satisfying the same bound pattern into
/// one entry.
#[derive(Debug)]
pub struct LineFilter<O: Output> {
	patterns: Vec<Pattern>,
	out: O,
	state: FilterState,
	active: Option<ActiveRun>,
	stats: FilterStats,
}

impl<O: Output> LineFilter<O> {
	pub fn new(patterns: Vec<Pattern>, out: O) -> Self {
		LineFilter {
			patterns,
			out,
			state: FilterState::Outside,
			active: None,
			stats: FilterStats::default(),
		}
	}

	pub fn state(&self) -> FilterState {
		self.state
	}

	pub fn active_run(&self) -> Option<&ActiveRun> {
		self.active.as_ref()
	}

	pub fn stats(&self) -> FilterStats {
		self.stats
	}

	/// Process one raw input line, terminator included.
	pub fn push(&mut self, line: &[u8]) -> Result<()> {
		self.stats.lines += 1;
		let text = String::from_utf8_lossy(line);

		match self.state {
			FilterState::Outside => {
				if is_file_list_start(&text) {
					tracing::debug!(line = self.stats.lines, "file list started");
					self.state = FilterState::InFileList;
					self.stats.blocks += 1;
				}
				self.out.write_raw(line)
			}
			FilterState::InFileList => {
				if is_file_list_end(&text) {
					self.end_file_list()
				} else {
					self.filter_line(&text)
				}
			}
		}
	}

	/// Emit the active run and everything the output is holding back.
	pub fn flush(&mut self) -> Result<()> {
		self.flush_active()?;
		self.out.flush()
	}

	/// Flush and hand back the output.
	pub fn finish(mut self) -> Result<O> {
		self.flush()?;
		tracing::debug!(
			lines = self.stats.lines,
			blocks = self.stats.blocks,
			events = self.stats.events,
			summaries = self.stats.summaries,
			"filter finished"
		);
		Ok(self.out)
	}

	fn end_file_list(&mut self) -> Result<()> {
		tracing::debug!(line = self.stats.lines, "file list ended");
		self.state = FilterState::Outside;
		self.flush()?;
		self.out.write_raw(b"\n")
	}

	fn filter_line(&mut self, line: &str) -> Result<()> {
		self.stats.events += 1;
		let event = FileEvent::parse(line);
		let fields = split_segments(event.path);

		if let Some(run) = self.active.as_mut()
			&& run.pattern.accepts(&fields)
		{
			run.totals.record(event.kind);
			return Ok(());
		}

		self.flush_active()?;

		match find_first_match(&fields, &self.patterns) {
			Some(pattern) => {
				tracing::trace!(rule = %pattern, path = event.path, "run started");
				self.active = Some(ActiveRun {
					pattern: bind(pattern, &fields),
					totals: Totals::single(event.kind),
				});
			}
			None => {
				self.stats.summaries += 1;
				self.out.emit(&fields.join("/"), &Totals::single(event.kind))?;
			}
		}

		Ok(())
	}

	fn flush_active(&mut self) -> Result<()> {
		if let Some(run) = self.active.take() {
			let key = run.pattern.to_string();
			tracing::trace!(
				key = %key,
				changed = run.totals.changed,
				deleted = run.totals.deleted,
				"run flushed"
			);
			self.stats.summaries += 1;
			self.out.emit(&key, &run.totals)?;
		}
		Ok(())
	}
}

/// Check whether a line opens an incremental file list.
pub fn is_file_list_start(line: &str) -> bool {
	FILE_LIST_START.is_match(line)
}

/// A file list ends at the first blank line.
pub fn is_file_list_end(line: &str) -> bool {
	line.trim().is_empty()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::output::{GroupOutput, StreamOutput};
	use crate::rules::parse_rules_str;

	fn stream(rules: &str, input: &str) -> String {
		let mut filter = LineFilter::new(parse_rules_str(rules), StreamOutput::new(Vec::new()));
		for line in input.split_inclusive('\n') {
			filter.push(line.as_bytes()).unwrap();
		}
		String::from_utf8(filter.finish().unwrap().into_inner()).unwrap()
	}

	fn grouped(rules: &str, input: &str, sort: bool) -> String {
		let mut filter = LineFilter::new(
			parse_rules_str(rules),
			GroupOutput::new(Vec::new(), sort),
		);
		for line in input.split_inclusive('\n') {
			filter.push(line.as_bytes()).unwrap();
		}
		String::from_utf8(filter.finish().unwrap().into_inner()).unwrap()
	}

	#[test]
	fn test_file_list_markers() {
		assert!(is_file_list_start("receiving incremental file list\n"));
		assert!(is_file_list_start("sending incremental file list"));
		assert!(is_file_list_start("Receiving Incremental File List"));
		assert!(!is_file_list_start("  receiving incremental file list"));
		assert!(!is_file_list_start("receiving file list"));

		assert!(is_file_list_end("\n"));
		assert!(is_file_list_end("  \t\r\n"));
		assert!(!is_file_list_end("foo\n"));
	}

	#[test]
	fn test_static_wildcard_collapses_directory() {
		let output = stream(
			"foo/*!",
			"receiving incremental file list\nfoo/bar.txt\nfoo/baz.txt\n\n",
		);
		assert_eq!(
			output,
			"receiving incremental file list\n      2        foo/*\n\n"
		);
	}

	#[test]
	fn test_dynamic_wildcard_splits_on_value() {
		let output = stream(
			"foo/*",
			"receiving incremental file list\nfoo/bar.txt\nfoo/baz.txt\n\n",
		);
		assert_eq!(
			output,
			"receiving incremental file list\n      1        foo/bar.txt\n      1        foo/baz.txt\n\n"
		);
	}

	#[test]
	fn test_literal_prefix_rule_counts_whole_tree() {
		let output = stream(
			"foo",
			"receiving incremental file list\nfoo/bar.txt\nfoo/baz.txt\n\n",
		);
		assert_eq!(output, "receiving incremental file list\n      2        foo\n\n");
	}

	#[test]
	fn test_dynamic_wildcard_groups_per_user() {
		let input = "sending incremental file list\n\
			home/alice/a.txt\n\
			home/alice/docs/b.txt\n\
			home/bob/c.txt\n\
			deleting home/bob/old.txt\n\
			\n";
		let output = stream("home/*", input);
		assert_eq!(
			output,
			"sending incremental file list\n      2        home/alice\n      1     -1 home/bob\n\n"
		);
	}

	#[test]
	fn test_deleted_lines_counted_separately() {
		let output = stream(
			"foo/*!",
			"receiving incremental file list\ndeleting foo/old.txt\n\n",
		);
		assert_eq!(
			output,
			"receiving incremental file list\n            -1 foo/*\n\n"
		);
	}

	#[test]
	fn test_unmatched_path_emitted_verbatim() {
		let input = "receiving incremental file list\netc/passwd\n\n";
		let expected = "receiving incremental file list\n      1        etc/passwd\n\n";
		assert_eq!(stream("foo/*!", input), expected);
		assert_eq!(grouped("foo/*!", input, false), expected);
	}

	#[test]
	fn test_unmatched_path_breaks_run() {
		let input = "receiving incremental file list\nfoo/a\netc/passwd\nfoo/b\n\n";

		assert_eq!(
			stream("foo/*!", input),
			"receiving incremental file list\n      1        foo/*\n      1        etc/passwd\n      1        foo/*\n\n"
		);
		assert_eq!(
			grouped("foo/*!", input, false),
			"receiving incremental file list\n      2        foo/*\n      1        etc/passwd\n\n"
		);
	}

	#[test]
	fn test_first_rule_wins() {
		let input = "receiving incremental file list\nvar/log/syslog\nvar/log/auth.log\nvar/cache/x\n\n";
		assert_eq!(
			stream("var/log/*!\nvar/*!", input),
			"receiving incremental file list\n      2        var/log/*\n      1        var/*\n\n"
		);
		// The broader rule first swallows everything.
		assert_eq!(
			stream("var/*!\nvar/log/*!", input),
			"receiving incremental file list\n      3        var/*\n\n"
		);
	}

	#[test]
	fn test_directory_entries_lose_trailing_slash() {
		let input = "receiving incremental file list\nnew/\nnew/dir/\n\n";
		assert_eq!(
			stream("", input),
			"receiving incremental file list\n      1        new\n      1        new/dir\n\n"
		);
	}

	#[test]
	fn test_lines_outside_file_list_pass_through() {
		let input = "opening connection\n\nsent 100 bytes  received 20 bytes\n";
		assert_eq!(stream("*!", input), input);
	}

	#[test]
	fn test_header_inside_file_list_is_a_file_event() {
		let mut filter = LineFilter::new(parse_rules_str("*!"), StreamOutput::new(Vec::new()));
		filter.push(b"receiving incremental file list\n").unwrap();
		assert_eq!(filter.state(), FilterState::InFileList);
		filter.push(b"sending incremental file list\n").unwrap();
		assert_eq!(filter.state(), FilterState::InFileList);
		assert!(filter.active_run().is_some());
		assert_eq!(filter.stats().events, 1);
	}

	#[test]
	fn test_whitespace_line_ends_block() {
		let output = stream(
			"foo/*!",
			"receiving incremental file list\nfoo/a\n   \t\nfoo/b\n",
		);
		assert_eq!(
			output,
			"receiving incremental file list\n      1        foo/*\n\nfoo/b\n"
		);
	}

	#[test]
	fn test_stream_end_flushes_open_run() {
		let output = stream("foo/*!", "receiving incremental file list\nfoo/a\nfoo/b");
		assert_eq!(output, "receiving incremental file list\n      2        foo/*\n");
	}

	#[test]
	fn test_run_bookkeeping() {
		let mut filter = LineFilter::new(parse_rules_str("foo/*!"), StreamOutput::new(Vec::new()));
		assert_eq!(filter.state(), FilterState::Outside);

		filter.push(b"receiving incremental file list\n").unwrap();
		filter.push(b"foo/a\n").unwrap();
		filter.push(b"deleting foo/b\n").unwrap();

		let run = filter.active_run().unwrap();
		assert_eq!(run.pattern.to_string(), "foo/*");
		assert_eq!(
			run.totals,
			Totals {
				changed: 1,
				deleted: 1
			}
		);

		filter.push(b"\n").unwrap();
		assert!(filter.active_run().is_none());
		assert_eq!(filter.state(), FilterState::Outside);
		assert_eq!(
			filter.stats(),
			FilterStats {
				lines: 4,
				blocks: 1,
				events: 2,
				summaries: 1,
			}
		);
	}

	#[test]
	fn test_group_sorts_within_block() {
		let input = "receiving incremental file list\n\
			srv/b/x\n\
			etc/hosts\n\
			srv/a/y\n\
			srv/b/z\n\
			\n";
		assert_eq!(
			grouped("srv/*", input, true),
			"receiving incremental file list\n      1        etc/hosts\n      1        srv/a\n      2        srv/b\n\n"
		);
	}

	#[test]
	fn test_group_blocks_start_fresh() {
		let input = "receiving incremental file list\n\
			foo/a\n\
			bar/b\n\
			foo/c\n\
			\n\
			sent 10 bytes\n\
			receiving incremental file list\n\
			foo/d\n\
			\n";
		assert_eq!(
			grouped("foo/*!\nbar/*!", input, true),
			"receiving incremental file list\n      1        bar/*\n      2        foo/*\n\n\
			sent 10 bytes\n\
			receiving incremental file list\n      1        foo/*\n\n"
		);
	}

	#[test]
	fn test_independent_filters_do_not_share_state() {
		let mut first = LineFilter::new(parse_rules_str("foo/*!"), StreamOutput::new(Vec::new()));
		let second = LineFilter::new(parse_rules_str("foo/*!"), StreamOutput::new(Vec::new()));

		first.push(b"receiving incremental file list\n").unwrap();
		first.push(b"foo/a\n").unwrap();

		assert!(first.active_run().is_some());
		assert!(second.active_run().is_none());
		assert_eq!(second.state(), FilterState::Outside);
	}
}
