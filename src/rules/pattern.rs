use std::fmt;

/// Rule token for a wildcard that remembers the matched segment.
pub const DYNAMIC_WILDCARD: &str = "*";

/// Rule token for a wildcard that forgets the matched segment.
pub const STATIC_WILDCARD: &str = "*!";

/// One position of a compiled rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Matches only this exact segment text.
	Literal(String),

	/// Matches any segment; a run keeps going only while the value stays the same.
	Dynamic,

	/// Matches any segment; a run keeps going whatever the value is.
	Static,
}

impl Segment {
	/// Compile a single rule token.
	pub fn parse(token: &str) -> Self {
		match token {
			DYNAMIC_WILDCARD => Segment::Dynamic,
			STATIC_WILDCARD => Segment::Static,
			literal => Segment::Literal(literal.to_string()),
		}
	}

	pub fn is_wildcard(&self) -> bool {
		matches!(self, Segment::Dynamic | Segment::Static)
	}
}

/// A compiled rule line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
	/// Segment matchers in path order.
	pub segments: Vec<Segment>,

	/// The rule line this pattern was compiled from (for debugging/display).
	pub source: String,
}

impl Pattern {
	/// Compile a rule line such as `home/*/public_html/*!`.
	///
	/// Never fails: every token that is not a wildcard is a literal.
	pub fn compile(line: &str) -> Self {
		let source = line.trim().to_string();
		let segments = split_segments(&source)
			.into_iter()
			.map(Segment::parse)
			.collect();

		Pattern { segments, source }
	}

	pub fn len(&self) -> usize {
		self.segments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}
}

impl fmt::Display for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.source)
	}
}

/// One position of a pattern after it has been bound to a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundSegment {
	/// Left over from a static wildcard; accepts any value and renders as `*`.
	Any,

	/// A literal, or the value a dynamic wildcard captured.
	Exact(String),
}

/// A pattern rendered against the path that started a run.
///
/// Doubles as the display key of the run and as the pattern later lines
/// are compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundPattern {
	pub segments: Vec<BoundSegment>,
}

impl fmt::Display for BoundPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, segment) in self.segments.iter().enumerate() {
			if i > 0 {
				f.write_str("/")?;
			}
			match segment {
				BoundSegment::Any => f.write_str(DYNAMIC_WILDCARD)?,
				BoundSegment::Exact(value) => f.write_str(value)?,
			}
		}
		Ok(())
	}
}

/// Split a slash-delimited path into segments.
///
/// Leading empty segments are kept (`/etc` is `["", "etc"]`), trailing ones
/// are dropped (`foo/bar/` is `["foo", "bar"]`), so directory entries render
/// without their trailing slash.
pub fn split_segments(text: &str) -> Vec<&str> {
	let mut segments: Vec<&str> = text.split('/').collect();
	while segments.last().is_some_and(|s| s.is_empty()) {
		segments.pop();
	}
	segments
}
