use crate::rules::pattern::{BoundPattern, BoundSegment, Pattern, Segment};

/// Check whether a path's segments satisfy a pattern.
///
/// The path may be longer than the pattern; the extra segments are ignored.
pub fn matches(fields: &[&str], pattern: &Pattern) -> bool {
	if fields.len() < pattern.len() {
		return false;
	}

	pattern
		.segments
		.iter()
		.zip(fields)
		.all(|(segment, field)| match segment {
			Segment::Dynamic | Segment::Static => true,
			Segment::Literal(literal) => literal == field,
		})
}

/// Find the first pattern (in load order) that the path satisfies.
pub fn find_first_match<'a>(fields: &[&str], patterns: &'a [Pattern]) -> Option<&'a Pattern> {
	patterns.iter().find(|pattern| matches(fields, pattern))
}

/// Bind a pattern to the path it matched.
///
/// Static wildcards become `*`, everything else takes the path's value at
/// that position. Only positions covered by the pattern are kept.
pub fn bind(pattern: &Pattern, fields: &[&str]) -> BoundPattern {
	let segments = pattern
		.segments
		.iter()
		.zip(fields)
		.map(|(segment, field)| match segment {
			Segment::Static => BoundSegment::Any,
			Segment::Dynamic | Segment::Literal(_) => BoundSegment::Exact((*field).to_string()),
		})
		.collect();

	BoundPattern { segments }
}

impl BoundPattern {
	/// Check whether a later path continues the run this pattern was bound for.
	pub fn accepts(&self, fields: &[&str]) -> bool {
		if fields.len() < self.segments.len() {
			return false;
		}

		self.segments
			.iter()
			.zip(fields)
			.all(|(segment, field)| match segment {
				BoundSegment::Any => true,
				BoundSegment::Exact(value) => value == field,
			})
	}
}
