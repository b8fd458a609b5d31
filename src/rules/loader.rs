use crate::error::{CompressorError, Result};
use crate::rules::pattern::Pattern;
use std::path::Path;

/// Load and compile a rules file from the given path.
pub fn load_rules_file(path: &Path) -> Result<Vec<Pattern>> {
	let content = std::fs::read_to_string(path).map_err(|source| CompressorError::RulesReadError {
		path: path.to_path_buf(),
		source,
	})?;

	let patterns = parse_rules_str(&content);
	tracing::debug!(path = %path.display(), rules = patterns.len(), "loaded rules");

	Ok(patterns)
}

/// Compile rules from a string (useful for testing).
///
/// Blank lines and lines starting with `#` are skipped. Everything else is
/// a rule, in file order.
pub fn parse_rules_str(content: &str) -> Vec<Pattern> {
	content
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty() && !line.starts_with('#'))
		.map(Pattern::compile)
		.collect()
}
