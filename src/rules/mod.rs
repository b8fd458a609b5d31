//! Path rules for rsync-output-compressor.
//!
//! This module handles:
//! - Compiling rule lines into segment patterns
//! - First-match lookup and wildcard binding
//! - Loading the rules file

pub mod loader;
pub mod matcher;
pub mod pattern;

pub use loader::{load_rules_file, parse_rules_str};
pub use matcher::{bind, find_first_match, matches};
pub use pattern::{BoundPattern, BoundSegment, Pattern, Segment, split_segments};
