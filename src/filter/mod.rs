//! Line filtering for rsync-output-compressor.
//!
//! This module handles:
//! - Classifying file-list lines as changed or deleted
//! - Tracking whether we are inside an incremental file list
//! - Folding consecutive matching lines into runs

pub mod event;
pub mod line_filter;

pub use event::{EventKind, FileEvent, Totals};
pub use line_filter::{ActiveRun, FilterState, FilterStats, LineFilter};
