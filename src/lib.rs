//! rsync-output-compressor - compresses `rsync -v` output to a more human
//! friendly (and smaller) format.
//!
//! This library provides the core functionality, including:
//! - Path rules with remembering (`*`) and forgetting (`*!`) wildcards
//! - The line filter that folds file lists into per-rule summaries
//! - Streaming and grouped output
//! - Configuration file loading
//!
//! # Example
//!
//! ```
//! use rsync_output_compressor::filter::LineFilter;
//! use rsync_output_compressor::output::StreamOutput;
//! use rsync_output_compressor::rules::parse_rules_str;
//!
//! let rules = parse_rules_str("home/*/public_html/*!\n");
//! let mut filter = LineFilter::new(rules, StreamOutput::new(Vec::new()));
//!
//! for line in [
//!     "receiving incremental file list\n",
//!     "home/alice/public_html/index.html\n",
//!     "home/alice/public_html/css/site.css\n",
//!     "\n",
//! ] {
//!     filter.push(line.as_bytes()).unwrap();
//! }
//!
//! let out = String::from_utf8(filter.finish().unwrap().into_inner()).unwrap();
//! assert!(out.contains("      2        home/alice/public_html/*\n"));
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod rules;

pub use error::{CompressorError, Result};
