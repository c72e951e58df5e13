//! Shared streaming utilities for the bedgraph transforms.
//!
//! This module provides the pieces every transform run is built from:
//! - Zero-allocation bedgraph line parsing
//! - Per-chromosome record windows and chromosome tracking
//! - Sort validation
//! - Efficient output formatting
//!
//! All transforms make a single forward pass over sorted input.

pub mod buffers;
pub mod output;
pub mod parsing;
pub mod validation;
pub mod window;

pub use output::BedGraphWriter;
pub use parsing::{parse_bedgraph_bytes, parse_u64_fast, should_skip_line, FieldError};
pub use validation::SortValidator;
pub use window::{ChromTransition, ChromosomeTracker, WindowBuffer};
