//! Streaming run-length compression command.
//!
//! # Memory Complexity
//!
//! O(1) - only the open run is held in memory.
//!
//! # Requirements
//!
//! Input file MUST be sorted by chromosome, then by start position.

use super::{print_warning, run_transform, TransformStats};
use crate::bedgraph::{BedGraphReader, Result};
use crate::transform::CompressTransform;
use std::io::{self, Read, Write};
use std::path::Path;

/// Compress command configuration.
#[derive(Debug, Clone, Default)]
pub struct CompressCommand {
    /// Validate sort order while streaming
    pub check_sorted: bool,
}

impl CompressCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable inline sort validation.
    pub fn with_check_sorted(mut self, check: bool) -> Self {
        self.check_sorted = check;
        self
    }

    /// Execute compression on a bedgraph file.
    pub fn run<P: AsRef<Path>, W: Write>(&self, input: P, output: &mut W) -> Result<TransformStats> {
        let reader = BedGraphReader::from_path(input)?;
        self.run_streaming(reader, output)
    }

    /// Execute compression on stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<TransformStats> {
        let stdin = io::stdin();
        let reader = BedGraphReader::new(stdin.lock());
        self.run_streaming(reader, output)
    }

    /// Core streaming loop.
    pub fn run_streaming<R: Read, W: Write>(
        &self,
        reader: BedGraphReader<R>,
        output: &mut W,
    ) -> Result<TransformStats> {
        run_transform(
            &mut CompressTransform::new(),
            reader,
            output,
            self.check_sorted,
            print_warning,
        )
    }
}
