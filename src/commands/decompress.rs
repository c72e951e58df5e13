//! Streaming decompression command.
//!
//! Expands every record into unit-length records and fills the gaps
//! between records of the same chromosome with `0.0`.
//!
//! # Memory Complexity
//!
//! O(1)
//!
//! # Requirements
//!
//! Input file MUST be sorted by chromosome, then by start position.

use super::{print_warning, run_transform, TransformStats};
use crate::bedgraph::{BedGraphReader, Result};
use crate::config::{TransformConfig, DEFAULT_FILL_VALUE};
use crate::transform::DecompressTransform;
use std::io::{self, Read, Write};
use std::path::Path;

/// Decompress command configuration.
#[derive(Debug, Clone)]
pub struct DecompressCommand {
    /// Score of positions inserted into gaps
    pub fill_value: f64,
    /// Validate sort order while streaming
    pub check_sorted: bool,
}

impl Default for DecompressCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl DecompressCommand {
    pub fn new() -> Self {
        Self {
            fill_value: DEFAULT_FILL_VALUE,
            check_sorted: false,
        }
    }

    /// Set the score of gap positions.
    pub fn with_fill_value(mut self, value: f64) -> Self {
        self.fill_value = value;
        self
    }

    /// Enable inline sort validation.
    pub fn with_check_sorted(mut self, check: bool) -> Self {
        self.check_sorted = check;
        self
    }

    /// Execute decompression on a bedgraph file.
    pub fn run<P: AsRef<Path>, W: Write>(&self, input: P, output: &mut W) -> Result<TransformStats> {
        let reader = BedGraphReader::from_path(input)?;
        self.run_streaming(reader, output)
    }

    /// Execute decompression on stdin.
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
        let config = TransformConfig::new().with_fill_value(self.fill_value);
        run_transform(
            &mut DecompressTransform::new(config),
            reader,
            output,
            self.check_sorted,
            print_warning,
        )
    }
}
