//! Streaming Gaussian blur command.
//!
//! Smooths a unit-resolution bedgraph with a Gaussian kernel, one
//! chromosome at a time.
//!
//! # Memory Complexity
//!
//! O(L) where L is the kernel length, `2 * floor(3 * sigma + 0.5) + 1`.
//!
//! # Requirements
//!
//! Input file MUST be sorted by chromosome, then by start position.

use super::{print_warning, run_transform, TransformStats};
use crate::bedgraph::{BedGraphReader, Result};
use crate::config::{TransformConfig, DEFAULT_OUT_OF_BOUNDARY_VALUE};
use crate::transform::BlurTransform;
use std::io::{self, Read, Write};
use std::path::Path;

/// Blur command configuration.
#[derive(Debug, Clone)]
pub struct BlurCommand {
    /// Standard deviation of the Gaussian, in positions
    pub sigma: f64,
    /// Score of records without a full window
    pub out_of_boundary: f64,
    /// Validate sort order while streaming
    pub check_sorted: bool,
}

impl Default for BlurCommand {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl BlurCommand {
    pub fn new(sigma: f64) -> Self {
        Self {
            sigma,
            out_of_boundary: DEFAULT_OUT_OF_BOUNDARY_VALUE,
            check_sorted: false,
        }
    }

    /// Set the score of boundary records.
    pub fn with_out_of_boundary(mut self, value: f64) -> Self {
        self.out_of_boundary = value;
        self
    }

    /// Enable inline sort validation.
    pub fn with_check_sorted(mut self, check: bool) -> Self {
        self.check_sorted = check;
        self
    }

    fn transform(&self) -> Result<BlurTransform> {
        let config = TransformConfig::new().with_out_of_boundary(self.out_of_boundary);
        BlurTransform::new(self.sigma, config)
    }

    /// Execute blur on a bedgraph file.
    pub fn run<P: AsRef<Path>, W: Write>(&self, input: P, output: &mut W) -> Result<TransformStats> {
        let reader = BedGraphReader::from_path(input)?;
        self.run_streaming(reader, output)
    }

    /// Execute blur on stdin.
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
        let mut transform = self.transform()?;
        run_transform(
            &mut transform,
            reader,
            output,
            self.check_sorted,
            print_warning,
        )
    }
}
