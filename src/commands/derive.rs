//! Streaming derivative command.
//!
//! Computes the centered first difference of an uncompressed bedgraph.
//! Records longer than one position are skipped with a warning.
//!
//! # Memory Complexity
//!
//! O(n) where n is the number of records in the largest chromosome.
//!
//! # Requirements
//!
//! Input file MUST be sorted by chromosome, then by start position.

use super::{print_warning, run_transform, TransformStats};
use crate::bedgraph::{BedGraphReader, Result};
use crate::config::{GapNeighbor, TransformConfig};
use crate::transform::{DerivativeTransform, FormatViolation};
use std::io::{self, Read, Write};
use std::path::Path;

/// Derive command configuration.
#[derive(Debug, Clone, Default)]
pub struct DeriveCommand {
    /// Score carried by virtual neighbours across gaps
    pub gap_neighbor: GapNeighbor,
    /// Validate sort order while streaming
    pub check_sorted: bool,
}

impl DeriveCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how virtual neighbours across gaps are scored.
    pub fn with_gap_neighbor(mut self, gap_neighbor: GapNeighbor) -> Self {
        self.gap_neighbor = gap_neighbor;
        self
    }

    /// Enable inline sort validation.
    pub fn with_check_sorted(mut self, check: bool) -> Self {
        self.check_sorted = check;
        self
    }

    /// Execute derivation on a bedgraph file.
    pub fn run<P: AsRef<Path>, W: Write>(&self, input: P, output: &mut W) -> Result<TransformStats> {
        let reader = BedGraphReader::from_path(input)?;
        self.run_streaming(reader, output)
    }

    /// Execute derivation on stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<TransformStats> {
        let stdin = io::stdin();
        let reader = BedGraphReader::new(stdin.lock());
        self.run_streaming(reader, output)
    }

    /// Core streaming loop; skipped records are reported on stderr.
    pub fn run_streaming<R: Read, W: Write>(
        &self,
        reader: BedGraphReader<R>,
        output: &mut W,
    ) -> Result<TransformStats> {
        self.run_streaming_with_warnings(reader, output, print_warning)
    }

    /// Core streaming loop with a caller-supplied warning handler.
    pub fn run_streaming_with_warnings<R, W, F>(
        &self,
        reader: BedGraphReader<R>,
        output: &mut W,
        on_warning: F,
    ) -> Result<TransformStats>
    where
        R: Read,
        W: Write,
        F: FnMut(usize, &FormatViolation),
    {
        let mut transform = DerivativeTransform::new(self.gap_neighbor, TransformConfig::default());
        run_transform(&mut transform, reader, output, self.check_sorted, on_warning)
    }
}
