//! Command implementations for bgtools.
//!
//! Each command wraps one transform with the I/O plumbing: it reads a
//! bedgraph file or stdin, optionally validates sort order inline, and
//! writes the transform's output through a buffered writer.

pub mod blur;
pub mod compress;
pub mod decompress;
pub mod derive;

pub use blur::BlurCommand;
pub use compress::CompressCommand;
pub use decompress::DecompressCommand;
pub use derive::DeriveCommand;

use crate::bedgraph::{BedGraphReader, Result};
use crate::streaming::{BedGraphWriter, SortValidator};
use crate::transform::{FormatViolation, Push, Transform};
use std::fmt;
use std::io::{Read, Write};

/// Statistics from one transform run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransformStats {
    /// Number of records parsed from the input
    pub records_read: usize,
    /// Number of records written to the output
    pub records_written: usize,
    /// Number of records skipped with a warning
    pub records_skipped: usize,
    /// Number of chromosome runs in the input
    pub chromosomes: usize,
}

impl fmt::Display for TransformStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Read: {}, Written: {}, Skipped: {}, Chromosomes: {}",
            self.records_read, self.records_written, self.records_skipped, self.chromosomes
        )
    }
}

/// Print a skipped record's warning to stderr.
pub fn print_warning(line: usize, violation: &FormatViolation) {
    eprintln!("Warning: line {}: {}", line, violation);
}

/// Drive `transform` over every record of `reader`, writing to `output`.
///
/// Records the transform refuses are counted and reported through
/// `on_warning` with their line number; parse, sort and I/O errors abort
/// the run.
pub fn run_transform<T, R, W, F>(
    transform: &mut T,
    mut reader: BedGraphReader<R>,
    output: &mut W,
    check_sorted: bool,
    mut on_warning: F,
) -> Result<TransformStats>
where
    T: Transform,
    R: Read,
    W: Write,
    F: FnMut(usize, &FormatViolation),
{
    let mut stats = TransformStats::default();
    let mut writer = BedGraphWriter::new(output);
    let mut validator = check_sorted.then(SortValidator::new);

    while let Some(record) = reader.read_record()? {
        stats.records_read += 1;
        let line = reader.line_number();

        if let Some(validator) = validator.as_mut() {
            validator.validate(&record.chrom, record.start, record.end, line)?;
        }

        if let Push::Skipped(violation) = transform.push(record, &mut writer)? {
            stats.records_skipped += 1;
            on_warning(line, &violation);
        }
    }

    transform.finish(&mut writer)?;
    writer.flush()?;

    stats.records_written = writer.records_written();
    stats.chromosomes = transform.chromosomes();
    Ok(stats)
}
