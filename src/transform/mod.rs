//! Single-pass bedgraph transforms.
//!
//! A transform receives records in file order through [`Transform::push`]
//! and writes whatever it can already decide to a [`RecordSink`]. After
//! the last record, [`Transform::finish`] flushes the trailing state.
//!
//! Input must be sorted by chromosome then start. Transforms detect
//! chromosome changes themselves and never look further ahead than their
//! own window.

pub mod blur;
pub mod compress;
pub mod decompress;
pub mod derivative;
pub mod kernel;

pub use blur::BlurTransform;
pub use compress::CompressTransform;
pub use decompress::DecompressTransform;
pub use derivative::DerivativeTransform;
pub use kernel::{GaussianKernel, KernelError, MAX_KERNEL_LEN};

use crate::bedgraph::Result;
use crate::record::BedGraphRecord;
use thiserror::Error;

/// Destination for emitted records.
pub trait RecordSink {
    fn emit(&mut self, record: &BedGraphRecord) -> Result<()>;
}

impl RecordSink for Vec<BedGraphRecord> {
    #[inline]
    fn emit(&mut self, record: &BedGraphRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// A record the transform accepted but cannot use. Reported as a warning;
/// processing continues with the next record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatViolation {
    #[error(
        "entry {chrom}:{start}-{end} is longer than one position; this bedgraph seems to be compressed, only uncompressed bedgraphs are supported"
    )]
    NotUnitLength { chrom: String, start: u64, end: u64 },
}

/// Outcome of pushing one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Push {
    Accepted,
    Skipped(FormatViolation),
}

/// A stateful single-pass transform.
pub trait Transform {
    /// Feed the next record of the stream.
    fn push<S: RecordSink + ?Sized>(&mut self, record: BedGraphRecord, sink: &mut S)
        -> Result<Push>;

    /// Flush everything still buffered after the last record.
    fn finish<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> Result<()>;

    /// Number of chromosome runs seen so far.
    fn chromosomes(&self) -> usize;
}

/// Run `transform` over `records` into a `Vec` (useful for testing).
pub fn apply<T, I>(transform: &mut T, records: I) -> Result<Vec<BedGraphRecord>>
where
    T: Transform,
    I: IntoIterator<Item = BedGraphRecord>,
{
    let mut out = Vec::new();
    for record in records {
        transform.push(record, &mut out)?;
    }
    transform.finish(&mut out)?;
    Ok(out)
}
