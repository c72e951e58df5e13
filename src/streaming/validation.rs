//! Sort validation for streaming transforms.
//!
//! Every transform assumes its input is sorted by chromosome then start,
//! without overlaps. Validation is opt-in and runs inline, as records are
//! processed, so the input is still read only once.
//!
//! Checks:
//! 1. All records for a chromosome are contiguous (no interleaving)
//! 2. Within a chromosome, starts are non-decreasing
//! 3. A record never starts before the previous record's end

use crate::bedgraph::BedGraphError;
use rustc_hash::FxHashSet;

/// Inline sort validator for use within streaming loops.
#[derive(Debug, Default)]
pub struct SortValidator {
    prev_chrom: Option<String>,
    prev_start: u64,
    prev_end: u64,
    seen_chroms: FxHashSet<String>,
}

impl SortValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that the given record keeps the stream sorted and
    /// non-overlapping. `line` is only used for the error message.
    #[inline]
    pub fn validate(
        &mut self,
        chrom: &str,
        start: u64,
        end: u64,
        line: usize,
    ) -> Result<(), BedGraphError> {
        match self.prev_chrom.as_deref() {
            Some(pc) if pc != chrom => {
                if self.seen_chroms.contains(chrom) {
                    return Err(BedGraphError::InvalidFormat(format!(
                        "File not sorted: chromosome '{}' at line {} was seen earlier (chromosomes must be contiguous)",
                        chrom, line
                    )));
                }
                self.seen_chroms.insert(pc.to_string());
                self.prev_chrom = Some(chrom.to_string());
            }
            Some(_) => {
                if start < self.prev_start {
                    return Err(BedGraphError::InvalidFormat(format!(
                        "File not sorted: position {} at line {} comes after {} on {}",
                        start, line, self.prev_start, chrom
                    )));
                }
                if start < self.prev_end {
                    return Err(BedGraphError::InvalidFormat(format!(
                        "Overlapping entries: [{}, {}) at line {} overlaps previous end {} on {}",
                        start, end, line, self.prev_end, chrom
                    )));
                }
            }
            None => self.prev_chrom = Some(chrom.to_string()),
        }

        self.prev_start = start;
        self.prev_end = end;
        Ok(())
    }
}
