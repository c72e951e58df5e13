//! Run-length compression of adjacent equal-score records.
//!
//! Consecutive records on the same chromosome merge when the first ends
//! exactly where the second starts and both carry the same score. Scores
//! are compared exactly; records separated by a gap are never merged.
//!
//! # Memory Complexity
//!
//! O(1): only the run being extended is buffered.

use super::{Push, RecordSink, Transform};
use crate::bedgraph::Result;
use crate::record::BedGraphRecord;
use crate::streaming::WindowBuffer;

/// Streaming compressor. The window holds the open run plus the record
/// being considered for merging into it.
#[derive(Debug, Clone)]
pub struct CompressTransform {
    window: WindowBuffer,
}

impl Default for CompressTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressTransform {
    pub fn new() -> Self {
        Self {
            window: WindowBuffer::new(2),
        }
    }

    #[inline]
    fn mergeable(prev: &BedGraphRecord, next: &BedGraphRecord) -> bool {
        prev.end == next.start && prev.score == next.score
    }
}

impl Transform for CompressTransform {
    fn push<S: RecordSink + ?Sized>(
        &mut self,
        record: BedGraphRecord,
        sink: &mut S,
    ) -> Result<Push> {
        if self.window.is_chromosome_boundary(&record) {
            if let Some(run) = self.window.evict_oldest() {
                sink.emit(&run)?;
            }
            self.window.reset_for_new_chromosome();
        }

        self.window.push(record);
        if self.window.is_full() {
            if let Some(prev) = self.window.evict_oldest() {
                match self.window.back_mut() {
                    Some(next) if Self::mergeable(&prev, &*next) => next.start = prev.start,
                    _ => sink.emit(&prev)?,
                }
            }
        }

        Ok(Push::Accepted)
    }

    fn finish<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        if let Some(run) = self.window.evict_oldest() {
            sink.emit(&run)?;
        }
        self.window.reset_for_new_chromosome();
        Ok(())
    }

    fn chromosomes(&self) -> usize {
        self.window.chromosomes()
    }
}
