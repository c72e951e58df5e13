//! Expansion of run-length records into unit-length records.
//!
//! Every record spanning `n` positions becomes `n` consecutive records of
//! length one with the same score. Positions missing between two records
//! of the same chromosome are filled with [`TransformConfig::fill_value`].
//! Nothing is filled before the first record of a chromosome or after its
//! last one.
//!
//! # Memory Complexity
//!
//! O(1): only the end of the last emitted record is remembered.

use super::{Push, RecordSink, Transform};
use crate::bedgraph::Result;
use crate::config::TransformConfig;
use crate::record::BedGraphRecord;
use crate::streaming::ChromosomeTracker;

/// Streaming decompressor.
#[derive(Debug, Clone)]
pub struct DecompressTransform {
    tracker: ChromosomeTracker,
    last_end: Option<u64>,
    config: TransformConfig,
}

impl Default for DecompressTransform {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}

impl DecompressTransform {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            tracker: ChromosomeTracker::new(),
            last_end: None,
            config,
        }
    }

    /// Emit fill records for `[from, to)` on the record's chromosome.
    fn fill_gap<S: RecordSink + ?Sized>(
        &self,
        record: &BedGraphRecord,
        from: u64,
        to: u64,
        sink: &mut S,
    ) -> Result<()> {
        let mut filler = record.with_score(self.config.fill_value);
        for pos in from..to {
            filler.start = pos;
            filler.end = pos + 1;
            sink.emit(&filler)?;
        }
        Ok(())
    }
}

impl Transform for DecompressTransform {
    fn push<S: RecordSink + ?Sized>(
        &mut self,
        record: BedGraphRecord,
        sink: &mut S,
    ) -> Result<Push> {
        if self.tracker.is_boundary(&record.chrom) {
            self.last_end = None;
        }
        self.tracker.observe(&record.chrom);

        // Overlapping input never fills backwards.
        if let Some(last_end) = self.last_end {
            if last_end < record.start {
                self.fill_gap(&record, last_end, record.start, sink)?;
            }
        }

        if record.is_unit() {
            sink.emit(&record)?;
        } else {
            for unit in record.expand_positions() {
                sink.emit(&unit)?;
            }
        }
        self.last_end = Some(record.end);

        Ok(Push::Accepted)
    }

    fn finish<S: RecordSink + ?Sized>(&mut self, _sink: &mut S) -> Result<()> {
        self.last_end = None;
        Ok(())
    }

    fn chromosomes(&self) -> usize {
        self.tracker.chromosomes()
    }
}
