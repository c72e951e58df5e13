//! Centered first difference of unit-resolution signals.
//!
//! Records are collected per chromosome and differentiated when the
//! chromosome is complete:
//! - the first and last record of a chromosome get `0.0`;
//! - an interior record whose neighbours sit one position away on both
//!   sides gets `(next - prev) / 2`;
//! - a missing neighbour is replaced by a virtual record one position
//!   away, scored according to [`GapNeighbor`].
//!
//! Only unit-length records are accepted. Longer records are reported as
//! [`FormatViolation::NotUnitLength`] and skipped.
//!
//! # Memory Complexity
//!
//! O(records in the largest chromosome)

use super::{FormatViolation, Push, RecordSink, Transform};
use crate::bedgraph::Result;
use crate::config::{GapNeighbor, TransformConfig};
use crate::record::BedGraphRecord;
use crate::streaming::ChromosomeTracker;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    start: u64,
    score: f64,
}

/// Streaming derivative estimator.
#[derive(Debug, Clone)]
pub struct DerivativeTransform {
    tracker: ChromosomeTracker,
    points: Vec<Point>,
    gap_neighbor: GapNeighbor,
    config: TransformConfig,
}

impl Default for DerivativeTransform {
    fn default() -> Self {
        Self::new(GapNeighbor::default(), TransformConfig::default())
    }
}

impl DerivativeTransform {
    pub fn new(gap_neighbor: GapNeighbor, config: TransformConfig) -> Self {
        Self {
            tracker: ChromosomeTracker::new(),
            points: Vec::new(),
            gap_neighbor,
            config,
        }
    }

    pub fn gap_neighbor(&self) -> GapNeighbor {
        self.gap_neighbor
    }

    /// Score of a virtual neighbour flanking `here`.
    #[inline]
    fn virtual_score(&self, here: &Point) -> f64 {
        match self.gap_neighbor {
            GapNeighbor::Nearest => here.score,
            GapNeighbor::Fill => self.config.fill_value,
        }
    }

    /// Derivative at interior point `here` given its real neighbours.
    fn interior(&self, prev: &Point, here: &Point, next: &Point) -> f64 {
        let adjacent = |a: u64, b: u64| b.checked_sub(a) == Some(1);
        let left = if adjacent(prev.start, here.start) {
            prev.score
        } else {
            self.virtual_score(here)
        };
        let right = if adjacent(here.start, next.start) {
            next.score
        } else {
            self.virtual_score(here)
        };
        (right - left) / 2.0
    }

    /// Emit the derivative of the collected chromosome and clear it.
    fn flush<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        let points = std::mem::take(&mut self.points);
        let Some(chrom) = self.tracker.current() else {
            return Ok(());
        };

        let mut out = BedGraphRecord::new(chrom, 0, 1, 0.0);
        let mut emit = |start: u64, score: f64| {
            out.start = start;
            out.end = start + 1;
            out.score = score;
            sink.emit(&out)
        };

        match points.as_slice() {
            [] => {}
            [only] => emit(only.start, 0.0)?,
            [first, .., last] => {
                emit(first.start, 0.0)?;
                for w in points.windows(3) {
                    emit(w[1].start, self.interior(&w[0], &w[1], &w[2]))?;
                }
                emit(last.start, 0.0)?;
            }
        }

        self.points = points;
        self.points.clear();
        Ok(())
    }
}

impl Transform for DerivativeTransform {
    fn push<S: RecordSink + ?Sized>(
        &mut self,
        record: BedGraphRecord,
        sink: &mut S,
    ) -> Result<Push> {
        if !record.is_unit() {
            return Ok(Push::Skipped(FormatViolation::NotUnitLength {
                chrom: record.chrom,
                start: record.start,
                end: record.end,
            }));
        }

        if self.tracker.is_boundary(&record.chrom) {
            self.flush(sink)?;
        }
        self.tracker.observe(&record.chrom);
        self.points.push(Point {
            start: record.start,
            score: record.score,
        });

        Ok(Push::Accepted)
    }

    fn finish<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        self.flush(sink)
    }

    fn chromosomes(&self) -> usize {
        self.tracker.chromosomes()
    }
}
