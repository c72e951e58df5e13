//! Bounded per-chromosome record window and chromosome tracking.
//!
//! Every transform walks a sorted stream one record at a time and must
//! notice the point where the chromosome id changes. [`ChromosomeTracker`]
//! is that state machine; [`WindowBuffer`] couples it with a
//! fixed-capacity history of the current chromosome's records.

use crate::record::BedGraphRecord;
use crate::streaming::buffers::DEFAULT_WINDOW_RESERVE;
use std::collections::VecDeque;

/// Position of the stream relative to chromosomes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum ChromState {
    /// No record seen yet.
    #[default]
    Empty,
    /// Inside the named chromosome.
    InChromosome(String),
}

/// Result of offering a chromosome id to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromTransition {
    /// The very first record of the stream.
    First,
    /// Same chromosome as the previous record.
    Same,
    /// The chromosome changed; the previous one is complete.
    Boundary,
}

/// Explicit `Empty -> InChromosome -> (boundary) -> InChromosome` machine.
#[derive(Debug, Clone, Default)]
pub struct ChromosomeTracker {
    state: ChromState,
    chromosomes: usize,
}

impl ChromosomeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `chrom` would cause a [`ChromTransition::Boundary`].
    #[inline]
    pub fn is_boundary(&self, chrom: &str) -> bool {
        matches!(&self.state, ChromState::InChromosome(name) if name != chrom)
    }

    /// Advance the machine with the chromosome of the next record.
    #[inline]
    pub fn observe(&mut self, chrom: &str) -> ChromTransition {
        let transition = match &self.state {
            ChromState::Empty => ChromTransition::First,
            ChromState::InChromosome(name) if name == chrom => return ChromTransition::Same,
            ChromState::InChromosome(_) => ChromTransition::Boundary,
        };
        self.state = ChromState::InChromosome(chrom.to_string());
        self.chromosomes += 1;
        transition
    }

    /// Name of the current chromosome, if any.
    pub fn current(&self) -> Option<&str> {
        match &self.state {
            ChromState::Empty => None,
            ChromState::InChromosome(name) => Some(name.as_str()),
        }
    }

    /// Number of distinct chromosome runs entered so far.
    pub fn chromosomes(&self) -> usize {
        self.chromosomes
    }
}

/// Fixed-capacity FIFO of records from the current chromosome.
#[derive(Debug, Clone)]
pub struct WindowBuffer {
    records: VecDeque<BedGraphRecord>,
    capacity: usize,
    tracker: ChromosomeTracker,
}

impl WindowBuffer {
    /// Create an empty buffer holding at most `capacity` records. Storage
    /// is allocated as records arrive.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_WINDOW_RESERVE)),
            capacity,
            tracker: ChromosomeTracker::new(),
        }
    }

    /// Append a record, evicting and returning the oldest one when the
    /// buffer grows past its capacity.
    #[inline]
    pub fn push(&mut self, record: BedGraphRecord) -> Option<BedGraphRecord> {
        self.tracker.observe(&record.chrom);
        self.records.push_back(record);
        if self.records.len() > self.capacity {
            self.records.pop_front()
        } else {
            None
        }
    }

    /// Remove and return the oldest record.
    #[inline]
    pub fn evict_oldest(&mut self) -> Option<BedGraphRecord> {
        self.records.pop_front()
    }

    /// True when `record` starts a new chromosome after a previous one.
    #[inline]
    pub fn is_chromosome_boundary(&self, record: &BedGraphRecord) -> bool {
        self.tracker.is_boundary(&record.chrom)
    }

    /// Drop the previous chromosome's records so `record` can start a new
    /// one; the tracker adopts the new chromosome on the following push.
    pub fn reset_for_new_chromosome(&mut self) {
        self.records.clear();
    }

    /// Index of the middle record, favouring the lower index for even sizes.
    #[inline]
    pub fn middle_index(&self) -> usize {
        self.records.len().saturating_sub(1) / 2
    }

    /// The last `n` records in stream order (fewer if the buffer is shorter).
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &BedGraphRecord> {
        let skip = self.records.len().saturating_sub(n);
        self.records.iter().skip(skip)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.records.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&BedGraphRecord> {
        self.records.get(index)
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut BedGraphRecord> {
        self.records.back_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BedGraphRecord> {
        self.records.iter()
    }

    /// Chromosome of the records currently tracked.
    pub fn current_chrom(&self) -> Option<&str> {
        self.tracker.current()
    }

    pub fn chromosomes(&self) -> usize {
        self.tracker.chromosomes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(chrom: &str, start: u64, score: f64) -> BedGraphRecord {
        BedGraphRecord::new(chrom, start, start + 1, score)
    }

    #[test]
    fn test_tracker_transitions() {
        let mut tracker = ChromosomeTracker::new();
        assert_eq!(tracker.current(), None);
        assert!(!tracker.is_boundary("chr1"));

        assert_eq!(tracker.observe("chr1"), ChromTransition::First);
        assert_eq!(tracker.observe("chr1"), ChromTransition::Same);
        assert!(tracker.is_boundary("chr2"));
        assert_eq!(tracker.observe("chr2"), ChromTransition::Boundary);
        assert_eq!(tracker.current(), Some("chr2"));
        assert_eq!(tracker.chromosomes(), 2);
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut window = WindowBuffer::new(3);
        assert_eq!(window.push(rec("chr1", 0, 1.0)), None);
        assert_eq!(window.push(rec("chr1", 1, 2.0)), None);
        assert_eq!(window.push(rec("chr1", 2, 3.0)), None);
        assert!(window.is_full());

        let evicted = window.push(rec("chr1", 3, 4.0)).unwrap();
        assert_eq!(evicted.start, 0);
        assert_eq!(window.len(), 3);
        assert_eq!(window.get(0).unwrap().start, 1);
    }

    #[test]
    fn test_middle_index() {
        let mut window = WindowBuffer::new(5);
        assert_eq!(window.middle_index(), 0);
        for start in 0..4 {
            window.push(rec("chr1", start, 0.0));
        }
        // Even length favours the lower neighbour.
        assert_eq!(window.middle_index(), 1);
        window.push(rec("chr1", 4, 0.0));
        assert_eq!(window.middle_index(), 2);
    }

    #[test]
    fn test_chromosome_boundary_and_reset() {
        let mut window = WindowBuffer::new(3);
        let first = rec("chr1", 0, 1.0);
        assert!(!window.is_chromosome_boundary(&first));
        window.push(first);
        window.push(rec("chr1", 1, 1.0));

        let next = rec("chr2", 0, 5.0);
        assert!(window.is_chromosome_boundary(&next));
        window.reset_for_new_chromosome();
        assert!(window.is_empty());
        window.push(next);

        assert_eq!(window.current_chrom(), Some("chr2"));
        assert_eq!(window.chromosomes(), 2);
    }

    #[test]
    fn test_tail() {
        let mut window = WindowBuffer::new(5);
        for start in 0..5 {
            window.push(rec("chr1", start, start as f64));
        }
        let tail: Vec<u64> = window.tail(2).map(|r| r.start).collect();
        assert_eq!(tail, vec![3, 4]);
        assert_eq!(window.tail(10).count(), 5);
        assert_eq!(window.tail(0).count(), 0);
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut window = WindowBuffer::new(usize::MAX);
        assert_eq!(window.capacity(), usize::MAX);
        assert!(window.records.capacity() <= 2 * DEFAULT_WINDOW_RESERVE);

        for start in 0..3 {
            assert_eq!(window.push(rec("chr1", start, 1.0)), None);
        }
        assert_eq!(window.len(), 3);
        assert!(!window.is_full());
    }
}
