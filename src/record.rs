//! Core bedgraph record type.

use std::fmt;

/// One bedgraph entry: a half-open interval on a chromosome with a score.
/// Uses 0-based, half-open coordinates (BED format).
#[derive(Debug, Clone, PartialEq)]
pub struct BedGraphRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub score: f64,
}

impl BedGraphRecord {
    /// Create a new record. The chromosome name is trimmed.
    #[inline]
    pub fn new(chrom: impl Into<String>, start: u64, end: u64, score: f64) -> Self {
        let chrom = chrom.into();
        let chrom = if chrom.trim().len() == chrom.len() {
            chrom
        } else {
            chrom.trim().to_string()
        };
        Self {
            chrom,
            start,
            end,
            score,
        }
    }

    /// Number of positions covered (`end - start`).
    #[inline]
    pub fn span(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// True if the record covers exactly one position.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.span() == 1
    }

    /// Copy of this record with a different score.
    #[inline]
    pub fn with_score(&self, score: f64) -> Self {
        Self {
            chrom: self.chrom.clone(),
            start: self.start,
            end: self.end,
            score,
        }
    }

    /// Unit-length records for every position in `[start, end)`, each
    /// carrying this record's score.
    pub fn expand_positions(&self) -> impl Iterator<Item = BedGraphRecord> + '_ {
        (self.start..self.end).map(move |pos| BedGraphRecord {
            chrom: self.chrom.clone(),
            start: pos,
            end: pos + 1,
            score: self.score,
        })
    }
}

impl fmt::Display for BedGraphRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ryu_buf = ryu::Buffer::new();
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chrom,
            self.start,
            self.end,
            ryu_buf.format(self.score)
        )
    }
}
