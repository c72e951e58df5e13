//! Gaussian smoothing over a sliding window.
//!
//! # Algorithm
//!
//! The window holds the last `L` records of the current chromosome, `L`
//! being the kernel length, with center index `c = (L - 1) / 2`:
//! 1. The first `c` records of a chromosome have no full window on their
//!    left and are emitted with the out-of-boundary score as soon as `c`
//!    records are buffered.
//! 2. Once `L` records are buffered, every push emits the middle record
//!    with the kernel-weighted sum of the window's scores.
//! 3. At a chromosome change or end of stream, the records not yet emitted
//!    (the last `c` of a full window) get the out-of-boundary score.
//!
//! Every input record is emitted exactly once, in input order.
//!
//! # Memory Complexity
//!
//! O(L)

use super::{GaussianKernel, Push, RecordSink, Transform};
use crate::bedgraph::Result;
use crate::config::TransformConfig;
use crate::record::BedGraphRecord;
use crate::streaming::WindowBuffer;

/// Streaming Gaussian blur.
#[derive(Debug, Clone)]
pub struct BlurTransform {
    kernel: GaussianKernel,
    window: WindowBuffer,
    config: TransformConfig,
}

impl BlurTransform {
    /// Blur with a Gaussian kernel of the given sigma.
    pub fn new(sigma: f64, config: TransformConfig) -> Result<Self> {
        Ok(Self::with_kernel(GaussianKernel::new(sigma)?, config))
    }

    pub fn with_kernel(kernel: GaussianKernel, config: TransformConfig) -> Self {
        let window = WindowBuffer::new(kernel.len());
        Self {
            kernel,
            window,
            config,
        }
    }

    pub fn kernel(&self) -> &GaussianKernel {
        &self.kernel
    }

    /// Number of buffered records that have not been emitted yet.
    fn pending(&self) -> usize {
        let len = self.window.len();
        let c = self.kernel.center();
        if self.window.is_full() {
            c
        } else if len >= c {
            len - c
        } else {
            len
        }
    }

    fn emit_out_of_boundary<'a, S, I>(&self, records: I, sink: &mut S) -> Result<()>
    where
        S: RecordSink + ?Sized,
        I: Iterator<Item = &'a BedGraphRecord>,
    {
        for record in records {
            sink.emit(&record.with_score(self.config.out_of_boundary))?;
        }
        Ok(())
    }

    /// Emit the pending tail of the current chromosome and empty the window.
    fn flush_chromosome<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        self.emit_out_of_boundary(self.window.tail(self.pending()), sink)?;
        self.window.reset_for_new_chromosome();
        Ok(())
    }
}

impl Transform for BlurTransform {
    fn push<S: RecordSink + ?Sized>(
        &mut self,
        record: BedGraphRecord,
        sink: &mut S,
    ) -> Result<Push> {
        if self.window.is_chromosome_boundary(&record) {
            self.flush_chromosome(sink)?;
        }
        self.window.push(record);

        if !self.window.is_full() {
            if self.window.len() == self.kernel.center() {
                self.emit_out_of_boundary(self.window.iter(), sink)?;
            }
        } else if let Some(middle) = self.window.get(self.window.middle_index()) {
            let blurred = self.kernel.convolve(self.window.iter().map(|r| r.score));
            sink.emit(&middle.with_score(blurred))?;
        }

        Ok(Push::Accepted)
    }

    fn finish<S: RecordSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        self.flush_chromosome(sink)
    }

    fn chromosomes(&self) -> usize {
        self.window.chromosomes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::apply;

    fn unit_records(chrom: &str, scores: &[f64]) -> Vec<BedGraphRecord> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| BedGraphRecord::new(chrom, i as u64, i as u64 + 1, s))
            .collect()
    }

    fn scores(records: &[BedGraphRecord]) -> Vec<f64> {
        records.iter().map(|r| r.score).collect()
    }

    #[test]
    fn test_identity_kernel() {
        let mut blur = BlurTransform::new(0.0, TransformConfig::default()).unwrap();
        let out = apply(&mut blur, unit_records("chr1", &[1.0, 2.0, 3.0, 4.0])).unwrap();

        assert_eq!(scores(&out), vec![0.0, 2.0, 3.0, 0.0]);
        let starts: Vec<u64> = out.iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_constant_signal_is_invariant() {
        let mut blur = BlurTransform::new(0.5, TransformConfig::default()).unwrap();
        assert_eq!(blur.kernel().len(), 5);

        let out = apply(&mut blur, unit_records("chr1", &[3.0; 9])).unwrap();
        assert_eq!(out.len(), 9);
        for rec in &out[..2] {
            assert_eq!(rec.score, 0.0);
        }
        for rec in &out[2..7] {
            assert!((rec.score - 3.0).abs() < 1e-9, "got {}", rec.score);
        }
        for rec in &out[7..] {
            assert_eq!(rec.score, 0.0);
        }
    }

    #[test]
    fn test_impulse_response_matches_kernel() {
        let mut blur = BlurTransform::new(1.0, TransformConfig::default()).unwrap();
        let kernel = blur.kernel().clone();
        assert_eq!(kernel.len(), 7);

        let mut input = vec![0.0; 13];
        input[6] = 1.0;
        let out = apply(&mut blur, unit_records("chr1", &input)).unwrap();

        // Positions 3..=9 see the impulse through kernel weights 6..=0.
        for pos in 3..=9 {
            let expected = kernel[6 - (pos - 3)];
            assert!((out[pos].score - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_chromosome_boundary_flush() {
        let mut blur = BlurTransform::new(0.0, TransformConfig::default()).unwrap();
        let mut input = unit_records("chr1", &[1.0, 2.0, 3.0, 4.0, 5.0]);
        input.extend(unit_records("chr2", &[6.0, 7.0, 8.0, 9.0]));

        let out = apply(&mut blur, input).unwrap();
        assert_eq!(out.len(), 9);
        assert!(out[..5].iter().all(|r| r.chrom == "chr1"));
        assert!(out[5..].iter().all(|r| r.chrom == "chr2"));
        assert_eq!(
            scores(&out),
            vec![0.0, 2.0, 3.0, 4.0, 0.0, 0.0, 7.0, 8.0, 0.0]
        );
        assert_eq!(blur.chromosomes(), 2);
    }

    #[test]
    fn test_short_chromosomes_keep_every_record() {
        let mut blur = BlurTransform::new(0.5, TransformConfig::default()).unwrap();
        let mut input = unit_records("chrA", &[1.0]);
        input.extend(unit_records("chrB", &[1.0, 2.0, 3.0]));
        input.extend(unit_records("chrC", &[1.0, 2.0, 3.0, 4.0]));

        let out = apply(&mut blur, input).unwrap();
        let labels: Vec<(&str, u64)> = out.iter().map(|r| (r.chrom.as_str(), r.start)).collect();
        assert_eq!(
            labels,
            vec![
                ("chrA", 0),
                ("chrB", 0),
                ("chrB", 1),
                ("chrB", 2),
                ("chrC", 0),
                ("chrC", 1),
                ("chrC", 2),
                ("chrC", 3),
            ]
        );
        assert!(out.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_out_of_boundary_value() {
        let config = TransformConfig::new().with_out_of_boundary(-1.0);
        let mut blur = BlurTransform::new(0.0, config).unwrap();
        let out = apply(&mut blur, unit_records("chr1", &[5.0, 5.0, 5.0])).unwrap();

        assert_eq!(scores(&out), vec![-1.0, 5.0, -1.0]);
    }

    #[test]
    fn test_empty_stream() {
        let mut blur = BlurTransform::new(2.0, TransformConfig::default()).unwrap();
        let out = apply(&mut blur, Vec::new()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_chromosome_of_exactly_center_length() {
        let mut blur = BlurTransform::new(0.5, TransformConfig::default()).unwrap();
        assert_eq!(blur.kernel().center(), 2);

        let mut input = unit_records("chrA", &[4.0, 5.0]);
        input.extend(unit_records("chrB", &[1.0, 1.0, 1.0, 1.0, 1.0]));
        let out = apply(&mut blur, input).unwrap();

        let labels: Vec<(&str, u64)> = out.iter().map(|r| (r.chrom.as_str(), r.start)).collect();
        assert_eq!(
            labels,
            vec![
                ("chrA", 0),
                ("chrA", 1),
                ("chrB", 0),
                ("chrB", 1),
                ("chrB", 2),
                ("chrB", 3),
                ("chrB", 4),
            ]
        );
        assert_eq!(scores(&out[..2]), vec![0.0, 0.0]);
        assert!((out[4].score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_unusable_sigma() {
        for sigma in [f64::INFINITY, 1e20] {
            let err = BlurTransform::new(sigma, TransformConfig::default()).unwrap_err();
            assert!(matches!(err, crate::bedgraph::BedGraphError::Kernel(_)));
        }
    }
}
