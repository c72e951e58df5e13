//! Discrete, normalized Gaussian kernel.

use std::ops::Index;
use thiserror::Error;

/// Longest kernel accepted, in positions. Reached at sigma ~ 333333.
pub const MAX_KERNEL_LEN: usize = 2_000_001;

/// Sigma values no kernel can be built for.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("sigma must be finite, got {0}")]
    NonFinite(f64),

    #[error("sigma {sigma} needs a kernel longer than {max} positions")]
    TooLong { sigma: f64, max: usize },
}

/// Symmetric weight vector of odd length used to convolve a window of
/// scores. Weights are non-negative and sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    weights: Vec<f64>,
}

impl GaussianKernel {
    /// Build the kernel for `sigma`.
    ///
    /// A non-positive (or NaN) sigma yields the identity kernel `[0, 1, 0]`.
    /// Otherwise the kernel has `max(3, 2 * floor(3 * sigma + 0.5) + 1)`
    /// entries, `exp(-x² / 2σ²)` at offset `x` from the center, divided by
    /// their sum.
    ///
    /// Fails for an infinite sigma and for kernels longer than
    /// [`MAX_KERNEL_LEN`].
    pub fn new(sigma: f64) -> Result<Self, KernelError> {
        if sigma.is_nan() || sigma <= 0.0 {
            return Ok(Self::identity());
        }
        if sigma.is_infinite() {
            return Err(KernelError::NonFinite(sigma));
        }

        let too_long = || KernelError::TooLong {
            sigma,
            max: MAX_KERNEL_LEN,
        };
        let half = (3.0 * sigma + 0.5).floor();
        if half >= MAX_KERNEL_LEN as f64 {
            return Err(too_long());
        }
        let size = (half as usize)
            .checked_mul(2)
            .and_then(|n| n.checked_add(1))
            .filter(|&n| n <= MAX_KERNEL_LEN)
            .ok_or_else(too_long)?
            .max(3);
        let center = size / 2;
        let two_sq_sigma = 2.0 * sigma * sigma;

        let mut weights = vec![0.0; size];
        for x in 0..=center {
            let val = (-((x * x) as f64) / two_sq_sigma).exp();
            weights[center - x] = val;
            weights[center + x] = val;
        }

        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Ok(Self { weights })
    }

    /// The pass-through kernel `[0, 1, 0]`.
    pub fn identity() -> Self {
        Self {
            weights: vec![0.0, 1.0, 0.0],
        }
    }

    /// Kernel length `L` (always odd).
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Center index `(L - 1) / 2`.
    #[inline]
    pub fn center(&self) -> usize {
        (self.weights.len() - 1) / 2
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weighted sum of `scores` against the kernel. Extra scores beyond the
    /// kernel length are ignored.
    #[inline]
    pub fn convolve<I: IntoIterator<Item = f64>>(&self, scores: I) -> f64 {
        self.weights
            .iter()
            .zip(scores)
            .map(|(w, s)| w * s)
            .sum()
    }
}

impl Index<usize> for GaussianKernel {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.weights[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(kernel: &GaussianKernel) {
        let l = kernel.len();
        assert!(l >= 3);
        assert_eq!(l % 2, 1);
        for i in 0..l {
            assert!(kernel[i] >= 0.0);
            assert_eq!(kernel[i], kernel[l - 1 - i]);
        }
        let sum: f64 = kernel.weights().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12, "sum was {sum}");
    }

    #[test]
    fn test_identity_for_non_positive_sigma() {
        for sigma in [0.0, -1.0, -0.5, f64::NAN] {
            assert_eq!(GaussianKernel::new(sigma).unwrap().weights(), &[0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_kernel_sizes() {
        // 2 * floor(3 * sigma + 0.5) + 1, at least 3
        assert_eq!(GaussianKernel::new(0.1).unwrap().len(), 3);
        assert_eq!(GaussianKernel::new(0.5).unwrap().len(), 5);
        assert_eq!(GaussianKernel::new(1.0).unwrap().len(), 7);
        assert_eq!(GaussianKernel::new(2.0).unwrap().len(), 13);
        assert_eq!(GaussianKernel::new(2.5).unwrap().len(), 17);
    }

    #[test]
    fn test_kernel_well_formed() {
        for sigma in [0.1, 0.3, 0.5, 1.0, 1.7, 3.0, 10.0] {
            assert_well_formed(&GaussianKernel::new(sigma).unwrap());
        }
    }

    #[test]
    fn test_kernel_peak_at_center() {
        let kernel = GaussianKernel::new(1.0).unwrap();
        let c = kernel.center();
        assert_eq!(c, 3);
        for i in 0..kernel.len() {
            assert!(kernel[i] <= kernel[c]);
        }
        // exp(-1/2) ratio between center and its neighbour
        assert!((kernel[c + 1] / kernel[c] - (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_convolve_constant() {
        let kernel = GaussianKernel::new(1.3).unwrap();
        let out = kernel.convolve(std::iter::repeat(4.0).take(kernel.len()));
        assert!((out - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_infinite_sigma_is_rejected() {
        assert_eq!(
            GaussianKernel::new(f64::INFINITY),
            Err(KernelError::NonFinite(f64::INFINITY))
        );
        // Negative infinity is non-positive: identity.
        assert_eq!(
            GaussianKernel::new(f64::NEG_INFINITY).unwrap(),
            GaussianKernel::identity()
        );
    }

    #[test]
    fn test_oversized_kernel_is_rejected() {
        for sigma in [1e6, 1e20, f64::MAX] {
            assert!(matches!(
                GaussianKernel::new(sigma),
                Err(KernelError::TooLong { .. })
            ));
        }

        // floor(3 * 333333 + 0.5) = 999999, so 1999999 entries.
        let kernel = GaussianKernel::new(333_333.0).unwrap();
        assert_eq!(kernel.len(), 1_999_999);
        assert!(kernel.len() <= MAX_KERNEL_LEN);
    }
}
