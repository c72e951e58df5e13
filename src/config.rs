//! Transform configuration.
//!
//! Values that shape transform output are passed explicitly into each
//! transform's constructor; there is no process-wide mutable state.

/// Score given to records that lack a full smoothing window.
pub const DEFAULT_OUT_OF_BOUNDARY_VALUE: f64 = 0.0;

/// Score given to positions synthesized to fill gaps.
pub const DEFAULT_FILL_VALUE: f64 = 0.0;

/// Settings shared by the transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformConfig {
    /// Score emitted by blur for leading/trailing records of a chromosome.
    pub out_of_boundary: f64,
    /// Score of the unit records decompress inserts into gaps, and of the
    /// virtual neighbours derive uses with [`GapNeighbor::Fill`].
    pub fill_value: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            out_of_boundary: DEFAULT_OUT_OF_BOUNDARY_VALUE,
            fill_value: DEFAULT_FILL_VALUE,
        }
    }
}

impl TransformConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the out-of-boundary score.
    pub fn with_out_of_boundary(mut self, value: f64) -> Self {
        self.out_of_boundary = value;
        self
    }

    /// Set the gap fill score.
    pub fn with_fill_value(mut self, value: f64) -> Self {
        self.fill_value = value;
        self
    }
}

/// Score carried by a virtual neighbour that derive synthesizes one
/// position away from a record whose real neighbour is not adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapNeighbor {
    /// The virtual neighbour copies the score of the record it flanks.
    #[default]
    Nearest,
    /// The virtual neighbour carries [`TransformConfig::fill_value`], as if
    /// the gap had been decompressed first.
    Fill,
}
