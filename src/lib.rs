//! bgtools: streaming bedgraph transforms
//!
//! This library applies single-pass numeric transforms to sorted bedgraph
//! files without loading them into memory.
//!
//! # Features
//!
//! - **Gaussian blur**: windowed smoothing with configurable boundary score
//! - **Run-length compression and decompression** of unit-resolution signals
//! - **Derivative**: centered first difference with gap handling
//! - **Streaming I/O**: one forward pass, memory bounded by the window
//!
//! # Example
//!
//! ```rust,no_run
//! use bgtools::commands::CompressCommand;
//! use std::io;
//!
//! let stdout = io::stdout();
//! let mut handle = stdout.lock();
//! let stats = CompressCommand::new().run("signal.bedgraph", &mut handle).unwrap();
//! eprintln!("{}", stats);
//! ```
//!
//! Transforms can also run on in-memory records:
//!
//! ```rust
//! use bgtools::transform::{apply, CompressTransform};
//! use bgtools::BedGraphRecord;
//!
//! let records = vec![
//!     BedGraphRecord::new("chrA", 0, 1, 1.0),
//!     BedGraphRecord::new("chrA", 1, 2, 1.0),
//! ];
//! let out = apply(&mut CompressTransform::new(), records).unwrap();
//! assert_eq!(out, vec![BedGraphRecord::new("chrA", 0, 2, 1.0)]);
//! ```

pub mod bedgraph;
pub mod commands;
pub mod config;
pub mod record;
pub mod streaming;
pub mod transform;

// Re-export commonly used types
pub use bedgraph::{parse_records, read_records, BedGraphError, BedGraphReader};
pub use config::{GapNeighbor, TransformConfig};
pub use record::BedGraphRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bedgraph::{parse_records, read_records, BedGraphError, BedGraphReader};
    pub use crate::commands::{
        BlurCommand, CompressCommand, DecompressCommand, DeriveCommand, TransformStats,
    };
    pub use crate::config::{GapNeighbor, TransformConfig};
    pub use crate::record::BedGraphRecord;
    pub use crate::transform::{
        apply, BlurTransform, CompressTransform, DecompressTransform, DerivativeTransform,
        GaussianKernel, Transform,
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_compress_decompress_workflow() {
        use crate::bedgraph::parse_records;
        use crate::transform::{apply, CompressTransform, DecompressTransform};

        let content = "chr1\t0\t1\t2\nchr1\t1\t2\t2\nchr1\t2\t3\t5\n";
        let records = parse_records(content).unwrap();

        let compressed = apply(&mut CompressTransform::new(), records.clone()).unwrap();
        assert_eq!(compressed.len(), 2);
        assert_eq!(compressed[0].end, 2);

        let restored = apply(&mut DecompressTransform::default(), compressed).unwrap();
        assert_eq!(restored, records);
    }

    #[test]
    fn test_blur_workflow() {
        use crate::bedgraph::parse_records;
        use crate::transform::{apply, BlurTransform};
        use crate::TransformConfig;

        let content = "chr1\t0\t1\t1\nchr1\t1\t2\t1\nchr1\t2\t3\t1\nchr1\t3\t4\t1\nchr1\t4\t5\t1\n";
        let records = parse_records(content).unwrap();

        let mut blur = BlurTransform::new(0.3, TransformConfig::default()).unwrap();
        let out = apply(&mut blur, records).unwrap();
        assert_eq!(out.len(), 5);
        assert!((out[2].score - 1.0).abs() < 1e-12);
    }
}
