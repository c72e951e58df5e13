//! Buffer size constants for streaming operations.
//!
//! These constants control memory usage vs I/O throughput tradeoffs.

/// Default output buffer size (2 MB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 2 * 1024 * 1024;

/// Default input buffer size (256 KB).
pub const DEFAULT_INPUT_BUFFER: usize = 256 * 1024;

/// Records reserved up front by a window; larger windows grow on demand.
pub const DEFAULT_WINDOW_RESERVE: usize = 1024;

/// Default line buffer capacity (1 KB).
/// Sufficient for most bedgraph lines.
pub const DEFAULT_LINE_BUFFER: usize = 1024;
