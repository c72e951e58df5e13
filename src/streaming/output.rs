//! Efficient output formatting for streaming transforms.
//!
//! Uses itoa for coordinate formatting and ryu for score formatting
//! to avoid allocation in the hot path.

use crate::bedgraph::BedGraphError;
use crate::record::BedGraphRecord;
use crate::streaming::buffers::DEFAULT_OUTPUT_BUFFER;
use crate::transform::RecordSink;
use std::io::{BufWriter, Write};

/// Buffered bedgraph writer.
pub struct BedGraphWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    ryu_buf: ryu::Buffer,
    records_written: usize,
}

impl<W: Write> BedGraphWriter<W> {
    /// Create a new writer with the default 2MB buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    /// Create a new writer with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            ryu_buf: ryu::Buffer::new(),
            records_written: 0,
        }
    }

    /// Write one `chrom\tstart\tend\tscore` line.
    #[inline]
    pub fn write_bedgraph_line(
        &mut self,
        chrom: &[u8],
        start: u64,
        end: u64,
        score: f64,
    ) -> Result<(), BedGraphError> {
        self.writer.write_all(chrom)?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(start).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer.write_all(self.itoa_buf.format(end).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer.write_all(self.ryu_buf.format(score).as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    /// Write a record as a bedgraph line.
    #[inline]
    pub fn write_record(&mut self, record: &BedGraphRecord) -> Result<(), BedGraphError> {
        self.write_bedgraph_line(
            record.chrom.as_bytes(),
            record.start,
            record.end,
            record.score,
        )
    }

    /// Number of lines written so far.
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<(), BedGraphError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> RecordSink for BedGraphWriter<W> {
    #[inline]
    fn emit(&mut self, record: &BedGraphRecord) -> Result<(), BedGraphError> {
        self.write_record(record)
    }
}
