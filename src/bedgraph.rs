//! Streaming bedgraph file reader.

use crate::record::BedGraphRecord;
use crate::streaming::buffers::{DEFAULT_INPUT_BUFFER, DEFAULT_LINE_BUFFER};
use crate::streaming::parsing::{parse_bedgraph_bytes, should_skip_line, FieldError};
use crate::transform::KernelError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading, transforming or writing bedgraphs.
#[derive(Error, Debug)]
pub enum BedGraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot process the bedgraph entry at line {line}: '{content}' ({source})")]
    Parse {
        line: usize,
        content: String,
        #[source]
        source: FieldError,
    },

    #[error("Invalid bedgraph format: {0}")]
    InvalidFormat(String),

    #[error("Invalid blur kernel: {0}")]
    Kernel(#[from] KernelError),
}

pub type Result<T> = std::result::Result<T, BedGraphError>;

/// A streaming bedgraph reader.
///
/// Skips empty lines, `#` comments and `track`/`browser` headers. Every
/// other line must parse into a record or the reader reports the raw line.
pub struct BedGraphReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: Vec<u8>,
}

impl BedGraphReader<File> {
    /// Open a bedgraph file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> BedGraphReader<R> {
    /// Create a new reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_INPUT_BUFFER)
    }

    /// Create a reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: Vec::with_capacity(DEFAULT_LINE_BUFFER),
        }
    }

    /// Line number of the most recently read line (1-based).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next record.
    pub fn read_record(&mut self) -> Result<Option<BedGraphRecord>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if should_skip_line(&self.buffer) {
                continue;
            }

            return match parse_bedgraph_bytes(&self.buffer) {
                Ok((chrom, start, end, score)) => {
                    Ok(Some(BedGraphRecord::new(chrom, start, end, score)))
                }
                Err(source) => Err(BedGraphError::Parse {
                    line: self.line_number,
                    content: String::from_utf8_lossy(&self.buffer)
                        .trim_end_matches(['\n', '\r'])
                        .to_string(),
                    source,
                }),
            };
        }
    }

    /// Get an iterator over all records.
    pub fn records(self) -> BedGraphRecordIter<R> {
        BedGraphRecordIter { reader: self }
    }
}

/// Iterator over bedgraph records.
pub struct BedGraphRecordIter<R: Read> {
    reader: BedGraphReader<R>,
}

impl<R: Read> Iterator for BedGraphRecordIter<R> {
    type Item = Result<BedGraphRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

/// Read all records from a bedgraph file.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<BedGraphRecord>> {
    let reader = BedGraphReader::from_path(path)?;
    reader.records().collect()
}

/// Parse records from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<BedGraphRecord>> {
    let reader = BedGraphReader::new(content.as_bytes());
    reader.records().collect()
}
