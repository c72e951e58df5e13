//! Zero-allocation bedgraph parsing utilities.
//!
//! These functions split a raw line into its four bedgraph fields without
//! building an intermediate `Vec` of fields.

use memchr::memchr;
use thiserror::Error;

/// Why a single line could not be parsed into a bedgraph record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("expected at least 4 tab-separated fields, got {0}")]
    FieldCount(usize),

    #[error("empty chromosome name")]
    EmptyChrom,

    #[error("invalid {field} position: '{value}'")]
    Position { field: &'static str, value: String },

    #[error("invalid score: '{0}'")]
    Score(String),

    #[error("end ({end}) must be greater than start ({start})")]
    EmptyInterval { start: u64, end: u64 },

    #[error("line is not valid UTF-8")]
    Utf8,
}

/// Fast u64 parsing - no allocation, no error formatting.
///
/// Returns None if the input is empty or contains non-digit characters.
#[inline(always)]
pub fn parse_u64_fast(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u64)?;
    }
    Some(n)
}

/// Trim ASCII whitespace (including a trailing `\r`) from both ends.
#[inline]
fn trim_bytes(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

#[inline]
fn next_field<'a>(rest: &mut &'a [u8]) -> Option<&'a [u8]> {
    if rest.is_empty() {
        return None;
    }
    match memchr(b'\t', rest) {
        Some(tab) => {
            let field = &rest[..tab];
            *rest = &rest[tab + 1..];
            Some(field)
        }
        None => {
            let field = *rest;
            *rest = &[];
            Some(field)
        }
    }
}

/// Parse the four bedgraph fields of a line.
///
/// Returns (chrom, start, end, score). Fields are trimmed; anything after
/// the fourth field is ignored.
#[inline]
pub fn parse_bedgraph_bytes(line: &[u8]) -> Result<(&str, u64, u64, f64), FieldError> {
    let line = match line.last() {
        Some(b'\n') => &line[..line.len() - 1],
        _ => line,
    };

    let mut rest = line;
    let mut fields: [&[u8]; 4] = [b"".as_slice(); 4];
    for (i, slot) in fields.iter_mut().enumerate() {
        *slot = next_field(&mut rest).ok_or(FieldError::FieldCount(i))?;
    }

    let chrom = std::str::from_utf8(trim_bytes(fields[0])).map_err(|_| FieldError::Utf8)?;
    if chrom.is_empty() {
        return Err(FieldError::EmptyChrom);
    }

    let start = parse_position(fields[1], "start")?;
    let end = parse_position(fields[2], "end")?;
    if end <= start {
        return Err(FieldError::EmptyInterval { start, end });
    }

    let score_bytes = trim_bytes(fields[3]);
    let score = std::str::from_utf8(score_bytes)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| FieldError::Score(String::from_utf8_lossy(score_bytes).into_owned()))?;

    Ok((chrom, start, end, score))
}

#[inline]
fn parse_position(bytes: &[u8], field: &'static str) -> Result<u64, FieldError> {
    let trimmed = trim_bytes(bytes);
    parse_u64_fast(trimmed).ok_or_else(|| FieldError::Position {
        field,
        value: String::from_utf8_lossy(trimmed).into_owned(),
    })
}

/// Check if a line should be skipped (empty, comment, or header).
#[inline(always)]
pub fn should_skip_line(line: &[u8]) -> bool {
    let line = trim_bytes(line);
    line.is_empty() || line[0] == b'#' || line.starts_with(b"track") || line.starts_with(b"browser")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64_fast() {
        assert_eq!(parse_u64_fast(b"12345"), Some(12345));
        assert_eq!(parse_u64_fast(b"0"), Some(0));
        assert_eq!(parse_u64_fast(b""), None);
        assert_eq!(parse_u64_fast(b"-5"), None);
        assert_eq!(parse_u64_fast(b"123abc"), None);
        assert_eq!(parse_u64_fast(b"18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_u64_fast(b"18446744073709551616"), None);
    }

    #[test]
    fn test_parse_bedgraph_bytes() {
        assert_eq!(
            parse_bedgraph_bytes(b"chr1\t100\t200\t1.5"),
            Ok(("chr1", 100, 200, 1.5))
        );
        assert_eq!(
            parse_bedgraph_bytes(b"chr1\t100\t200\t-2\n"),
            Ok(("chr1", 100, 200, -2.0))
        );
        assert_eq!(
            parse_bedgraph_bytes(b"chr1\t100\t200\t0.5\r\n"),
            Ok(("chr1", 100, 200, 0.5))
        );
        assert_eq!(
            parse_bedgraph_bytes(b" chr2 \t 7\t8 \t3\textra"),
            Ok(("chr2", 7, 8, 3.0))
        );
    }

    #[test]
    fn test_parse_bedgraph_errors() {
        assert_eq!(
            parse_bedgraph_bytes(b"chr1\t100\t200"),
            Err(FieldError::FieldCount(3))
        );
        assert_eq!(parse_bedgraph_bytes(b""), Err(FieldError::FieldCount(0)));
        assert!(matches!(
            parse_bedgraph_bytes(b"chr1\tabc\t200\t1"),
            Err(FieldError::Position { field: "start", .. })
        ));
        assert!(matches!(
            parse_bedgraph_bytes(b"chr1\t1\t2\tNaNa"),
            Err(FieldError::Score(_))
        ));
        assert_eq!(
            parse_bedgraph_bytes(b"chr1\t5\t5\t1"),
            Err(FieldError::EmptyInterval { start: 5, end: 5 })
        );
        assert_eq!(
            parse_bedgraph_bytes(b"\t1\t2\t1"),
            Err(FieldError::EmptyChrom)
        );
    }

    #[test]
    fn test_should_skip_line() {
        assert!(should_skip_line(b""));
        assert!(should_skip_line(b"\r\n"));
        assert!(should_skip_line(b"#comment"));
        assert!(should_skip_line(b"track type=bedGraph"));
        assert!(should_skip_line(b"browser position chr1:1-100"));
        assert!(!should_skip_line(b"chr1\t100\t200\t1"));
    }
}
