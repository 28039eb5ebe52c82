//! Decoder for benchmark results CSV
//!
//! Results format:
//! ```text
//! file,n,code,user,sys,maxrss
//! rs/fs_struct,1000,0,0.01,0.00,2048
//! ```
//!
//! The dialect is deliberately small: cells are split on `,` with no
//! quoting or escaping, and the header is the first line containing the
//! substring `file`. Non-empty lines before the header are dropped.
//! A data value containing `file` that appears before the real header is
//! taken as the header; this ambiguity is inherited from the format.

use crate::data::{Record, ResultSet};
use crate::error::{Error, Result};
use tracing::debug;

/// Substring that marks the header line
pub const HEADER_SENTINEL: &str = "file";

/// Decode CSV text into records
///
/// Fails only when no line carries the header sentinel. Rows with the
/// wrong number of cells are zipped positionally against the header:
/// missing cells are absent from the record and surplus cells are dropped.
pub fn decode(text: &str) -> Result<ResultSet> {
    let mut columns: Option<Vec<String>> = None;
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            continue;
        }

        match &columns {
            None if line.contains(HEADER_SENTINEL) => {
                columns = Some(line.split(',').map(str::to_string).collect());
            }
            None => skipped += 1,
            Some(cols) => {
                let record: Record = cols.iter().map(String::as_str).zip(line.split(',')).collect();
                records.push(record);
            }
        }
    }

    let columns = columns.ok_or_else(|| {
        Error::ParseError(format!(
            "no header line containing \"{}\" found",
            HEADER_SENTINEL
        ))
    })?;

    debug!(
        columns = columns.len(),
        records = records.len(),
        skipped,
        "decoded results"
    );

    Ok(ResultSet::new(columns, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic() {
        let text = "file,n,code,user\nrs/a,10,0,1.0\nrs/a,10,0,3.0\nrs/a,20,0,2.0\n";
        let results = decode(text).unwrap();

        assert_eq!(results.columns(), &["file", "n", "code", "user"]);
        assert_eq!(results.len(), 3);

        let first = &results.records()[0];
        assert_eq!(first.get("file"), Some("rs/a"));
        assert_eq!(first.get("n"), Some("10"));
        assert_eq!(first.get("code"), Some("0"));
        assert_eq!(first.get("user"), Some("1.0"));
        assert_eq!(results.records()[2].get("n"), Some("20"));
    }

    #[test]
    fn test_decode_every_record_has_header_columns() {
        let text = "file,n,code,user,sys,maxrss\n\
                    js/main_csv,100,0,0.05,0.01,40000\n\
                    py/main_dict,100,0,0.02,0.01,9000\n\
                    rs/fs_tuple,100,0,0.00,0.00,2000\n";
        let results = decode(text).unwrap();

        assert_eq!(results.len(), 3);
        for record in results.records() {
            let mut cols: Vec<&str> = record.columns().collect();
            cols.sort_unstable();
            assert_eq!(cols, vec!["code", "file", "maxrss", "n", "sys", "user"]);
        }
    }

    #[test]
    fn test_decode_skips_empty_lines_and_preamble() {
        let text = "# generated by bench.sh\n\n\nfile,n,code,user\n\nrs/a,1,0,0.5\n\n";
        let results = decode(text).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results.records()[0].get("user"), Some("0.5"));
    }

    #[test]
    fn test_decode_crlf_line_endings() {
        let text = "file,n,code,user\r\nrs/a,10,0,1.5\r\n";
        let results = decode(text).unwrap();

        assert_eq!(results.columns(), &["file", "n", "code", "user"]);
        assert_eq!(results.records()[0].get("user"), Some("1.5"));
    }

    #[test]
    fn test_decode_header_only() {
        let results = decode("file,n,code,user\n").unwrap();
        assert!(results.is_empty());
        assert_eq!(results.columns().len(), 4);
    }

    #[test]
    fn test_decode_no_header_fails() {
        assert!(matches!(decode(""), Err(Error::ParseError(_))));
        assert!(matches!(
            decode("command,n,code\nrs/a,1,0\n"),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_decode_later_sentinel_lines_are_data() {
        let text = "file,n,code,user\npy/write_file,10,0,1.0\n";
        let results = decode(text).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results.records()[0].get("file"), Some("py/write_file"));
    }

    #[test]
    fn test_decode_short_row_zips_positionally() {
        let text = "file,n,code,user\nrs/a,10\nrs/b,10,0,1.0,extra\n";
        let results = decode(text).unwrap();

        let short = &results.records()[0];
        assert_eq!(short.len(), 2);
        assert_eq!(short.get("code"), None);

        let long = &results.records()[1];
        assert_eq!(long.len(), 4);
        assert_eq!(long.get("user"), Some("1.0"));
    }
}
