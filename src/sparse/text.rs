//! Delimited-text triple reader
//!
//! Reads rating files with one `row col value` triple per line. Indices are
//! zero-based. Lines starting with `#` and blank lines are skipped. The
//! shape is inferred as `(max_row + 1, max_col + 1)` over the parsed
//! triples.

use super::coo::CooMatrix;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read coordinate triples from a delimited text file.
///
/// `delimiter` is the separating character, or `None` to split on any run
/// of whitespace (the tab-separated convention).
pub fn read_triples(path: impl AsRef<Path>, delimiter: Option<char>) -> Result<CooMatrix> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut data = Vec::new();
    let mut shape = (0usize, 0usize);

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = match delimiter {
            Some(d) => trimmed.split(d).map(str::trim).collect(),
            None => trimmed.split_whitespace().collect(),
        };
        if fields.len() != 3 {
            return Err(Error::Parse {
                line: idx + 1,
                msg: format!("expected 3 fields, found {}", fields.len()),
            });
        }

        let parse_err = |what: &str, value: &str| Error::Parse {
            line: idx + 1,
            msg: format!("invalid {what}: {value:?}"),
        };
        let r: usize = fields[0]
            .parse()
            .map_err(|_| parse_err("row index", fields[0]))?;
        let c: usize = fields[1]
            .parse()
            .map_err(|_| parse_err("column index", fields[1]))?;
        let v: f32 = fields[2]
            .parse()
            .map_err(|_| parse_err("value", fields[2]))?;

        shape.0 = shape.0.max(r + 1);
        shape.1 = shape.1.max(c + 1);
        rows.push(r);
        cols.push(c);
        data.push(v);
    }

    Ok(CooMatrix::new(shape.0, shape.1, rows, cols, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(content.as_bytes()).unwrap();
        tmp.flush().unwrap();
        tmp
    }

    #[test]
    fn test_read_whitespace_delimited() {
        let tmp = write_file("0\t1\t3.5\n2 0 1.0\n");
        let coo = read_triples(tmp.path(), None).unwrap();

        assert_eq!(coo.rows(), 3);
        assert_eq!(coo.cols(), 2);
        let triples: Vec<_> = coo.iter().collect();
        assert_eq!(triples, vec![(0, 1, 3.5), (2, 0, 1.0)]);
    }

    #[test]
    fn test_read_comma_delimited() {
        let tmp = write_file("0,1,3.5\n1, 2, -0.5\n");
        let coo = read_triples(tmp.path(), Some(',')).unwrap();

        assert_eq!(coo.rows(), 2);
        assert_eq!(coo.cols(), 3);
        assert_relative_eq!(coo.values()[1], -0.5);
    }

    #[test]
    fn test_skips_comments_and_blank_lines() {
        let tmp = write_file("# header comment\n\n0\t0\t1.0\n\n# trailing\n");
        let coo = read_triples(tmp.path(), None).unwrap();
        assert_eq!(coo.nnz(), 1);
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let tmp = write_file("0\t0\t1.0\n1\t2\n");
        let err = read_triples(tmp.path(), None).unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn test_bad_value_reports_line() {
        let tmp = write_file("0\t0\tabc\n");
        let err = read_triples(tmp.path(), None).unwrap_err();
        match err {
            Error::Parse { line, msg } => {
                assert_eq!(line, 1);
                assert!(msg.contains("value"));
            }
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn test_missing_file_propagates_io_error() {
        let result = read_triples("no_such_file.tsv", None);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_empty_file_yields_empty_matrix() {
        let tmp = write_file("");
        let coo = read_triples(tmp.path(), None).unwrap();
        assert_eq!(coo.rows(), 0);
        assert_eq!(coo.cols(), 0);
        assert_eq!(coo.nnz(), 0);
    }
}
