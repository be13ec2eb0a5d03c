//! MatrixMarket coordinate reader
//!
//! Supports `matrix coordinate real|integer general|symmetric` files.
//! MatrixMarket entries are one-based; they are converted to zero-based
//! indices here. Symmetric files have their off-diagonal entries mirrored.

use super::coo::CooMatrix;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symmetry {
    General,
    Symmetric,
}

/// Read a MatrixMarket coordinate file into coordinate form.
pub fn read_matrix_market(path: impl AsRef<Path>) -> Result<CooMatrix> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines().enumerate();

    let banner = match lines.next() {
        Some((_, line)) => line?,
        None => return Err(parse_err(1, "empty file")),
    };
    let symmetry = parse_banner(&banner)?;

    // Size line: first non-comment line after the banner.
    let mut size: Option<(usize, usize, usize)> = None;
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut data = Vec::new();
    let mut shape = (0usize, 0usize);

    for (idx, line) in lines {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        let lineno = idx + 1;
        let fields: Vec<&str> = trimmed.split_whitespace().collect();

        match size {
            None => {
                if fields.len() != 3 {
                    return Err(parse_err(lineno, "malformed size line"));
                }
                let r = parse_field::<usize>(lineno, "row count", fields[0])?;
                let c = parse_field::<usize>(lineno, "column count", fields[1])?;
                let nnz = parse_field::<usize>(lineno, "entry count", fields[2])?;
                shape = (r, c);
                size = Some((r, c, nnz));
            }
            Some((nrows, ncols, _)) => {
                if fields.len() != 3 {
                    return Err(parse_err(lineno, "expected `row col value` entry"));
                }
                let r = parse_field::<usize>(lineno, "row index", fields[0])?;
                let c = parse_field::<usize>(lineno, "column index", fields[1])?;
                let v = parse_field::<f32>(lineno, "value", fields[2])?;
                if r < 1 || r > nrows || c < 1 || c > ncols {
                    return Err(parse_err(lineno, "entry index out of declared bounds"));
                }
                rows.push(r - 1);
                cols.push(c - 1);
                data.push(v);
                if symmetry == Symmetry::Symmetric && r != c {
                    rows.push(c - 1);
                    cols.push(r - 1);
                    data.push(v);
                }
            }
        }
    }

    let (_, _, declared) = size.ok_or_else(|| parse_err(1, "missing size line"))?;
    let stored = if symmetry == Symmetry::Symmetric {
        // symmetric entries are stored on or below the diagonal; mirrored
        // copies sit strictly above it
        rows.iter().zip(&cols).filter(|(r, c)| r >= c).count()
    } else {
        rows.len()
    };
    if stored != declared {
        return Err(parse_err(
            1,
            &format!("size line declares {declared} entries, found {stored}"),
        ));
    }

    Ok(CooMatrix::new(shape.0, shape.1, rows, cols, data))
}

fn parse_banner(banner: &str) -> Result<Symmetry> {
    let fields: Vec<&str> = banner.split_whitespace().collect();
    if fields.len() != 5 || !fields[0].eq_ignore_ascii_case("%%MatrixMarket") {
        return Err(parse_err(1, "not a MatrixMarket banner"));
    }
    if !fields[1].eq_ignore_ascii_case("matrix") || !fields[2].eq_ignore_ascii_case("coordinate") {
        return Err(parse_err(1, "only `matrix coordinate` files are supported"));
    }
    if !fields[3].eq_ignore_ascii_case("real") && !fields[3].eq_ignore_ascii_case("integer") {
        return Err(parse_err(
            1,
            &format!("unsupported value field: {}", fields[3]),
        ));
    }
    if fields[4].eq_ignore_ascii_case("general") {
        Ok(Symmetry::General)
    } else if fields[4].eq_ignore_ascii_case("symmetric") {
        Ok(Symmetry::Symmetric)
    } else {
        Err(parse_err(
            1,
            &format!("unsupported symmetry: {}", fields[4]),
        ))
    }
}

fn parse_err(line: usize, msg: &str) -> Error {
    Error::Parse {
        line,
        msg: msg.to_string(),
    }
}

fn parse_field<T: std::str::FromStr>(line: usize, what: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| Error::Parse {
        line,
        msg: format!("invalid {what}: {value:?}"),
    })
}
