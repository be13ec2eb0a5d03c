//! Matrix loading entry points
//!
//! Both loaders take a format tag and a filepath, and dispatch to the
//! reader for that format. Tag resolution happens before any file I/O, so
//! an unknown tag never touches the filesystem.

use super::format::MatrixFormat;
use crate::sparse::{read_matrix_market, read_triples, CsrMatrix, FastSparseMatrix};
use crate::{Error, Result};
use std::path::Path;

/// Load a row-fast sparse matrix from a file of the given format.
///
/// Accepted tags: `tsv`, `csv`, `fsm`. The MatrixMarket and native
/// compressed-row formats have no row-fast representation on disk, so their
/// tags are rejected here the same way an unrecognized tag is.
///
/// # Example
///
/// ```no_run
/// use recomendar::load_fast_sparse_matrix;
///
/// let ratings = load_fast_sparse_matrix("tsv", "ratings.tsv").unwrap();
/// let (items, scores) = ratings.row(0);
/// assert_eq!(items.len(), scores.len());
/// ```
pub fn load_fast_sparse_matrix(format: &str, path: impl AsRef<Path>) -> Result<FastSparseMatrix> {
    let tag = format;
    let format =
        MatrixFormat::from_tag(tag).ok_or_else(|| Error::UnknownFormat(tag.to_string()))?;

    match format {
        MatrixFormat::Tsv => Ok(FastSparseMatrix::from_csr(
            read_triples(path, None)?.to_csr(),
        )),
        MatrixFormat::Csv => Ok(FastSparseMatrix::from_csr(
            read_triples(path, Some(','))?.to_csr(),
        )),
        MatrixFormat::Fsm => FastSparseMatrix::load(path),
        MatrixFormat::MatrixMarket | MatrixFormat::Csr => {
            Err(Error::UnknownFormat(tag.to_string()))
        }
    }
}

/// Load a compressed-row sparse matrix from a file of the given format.
///
/// Accepted tags: `tsv`, `csv`, `mm`, `fsm`, `csr`. Whatever intermediate
/// shape the format naturally decodes to is converted to compressed-row
/// form before returning.
pub fn load_sparse_matrix(format: &str, path: impl AsRef<Path>) -> Result<CsrMatrix> {
    let tag = format;
    let format =
        MatrixFormat::from_tag(tag).ok_or_else(|| Error::UnknownFormat(tag.to_string()))?;

    match format {
        MatrixFormat::Tsv => Ok(read_triples(path, None)?.to_csr()),
        MatrixFormat::Csv => Ok(read_triples(path, Some(','))?.to_csr()),
        MatrixFormat::MatrixMarket => Ok(read_matrix_market(path)?.to_csr()),
        MatrixFormat::Fsm => Ok(FastSparseMatrix::load(path)?.into_csr()),
        MatrixFormat::Csr => CsrMatrix::load(path),
    }
}
