//! Row-fast sparse matrix wrapper

use super::archive;
use super::csr::CsrMatrix;
use crate::Result;
use std::path::Path;

/// Sparse matrix wrapper optimized for repeated single-row retrieval.
///
/// Wraps a [`CsrMatrix`] and exposes O(1) row slicing; training loops that
/// walk user rows over and over go through this type. Convertible back to
/// the underlying compressed-row matrix on demand, and owns its own native
/// on-disk format (the `fsm` archive).
#[derive(Debug, Clone, PartialEq)]
pub struct FastSparseMatrix {
    csr: CsrMatrix,
}

impl FastSparseMatrix {
    /// Wrap a compressed-row matrix.
    pub fn from_csr(csr: CsrMatrix) -> Self {
        Self { csr }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.csr.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.csr.cols()
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.csr.nnz()
    }

    /// Column indices and values of row `r` as borrowed slices.
    pub fn row(&self, r: usize) -> (&[usize], &[f32]) {
        self.csr.row(r)
    }

    /// Borrow the underlying compressed-row matrix.
    pub fn csr(&self) -> &CsrMatrix {
        &self.csr
    }

    /// Unwrap into the underlying compressed-row matrix.
    pub fn into_csr(self) -> CsrMatrix {
        self.csr
    }

    /// Write this structure as a native `fsm` archive.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        archive::write_native(path.as_ref(), "fsm", &self.csr)
    }

    /// Load a structure previously written by [`FastSparseMatrix::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            csr: archive::read_native(path.as_ref(), "fsm")?,
        })
    }
}
