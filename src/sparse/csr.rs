//! Compressed-row sparse matrix

use super::archive;
use super::coo::CooMatrix;
use crate::Result;
use std::path::Path;

/// Sparse matrix in compressed-row form, optimized for row-wise access.
///
/// Storage is the usual `indptr`/`indices`/`data` triple: row `r` occupies
/// the half-open range `indptr[r]..indptr[r + 1]` of `indices` (column
/// indices, sorted ascending within a row) and `data` (values).
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    rows: usize,
    cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f32>,
}

impl CsrMatrix {
    /// Assemble a matrix from raw compressed-row arrays.
    ///
    /// `indptr` must have length `rows + 1` and be non-decreasing;
    /// `indices` and `data` must have equal length `indptr[rows]`.
    pub fn from_parts(
        rows: usize,
        cols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<f32>,
    ) -> Self {
        debug_assert_eq!(indptr.len(), rows + 1);
        debug_assert_eq!(indices.len(), data.len());
        debug_assert_eq!(indptr.last().copied(), Some(indices.len()));
        debug_assert!(indices.iter().all(|&c| c < cols));
        Self {
            rows,
            cols,
            indptr,
            indices,
            data,
        }
    }

    /// An empty matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_parts(rows, cols, vec![0; rows + 1], Vec::new(), Vec::new())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Row pointer array, length `rows + 1`.
    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    /// Column index array, length `nnz`.
    pub fn col_indices(&self) -> &[usize] {
        &self.indices
    }

    /// Value array, length `nnz`.
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Column indices and values of row `r` as borrowed slices.
    ///
    /// # Panics
    ///
    /// Panics if `r >= self.rows()`.
    pub fn row(&self, r: usize) -> (&[usize], &[f32]) {
        let (start, end) = (self.indptr[r], self.indptr[r + 1]);
        (&self.indices[start..end], &self.data[start..end])
    }

    /// Value at `(r, c)`, or `0.0` when the entry is not stored.
    pub fn get(&self, r: usize, c: usize) -> f32 {
        if r >= self.rows || c >= self.cols {
            return 0.0;
        }
        let (cols, vals) = self.row(r);
        match cols.binary_search(&c) {
            Ok(i) => vals[i],
            Err(_) => 0.0,
        }
    }

    /// Iterate over `(row, col, value)` triples in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        (0..self.rows).flat_map(move |r| {
            let (cols, vals) = self.row(r);
            cols.iter().zip(vals).map(move |(&c, &v)| (r, c, v))
        })
    }

    /// Convert to coordinate form.
    pub fn to_coo(&self) -> CooMatrix {
        let mut row = Vec::with_capacity(self.nnz());
        let mut col = Vec::with_capacity(self.nnz());
        let mut data = Vec::with_capacity(self.nnz());
        for (r, c, v) in self.iter() {
            row.push(r);
            col.push(c);
            data.push(v);
        }
        CooMatrix::new(self.rows, self.cols, row, col, data)
    }

    /// Write this matrix as a native compressed-row archive (the `csr`
    /// on-disk format).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        archive::write_native(path.as_ref(), "csr", self)
    }

    /// Load a matrix previously written by [`CsrMatrix::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        archive::read_native(path.as_ref(), "csr")
    }
}
