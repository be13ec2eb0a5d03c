//! Coordinate-form sparse matrix

use super::csr::CsrMatrix;

/// Sparse matrix in coordinate form: parallel arrays of row indices,
/// column indices and values, plus an overall shape.
///
/// Indices are zero-based. Values are stored as given; no sign or range
/// validation is performed.
#[derive(Debug, Clone, PartialEq)]
pub struct CooMatrix {
    rows: usize,
    cols: usize,
    row: Vec<usize>,
    col: Vec<usize>,
    data: Vec<f32>,
}

impl CooMatrix {
    /// Create a coordinate matrix from parallel triple arrays.
    ///
    /// The three arrays must have equal length and every index must lie
    /// within `(rows, cols)`.
    pub fn new(rows: usize, cols: usize, row: Vec<usize>, col: Vec<usize>, data: Vec<f32>) -> Self {
        debug_assert_eq!(row.len(), col.len());
        debug_assert_eq!(row.len(), data.len());
        debug_assert!(row.iter().all(|&r| r < rows));
        debug_assert!(col.iter().all(|&c| c < cols));
        Self {
            rows,
            cols,
            row,
            col,
            data,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored entries (duplicates counted individually).
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Row index array.
    pub fn row_indices(&self) -> &[usize] {
        &self.row
    }

    /// Column index array.
    pub fn col_indices(&self) -> &[usize] {
        &self.col
    }

    /// Value array.
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Iterate over `(row, col, value)` triples in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.row
            .iter()
            .zip(&self.col)
            .zip(&self.data)
            .map(|((&r, &c), &v)| (r, c, v))
    }

    /// Convert to compressed-row form.
    ///
    /// Entries are bucketed by row, sorted by column within each row, and
    /// duplicate positions are summed.
    pub fn to_csr(&self) -> CsrMatrix {
        // Scatter into row buckets, then normalize each row.
        let mut buckets: Vec<Vec<(usize, f32)>> = vec![Vec::new(); self.rows];
        for ((&r, &c), &v) in self.row.iter().zip(&self.col).zip(&self.data) {
            buckets[r].push((c, v));
        }

        let mut indices = Vec::with_capacity(self.nnz());
        let mut data = Vec::with_capacity(self.nnz());
        let mut indptr = vec![0usize; self.rows + 1];
        for (r, mut bucket) in buckets.into_iter().enumerate() {
            bucket.sort_by_key(|&(c, _)| c);
            let row_start = indices.len();
            for (c, v) in bucket {
                if indices.len() > row_start && indices[indices.len() - 1] == c {
                    // duplicate position within the row
                    let last = data.len() - 1;
                    data[last] += v;
                } else {
                    indices.push(c);
                    data.push(v);
                }
            }
            indptr[r + 1] = indices.len();
        }

        CsrMatrix::from_parts(self.rows, self.cols, indptr, indices, data)
    }
}
