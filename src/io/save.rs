//! Recommender model saving
//!
//! A saved model is one archive file. The structural part is serialized
//! with serde into the `model` metadata slot; the similarity matrix goes
//! into tensor slots chosen by its variant, with the variant tag written
//! alongside as the `similarity` discriminator:
//!
//! - dense:  slot `mat` (F32, `[rows, cols]`)
//! - sparse: slots `row`/`col` (U32), `data` (F32), `shape` (U64)
//! - absent: metadata only
//!
//! The model is borrowed for the duration of the call and never mutated;
//! the out-of-band split happens in serde (implementors skip the matrix
//! field), not by detaching the field from the caller's object.

use super::recommender::{Recommender, SimilarityMatrix};
use crate::sparse::{write_archive, Slot};
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Save a recommender model to `path` as a single archive file.
///
/// # Example
///
/// ```no_run
/// use recomendar::{save_recommender, ItemSimilarityRecommender};
///
/// let model = ItemSimilarityRecommender::new("cosine-knn", 1000, 50);
/// save_recommender(&model, "model.rec").unwrap();
/// ```
pub fn save_recommender<M: Recommender>(model: &M, path: impl AsRef<Path>) -> Result<()> {
    let structural = serde_json::to_string(model)
        .map_err(|e| Error::Serialization(format!("model serialization failed: {e}")))?;

    let mut metadata = HashMap::new();
    metadata.insert("model".to_string(), structural);
    metadata.insert(
        "similarity".to_string(),
        model.similarity().tag().to_string(),
    );

    let slots = match model.similarity() {
        SimilarityMatrix::Dense(mat) => {
            // iteration order is logical row-major regardless of layout
            let values: Vec<f32> = mat.iter().copied().collect();
            vec![Slot::f32_2d("mat", mat.nrows(), mat.ncols(), &values)]
        }
        SimilarityMatrix::Sparse(matrix) => {
            let coo = matrix.to_coo();
            let row: Vec<u32> = coo.row_indices().iter().map(|&r| r as u32).collect();
            let col: Vec<u32> = coo.col_indices().iter().map(|&c| c as u32).collect();
            let shape = [matrix.rows() as u64, matrix.cols() as u64];
            vec![
                Slot::u32("row", &row),
                Slot::u32("col", &col),
                Slot::f32("data", coo.values()),
                Slot::u64("shape", &shape),
            ]
        }
        SimilarityMatrix::Absent => Vec::new(),
    };

    write_archive(path.as_ref(), metadata, &slots)
}
