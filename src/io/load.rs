//! Recommender model loading
//!
//! Load decodes the structural `model` slot first, then reattaches the
//! similarity matrix by dispatching on the `similarity` discriminator
//! written at save time. The description-only path memory-maps the file and
//! parses the header alone, so its memory use does not scale with the
//! numeric payload.

use super::recommender::{Recommender, SimilarityMatrix};
use crate::sparse::{slot_f32, slot_f32_2d, slot_u32, slot_u64, CooMatrix};
use crate::{Error, Result};
use memmap2::Mmap;
use ndarray::Array2;
use safetensors::tensor::Metadata;
use safetensors::SafeTensors;
use std::fs::File;
use std::path::Path;

/// Load a recommender model previously written by
/// [`save_recommender`](super::save::save_recommender).
///
/// # Example
///
/// ```no_run
/// use recomendar::{load_recommender, ItemSimilarityRecommender};
///
/// let model: ItemSimilarityRecommender = load_recommender("model.rec").unwrap();
/// println!("loaded {model}");
/// ```
pub fn load_recommender<M: Recommender>(path: impl AsRef<Path>) -> Result<M> {
    let buf = std::fs::read(path.as_ref())?;

    let (_, header) = SafeTensors::read_metadata(&buf)
        .map_err(|e| Error::Serialization(format!("archive parsing failed: {e}")))?;
    let mut model: M = decode_structural(&header)?;

    let discriminator = header
        .metadata()
        .as_ref()
        .and_then(|m| m.get("similarity").cloned())
        .ok_or(Error::CorruptArchive)?;

    match discriminator.as_str() {
        "absent" => {}
        "dense" => {
            let st = SafeTensors::deserialize(&buf)
                .map_err(|e| Error::Serialization(format!("archive parsing failed: {e}")))?;
            let (rows, cols, values) = slot_f32_2d(&st, "mat").ok_or(Error::CorruptArchive)?;
            let mat = Array2::from_shape_vec((rows, cols), values)
                .map_err(|e| Error::Serialization(format!("dense payload malformed: {e}")))?;
            model.set_similarity(SimilarityMatrix::Dense(mat));
        }
        "sparse" => {
            let st = SafeTensors::deserialize(&buf)
                .map_err(|e| Error::Serialization(format!("archive parsing failed: {e}")))?;
            let row = slot_u32(&st, "row").ok_or(Error::CorruptArchive)?;
            let col = slot_u32(&st, "col").ok_or(Error::CorruptArchive)?;
            let data = slot_f32(&st, "data").ok_or(Error::CorruptArchive)?;
            let shape = slot_u64(&st, "shape").ok_or(Error::CorruptArchive)?;
            if shape.len() != 2 || row.len() != col.len() || row.len() != data.len() {
                return Err(Error::CorruptArchive);
            }
            if row.iter().any(|&r| r >= shape[0]) || col.iter().any(|&c| c >= shape[1]) {
                return Err(Error::CorruptArchive);
            }
            let coo = CooMatrix::new(shape[0], shape[1], row, col, data);
            model.set_similarity(SimilarityMatrix::Sparse(coo.to_csr()));
        }
        _ => return Err(Error::CorruptArchive),
    }

    Ok(model)
}

/// Read a model's structural description without loading the similarity
/// matrix into memory.
///
/// The file is memory-mapped and only the archive header is parsed; tensor
/// slots are never touched, so this works on archives far larger than
/// available memory. The result equals the `Display` output of the model
/// [`load_recommender`] would return.
pub fn read_recommender_description<M: Recommender>(path: impl AsRef<Path>) -> Result<String> {
    let file = File::open(path.as_ref())?;
    // Safety: the mapping is read-only and dropped before this call
    // returns; this module never writes to a file it is loading from.
    let mmap = unsafe { Mmap::map(&file)? };

    let (_, header) = SafeTensors::read_metadata(&mmap)
        .map_err(|e| Error::Serialization(format!("archive parsing failed: {e}")))?;
    let model: M = decode_structural(&header)?;
    Ok(model.to_string())
}

fn decode_structural<M: Recommender>(header: &Metadata) -> Result<M> {
    let structural = header
        .metadata()
        .as_ref()
        .and_then(|m| m.get("model"))
        .ok_or(Error::CorruptArchive)?;
    serde_json::from_str(structural)
        .map_err(|e| Error::Serialization(format!("model deserialization failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::recommender::ItemSimilarityRecommender;
    use crate::io::save::save_recommender;
    use crate::sparse::{write_archive, CsrMatrix, Slot};
    use ndarray::array;
    use tempfile::NamedTempFile;

    fn saved(model: &ItemSimilarityRecommender) -> NamedTempFile {
        let tmp = NamedTempFile::new().unwrap();
        save_recommender(model, tmp.path()).unwrap();
        tmp
    }

    #[test]
    fn test_round_trip_dense() {
        let model = ItemSimilarityRecommender::new("dense-knn", 3, 2)
            .with_param("metric", serde_json::json!("cosine"))
            .with_similarity(SimilarityMatrix::Dense(array![
                [1.0, 0.5, 0.0],
                [0.5, 1.0, 0.25],
                [0.0, 0.25, 1.0]
            ]));
        let tmp = saved(&model);

        let loaded: ItemSimilarityRecommender = load_recommender(tmp.path()).unwrap();
        assert_eq!(loaded, model);
        match loaded.similarity {
            SimilarityMatrix::Dense(ref mat) => {
                assert_eq!(mat, &array![
                    [1.0, 0.5, 0.0],
                    [0.5, 1.0, 0.25],
                    [0.0, 0.25, 1.0]
                ]);
            }
            ref other => panic!("expected dense similarity, got {}", other.tag()),
        }
    }

    #[test]
    fn test_round_trip_sparse() {
        let similarity = crate::sparse::CooMatrix::new(
            4,
            4,
            vec![0, 1, 3],
            vec![1, 3, 0],
            vec![0.9, 0.4, 0.2],
        )
        .to_csr();
        let model = ItemSimilarityRecommender::new("sparse-knn", 4, 2)
            .with_similarity(SimilarityMatrix::Sparse(similarity.clone()));
        let tmp = saved(&model);

        let loaded: ItemSimilarityRecommender = load_recommender(tmp.path()).unwrap();
        match loaded.similarity {
            SimilarityMatrix::Sparse(ref m) => {
                let original: Vec<_> = similarity.iter().collect();
                let reloaded: Vec<_> = m.iter().collect();
                assert_eq!(reloaded, original);
            }
            ref other => panic!("expected sparse similarity, got {}", other.tag()),
        }
    }

    #[test]
    fn test_round_trip_absent() {
        let model = ItemSimilarityRecommender::new("bare", 7, 3)
            .with_param("alpha", serde_json::json!(0.1));
        let tmp = saved(&model);

        let loaded: ItemSimilarityRecommender = load_recommender(tmp.path()).unwrap();
        assert_eq!(loaded, model);
        assert!(loaded.similarity.is_absent());
    }

    #[test]
    fn test_corrupt_archive_missing_discriminator() {
        // A hand-built archive with a model slot but no discriminator.
        let tmp = NamedTempFile::new().unwrap();
        let model = ItemSimilarityRecommender::new("m", 1, 1);
        let mut metadata = std::collections::HashMap::new();
        metadata.insert(
            "model".to_string(),
            serde_json::to_string(&model).unwrap(),
        );
        write_archive(tmp.path(), metadata, &[]).unwrap();

        let result: Result<ItemSimilarityRecommender> = load_recommender(tmp.path());
        assert!(matches!(result, Err(Error::CorruptArchive)));
    }

    #[test]
    fn test_corrupt_archive_dense_without_mat_slot() {
        let tmp = NamedTempFile::new().unwrap();
        let model = ItemSimilarityRecommender::new("m", 1, 1);
        let mut metadata = std::collections::HashMap::new();
        metadata.insert(
            "model".to_string(),
            serde_json::to_string(&model).unwrap(),
        );
        metadata.insert("similarity".to_string(), "dense".to_string());
        write_archive(tmp.path(), metadata, &[]).unwrap();

        let result: Result<ItemSimilarityRecommender> = load_recommender(tmp.path());
        assert!(matches!(result, Err(Error::CorruptArchive)));
    }

    #[test]
    fn test_corrupt_archive_unknown_discriminator() {
        let tmp = NamedTempFile::new().unwrap();
        let model = ItemSimilarityRecommender::new("m", 1, 1);
        let mut metadata = std::collections::HashMap::new();
        metadata.insert(
            "model".to_string(),
            serde_json::to_string(&model).unwrap(),
        );
        metadata.insert("similarity".to_string(), "diagonal".to_string());
        write_archive(tmp.path(), metadata, &[]).unwrap();

        let result: Result<ItemSimilarityRecommender> = load_recommender(tmp.path());
        assert!(matches!(result, Err(Error::CorruptArchive)));
    }

    #[test]
    fn test_corrupt_archive_sparse_index_out_of_shape() {
        // Well-formed slots whose row index falls outside the declared shape.
        let tmp = NamedTempFile::new().unwrap();
        let model = ItemSimilarityRecommender::new("m", 2, 1);
        let mut metadata = std::collections::HashMap::new();
        metadata.insert(
            "model".to_string(),
            serde_json::to_string(&model).unwrap(),
        );
        metadata.insert("similarity".to_string(), "sparse".to_string());
        let slots = [
            Slot::u32("row", &[5]),
            Slot::u32("col", &[0]),
            Slot::f32("data", &[1.0]),
            Slot::u64("shape", &[2, 2]),
        ];
        write_archive(tmp.path(), metadata, &slots).unwrap();

        let result: Result<ItemSimilarityRecommender> = load_recommender(tmp.path());
        assert!(matches!(result, Err(Error::CorruptArchive)));
    }

    #[test]
    fn test_corrupt_archive_sparse_column_out_of_shape() {
        let tmp = NamedTempFile::new().unwrap();
        let model = ItemSimilarityRecommender::new("m", 2, 1);
        let mut metadata = std::collections::HashMap::new();
        metadata.insert(
            "model".to_string(),
            serde_json::to_string(&model).unwrap(),
        );
        metadata.insert("similarity".to_string(), "sparse".to_string());
        let slots = [
            Slot::u32("row", &[0]),
            Slot::u32("col", &[9]),
            Slot::f32("data", &[1.0]),
            Slot::u64("shape", &[2, 2]),
        ];
        write_archive(tmp.path(), metadata, &slots).unwrap();

        let result: Result<ItemSimilarityRecommender> = load_recommender(tmp.path());
        assert!(matches!(result, Err(Error::CorruptArchive)));
    }

    #[test]
    fn test_corrupt_archive_message() {
        assert_eq!(
            Error::CorruptArchive.to_string(),
            "unexpected serialization format; was this file created with save_recommender()?"
        );
    }

    #[test]
    fn test_description_matches_loaded_display() {
        let model = ItemSimilarityRecommender::new("desc-knn", 50, 10)
            .with_similarity(SimilarityMatrix::Sparse(CsrMatrix::zeros(50, 50)));
        let tmp = saved(&model);

        let description =
            read_recommender_description::<ItemSimilarityRecommender>(tmp.path()).unwrap();
        let loaded: ItemSimilarityRecommender = load_recommender(tmp.path()).unwrap();
        assert_eq!(description, loaded.to_string());
        assert_eq!(description, "desc-knn(num_items=50, k=10)");
    }

    #[test]
    fn test_description_absent_model() {
        let model = ItemSimilarityRecommender::new("bare", 5, 2);
        let tmp = saved(&model);

        let description =
            read_recommender_description::<ItemSimilarityRecommender>(tmp.path()).unwrap();
        assert_eq!(description, model.to_string());
    }

    #[test]
    fn test_description_does_not_mutate_file() {
        let model = ItemSimilarityRecommender::new("stable", 2, 1)
            .with_similarity(SimilarityMatrix::Dense(array![[1.0, 0.0], [0.0, 1.0]]));
        let tmp = saved(&model);

        let before = std::fs::read(tmp.path()).unwrap();
        read_recommender_description::<ItemSimilarityRecommender>(tmp.path()).unwrap();
        let after = std::fs::read(tmp.path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_load_missing_file() {
        let result: Result<ItemSimilarityRecommender> = load_recommender("no_such_model.rec");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_not_an_archive() {
        use std::io::Write;
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(b"not a safetensors archive").unwrap();
        tmp.flush().unwrap();

        let result: Result<ItemSimilarityRecommender> = load_recommender(tmp.path());
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
