//! # Recomendar: Recommender Persistence Library
//!
//! Recomendar loads sparse rating matrices from interchange formats and
//! persists recommender models whose large similarity matrix is serialized
//! out-of-band from the rest of the model.
//!
//! ## Architecture
//!
//! - **sparse**: Sparse containers (COO, CSR, row-fast wrapper) plus the
//!   delimited-text and MatrixMarket readers and the native archives
//! - **io**: Format-tag dispatch for matrix loading, and model save/load
//!   including the lazy description-only path
//!
//! ## Quick start
//!
//! ```no_run
//! use recomendar::{
//!     load_fast_sparse_matrix, load_recommender, save_recommender,
//!     ItemSimilarityRecommender, SimilarityMatrix,
//! };
//!
//! let ratings = load_fast_sparse_matrix("tsv", "ratings.tsv").unwrap();
//!
//! let model = ItemSimilarityRecommender::new("cosine-knn", ratings.cols(), 50)
//!     .with_similarity(SimilarityMatrix::Sparse(ratings.csr().clone()));
//! save_recommender(&model, "model.rec").unwrap();
//!
//! let reloaded: ItemSimilarityRecommender = load_recommender("model.rec").unwrap();
//! assert_eq!(reloaded, model);
//! ```

pub mod error;
pub mod io;
pub mod sparse;

// Re-export commonly used types
pub use error::{Error, Result};
pub use io::{
    load_fast_sparse_matrix, load_recommender, load_sparse_matrix, read_recommender_description,
    save_recommender, ItemSimilarityRecommender, MatrixFormat, Recommender, SimilarityMatrix,
};
pub use sparse::{CooMatrix, CsrMatrix, FastSparseMatrix};
