//! Matrix loading and model persistence
//!
//! Two independent subsystems: the matrix loaders dispatch a format tag to
//! the right reader and return one of the two canonical sparse shapes; the
//! model persistence functions split a recommender into a structural part
//! and its similarity matrix, archive both, and reassemble them on load.

mod format;
mod load;
mod matrix;
mod recommender;
mod save;


pub use format::MatrixFormat;
pub use load::{load_recommender, read_recommender_description};
pub use matrix::{load_fast_sparse_matrix, load_sparse_matrix};
pub use recommender::{ItemSimilarityRecommender, Recommender, SimilarityMatrix};
pub use save::save_recommender;
