//! Recommender model abstraction for persistence
//!
//! A model is split into a structural part (serde-serializable) and one
//! designated numeric field, the similarity matrix, which is serialized
//! out-of-band because it can be very large and benefits from a numeric
//! encoding. Implementors keep the matrix out of their serde representation
//! with `#[serde(skip)]`.

use crate::sparse::CsrMatrix;
use ndarray::Array2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The designated numeric field of a recommender model.
///
/// The variant tag (`dense` / `sparse` / `absent`) is the discriminator
/// written into a saved archive; load dispatches on it rather than sniffing
/// slot names.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SimilarityMatrix {
    /// Dense item-item similarity
    Dense(Array2<f32>),

    /// Compressed-row item-item similarity
    Sparse(CsrMatrix),

    /// The model carries no similarity matrix
    #[default]
    Absent,
}

impl SimilarityMatrix {
    /// The archive discriminator for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            SimilarityMatrix::Dense(_) => "dense",
            SimilarityMatrix::Sparse(_) => "sparse",
            SimilarityMatrix::Absent => "absent",
        }
    }

    /// Whether the field is absent.
    pub fn is_absent(&self) -> bool {
        matches!(self, SimilarityMatrix::Absent)
    }
}

/// A recommender model as seen by the persistence layer.
///
/// The serde representation is the structural part only; the similarity
/// matrix travels out-of-band through [`similarity`](Self::similarity) and
/// [`set_similarity`](Self::set_similarity). `Display` must describe the
/// structural state without depending on the matrix contents, so the
/// description-only load path can print it without materializing the
/// numeric payload.
pub trait Recommender: Serialize + DeserializeOwned + fmt::Display {
    /// Borrow the designated numeric field.
    fn similarity(&self) -> &SimilarityMatrix;

    /// Reattach the designated numeric field after the structural part has
    /// been reconstructed.
    fn set_similarity(&mut self, similarity: SimilarityMatrix);
}

/// Item-based recommender: scores items by similarity to the items a user
/// has already rated.
///
/// The canonical [`Recommender`] implementation in this crate; external
/// model types implement the trait the same way, keeping their matrix field
/// out of serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSimilarityRecommender {
    /// Human-readable model name
    pub name: String,

    /// Number of items the model was fitted on
    pub num_items: usize,

    /// Neighbourhood size used when scoring
    pub k: usize,

    /// Fitting hyperparameters and provenance
    pub params: HashMap<String, serde_json::Value>,

    /// Item-item similarity, reattached on load
    #[serde(skip)]
    pub similarity: SimilarityMatrix,
}

impl ItemSimilarityRecommender {
    /// Create a model with no similarity matrix fitted yet.
    pub fn new(name: impl Into<String>, num_items: usize, k: usize) -> Self {
        Self {
            name: name.into(),
            num_items,
            k,
            params: HashMap::new(),
            similarity: SimilarityMatrix::Absent,
        }
    }

    /// Add a hyperparameter to the structural description.
    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Attach a fitted similarity matrix.
    pub fn with_similarity(mut self, similarity: SimilarityMatrix) -> Self {
        self.similarity = similarity;
        self
    }
}

impl fmt::Display for ItemSimilarityRecommender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(num_items={}, k={})",
            self.name, self.num_items, self.k
        )
    }
}

impl Recommender for ItemSimilarityRecommender {
    fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    fn set_similarity(&mut self, similarity: SimilarityMatrix) {
        self.similarity = similarity;
    }
}
