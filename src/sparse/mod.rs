//! Sparse matrix containers and readers
//!
//! Two canonical in-memory shapes back everything in this crate: the
//! compressed-row [`CsrMatrix`] and the row-fast [`FastSparseMatrix`]
//! wrapper around it. [`CooMatrix`] is the interchange shape the text and
//! MatrixMarket readers decode into before conversion.

mod archive;
mod coo;
mod csr;
mod fast;
mod market;
mod text;


pub(crate) use archive::{slot_f32, slot_f32_2d, slot_u32, slot_u64, write_archive, Slot};

pub use coo::CooMatrix;
pub use csr::CsrMatrix;
pub use fast::FastSparseMatrix;
pub use market::read_matrix_market;
pub use text::read_triples;
