//! Error types for Recomendar

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown input format: {0}")]
    UnknownFormat(String),

    #[error("unexpected serialization format; was this file created with save_recommender()?")]
    CorruptArchive,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },
}

pub type Result<T> = std::result::Result<T, Error>;
