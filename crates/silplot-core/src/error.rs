// File: crates/silplot-core/src/error.rs
// Summary: Error taxonomy for figure configuration, table loading and rendering.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A column-valued property named a column the table does not have.
    #[error("no column '{name}' in {available:?}")]
    UnknownColumn { name: String, available: Vec<String> },

    #[error("invalid scale '{value}', expected one of {valid:?}")]
    InvalidScale { value: String, valid: &'static [&'static str] },

    #[error("rectangle needs 4 values (left, bottom, width, height), got {len}")]
    InvalidRectangle { len: usize },

    #[error("column '{column}' is not numeric at row {row}: '{value}'")]
    NonNumeric { column: String, row: usize, value: String },

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("render: {0}")]
    Render(String),

    #[error("encode: {0}")]
    Encode(#[from] image::ImageError),
}
