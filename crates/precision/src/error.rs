//! Precision error types

use thiserror::Error;

use crate::DataType;

#[derive(Error, Debug)]
pub enum PrecisionError {
    #[error("Unknown data type: {0}")]
    UnknownDataType(String),

    #[error("Raw bits 0x{bits:08X} do not fit a {width}-bit {dtype} value")]
    BitsOutOfRange {
        bits: u32,
        width: u32,
        dtype: DataType,
    },

    #[error("Unknown rounding mode: {0}")]
    UnknownRounding(String),

    #[error("Invalid tolerance: {0} (must be finite and non-negative)")]
    InvalidTolerance(f32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrecisionError>;
