//! Quantization container error types

use std::collections::TryReserveError;

use flexprec_precision::PrecisionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuantError {
    #[error("Failed to allocate {count} quantized values: {source}")]
    Allocation {
        count: usize,
        source: TryReserveError,
    },

    #[error("Count mismatch: expected {expected}, got {got}")]
    CountMismatch { expected: usize, got: usize },

    #[error("Count {0} exceeds the serialized block limit")]
    CountTooLarge(usize),

    #[error("Buffer too short: need {need} bytes, have {have}")]
    BufferTooShort { need: usize, have: usize },

    #[error("Unknown data type tag: {0}")]
    UnknownDataType(u8),

    #[error("Precision error: {0}")]
    Precision(#[from] PrecisionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuantError>;
