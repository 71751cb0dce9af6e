//! Flexprec Precision
//!
//! Bit-exact conversions between `f32` and narrower floating-point encodings:
//!
//! | Format   | Width | Exponent | Mantissa | Bias |
//! |----------|-------|----------|----------|------|
//! | float32  | 32    | 8        | 23       | 127  |
//! | half16   | 16    | 5        | 10       | 15   |
//! | bfloat16 | 16    | 8        | 7        | 127  |
//! | float8   | 8     | 3        | 4        | 3    |
//!
//! Every codec is a pair of total, allocation-free functions
//! (`encode(f32) -> uN`, `decode(uN) -> f32`) built on [`bits`] and the
//! shared bias remapping in [`descriptor`].

pub mod bfloat16;
pub mod bits;
mod codec;
mod compare;
mod config;
pub mod descriptor;
mod dtype;
mod error;
mod flex;
pub mod float8;
pub mod half16;

pub use bfloat16::BFloat16;
pub use codec::FloatCodec;
pub use compare::{is_close, DEFAULT_TOLERANCE};
pub use config::{CodecConfig, Rounding, ENV_HALF_ROUNDING, ENV_TOLERANCE};
pub use descriptor::{
    bias_for_width, convert_exponent, FloatFields, PrecisionDescriptor, BFLOAT16, FLOAT32, FLOAT8,
    HALF16,
};
pub use dtype::DataType;
pub use error::{PrecisionError, Result};
pub use flex::FloatFlex;
pub use float8::Float8;
pub use half16::Half16;
