//! Common interface over the narrow float encodings

use crate::descriptor::{PrecisionDescriptor, FLOAT32};
use crate::dtype::DataType;
use crate::error::{PrecisionError, Result};

/// A floating-point encoding with a bit-exact mapping to and from `f32`.
///
/// `from_f32`/`to_f32` are total: every `f32` encodes and every bit pattern
/// of the encoding decodes.
pub trait FloatCodec: Copy + Sized {
    const DESCRIPTOR: PrecisionDescriptor;
    const DATA_TYPE: DataType;

    fn from_f32(value: f32) -> Self;

    fn to_f32(self) -> f32;

    /// Raw bits, zero-extended to 32 bits
    fn to_raw(self) -> u32;

    /// Wrap raw bits without checking the encoding width.
    fn from_raw_unchecked(bits: u32) -> Self;

    /// Wrap raw bits, rejecting anything set above the encoding width.
    fn from_raw(bits: u32) -> Result<Self> {
        if !Self::DESCRIPTOR.fits(bits) {
            return Err(PrecisionError::BitsOutOfRange {
                bits,
                width: Self::DESCRIPTOR.total_width(),
                dtype: Self::DATA_TYPE,
            });
        }
        Ok(Self::from_raw_unchecked(bits))
    }
}

impl FloatCodec for f32 {
    const DESCRIPTOR: PrecisionDescriptor = FLOAT32;
    const DATA_TYPE: DataType = DataType::F32;

    fn from_f32(value: f32) -> Self {
        value
    }

    fn to_f32(self) -> f32 {
        self
    }

    fn to_raw(self) -> u32 {
        crate::bits::to_bits(self)
    }

    fn from_raw_unchecked(bits: u32) -> Self {
        crate::bits::from_bits(bits)
    }
}
