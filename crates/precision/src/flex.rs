//! Type-tagged encoded values

use serde::{Deserialize, Serialize};

use crate::codec::FloatCodec;
use crate::config::CodecConfig;
use crate::dtype::DataType;
use crate::error::{PrecisionError, Result};
use crate::{bfloat16, bits, float8, half16};

/// Raw encoded bits together with the encoding they belong to.
///
/// `bits` is zero-extended to 32 bits and never has anything set above the
/// width of `dtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloatFlex {
    bits: u32,
    dtype: DataType,
}

impl FloatFlex {
    /// Encode `value` with the default codec settings
    pub fn encode(value: f32, dtype: DataType) -> Self {
        let bits = match dtype {
            DataType::F32 => bits::to_bits(value),
            DataType::F16 => half16::encode(value) as u32,
            DataType::BF16 => bfloat16::encode(value) as u32,
            DataType::F8 => float8::encode(value) as u32,
        };
        Self { bits, dtype }
    }

    /// Encode `value`, honoring the half precision rounding policy in `config`
    pub fn encode_with(value: f32, dtype: DataType, config: &CodecConfig) -> Self {
        match dtype {
            DataType::F16 => Self {
                bits: half16::encode_with(value, config.half_rounding) as u32,
                dtype,
            },
            _ => Self::encode(value, dtype),
        }
    }

    /// Wrap already-encoded bits
    pub fn from_raw(bits: u32, dtype: DataType) -> Result<Self> {
        let descriptor = dtype.descriptor();
        if !descriptor.fits(bits) {
            return Err(PrecisionError::BitsOutOfRange {
                bits,
                width: descriptor.total_width(),
                dtype,
            });
        }
        Ok(Self { bits, dtype })
    }

    pub fn from_codec<T: FloatCodec>(value: T) -> Self {
        Self {
            bits: value.to_raw(),
            dtype: T::DATA_TYPE,
        }
    }

    /// View as a concrete codec type, if the tag matches
    pub fn as_codec<T: FloatCodec>(&self) -> Option<T> {
        (self.dtype == T::DATA_TYPE).then(|| T::from_raw_unchecked(self.bits))
    }

    pub fn decode(&self) -> f32 {
        match self.dtype {
            DataType::F32 => bits::from_bits(self.bits),
            DataType::F16 => half16::decode(self.bits as u16),
            DataType::BF16 => bfloat16::decode(self.bits as u16),
            DataType::F8 => float8::decode(self.bits as u8),
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    /// Re-encode into another data type by way of float32
    pub fn convert(&self, dtype: DataType) -> Self {
        if dtype == self.dtype {
            return *self;
        }
        Self::encode(self.decode(), dtype)
    }
}

impl std::fmt::Display for FloatFlex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}: 0x{:0width$X})",
            self.decode(),
            self.dtype,
            self.bits,
            width = (self.dtype.bit_width() / 4) as usize
        )
    }
}
