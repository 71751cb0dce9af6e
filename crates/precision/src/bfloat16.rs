//! Brain floating point (bfloat16)
//!
//! The upper half of a float32: 1 sign bit, 8 exponent bits (bias 127) and
//! 7 mantissa bits. No exponent remapping is needed in either direction.

use serde::{Deserialize, Serialize};

use crate::bits;
use crate::codec::FloatCodec;
use crate::descriptor::{PrecisionDescriptor, BFLOAT16, FLOAT32};
use crate::dtype::DataType;

/// Bits dropped when narrowing from float32
const SHIFT: u32 = FLOAT32.total_width() - BFLOAT16.total_width();

const HALFWAY: u32 = 1 << (SHIFT - 1);

const DROPPED_MASK: u32 = (1 << SHIFT) - 1;

/// Quiet bit of a bfloat16 NaN
const QUIET_BIT: u16 = 1 << (BFLOAT16.mantissa_width - 1);

/// Encode with round-to-nearest-even.
///
/// NaN inputs keep their upper payload bits and are forced quiet. Float32
/// subnormals flush to signed zero.
pub fn encode(value: f32) -> u16 {
    let raw = bits::to_bits(value);
    let magnitude = raw & !(1 << FLOAT32.sign_shift());

    if magnitude > FLOAT32.exponent_mask() {
        return (raw >> SHIFT) as u16 | QUIET_BIT;
    }

    if raw & FLOAT32.exponent_mask() == 0 {
        return ((raw >> SHIFT) as u16) & (1 << BFLOAT16.sign_shift());
    }

    let truncated = raw >> SHIFT;
    let dropped = raw & DROPPED_MASK;
    let round_up = dropped > HALFWAY || (dropped == HALFWAY && truncated & 1 == 1);

    // A carry out of the top finite binade yields infinity, as it should.
    (truncated + round_up as u32) as u16
}

/// Widen to float32. Exact for every bfloat16 pattern.
pub fn decode(bits: u16) -> f32 {
    bits::from_bits((bits as u32) << SHIFT)
}

/// A bfloat16 value stored as its raw bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BFloat16(u16);

impl BFloat16 {
    pub const ZERO: Self = Self(0x0000);
    pub const ONE: Self = Self(0x3F80);
    pub const INFINITY: Self = Self(0x7F80);
    pub const NEG_INFINITY: Self = Self(0xFF80);
    pub const NAN: Self = Self(0x7FC0);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u16 {
        self.0
    }

    pub fn is_nan(self) -> bool {
        let fields = BFLOAT16.unpack(self.0 as u32);
        fields.exponent == BFLOAT16.max_exponent() && fields.mantissa != 0
    }
}

impl FloatCodec for BFloat16 {
    const DESCRIPTOR: PrecisionDescriptor = BFLOAT16;
    const DATA_TYPE: DataType = DataType::BF16;

    fn from_f32(value: f32) -> Self {
        Self(encode(value))
    }

    fn to_f32(self) -> f32 {
        decode(self.0)
    }

    fn to_raw(self) -> u32 {
        self.0 as u32
    }

    fn from_raw_unchecked(bits: u32) -> Self {
        Self(bits as u16)
    }
}

impl std::fmt::Display for BFloat16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", decode(self.0))
    }
}
