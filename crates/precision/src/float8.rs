//! Extended 8-bit float
//!
//! 1 sign bit, 3 exponent bits (bias 3), 4 mantissa bits. The format has no
//! subnormals: exponent field 0 always means signed zero. Exponent field 7
//! is infinity (mantissa 0) or NaN.
//!
//! Encoding truncates the mantissa and clamps the exponent, so:
//! - anything below 0.25 in magnitude decodes to signed zero,
//! - values in `[16, 32)` land in the exponent-7 field: exactly 16 decodes
//!   to infinity, the rest of the binade to NaN,
//! - values of 32 and above, infinities and NaNs all encode to infinity.

use serde::{Deserialize, Serialize};

use crate::bits;
use crate::codec::FloatCodec;
use crate::descriptor::{rebias, FloatFields, PrecisionDescriptor, FLOAT32, FLOAT8};
use crate::dtype::DataType;

const MANTISSA_SHIFT: u32 = FLOAT32.mantissa_width - FLOAT8.mantissa_width;

/// Float32 quiet-NaN bit, set on every decoded NaN
const NAN_BIT: u32 = 1 << (FLOAT32.mantissa_width - 1);

/// Largest finite value (exponent 6, full mantissa)
pub const MAX: f32 = 15.5;

/// Smallest positive value that survives a round trip
pub const MIN_POSITIVE: f32 = 0.25;

pub fn encode(value: f32) -> u8 {
    let src = FLOAT32.unpack(bits::to_bits(value));
    let exponent = rebias(src.exponent, &FLOAT32, &FLOAT8);

    let fields = if exponent < 0 {
        FloatFields {
            sign: src.sign,
            exponent: 0,
            mantissa: 0,
        }
    } else if exponent > FLOAT8.max_exponent() as i32 {
        FloatFields {
            sign: src.sign,
            exponent: FLOAT8.max_exponent(),
            mantissa: 0,
        }
    } else {
        FloatFields {
            sign: src.sign,
            exponent: exponent as u32,
            mantissa: src.mantissa >> MANTISSA_SHIFT,
        }
    };

    FLOAT8.pack(fields) as u8
}

pub fn decode(bits: u8) -> f32 {
    let src = FLOAT8.unpack(bits as u32);

    let fields = match src.exponent {
        0 => FloatFields {
            sign: src.sign,
            exponent: 0,
            mantissa: 0,
        },
        e if e == FLOAT8.max_exponent() => FloatFields {
            sign: src.sign,
            exponent: FLOAT32.max_exponent(),
            mantissa: if src.mantissa == 0 {
                0
            } else {
                (src.mantissa << MANTISSA_SHIFT) | NAN_BIT
            },
        },
        e => FloatFields {
            sign: src.sign,
            exponent: rebias(e, &FLOAT8, &FLOAT32) as u32,
            mantissa: src.mantissa << MANTISSA_SHIFT,
        },
    };

    bits::from_bits(FLOAT32.pack(fields))
}

/// An 8-bit float stored as its raw bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Float8(u8);

impl Float8 {
    pub const ZERO: Self = Self(0x00);
    pub const ONE: Self = Self(0x30);
    pub const MAX: Self = Self(0x6F);
    pub const INFINITY: Self = Self(0x70);
    pub const NEG_INFINITY: Self = Self(0xF0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u8 {
        self.0
    }

    pub fn is_nan(self) -> bool {
        let fields = FLOAT8.unpack(self.0 as u32);
        fields.exponent == FLOAT8.max_exponent() && fields.mantissa != 0
    }
}

impl FloatCodec for Float8 {
    const DESCRIPTOR: PrecisionDescriptor = FLOAT8;
    const DATA_TYPE: DataType = DataType::F8;

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
        Self(bits as u8)
    }
}

impl std::fmt::Display for Float8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", decode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(encode(1.0), 0x30);
        assert_eq!(decode(0x30), 1.0);
        assert_eq!(encode(1.5), 0x38);
        assert_eq!(encode(-1.0), 0xB0);
        assert_eq!(encode(MAX), 0x6F);
        assert_eq!(decode(0x6F), MAX);
        assert_eq!(decode(0x10), MIN_POSITIVE);
    }

    #[test]
    fn test_mantissa_truncates() {
        // 1.999 keeps only the top four mantissa bits
        assert_eq!(encode(1.999), 0x3F);
        assert_eq!(decode(0x3F), 1.9375);
    }

    #[test]
    fn test_zero_has_no_subnormals() {
        assert_eq!(decode(encode(0.0)).to_bits(), 0x0000_0000);
        assert_eq!(decode(encode(-0.0)).to_bits(), 0x8000_0000);

        // Negative rebiased exponent flushes
        assert_eq!(encode(0.1), 0x00);
        assert_eq!(decode(encode(0.1)), 0.0);

        // Exponent field 0 with a mantissa is still zero on decode
        assert_eq!(encode(0.2) & 0x70, 0x00);
        assert_eq!(decode(encode(0.2)), 0.0);
        assert_eq!(decode(0x0F), 0.0);
        assert_eq!(decode(0x8F).to_bits(), 0x8000_0000);
    }

    #[test]
    fn test_saturation() {
        assert_eq!(encode(32.0), 0x70);
        assert_eq!(encode(-1.0e30), 0xF0);
        assert_eq!(encode(f32::INFINITY), 0x70);
        assert_eq!(encode(f32::NEG_INFINITY), 0xF0);
        assert_eq!(decode(0x70), f32::INFINITY);
        assert_eq!(decode(0xF0), f32::NEG_INFINITY);
    }

    #[test]
    fn test_top_binade_collapse() {
        // 16.0 lands on exponent 7 with an empty mantissa: infinity
        assert_eq!(encode(16.0), 0x70);
        // 17.0 keeps a mantissa bit in exponent 7: NaN
        assert_eq!(encode(17.0), 0x71);
        assert!(decode(encode(17.0)).is_nan());
    }

    #[test]
    fn test_nan() {
        // NaN inputs saturate like any out-of-range exponent
        assert_eq!(encode(f32::NAN), 0x70);
        assert_eq!(encode(-f32::NAN), 0xF0);

        assert_eq!(decode(0x71).to_bits(), 0x7FC8_0000);
        assert_eq!(decode(0x7F).to_bits(), 0x7FF8_0000);
        assert_eq!(decode(0xF1).to_bits(), 0xFFC8_0000);
    }

    #[test]
    fn test_every_pattern_decodes() {
        for bits in 0..=u8::MAX {
            let value = decode(bits);
            let exponent = (bits >> 4) & 0x7;
            match exponent {
                0 => assert_eq!(value, 0.0),
                7 => assert!(value.is_infinite() || value.is_nan()),
                _ => {
                    assert!(value.is_finite());
                    assert_eq!(encode(value), bits);
                }
            }
        }
    }

    #[test]
    fn test_newtype() {
        assert_eq!(Float8::from_f32(1.0), Float8::ONE);
        assert_eq!(Float8::MAX.to_f32(), MAX);
        assert!(Float8::from_bits(0x71).is_nan());
        assert!(!Float8::INFINITY.is_nan());
    }
}
