//! IEEE-754 half precision (binary16)
//!
//! 1 sign bit, 5 exponent bits (bias 15), 10 mantissa bits. Exponent field
//! 0 holds zero and subnormals, 31 holds infinity and NaN.

use serde::{Deserialize, Serialize};

use crate::bits;
use crate::codec::FloatCodec;
use crate::config::Rounding;
use crate::descriptor::{rebias, FloatFields, PrecisionDescriptor, FLOAT32, HALF16};
use crate::dtype::DataType;

/// Mantissa bits dropped when narrowing from float32
const MANTISSA_SHIFT: u32 = FLOAT32.mantissa_width - HALF16.mantissa_width;

/// Implicit leading one of a normal float32 significand
const IMPLICIT_BIT: u32 = 1 << FLOAT32.mantissa_width;

/// Quiet bit of a half NaN
const QUIET_BIT: u32 = 1 << (HALF16.mantissa_width - 1);

/// Below this rebiased exponent the value is under half the smallest subnormal
const SUBNORMAL_FLOOR: i32 = -(HALF16.mantissa_width as i32);

/// Largest finite half value
pub const MAX: f32 = 65504.0;

/// Encode with round-to-nearest-even.
pub fn encode(value: f32) -> u16 {
    encode_with(value, Rounding::NearestEven)
}

/// Encode with an explicit rounding policy for the dropped mantissa bits.
pub fn encode_with(value: f32, rounding: Rounding) -> u16 {
    let src = FLOAT32.unpack(bits::to_bits(value));
    let sign = src.sign << HALF16.sign_shift();

    if src.exponent == FLOAT32.max_exponent() {
        let payload = if src.mantissa != 0 {
            QUIET_BIT | (src.mantissa >> MANTISSA_SHIFT)
        } else {
            0
        };
        return (sign | HALF16.exponent_mask() | payload) as u16;
    }

    let exponent = rebias(src.exponent, &FLOAT32, &HALF16);

    if exponent >= HALF16.max_exponent() as i32 {
        return (sign | HALF16.exponent_mask()) as u16;
    }

    if exponent <= 0 {
        if exponent < SUBNORMAL_FLOOR {
            return sign as u16;
        }
        let significand = src.mantissa | IMPLICIT_BIT;
        let shift = MANTISSA_SHIFT + (1 - exponent) as u32;
        return (sign | shift_round(significand, shift, rounding)) as u16;
    }

    // A round-up carry out of the mantissa lands in the exponent field,
    // which is exactly the next binade (or infinity from the top one).
    let wide = ((exponent as u32) << FLOAT32.mantissa_width) | src.mantissa;
    (sign | shift_round(wide, MANTISSA_SHIFT, rounding)) as u16
}

pub fn decode(bits: u16) -> f32 {
    let src = HALF16.unpack(bits as u32);

    let fields = match src.exponent {
        0 if src.mantissa == 0 => FloatFields {
            sign: src.sign,
            exponent: 0,
            mantissa: 0,
        },
        0 => {
            let mut exponent = rebias(1, &HALF16, &FLOAT32);
            let mut mantissa = src.mantissa;
            while mantissa & (1 << HALF16.mantissa_width) == 0 {
                mantissa <<= 1;
                exponent -= 1;
            }
            FloatFields {
                sign: src.sign,
                exponent: exponent as u32,
                mantissa: (mantissa & HALF16.mantissa_mask()) << MANTISSA_SHIFT,
            }
        }
        e if e == HALF16.max_exponent() => FloatFields {
            sign: src.sign,
            exponent: FLOAT32.max_exponent(),
            mantissa: src.mantissa << MANTISSA_SHIFT,
        },
        e => FloatFields {
            sign: src.sign,
            exponent: rebias(e, &HALF16, &FLOAT32) as u32,
            mantissa: src.mantissa << MANTISSA_SHIFT,
        },
    };

    bits::from_bits(FLOAT32.pack(fields))
}

fn shift_round(value: u32, shift: u32, rounding: Rounding) -> u32 {
    let truncated = value >> shift;
    match rounding {
        Rounding::Truncate => truncated,
        Rounding::NearestEven => {
            let halfway = 1u32 << (shift - 1);
            let dropped = value & ((1u32 << shift) - 1);
            if dropped > halfway || (dropped == halfway && truncated & 1 == 1) {
                truncated + 1
            } else {
                truncated
            }
        }
    }
}

/// A half precision value stored as its raw bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Half16(u16);

impl Half16 {
    pub const ZERO: Self = Self(0x0000);
    pub const ONE: Self = Self(0x3C00);
    pub const INFINITY: Self = Self(0x7C00);
    pub const NEG_INFINITY: Self = Self(0xFC00);
    pub const NAN: Self = Self(0x7E00);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u16 {
        self.0
    }

    pub fn is_nan(self) -> bool {
        let fields = HALF16.unpack(self.0 as u32);
        fields.exponent == HALF16.max_exponent() && fields.mantissa != 0
    }
}

impl FloatCodec for Half16 {
    const DESCRIPTOR: PrecisionDescriptor = HALF16;
    const DATA_TYPE: DataType = DataType::F16;

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

impl std::fmt::Display for Half16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", decode(self.0))
    }
}
