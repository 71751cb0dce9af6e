//! Format descriptors and exponent bias remapping
//!
//! Every supported encoding is a sign bit followed by an exponent field and
//! a mantissa field. A [`PrecisionDescriptor`] records the field widths and
//! derives masks, shifts and the exponent bias from them, so the codecs never
//! hand-roll per-format bit masks.

/// Bias for an exponent field of the given width: `2^(width - 1) - 1`.
pub const fn bias_for_width(exponent_width: u32) -> i32 {
    (1i32 << (exponent_width - 1)) - 1
}

/// Move a raw exponent field from one bias to another.
///
/// Returns `exponent - src_bias + dest_bias`. The result may be negative or
/// exceed the destination field; callers clamp.
#[inline]
pub const fn convert_exponent(exponent: i32, src_bias: i32, dest_bias: i32) -> i32 {
    exponent - src_bias + dest_bias
}

/// Rebias an exponent field from the `from` format to the `to` format.
#[inline]
pub const fn rebias(exponent: u32, from: &PrecisionDescriptor, to: &PrecisionDescriptor) -> i32 {
    convert_exponent(exponent as i32, from.bias(), to.bias())
}

/// Sign, exponent and mantissa fields of an encoded value, right-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatFields {
    pub sign: u32,
    pub exponent: u32,
    pub mantissa: u32,
}

/// Bit layout of a floating-point encoding (1 sign bit, MSB first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrecisionDescriptor {
    pub exponent_width: u32,
    pub mantissa_width: u32,
}

/// IEEE-754 single precision
pub const FLOAT32: PrecisionDescriptor = PrecisionDescriptor::new(8, 23);

/// IEEE-754 half precision
pub const HALF16: PrecisionDescriptor = PrecisionDescriptor::new(5, 10);

/// Brain floating point: float32 range, 7-bit mantissa
pub const BFLOAT16: PrecisionDescriptor = PrecisionDescriptor::new(8, 7);

/// Extended 8-bit float
pub const FLOAT8: PrecisionDescriptor = PrecisionDescriptor::new(3, 4);

impl PrecisionDescriptor {
    pub const SIGN_WIDTH: u32 = 1;

    pub const fn new(exponent_width: u32, mantissa_width: u32) -> Self {
        Self {
            exponent_width,
            mantissa_width,
        }
    }

    /// Total encoded width in bits
    pub const fn total_width(&self) -> u32 {
        Self::SIGN_WIDTH + self.exponent_width + self.mantissa_width
    }

    pub const fn bias(&self) -> i32 {
        bias_for_width(self.exponent_width)
    }

    /// All-ones exponent field (infinity/NaN, or saturation for `FLOAT8`)
    pub const fn max_exponent(&self) -> u32 {
        (1 << self.exponent_width) - 1
    }

    pub const fn sign_shift(&self) -> u32 {
        self.exponent_width + self.mantissa_width
    }

    pub const fn exponent_mask(&self) -> u32 {
        self.max_exponent() << self.mantissa_width
    }

    pub const fn mantissa_mask(&self) -> u32 {
        (1 << self.mantissa_width) - 1
    }

    /// Mask covering every valid bit of the encoding
    pub const fn value_mask(&self) -> u32 {
        if self.total_width() >= 32 {
            u32::MAX
        } else {
            (1 << self.total_width()) - 1
        }
    }

    /// Whether `bits` has nothing set above the encoding's width
    pub const fn fits(&self, bits: u32) -> bool {
        bits & !self.value_mask() == 0
    }

    pub const fn unpack(&self, bits: u32) -> FloatFields {
        FloatFields {
            sign: (bits >> self.sign_shift()) & 1,
            exponent: (bits >> self.mantissa_width) & self.max_exponent(),
            mantissa: bits & self.mantissa_mask(),
        }
    }

    /// Pack fields into an encoding. Out-of-range fields are masked off.
    pub const fn pack(&self, fields: FloatFields) -> u32 {
        ((fields.sign & 1) << self.sign_shift())
            | ((fields.exponent & self.max_exponent()) << self.mantissa_width)
            | (fields.mantissa & self.mantissa_mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_formula() {
        assert_eq!(bias_for_width(8), 127);
        assert_eq!(bias_for_width(5), 15);
        assert_eq!(bias_for_width(3), 3);

        assert_eq!(FLOAT32.bias(), 127);
        assert_eq!(HALF16.bias(), 15);
        assert_eq!(BFLOAT16.bias(), 127);
        assert_eq!(FLOAT8.bias(), 3);
    }

    #[test]
    fn test_total_widths() {
        assert_eq!(FLOAT32.total_width(), 32);
        assert_eq!(HALF16.total_width(), 16);
        assert_eq!(BFLOAT16.total_width(), 16);
        assert_eq!(FLOAT8.total_width(), 8);
    }

    #[test]
    fn test_convert_exponent_is_unclamped() {
        // 1.0 in float32 has biased exponent 127
        assert_eq!(convert_exponent(127, 127, 15), 15);
        assert_eq!(convert_exponent(127, 127, 3), 3);
        // Tiny and huge exponents leave the destination range untouched
        assert_eq!(convert_exponent(0, 127, 15), -112);
        assert_eq!(convert_exponent(255, 127, 3), 131);
        assert_eq!(rebias(15, &HALF16, &FLOAT32), 127);
    }

    #[test]
    fn test_masks() {
        assert_eq!(FLOAT32.exponent_mask(), 0x7F80_0000);
        assert_eq!(FLOAT32.mantissa_mask(), 0x007F_FFFF);
        assert_eq!(HALF16.exponent_mask(), 0x7C00);
        assert_eq!(HALF16.mantissa_mask(), 0x03FF);
        assert_eq!(BFLOAT16.exponent_mask(), 0x7F80);
        assert_eq!(FLOAT8.exponent_mask(), 0x70);
        assert_eq!(FLOAT8.mantissa_mask(), 0x0F);
        assert_eq!(FLOAT32.value_mask(), u32::MAX);
        assert_eq!(FLOAT8.value_mask(), 0xFF);
    }

    #[test]
    fn test_unpack_pack() {
        let fields = FLOAT32.unpack(0xC0490FDB); // -pi
        assert_eq!(fields.sign, 1);
        assert_eq!(fields.exponent, 128);
        assert_eq!(fields.mantissa, 0x490FDB);
        assert_eq!(FLOAT32.pack(fields), 0xC0490FDB);

        let fields = HALF16.unpack(0x3C00);
        assert_eq!(
            fields,
            FloatFields {
                sign: 0,
                exponent: 15,
                mantissa: 0
            }
        );
    }

    #[test]
    fn test_fits() {
        assert!(FLOAT8.fits(0xFF));
        assert!(!FLOAT8.fits(0x100));
        assert!(HALF16.fits(0xFFFF));
        assert!(!HALF16.fits(0x1_0000));
        assert!(FLOAT32.fits(u32::MAX));
    }
}
