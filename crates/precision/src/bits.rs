//! Float32 bit reinterpretation

/// Reinterpret an `f32` as its raw IEEE-754 bit pattern.
///
/// Total and lossless: every NaN payload, signed zero and infinity keeps its
/// exact bits.
#[inline]
pub fn to_bits(value: f32) -> u32 {
    value.to_bits()
}

/// Reinterpret a raw 32-bit pattern as an `f32`. Inverse of [`to_bits`].
#[inline]
pub fn from_bits(bits: u32) -> f32 {
    f32::from_bits(bits)
}
