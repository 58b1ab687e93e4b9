//! # Bit Reinterpretation
//!
//! Lossless conversion between an `f32` and its raw IEEE 754 bit pattern.
//!
//! ```text
//! [Sign: 1 bit][Exponent: 8 bits][Mantissa: 23 bits]
//! Bit:  31      30           23   22             0
//! ```
//!
//! Everything here is a pure function of its argument, so the codecs built on
//! top of it can be called from any number of threads at once.

/// Bias of the single-precision exponent field.
pub const F32_EXPONENT_BIAS: i32 = 127;

/// Width of the single-precision mantissa field.
pub const F32_MANTISSA_BITS: u32 = 23;

const F32_MANTISSA_MASK: u32 = (1 << F32_MANTISSA_BITS) - 1;

/// Reinterprets `value` as its 32-bit pattern.
#[inline]
pub const fn to_bits(value: f32) -> u32 {
    value.to_bits()
}

/// Reinterprets a 32-bit pattern as an `f32`.
#[inline]
pub const fn from_bits(bits: u32) -> f32 {
    f32::from_bits(bits)
}

/// Whether the sign bit is set.
#[inline]
pub const fn sign(bits: u32) -> bool {
    bits >> 31 == 1
}

/// The 8-bit biased exponent field.
#[inline]
pub const fn biased_exponent(bits: u32) -> u32 {
    (bits >> F32_MANTISSA_BITS) & 0xFF
}

/// The 23-bit mantissa field, without the implicit leading one.
#[inline]
pub const fn mantissa(bits: u32) -> u32 {
    bits & F32_MANTISSA_MASK
}
