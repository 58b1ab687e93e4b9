//! # FP8-E4M3
//!
//! 8-bit floating point with 4 exponent bits and 3 mantissa bits.
//!
//! ```text
//! [Sign: 1 bit][Exponent: 4 bits][Mantissa: 3 bits]
//! Bit:  7       6           3     2          0
//! ```
//!
//! Exponent bias is 7. Exponent field 15 is reserved for infinities (mantissa
//! 0) and NaN (any other mantissa), so the largest finite magnitude is 240.
//! Exponent field 0 holds zero and the subnormals `mantissa * 2^-9`.

use std::fmt;

use crate::bits::{self, F32_EXPONENT_BIAS, F32_MANTISSA_BITS};
use crate::float::{NarrowFloat, round_ties_to_even};

const EXPONENT_BIAS: i32 = 7;
const MANTISSA_BITS: u32 = 3;
const MANTISSA_MASK: u8 = (1 << MANTISSA_BITS) - 1;
const SPECIAL_EXPONENT: i32 = 0xF;

const SIGN_MASK: u8 = 0x80;
const INFINITY_BITS: u8 = 0x78;
const NAN_BITS: u8 = 0x7F;

/// Value of the least significant subnormal mantissa bit, `2^(1 - 7 - 3)`.
const SUBNORMAL_QUANTUM: f64 = 1.0 / 512.0;

/// Encodes `value` as an FP8-E4M3 word.
///
/// The value is first narrowed to `f32`, then its magnitude is rounded to 3
/// mantissa bits with ties to even. Magnitudes at or above 248 saturate to a
/// signed infinity and magnitudes below `2^-9` flush to a signed zero. Every
/// NaN maps to `0x7F`.
pub fn encode(value: f64) -> u8 {
    if value.is_nan() {
        return NAN_BITS;
    }

    let f32_bits = bits::to_bits(value as f32);
    let sign = if bits::sign(f32_bits) { SIGN_MASK } else { 0 };
    if value.is_infinite() {
        return sign | INFINITY_BITS;
    }
    if value == 0.0 {
        return sign;
    }

    let f32_mantissa = bits::mantissa(f32_bits);
    let mut exponent =
        bits::biased_exponent(f32_bits) as i32 - F32_EXPONENT_BIAS + EXPONENT_BIAS;

    if exponent <= 0 {
        let shift = (1 - exponent) as u32;
        if shift > MANTISSA_BITS {
            return sign;
        }

        let significand = (1 << F32_MANTISSA_BITS) | f32_mantissa;
        // A carry out of the 3 mantissa bits lands on the exponent field,
        // giving the smallest normal word.
        let mantissa = round_ties_to_even(significand, F32_MANTISSA_BITS - MANTISSA_BITS + shift);
        return sign | mantissa as u8;
    }

    if exponent >= SPECIAL_EXPONENT {
        return sign | INFINITY_BITS;
    }

    let mut mantissa = round_ties_to_even(f32_mantissa, F32_MANTISSA_BITS - MANTISSA_BITS);
    if mantissa > MANTISSA_MASK as u32 {
        mantissa = 0;
        exponent += 1;
        if exponent >= SPECIAL_EXPONENT {
            return sign | INFINITY_BITS;
        }
    }

    sign | ((exponent as u8) << MANTISSA_BITS) | mantissa as u8
}

/// Decodes an FP8-E4M3 word. Exact for every word; NaN words lose their sign.
pub fn decode(word: u8) -> f64 {
    let exponent = ((word >> MANTISSA_BITS) & 0xF) as i32;
    let mantissa = word & MANTISSA_MASK;

    let magnitude = match (exponent, mantissa) {
        (0, mantissa) => mantissa as f64 * SUBNORMAL_QUANTUM,
        (SPECIAL_EXPONENT, 0) => f64::INFINITY,
        (SPECIAL_EXPONENT, _) => return f64::NAN,
        (exponent, mantissa) => {
            (1.0 + mantissa as f64 / 8.0) * 2f64.powi(exponent - EXPONENT_BIAS)
        }
    };

    if word & SIGN_MASK != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// An FP8-E4M3 scalar.
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct Fp8E4M3(u8);

impl Fp8E4M3 {
    pub const ZERO: Self = Self(0x00);
    pub const NEG_ZERO: Self = Self(0x80);
    pub const ONE: Self = Self(0x38);
    pub const INFINITY: Self = Self(INFINITY_BITS);
    pub const NEG_INFINITY: Self = Self(SIGN_MASK | INFINITY_BITS);
    /// Canonical NaN: exponent 15, mantissa `0b111`, sign clear.
    pub const NAN: Self = Self(NAN_BITS);
    /// Largest finite value, 240.
    pub const MAX: Self = Self(0x77);
    /// Smallest finite value, -240.
    pub const MIN: Self = Self(0xF7);
    /// Smallest positive normal value, `2^-6`.
    pub const MIN_POSITIVE: Self = Self(0x08);
    /// Smallest positive subnormal value, `2^-9`.
    pub const MIN_POSITIVE_SUBNORMAL: Self = Self(0x01);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self(encode(value))
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        decode(self.0)
    }

    fn exponent_field(self) -> u8 {
        (self.0 >> MANTISSA_BITS) & 0xF
    }

    pub fn is_nan(self) -> bool {
        self.exponent_field() == 0xF && self.0 & MANTISSA_MASK != 0
    }

    pub fn is_infinite(self) -> bool {
        self.0 & !SIGN_MASK == INFINITY_BITS
    }

    pub fn is_finite(self) -> bool {
        self.exponent_field() != 0xF
    }

    pub fn is_zero(self) -> bool {
        self.0 & !SIGN_MASK == 0
    }

    pub fn is_sign_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }
}

impl NarrowFloat for Fp8E4M3 {
    type Bits = u8;

    const BYTES: usize = 1;
    const NAME: &'static str = "fp8e4m3";

    fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    fn to_bits(self) -> u8 {
        self.0
    }

    fn from_f64(value: f64) -> Self {
        Self(encode(value))
    }

    fn to_f64(self) -> f64 {
        decode(self.0)
    }

    fn read_ne(bytes: &[u8]) -> Self {
        Self(bytes[0])
    }

    fn write_ne(self, bytes: &mut [u8]) {
        bytes[0] = self.0;
    }
}

impl From<f64> for Fp8E4M3 {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<f32> for Fp8E4M3 {
    fn from(value: f32) -> Self {
        Self::from_f64(value as f64)
    }
}

impl From<Fp8E4M3> for f64 {
    fn from(value: Fp8E4M3) -> Self {
        value.to_f64()
    }
}

impl From<Fp8E4M3> for f32 {
    /// Exact: every FP8-E4M3 value is representable in single precision.
    fn from(value: Fp8E4M3) -> Self {
        value.to_f64() as f32
    }
}

impl fmt::Debug for Fp8E4M3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fp8E4M3")
            .field("bits", &format_args!("{:#04x}", self.0))
            .field("value", &self.to_f64())
            .finish()
    }
}

impl fmt::Display for Fp8E4M3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}
