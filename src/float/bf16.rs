//! # BFloat16
//!
//! The upper half of an IEEE 754 single-precision float.
//!
//! ```text
//! f32:  SEEEEEEE EMMMMMMM MMMMMMMM MMMMMMMM
//! bf16: SEEEEEEE EMMMMMMM
//! ```
//!
//! BFloat16 keeps the full single-precision exponent range with 7 mantissa
//! bits. Widening back to `f32` only appends zero bits, so decoding is exact.

use std::fmt;

use crate::bits;
use crate::float::NarrowFloat;

const SPECIAL_EXPONENT: u32 = 0xFF;
const SIGN_MASK: u16 = 0x8000;
const EXPONENT_MASK: u16 = 0x7F80;
const MANTISSA_MASK: u16 = 0x007F;

/// Encodes `value` as a BFloat16 word.
///
/// The value is narrowed to `f32` and the low 16 bits are rounded away with
/// ties to even. Infinities and NaN keep their upper half untouched.
pub fn encode(value: f64) -> u16 {
    let f32_bits = bits::to_bits(value as f32);
    let top = (f32_bits >> 16) as u16;

    if bits::biased_exponent(f32_bits) == SPECIAL_EXPONENT {
        return top;
    }

    let lower = f32_bits & 0xFFFF;
    if lower > 0x8000 || (lower == 0x8000 && top & 1 == 1) {
        top.wrapping_add(1)
    } else {
        top
    }
}

/// Decodes a BFloat16 word. Always exact.
pub fn decode(word: u16) -> f64 {
    bits::from_bits((word as u32) << 16) as f64
}

/// A BFloat16 scalar.
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct BFloat16(u16);

impl BFloat16 {
    pub const ZERO: Self = Self(0x0000);
    pub const NEG_ZERO: Self = Self(0x8000);
    pub const ONE: Self = Self(0x3F80);
    pub const INFINITY: Self = Self(0x7F80);
    pub const NEG_INFINITY: Self = Self(0xFF80);
    /// Quiet NaN, the upper half of `f32::NAN`.
    pub const NAN: Self = Self(0x7FC0);
    /// Largest finite value, about `3.39e38`.
    pub const MAX: Self = Self(0x7F7F);
    pub const MIN: Self = Self(0xFF7F);
    /// Smallest positive normal value, `2^-126`.
    pub const MIN_POSITIVE: Self = Self(0x0080);
    /// Smallest positive subnormal value, `2^-133`.
    pub const MIN_POSITIVE_SUBNORMAL: Self = Self(0x0001);
    /// Difference between 1.0 and the next larger value, `2^-7`.
    pub const EPSILON: Self = Self(0x3C00);

    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u16 {
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

    pub fn is_nan(self) -> bool {
        self.0 & EXPONENT_MASK == EXPONENT_MASK && self.0 & MANTISSA_MASK != 0
    }

    pub fn is_infinite(self) -> bool {
        self.0 & !SIGN_MASK == EXPONENT_MASK
    }

    pub fn is_finite(self) -> bool {
        self.0 & EXPONENT_MASK != EXPONENT_MASK
    }

    pub fn is_zero(self) -> bool {
        self.0 & !SIGN_MASK == 0
    }

    pub fn is_sign_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }
}

impl NarrowFloat for BFloat16 {
    type Bits = u16;

    const BYTES: usize = 2;
    const NAME: &'static str = "bfloat16";

    fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    fn to_bits(self) -> u16 {
        self.0
    }

    fn from_f64(value: f64) -> Self {
        Self(encode(value))
    }

    fn to_f64(self) -> f64 {
        decode(self.0)
    }

    fn read_ne(bytes: &[u8]) -> Self {
        Self(u16::from_ne_bytes([bytes[0], bytes[1]]))
    }

    fn write_ne(self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.0.to_ne_bytes());
    }
}

impl From<f64> for BFloat16 {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<f32> for BFloat16 {
    fn from(value: f32) -> Self {
        Self::from_f64(value as f64)
    }
}

impl From<BFloat16> for f64 {
    fn from(value: BFloat16) -> Self {
        value.to_f64()
    }
}

impl From<BFloat16> for f32 {
    fn from(value: BFloat16) -> Self {
        bits::from_bits((value.0 as u32) << 16)
    }
}

impl fmt::Debug for BFloat16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BFloat16")
            .field("bits", &format_args!("{:#06x}", self.0))
            .field("value", &self.to_f64())
            .finish()
    }
}

impl fmt::Display for BFloat16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rstest::rstest;

    use super::*;
    use crate::tests::*;

    #[test]
    fn test_known_values() {
        assert_eq!(encode(1.0), 0x3F80);
        assert_eq!(decode(0x3F80), 1.0);
        assert_eq!(encode(-2.0), 0xC000);
        assert_eq!(encode(3.140625), 0x4049);
        assert_eq!(decode(0x4049), 3.140625);
        assert_eq!(decode(0x0001), 2f64.powi(-133));
    }

    #[test]
    fn test_special_values() {
        assert_eq!(encode(0.0), 0x0000);
        assert_eq!(decode(0x0000), 0.0);
        assert_eq!(encode(-0.0), 0x8000);
        assert!(decode(0x8000).is_sign_negative());

        assert_eq!(encode(f64::INFINITY), 0x7F80);
        assert_eq!(encode(f64::NEG_INFINITY), 0xFF80);
        assert_eq!(decode(encode(f64::INFINITY)), f64::INFINITY);
        assert_eq!(decode(encode(f64::NEG_INFINITY)), f64::NEG_INFINITY);

        assert_eq!(encode(f64::NAN), 0x7FC0);
        assert!(decode(encode(f64::NAN)).is_nan());
        assert!(decode(0xFFC1).is_nan());
    }

    #[test]
    fn test_ties_to_even() {
        let one = 1.0f64;
        // 1 + 2^-8 is halfway between 0x3F80 and 0x3F81
        assert_eq!(encode(one + 2f64.powi(-8)), 0x3F80);
        // 1 + 3 * 2^-8 is halfway between 0x3F81 and 0x3F82
        assert_eq!(encode(one + 3.0 * 2f64.powi(-8)), 0x3F82);
        // above half rounds up
        assert_eq!(encode(one + 2f64.powi(-8) + 2f64.powi(-20)), 0x3F81);
        // below half rounds down
        assert_eq!(encode(one + 2f64.powi(-8) - 2f64.powi(-20)), 0x3F80);
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(encode(f32::MAX as f64), 0x7F80);
        assert_eq!(encode(-(f32::MAX as f64)), 0xFF80);
        assert_eq!(encode(1e300), 0x7F80);
        assert_eq!(encode(decode(0x7F7F)), 0x7F7F);
    }

    #[test]
    fn test_every_word_round_trips() {
        for word in 0..=u16::MAX {
            let value = decode(word);
            if value.is_nan() {
                assert!(BFloat16::from_bits(word).is_nan());
                continue;
            }
            assert_eq!(encode(value), word, "word {word:#06x} decoded to {value}");
        }
    }

    #[rstest]
    fn test_bounded_error(mut rng: impl Rng, n_experiments: usize) {
        for _ in 0..n_experiments {
            let value = rng.random_range(-1e30..1e30) as f32 as f64;
            let value = value * 2f64.powi(rng.random_range(-90..0));
            let value = value as f32 as f64;
            if value.abs() < f32::MIN_POSITIVE as f64 {
                continue;
            }
            let decoded = decode(encode(value));

            let half_quantum = 2f64.powi(binary_exponent(value) - 8);
            assert!(
                (decoded - value).abs() <= half_quantum,
                "{value} decoded as {decoded}"
            );
        }
    }

    #[rstest]
    fn test_monotonic(mut rng: impl Rng, n_experiments: usize) {
        for _ in 0..n_experiments {
            let a = rng.random::<f32>() as f64 * 2f64.powi(rng.random_range(-140..130));
            let b = rng.random::<f32>() as f64 * 2f64.powi(rng.random_range(-140..130));
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            assert!(encode(low) <= encode(high), "{low} encoded above {high}");
        }
    }

    #[rstest]
    fn test_scalar(mut rng: impl Rng, n_experiments: usize) {
        assert!(BFloat16::NAN.is_nan());
        assert!(BFloat16::INFINITY.is_infinite());
        assert!(!BFloat16::INFINITY.is_nan());
        assert!(BFloat16::NEG_ZERO.is_zero());
        assert!(BFloat16::MAX.is_finite());
        assert_eq!(f64::from(BFloat16::MIN_POSITIVE), f32::MIN_POSITIVE as f64);
        assert_eq!(f64::from(BFloat16::EPSILON), 2f64.powi(-7));
        assert_eq!(f64::from(BFloat16::MIN), -f64::from(BFloat16::MAX));
        assert_eq!(f32::from(BFloat16::ONE), 1.0);

        for _ in 0..n_experiments {
            let value = random_f64(&mut rng);
            let scalar = BFloat16::from(value);
            assert_eq!(scalar.to_bits(), encode(value));
            assert_eq!(scalar.is_sign_negative(), value.is_sign_negative());
            assert!(!scalar.is_nan());
        }
    }
}
