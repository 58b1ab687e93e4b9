//! # Narrow Floating-Point Formats
//!
//! Reduced-width encodings of real numbers and the trait they share.
//!
//! ## Formats
//!
//! ```text
//! Fp8E4M3:  [Sign: 1][Exponent: 4, bias 7][Mantissa: 3]
//! BFloat16: [Sign: 1][Exponent: 8, bias 127][Mantissa: 7]
//! ```
//!
//! Both encoders round to nearest with ties to even and saturate values
//! beyond the largest finite word to a signed infinity. Decoding is exact.
//!
//! ## Examples
//!
//! ```rust
//! use narrowfloat::prelude::*;
//!
//! let x = Fp8E4M3::from_f64(1.0);
//! assert_eq!(x.to_bits(), 0x38);
//!
//! let y = BFloat16::from(3.140625);
//! assert_eq!(f64::from(y), 3.140625);
//! ```

use std::fmt::Debug;

pub mod bf16;
pub mod cmp;
pub mod fp8;

pub use bf16::BFloat16;
pub use fp8::Fp8E4M3;

/// A floating-point scalar stored in a narrow word of `BYTES` bytes.
///
/// Implementors are plain wrappers over their word, so conversion to and
/// from `f64` is the only work done on access.
pub trait NarrowFloat: Copy + Debug + PartialEq + PartialOrd {
    /// The unsigned integer holding the encoded word.
    type Bits: Copy + Debug + Eq;

    /// Width of one word in bytes.
    const BYTES: usize;

    /// Short human readable format name.
    const NAME: &'static str;

    fn from_bits(bits: Self::Bits) -> Self;
    fn to_bits(self) -> Self::Bits;

    /// Encodes `value`, rounding to nearest with ties to even.
    fn from_f64(value: f64) -> Self;

    /// Decodes the word exactly.
    fn to_f64(self) -> f64;

    /// Reads one word from exactly `BYTES` bytes in host byte order.
    fn read_ne(bytes: &[u8]) -> Self;

    /// Writes one word into exactly `BYTES` bytes in host byte order.
    fn write_ne(self, bytes: &mut [u8]);
}

/// Keeps the bits of `significand` above the lowest `dropped` ones, rounding
/// to nearest with ties to even.
///
/// The result may carry into the bit above the kept field; callers decide
/// what a carry means for their exponent. `dropped` must be in `1..32`.
#[inline]
pub(crate) const fn round_ties_to_even(significand: u32, dropped: u32) -> u32 {
    let kept = significand >> dropped;
    let round = (significand >> (dropped - 1)) & 1 == 1;
    let sticky = significand & ((1 << (dropped - 1)) - 1) != 0;

    if round && (sticky || kept & 1 == 1) {
        kept + 1
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_ties_to_even() {
        // below half
        assert_eq!(round_ties_to_even(0b1_0111, 4), 0b1);
        // above half
        assert_eq!(round_ties_to_even(0b1_1001, 4), 0b10);
        // exact half, odd kept value rounds up
        assert_eq!(round_ties_to_even(0b1_1000, 4), 0b10);
        // exact half, even kept value stays
        assert_eq!(round_ties_to_even(0b10_1000, 4), 0b10);
        // carry out of the kept field
        assert_eq!(round_ties_to_even(0b111_1000, 4), 0b1000);
        assert_eq!(round_ties_to_even(0b11, 1), 0b10);
    }
}
