//! # narrowfloat
//!
//! Compact storage for approximate real numbers. Values are kept as 8-bit
//! FP8-E4M3 or 16-bit BFloat16 words and read or written as ordinary `f64`,
//! with the narrowing and widening done on every access.
//!
//! ## Overview
//!
//! narrowfloat provides:
//! - **Bit-level codecs**: `encode`/`decode` for each format, rounding to
//!   nearest with ties to even
//! - **Special values**: signed zeros, signed infinities, canonical NaN and
//!   subnormals handled at the bit level
//! - **Saturation**: magnitudes beyond the largest finite word become a
//!   signed infinity instead of failing
//! - **Lazy arrays**: fixed-length word buffers with per-index `f64` access
//!
//! ## Architecture
//!
//! ### Bits Module
//! Lossless `f32` ⇄ `u32` reinterpretation and field extraction, free of any
//! shared state so the codecs are safe to call from any thread.
//!
//! ### Float Module
//! The [`NarrowFloat`] trait and its two implementations:
//! - [`Fp8E4M3`]: sign, 4 exponent bits (bias 7), 3 mantissa bits
//! - [`BFloat16`]: the upper 16 bits of an `f32`
//!
//! ### Array Module
//! [`NarrowArray`] over owned or borrowed bytes, with the
//! [`Fp8E4M3Array`] and [`BFloat16Array`] aliases.
//!
//! ## Quick Start
//!
//! ```rust
//! use narrowfloat::prelude::*;
//!
//! let mut weights = Fp8E4M3Array::from_f64_slice(&[1.0, 240.0]);
//! assert_eq!(weights.get(0), Some(1.0));
//!
//! weights.set(1, 500.0).unwrap();
//! assert_eq!(weights.get(1), Some(f64::INFINITY));
//!
//! assert_eq!(narrowfloat::float::bf16::encode(1.0), 0x3F80);
//! ```
//!
//! ## Features
//!
//! - `json` (default): build arrays from a `serde_json::Value`, choosing the
//!   construction mode from the shape of the value.

pub mod array;
pub mod bits;
pub mod float;

// Re-export the main types for convenience
pub use array::{ArrayError, ArrayResult, BFloat16Array, Fp8E4M3Array, NarrowArray};
pub use float::{BFloat16, Fp8E4M3, NarrowFloat};

pub mod prelude {
    //! Prelude module for narrowfloat.
    //!
    //! Re-exports the scalar types, the array types and the [`NarrowFloat`]
    //! trait so a single glob import covers typical use.

    pub use crate::array::*;
    pub use crate::float::{BFloat16, Fp8E4M3, NarrowFloat};
}
