//! # Narrow Float Arrays
//!
//! A fixed-length sequence of narrow words that reads and writes as `f64`.
//!
//! The array stores encoded words back to back in host byte order and never
//! keeps decoded values around: [`NarrowArray::get`] decodes one word and
//! [`NarrowArray::set`] encodes one value. The backing bytes stay reachable
//! through [`NarrowArray::buffer`] for bulk copies.
//!
//! ## Construction
//!
//! | Input                      | Constructor                            |
//! |----------------------------|----------------------------------------|
//! | element count              | [`NarrowArray::zeroed`], [`NarrowArray::try_zeroed`] |
//! | existing bytes (no copy)   | [`NarrowArray::from_buffer`]           |
//! | `f64` values               | [`NarrowArray::from_f64_slice`], `collect()` |
//! | any values convertible to `f64` | [`NarrowArray::from_values`]      |
//!
//! ## Examples
//!
//! ```rust
//! use narrowfloat::prelude::*;
//!
//! let mut array = Fp8E4M3Array::from_f64_slice(&[1.0, 240.0]);
//! assert_eq!(array.len(), 2);
//! assert_eq!(array.get(1), Some(240.0));
//!
//! array.set(1, 500.0).unwrap();
//! assert_eq!(array.get(1), Some(f64::INFINITY));
//! assert_eq!(array.buffer(), &[0x38, 0x78]);
//! ```
//!
//! Borrowed storage is written in place:
//!
//! ```rust
//! use narrowfloat::prelude::*;
//!
//! let mut bytes = [0u8; 4];
//! let mut array = BFloat16Array::from_buffer(&mut bytes[..]).unwrap();
//! array.set(0, 1.0).unwrap();
//! drop(array);
//! assert_eq!(u16::from_ne_bytes([bytes[0], bytes[1]]), 0x3F80);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;

use log::{debug, warn};

use crate::float::{BFloat16, Fp8E4M3, NarrowFloat};

pub mod error;
#[cfg(feature = "json")]
pub mod json;

pub use error::{ArrayError, ArrayResult};

/// Fixed-length array of `T` words stored in `S`.
#[derive(Clone)]
pub struct NarrowArray<T, S = Vec<u8>> {
    storage: S,
    len: usize,
    format: PhantomData<T>,
}

pub type Fp8E4M3Array<S = Vec<u8>> = NarrowArray<Fp8E4M3, S>;
pub type BFloat16Array<S = Vec<u8>> = NarrowArray<BFloat16, S>;

impl<T: NarrowFloat> NarrowArray<T, Vec<u8>> {
    /// Creates an array of `len` words, all positive zero.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size overflows `usize`, like `vec!` does. Use
    /// [`NarrowArray::try_zeroed`] for untrusted lengths.
    pub fn zeroed(len: usize) -> Self {
        debug!("allocating {} array of {len} zero words", T::NAME);
        Self {
            storage: vec![0; len * T::BYTES],
            len,
            format: PhantomData,
        }
    }

    /// Creates an array of `len` zero words, failing with
    /// [`ArrayError::TooLarge`] when the buffer cannot be allocated.
    pub fn try_zeroed(len: usize) -> ArrayResult<Self> {
        let too_large = || {
            warn!("cannot allocate {} array of {len} words", T::NAME);
            ArrayError::TooLarge {
                len,
                word_bytes: T::BYTES,
            }
        };

        let n_bytes = len
            .checked_mul(T::BYTES)
            .filter(|&n_bytes| n_bytes <= isize::MAX as usize)
            .ok_or_else(too_large)?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(n_bytes)
            .map_err(|_| too_large())?;
        storage.resize(n_bytes, 0);

        debug!("allocated {} array of {len} zero words", T::NAME);
        Ok(Self {
            storage,
            len,
            format: PhantomData,
        })
    }

    /// Encodes every value of `values` in order.
    pub fn from_f64_slice(values: &[f64]) -> Self {
        Self::from_values(values.iter().copied())
    }

    /// Encodes every item of `values` in order, after widening it to `f64`.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<f64>,
    {
        let values = values.into_iter();
        let mut storage = Vec::with_capacity(values.size_hint().0 * T::BYTES);

        for value in values {
            let start = storage.len();
            storage.resize(start + T::BYTES, 0);
            T::from_f64(value.into()).write_ne(&mut storage[start..]);
        }

        let len = storage.len() / T::BYTES;
        debug!("encoded {len} values into {} array", T::NAME);
        Self {
            storage,
            len,
            format: PhantomData,
        }
    }
}

impl<T: NarrowFloat, S: AsRef<[u8]>> NarrowArray<T, S> {
    /// Uses `storage` as the word buffer without copying or converting it.
    ///
    /// Fails when the byte length is not a whole number of words.
    pub fn from_buffer(storage: S) -> ArrayResult<Self> {
        let n_bytes = storage.as_ref().len();
        if n_bytes % T::BYTES != 0 {
            warn!(
                "rejecting {n_bytes}-byte buffer for {} array of {}-byte words",
                T::NAME,
                T::BYTES
            );
            return Err(ArrayError::MisalignedBuffer {
                len: n_bytes,
                word_bytes: T::BYTES,
            });
        }

        let len = n_bytes / T::BYTES;
        debug!("aliasing {n_bytes}-byte buffer as {} array of {len} words", T::NAME);
        Ok(Self {
            storage,
            len,
            format: PhantomData,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The encoded words, in host byte order.
    pub fn buffer(&self) -> &[u8] {
        self.storage.as_ref()
    }

    fn word_range(&self, index: usize) -> Option<Range<usize>> {
        (index < self.len).then(|| index * T::BYTES..(index + 1) * T::BYTES)
    }

    /// Returns the word at `index` without decoding it.
    pub fn get_word(&self, index: usize) -> Option<T> {
        let range = self.word_range(index)?;
        Some(T::read_ne(&self.storage.as_ref()[range]))
    }

    /// Decodes the word at `index`, or `None` if `index` is out of bounds.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.get_word(index).map(T::to_f64)
    }

    /// Decoded values, front to back.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.buffer()
            .chunks_exact(T::BYTES)
            .map(|word| T::read_ne(word).to_f64())
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Gives the storage back, e.g. to recover a borrowed buffer early.
    pub fn into_inner(self) -> S {
        self.storage
    }
}

impl<T: NarrowFloat, S: AsRef<[u8]> + AsMut<[u8]>> NarrowArray<T, S> {
    /// Stores `word` at `index` as is.
    pub fn set_word(&mut self, index: usize, word: T) -> ArrayResult<()> {
        let range = self.word_range(index).ok_or(ArrayError::IndexOutOfBounds {
            index,
            len: self.len,
        })?;
        word.write_ne(&mut self.storage.as_mut()[range]);
        Ok(())
    }

    /// Encodes `value` into the word at `index`.
    ///
    /// Out of range values saturate to a signed infinity; an out of bounds
    /// `index` leaves the buffer untouched.
    pub fn set(&mut self, index: usize, value: f64) -> ArrayResult<()> {
        self.set_word(index, T::from_f64(value))
    }
}

impl<T: NarrowFloat> FromIterator<f64> for NarrowArray<T, Vec<u8>> {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<T: NarrowFloat, S: AsRef<[u8]>> fmt::Debug for NarrowArray<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrowArray")
            .field("format", &T::NAME)
            .field("values", &self.to_f64_vec())
            .finish()
    }
}
