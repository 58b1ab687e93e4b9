use thiserror::Error;

/// Errors reported by [`NarrowArray`](crate::array::NarrowArray) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("buffer of {len} bytes is not a whole number of {word_bytes}-byte words")]
    MisalignedBuffer { len: usize, word_bytes: usize },

    #[error("cannot allocate {len} words of {word_bytes} bytes")]
    TooLarge { len: usize, word_bytes: usize },

    #[error("cannot build a narrow float array from {0}")]
    UnsupportedInput(String),
}

pub type ArrayResult<T> = Result<T, ArrayError>;
