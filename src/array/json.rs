//! Building arrays from dynamically typed JSON input.
//!
//! The shape of the value picks the construction mode: a non-negative
//! whole number (`4` or `4.0`) is an element count and an array of numbers
//! is a sequence of values. Counts too large to allocate fail with
//! [`ArrayError::TooLarge`]. Every other shape is rejected with
//! [`ArrayError::UnsupportedInput`].
//!
//! ```rust
//! use narrowfloat::prelude::*;
//! use serde_json::json;
//!
//! let array = Fp8E4M3Array::from_json(&json!([1.0, 240.0])).unwrap();
//! assert_eq!(array.to_f64_vec(), vec![1.0, 240.0]);
//!
//! assert!(BFloat16Array::from_json(&json!("3.5")).is_err());
//! ```

use log::warn;
use serde_json::Value;

use crate::array::{ArrayError, ArrayResult, NarrowArray};
use crate::float::NarrowFloat;

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn unsupported(reason: String) -> ArrayError {
    warn!("rejecting json input: {reason}");
    ArrayError::UnsupportedInput(reason)
}

impl<T: NarrowFloat> NarrowArray<T, Vec<u8>> {
    pub fn from_json(value: &Value) -> ArrayResult<Self> {
        match value {
            Value::Number(number) => {
                let len = number
                    .as_u64()
                    .or_else(|| {
                        number
                            .as_f64()
                            .filter(|len| *len >= 0.0 && len.fract() == 0.0)
                            .filter(|len| *len < u64::MAX as f64)
                            .map(|len| len as u64)
                    })
                    .and_then(|len| usize::try_from(len).ok())
                    .ok_or_else(|| {
                        unsupported(format!("the number {number}, not a valid length"))
                    })?;
                Self::try_zeroed(len)
            }
            Value::Array(items) => {
                let values = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        item.as_f64().ok_or_else(|| {
                            unsupported(format!("an array holding {} at index {i}", kind(item)))
                        })
                    })
                    .collect::<ArrayResult<Vec<f64>>>()?;
                Ok(Self::from_f64_slice(&values))
            }
            other => Err(unsupported(kind(other).to_string())),
        }
    }
}

impl<T: NarrowFloat> TryFrom<&Value> for NarrowArray<T, Vec<u8>> {
    type Error = ArrayError;

    fn try_from(value: &Value) -> ArrayResult<Self> {
        Self::from_json(value)
    }
}
