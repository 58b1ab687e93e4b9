//! Comparisons between narrow scalars follow the decoded values: NaN is
//! unordered and unequal to itself, and both zeros compare equal.

use std::cmp::Ordering;

use crate::float::{BFloat16, Fp8E4M3};

macro_rules! impl_cmp {
    ($t:ty) => {
        impl PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                self.to_f64() == other.to_f64()
            }
        }

        impl PartialOrd for $t {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                self.to_f64().partial_cmp(&other.to_f64())
            }
        }

        impl PartialEq<f64> for $t {
            fn eq(&self, other: &f64) -> bool {
                self.to_f64() == *other
            }
        }

        impl PartialOrd<f64> for $t {
            fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
                self.to_f64().partial_cmp(other)
            }
        }
    };
}

impl_cmp!(Fp8E4M3);
impl_cmp!(BFloat16);
