//! Discrete space of integers in `[start, start + n)`.

use rand::Rng;

use super::{DType, Space};
use crate::core::{GymError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Discrete {
    n: i64,
    start: i64,
}

impl Discrete {
    /// A space over `{0, 1, ..., n - 1}`.
    pub fn new(n: i64) -> Result<Self> { Self::with_start(n, 0) }

    /// A space over `{start, ..., start + n - 1}`.
    pub fn with_start(n: i64, start: i64) -> Result<Self> {
        if n <= 0 {
            return Err(GymError::InvalidSpace(format!("Discrete requires n > 0, got {n}")));
        }
        if start.checked_add(n).is_none() {
            return Err(GymError::InvalidSpace(format!("Discrete range start={start}, n={n} overflows i64")));
        }
        Ok(Self { n, start })
    }

    pub fn n(&self) -> i64 { self.n }
    pub fn start(&self) -> i64 { self.start }
}

impl Space for Discrete {
    type Element = i64;

    fn shape(&self) -> Option<&[usize]> { Some(&[]) }

    fn dtype(&self) -> Option<DType> { Some(DType::Int64) }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element {
        self.start + rng.gen_range(0..self.n)
    }

    fn contains(&self, elem: &Self::Element) -> bool {
        self.start <= *elem && *elem < self.start + self.n
    }
}
