//! Binary arrays: every element is 0 or 1.

use ndarray::{ArrayD, IxDyn};
use rand::Rng;

use super::{DType, Space};
use crate::core::{GymError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiBinary {
    shape: Vec<usize>,
}

impl MultiBinary {
    /// `n` gives the count along each dimension; a single count makes a flat vector.
    pub fn new(n: impl Into<Vec<usize>>) -> Result<Self> {
        let shape = n.into();
        if shape.is_empty() {
            return Err(GymError::InvalidSpace("MultiBinary requires at least one dimension".into()));
        }
        if let Some(i) = shape.iter().position(|&d| d == 0) {
            return Err(GymError::InvalidSpace(format!("MultiBinary n[{i}] must be > 0")));
        }
        Ok(Self { shape })
    }

    pub fn n(&self) -> &[usize] { &self.shape }
}

impl Space for MultiBinary {
    type Element = ArrayD<i8>;

    fn shape(&self) -> Option<&[usize]> { Some(&self.shape) }

    fn dtype(&self) -> Option<DType> { Some(DType::Int8) }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element {
        ArrayD::from_shape_simple_fn(IxDyn(&self.shape), || rng.gen_range(0..=1))
    }

    fn contains(&self, elem: &Self::Element) -> bool {
        elem.shape() == self.shape.as_slice() && elem.iter().all(|&v| v == 0 || v == 1)
    }
}
