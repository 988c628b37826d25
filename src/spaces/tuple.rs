//! Tuple space: an ordered product of component spaces.

use rand::Rng;

use super::{DType, DynSpace, Space, Value};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TupleSpace {
    spaces: Vec<DynSpace>,
}

impl TupleSpace {
    pub fn new(spaces: Vec<DynSpace>) -> Self { Self { spaces } }

    pub fn spaces(&self) -> &[DynSpace] { &self.spaces }
    pub fn get(&self, index: usize) -> Option<&DynSpace> { self.spaces.get(index) }
    pub fn len(&self) -> usize { self.spaces.len() }
    pub fn is_empty(&self) -> bool { self.spaces.is_empty() }
}

impl Space for TupleSpace {
    type Element = Vec<Value>;

    fn shape(&self) -> Option<&[usize]> { None }

    fn dtype(&self) -> Option<DType> { None }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element {
        self.spaces.iter().map(|s| s.sample(rng)).collect()
    }

    fn contains(&self, elem: &Self::Element) -> bool {
        elem.len() == self.spaces.len() && self.spaces.iter().zip(elem).all(|(s, v)| s.contains(v))
    }
}
