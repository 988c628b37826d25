//! Space implementations.
//!
//! Each variant implements [`Space`] over its own element type. [`DynSpace`] is the
//! closed sum over the variants that environments expose; it samples and checks
//! runtime [`Value`]s, so membership tests on arbitrary values never fail, they
//! only return `false`.

pub mod box_space;
pub mod discrete;
pub mod multi_binary;
pub mod multi_discrete;
pub mod space;
pub mod tuple;
pub mod value;

use rand::Rng;

pub use box_space::{Bound, Bounds, BoxSpace, Manner};
pub use discrete::Discrete;
pub use multi_binary::MultiBinary;
pub use multi_discrete::MultiDiscrete;
pub use space::Space;
pub use tuple::TupleSpace;
pub use value::{Array, DType, Value};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DynSpace {
    Discrete(Discrete),
    Box(BoxSpace),
    MultiDiscrete(MultiDiscrete),
    MultiBinary(MultiBinary),
    Tuple(TupleSpace),
}

impl DynSpace {
    /// The Box variant, for transforms that need per-element bounds.
    pub fn as_box(&self) -> Option<&BoxSpace> {
        match self {
            DynSpace::Box(b) => Some(b),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DynSpace::Discrete(_) => "Discrete",
            DynSpace::Box(_) => "Box",
            DynSpace::MultiDiscrete(_) => "MultiDiscrete",
            DynSpace::MultiBinary(_) => "MultiBinary",
            DynSpace::Tuple(_) => "Tuple",
        }
    }

    /// Length of the flat vector an element of this space encodes to.
    pub fn flatdim(&self) -> usize {
        match self {
            DynSpace::Discrete(d) => d.n() as usize,
            DynSpace::Box(b) => b.num_elements(),
            DynSpace::MultiDiscrete(md) => md.nvec().iter().map(|&n| n as usize).sum(),
            DynSpace::MultiBinary(mb) => mb.n().iter().product(),
            DynSpace::Tuple(t) => t.spaces().iter().map(DynSpace::flatdim).sum(),
        }
    }
}

impl Space for DynSpace {
    type Element = Value;

    fn shape(&self) -> Option<&[usize]> {
        match self {
            DynSpace::Discrete(s) => s.shape(),
            DynSpace::Box(s) => s.shape(),
            DynSpace::MultiDiscrete(s) => s.shape(),
            DynSpace::MultiBinary(s) => s.shape(),
            DynSpace::Tuple(s) => s.shape(),
        }
    }

    fn dtype(&self) -> Option<DType> {
        match self {
            DynSpace::Discrete(s) => s.dtype(),
            DynSpace::Box(s) => s.dtype(),
            DynSpace::MultiDiscrete(s) => s.dtype(),
            DynSpace::MultiBinary(s) => s.dtype(),
            DynSpace::Tuple(s) => s.dtype(),
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        match self {
            DynSpace::Discrete(s) => Value::Int(s.sample(rng)),
            DynSpace::Box(s) => Value::Array(s.sample(rng)),
            DynSpace::MultiDiscrete(s) => Value::Array(Array::I64(s.sample(rng))),
            DynSpace::MultiBinary(s) => Value::Array(Array::I8(s.sample(rng))),
            DynSpace::Tuple(s) => Value::Tuple(s.sample(rng)),
        }
    }

    fn contains(&self, elem: &Value) -> bool {
        match (self, elem) {
            (DynSpace::Discrete(s), Value::Int(x)) => s.contains(x),
            (DynSpace::Box(s), Value::Array(a)) => s.contains(a),
            (DynSpace::MultiDiscrete(s), Value::Array(Array::I64(a))) => s.contains(a),
            (DynSpace::MultiBinary(s), Value::Array(Array::I8(a))) => s.contains(a),
            (DynSpace::Tuple(s), Value::Tuple(v)) => s.contains(v),
            _ => false,
        }
    }
}

impl From<Discrete> for DynSpace { fn from(s: Discrete) -> Self { DynSpace::Discrete(s) } }
impl From<BoxSpace> for DynSpace { fn from(s: BoxSpace) -> Self { DynSpace::Box(s) } }
impl From<MultiDiscrete> for DynSpace { fn from(s: MultiDiscrete) -> Self { DynSpace::MultiDiscrete(s) } }
impl From<MultiBinary> for DynSpace { fn from(s: MultiBinary) -> Self { DynSpace::MultiBinary(s) } }
impl From<TupleSpace> for DynSpace { fn from(s: TupleSpace) -> Self { DynSpace::Tuple(s) } }
