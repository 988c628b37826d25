//! Runtime element representation shared by all spaces.
//!
//! A `Value` is what `DynSpace::sample` produces and what `DynSpace::contains`
//! inspects: an integer scalar, a dtype-tagged n-d array, or a tuple of values.

use ndarray::{ArrayD, IxDyn};

/// Numeric element kinds a space may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DType {
    Float32,
    Float64,
    Int8,
    Int32,
    Int64,
    UInt8,
}

impl DType {
    pub fn is_integer(self) -> bool { !self.is_float() }

    pub fn is_float(self) -> bool { matches!(self, DType::Float32 | DType::Float64) }

    pub fn name(self) -> &'static str {
        match self {
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Int8 => "int8",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::UInt8 => "uint8",
        }
    }

    /// Smallest and largest value of an integer dtype, as f64.
    pub(crate) fn integer_range(self) -> Option<(f64, f64)> {
        match self {
            DType::Float32 | DType::Float64 => None,
            DType::Int8 => Some((f64::from(i8::MIN), f64::from(i8::MAX))),
            DType::Int32 => Some((f64::from(i32::MIN), f64::from(i32::MAX))),
            // i64::MAX rounds up to 2^63 in f64; `as i64` saturates it back to i64::MAX.
            DType::Int64 => Some((i64::MIN as f64, i64::MAX as f64)),
            DType::UInt8 => Some((f64::from(u8::MIN), f64::from(u8::MAX))),
        }
    }

    /// Round a bound to the precision this dtype can hold.
    pub(crate) fn round_bound(self, v: f64) -> f64 {
        match self {
            DType::Float32 => v as f32 as f64,
            _ => v,
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

/// An n-d array tagged with its element dtype.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Array {
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
    I8(ArrayD<i8>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    U8(ArrayD<u8>),
}

macro_rules! with_array {
    ($arr:expr, $a:ident => $body:expr) => {
        match $arr {
            Array::F32($a) => $body,
            Array::F64($a) => $body,
            Array::I8($a) => $body,
            Array::I32($a) => $body,
            Array::I64($a) => $body,
            Array::U8($a) => $body,
        }
    };
}

impl Array {
    pub fn dtype(&self) -> DType {
        match self {
            Array::F32(_) => DType::Float32,
            Array::F64(_) => DType::Float64,
            Array::I8(_) => DType::Int8,
            Array::I32(_) => DType::Int32,
            Array::I64(_) => DType::Int64,
            Array::U8(_) => DType::UInt8,
        }
    }

    pub fn shape(&self) -> &[usize] { with_array!(self, a => a.shape()) }

    pub fn len(&self) -> usize { with_array!(self, a => a.len()) }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Widen every element to f64.
    pub fn to_f64(&self) -> ArrayD<f64> { with_array!(self, a => a.mapv(|v| v as f64)) }

    /// Narrow an f64 array to `dtype`. Integer kinds truncate toward zero and saturate.
    pub fn from_f64(dtype: DType, data: &ArrayD<f64>) -> Self {
        match dtype {
            DType::Float32 => Array::F32(data.mapv(|v| v as f32)),
            DType::Float64 => Array::F64(data.clone()),
            DType::Int8 => Array::I8(data.mapv(|v| v as i8)),
            DType::Int32 => Array::I32(data.mapv(|v| v as i32)),
            DType::Int64 => Array::I64(data.mapv(|v| v as i64)),
            DType::UInt8 => Array::U8(data.mapv(|v| v as u8)),
        }
    }

    /// Convert to an `i64` array if the dtype is an integer kind.
    pub fn to_i64(&self) -> Option<ArrayD<i64>> {
        match self {
            Array::F32(_) | Array::F64(_) => None,
            Array::I8(a) => Some(a.mapv(i64::from)),
            Array::I32(a) => Some(a.mapv(i64::from)),
            Array::I64(a) => Some(a.clone()),
            Array::U8(a) => Some(a.mapv(i64::from)),
        }
    }

    /// A zero-filled array of the given dtype and shape.
    pub fn zeros(dtype: DType, shape: &[usize]) -> Self {
        Self::from_f64(dtype, &ArrayD::zeros(IxDyn(shape)))
    }
}

macro_rules! array_from {
    ($($t:ty => $variant:ident),*) => {
        $(
            impl From<ArrayD<$t>> for Array {
                fn from(a: ArrayD<$t>) -> Self { Array::$variant(a) }
            }
        )*
    };
}

array_from!(f32 => F32, f64 => F64, i8 => I8, i32 => I32, i64 => I64, u8 => U8);

/// A runtime element of some space.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Integer scalar, the element type of `Discrete`.
    Int(i64),
    Array(Array),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<Array> for Value { fn from(v: Array) -> Self { Value::Array(v) } }
impl From<Vec<Value>> for Value { fn from(v: Vec<Value>) -> Self { Value::Tuple(v) } }

impl<T> From<ArrayD<T>> for Value
where
    Array: From<ArrayD<T>>,
{
    fn from(v: ArrayD<T>) -> Self { Value::Array(Array::from(v)) }
}
