//! Box space: the Cartesian product of closed intervals, possibly unbounded per element.

use ndarray::{ArrayD, IxDyn, Zip};
use rand::Rng;
use rand_distr::StandardNormal;

use super::{Array, DType, Space};
use crate::core::{GymError, Result};

/// A bound as supplied by the caller: one number for every element, or one per element.
#[derive(Clone, Debug, PartialEq)]
pub enum Bound {
    Scalar(f64),
    Array(ArrayD<f64>),
}

impl From<f64> for Bound { fn from(v: f64) -> Self { Bound::Scalar(v) } }
impl From<ArrayD<f64>> for Bound { fn from(v: ArrayD<f64>) -> Self { Bound::Array(v) } }

/// Validated bounds of a `BoxSpace`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bounds {
    /// One interval broadcast to every element.
    Scalar { low: f64, high: f64 },
    /// Per-element intervals, both arrays shaped like the space.
    Array { low: ArrayD<f64>, high: ArrayD<f64> },
}

/// Which side(s) of an element's interval are finite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Boundedness {
    Unbounded,
    Bounded,
    BelowOnly,
    AboveOnly,
}

impl Boundedness {
    fn classify(low: f64, high: f64) -> Self {
        match (low.is_finite(), high.is_finite()) {
            (false, false) => Boundedness::Unbounded,
            (true, true) => Boundedness::Bounded,
            (true, false) => Boundedness::BelowOnly,
            (false, true) => Boundedness::AboveOnly,
        }
    }
}

/// Which side `BoxSpace::is_bounded` asks about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Manner {
    Both,
    Below,
    Above,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxSpace {
    shape: Vec<usize>,
    dtype: DType,
    bounds: Bounds,
}

impl BoxSpace {
    /// Build a Box from scalar or per-element bounds.
    ///
    /// With array bounds, `shape` may be omitted and is taken from `low`; with scalar
    /// bounds it defaults to the empty (scalar) shape.
    pub fn new(low: impl Into<Bound>, high: impl Into<Bound>, shape: Option<&[usize]>, dtype: DType) -> Result<Self> {
        let bounds = match (low.into(), high.into()) {
            (Bound::Scalar(low), Bound::Scalar(high)) => {
                let (low, high) = normalize_interval(dtype, low, high)
                    .map_err(|reason| GymError::InvalidSpace(format!("Box bounds [{low}, {high}]: {reason}")))?;
                Bounds::Scalar { low, high }
            }
            (Bound::Array(mut low), Bound::Array(mut high)) => {
                let expected = shape.unwrap_or(low.shape());
                if low.shape() != expected || high.shape() != expected {
                    return Err(GymError::InvalidSpace(format!(
                        "Box low shape {:?} and high shape {:?} must equal shape {:?}",
                        low.shape(),
                        high.shape(),
                        expected
                    )));
                }
                for (i, (l, h)) in low.iter_mut().zip(high.iter_mut()).enumerate() {
                    let (nl, nh) = normalize_interval(dtype, *l, *h).map_err(|reason| {
                        GymError::InvalidSpace(format!("Box bounds [{l}, {h}] at flat index {i}: {reason}"))
                    })?;
                    *l = nl;
                    *h = nh;
                }
                Bounds::Array { low, high }
            }
            _ => {
                return Err(GymError::InvalidSpace(
                    "Box low and high must both be scalars or both be arrays".into(),
                ));
            }
        };
        let shape = match &bounds {
            Bounds::Array { low, .. } => low.shape().to_vec(),
            Bounds::Scalar { .. } => shape.map(<[usize]>::to_vec).unwrap_or_default(),
        };
        Ok(Self { shape, dtype, bounds })
    }

    /// A Box with the same interval on every element of `shape`.
    pub fn uniform(shape: &[usize], low: f64, high: f64, dtype: DType) -> Result<Self> {
        Self::new(low, high, Some(shape), dtype)
    }

    /// A Box with per-element bounds; the shape is that of `low`.
    pub fn from_arrays(low: ArrayD<f64>, high: ArrayD<f64>, dtype: DType) -> Result<Self> {
        Self::new(low, high, None, dtype)
    }

    pub fn bounds(&self) -> &Bounds { &self.bounds }

    /// Lower bounds broadcast to the full shape.
    pub fn low(&self) -> ArrayD<f64> {
        match &self.bounds {
            Bounds::Scalar { low, .. } => ArrayD::from_elem(IxDyn(&self.shape), *low),
            Bounds::Array { low, .. } => low.clone(),
        }
    }

    /// Upper bounds broadcast to the full shape.
    pub fn high(&self) -> ArrayD<f64> {
        match &self.bounds {
            Bounds::Scalar { high, .. } => ArrayD::from_elem(IxDyn(&self.shape), *high),
            Bounds::Array { high, .. } => high.clone(),
        }
    }

    pub fn bounded_below(&self) -> ArrayD<bool> { self.low().mapv(f64::is_finite) }

    pub fn bounded_above(&self) -> ArrayD<bool> { self.high().mapv(f64::is_finite) }

    /// Whether every element is finite on the requested side(s).
    pub fn is_bounded(&self, manner: Manner) -> bool {
        let below = self.bounded_below().iter().all(|&b| b);
        let above = self.bounded_above().iter().all(|&b| b);
        match manner {
            Manner::Both => below && above,
            Manner::Below => below,
            Manner::Above => above,
        }
    }

    pub fn num_elements(&self) -> usize { self.shape.iter().product() }

    /// Clamp each element of `x` into the box, returning an array of the box's dtype.
    pub fn clip(&self, x: &ArrayD<f64>) -> Array {
        let mut out = x.clone();
        match &self.bounds {
            Bounds::Scalar { low, high } => out.mapv_inplace(|v| v.max(*low).min(*high)),
            Bounds::Array { low, high } => {
                Zip::from(&mut out).and(low).and(high).for_each(|v, &l, &h| *v = v.max(l).min(h));
            }
        }
        Array::from_f64(self.dtype, &out)
    }

    /// Per-element sampler for array bounds with any mix of finite and infinite sides.
    fn sample_elementwise<R: Rng + ?Sized>(&self, low: &ArrayD<f64>, high: &ArrayD<f64>, rng: &mut R) -> ArrayD<f64> {
        let shape = IxDyn(&self.shape);
        let declared_high = high;
        // Integer domains sample the half-open [low, high + 1) and floor afterwards.
        let high = if self.dtype.is_integer() {
            high.mapv(|h| if h.is_finite() { h + 1.0 } else { h })
        } else {
            high.clone()
        };

        let normal = ArrayD::from_shape_simple_fn(shape.clone(), || rng.sample::<f64, _>(StandardNormal));
        let uniform = ArrayD::from_shape_simple_fn(shape.clone(), || rng.r#gen::<f64>());
        let exponential = ArrayD::from_shape_simple_fn(shape.clone(), || exp1(&mut *rng));

        let mut out = ArrayD::<f64>::zeros(shape);
        Zip::from(&mut out)
            .and(low)
            .and(&high)
            .and(&normal)
            .and(&uniform)
            .and(&exponential)
            .for_each(|o, &l, &h, &n, &u, &e| {
                *o = match Boundedness::classify(l, h) {
                    Boundedness::Unbounded => n,
                    Boundedness::Bounded => lerp(l, h, u),
                    Boundedness::BelowOnly => l + e,
                    Boundedness::AboveOnly => h - e,
                };
            });

        if self.dtype.is_integer() {
            // A zero exponential draw lands exactly on high + 1.
            Zip::from(&mut out).and(declared_high).for_each(|o, &h| *o = o.floor().min(h));
        }
        out
    }
}

/// `Exp(1)` drawn by inversion; `1 - U` keeps the argument of `ln` in `(0, 1]`.
fn exp1<R: Rng + ?Sized>(rng: &mut R) -> f64 { -(1.0 - rng.r#gen::<f64>()).ln() }

/// Validate one interval and bring it to what `dtype` can represent.
///
/// Float32 bounds are rounded to f32 precision. Integer bounds shrink inward to whole
/// numbers and must lie within the dtype's range. Infinite sides only extend outward.
fn normalize_interval(dtype: DType, low: f64, high: f64) -> std::result::Result<(f64, f64), &'static str> {
    if low.is_nan() || high.is_nan() {
        return Err("bounds must not be NaN");
    }
    if low == f64::INFINITY || high == f64::NEG_INFINITY {
        return Err("low cannot be +inf and high cannot be -inf");
    }
    let (mut low, mut high) = (dtype.round_bound(low), dtype.round_bound(high));
    if let Some((min, max)) = dtype.integer_range() {
        low = low.ceil();
        high = high.floor();
        if (low.is_finite() && !(min..=max).contains(&low)) || (high.is_finite() && !(min..=max).contains(&high)) {
            return Err("finite bounds must be representable in the dtype");
        }
    }
    if high < low {
        return Err("high < low");
    }
    Ok((low, high))
}

/// `l + u * (h - l)` without overflowing when the span exceeds `f64::MAX`.
fn lerp(l: f64, h: f64, u: f64) -> f64 {
    let span = h - l;
    let x = if span.is_finite() { l + u * span } else { l * (1.0 - u) + h * u };
    x.clamp(l, h)
}

impl Space for BoxSpace {
    type Element = Array;

    fn shape(&self) -> Option<&[usize]> { Some(&self.shape) }

    fn dtype(&self) -> Option<DType> { Some(self.dtype) }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element {
        let data = match &self.bounds {
            Bounds::Scalar { low, high } if low.is_finite() && high.is_finite() => {
                let (low, high) = (*low, *high);
                if self.dtype.is_integer() {
                    // [low, high + 1) floored, capped at high for a draw landing on high + 1.
                    ArrayD::from_shape_simple_fn(IxDyn(&self.shape), || {
                        lerp(low, high + 1.0, rng.r#gen::<f64>()).floor().min(high)
                    })
                } else {
                    ArrayD::from_shape_simple_fn(IxDyn(&self.shape), || lerp(low, high, rng.r#gen::<f64>()))
                }
            }
            Bounds::Scalar { .. } => self.sample_elementwise(&self.low(), &self.high(), rng),
            Bounds::Array { low, high } => self.sample_elementwise(low, high, rng),
        };
        Array::from_f64(self.dtype, &data)
    }

    fn contains(&self, elem: &Self::Element) -> bool {
        if elem.dtype() != self.dtype || elem.shape() != self.shape.as_slice() {
            return false;
        }
        let x = elem.to_f64();
        match &self.bounds {
            Bounds::Scalar { low, high } => x.iter().all(|v| *low <= *v && *v <= *high),
            Bounds::Array { low, high } => {
                x.iter().zip(low.iter()).zip(high.iter()).all(|((v, l), h)| l <= v && v <= h)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn v(xs: &[f64]) -> ArrayD<f64> { arr1(xs).into_dyn() }

    #[test]
    fn mixed_boundedness_samples_are_contained() {
        let inf = f64::INFINITY;
        let b = BoxSpace::from_arrays(v(&[-inf, 0.0, 0.0, -inf]), v(&[inf, 1.0, inf, 0.0]), DType::Float64).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let s = b.sample(&mut rng);
            assert!(b.contains(&s));
        }
    }

    #[test]
    fn bounded_above_only_uses_exponential_tail() {
        let b = BoxSpace::from_arrays(v(&[f64::NEG_INFINITY]), v(&[0.0]), DType::Float64).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut below_minus_one = 0;
        for _ in 0..10_000 {
            let s = b.sample(&mut rng).to_f64().sum();
            assert!(s <= 0.0);
            if s < -1.0 {
                below_minus_one += 1;
            }
        }
        // P(Exp(1) > 1) = e^-1 ~ 0.37
        assert!((3000..4400).contains(&below_minus_one), "{below_minus_one}");
    }

    #[test]
    fn integer_box_reaches_upper_bound() {
        let b = BoxSpace::uniform(&[64], 0.0, 2.0, DType::Int32).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let s = b.sample(&mut rng);
        let ints = s.to_i64().unwrap();
        assert!(ints.iter().all(|&x| (0..=2).contains(&x)));
        assert!(ints.iter().any(|&x| x == 2));
    }

    #[test]
    fn scalar_bounds_with_infinite_side_fall_back_to_elementwise() {
        let b = BoxSpace::uniform(&[3], 1.0, f64::INFINITY, DType::Float32).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            assert!(b.contains(&b.sample(&mut rng)));
        }
        assert!(b.is_bounded(Manner::Below));
        assert!(!b.is_bounded(Manner::Both));
    }

    #[test]
    fn construction_validates_shapes_and_order() {
        assert!(BoxSpace::new(v(&[0.0, 0.0]), v(&[1.0, 1.0]), Some(&[3]), DType::Float32).is_err());
        assert!(BoxSpace::from_arrays(v(&[0.0, 0.0]), v(&[1.0]), DType::Float32).is_err());
        assert!(BoxSpace::from_arrays(v(&[0.0, 2.0]), v(&[1.0, 1.0]), DType::Float32).is_err());
        assert!(BoxSpace::uniform(&[2], 1.0, 0.0, DType::Float32).is_err());
        assert!(BoxSpace::new(0.0, v(&[1.0]), None, DType::Float32).is_err());
        assert!(BoxSpace::uniform(&[2], f64::NAN, 0.0, DType::Float32).is_err());
        assert!(BoxSpace::uniform(&[2], f64::INFINITY, f64::INFINITY, DType::Float64).is_err());
        assert!(BoxSpace::uniform(&[2], f64::NEG_INFINITY, f64::NEG_INFINITY, DType::Float64).is_err());
        assert!(BoxSpace::from_arrays(v(&[0.0, f64::INFINITY]), v(&[1.0, f64::INFINITY]), DType::Float64).is_err());
    }

    #[test]
    fn fractional_integer_bounds_shrink_to_whole_numbers() {
        let b = BoxSpace::uniform(&[4], 0.5, 2.5, DType::Int32).unwrap();
        assert_eq!(b.bounds(), &Bounds::Scalar { low: 1.0, high: 2.0 });
        let mixed = BoxSpace::from_arrays(v(&[0.5, 0.5]), v(&[2.5, f64::INFINITY]), DType::Int64).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..1000 {
            assert!(b.contains(&b.sample(&mut rng)));
            assert!(mixed.contains(&mixed.sample(&mut rng)));
        }
        // no whole number in [0.2, 0.8]
        assert!(BoxSpace::uniform(&[1], 0.2, 0.8, DType::Int8).is_err());
    }

    #[test]
    fn integer_bounds_must_fit_the_dtype() {
        assert!(BoxSpace::uniform(&[4], 200.0, 300.0, DType::Int8).is_err());
        assert!(BoxSpace::uniform(&[4], -1.0, 3.0, DType::UInt8).is_err());
        assert!(BoxSpace::from_arrays(v(&[0.0]), v(&[1e10]), DType::Int32).is_err());
        let b = BoxSpace::uniform(&[8], 0.0, f64::INFINITY, DType::UInt8).unwrap();
        let edge = BoxSpace::uniform(&[8], -128.0, 127.0, DType::Int8).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            assert!(b.contains(&b.sample(&mut rng)));
            assert!(edge.contains(&edge.sample(&mut rng)));
        }
    }

    #[test]
    fn extreme_finite_span_samples_stay_finite() {
        let b = BoxSpace::uniform(&[16], -f64::MAX, f64::MAX, DType::Float64).unwrap();
        let arrays = BoxSpace::from_arrays(v(&[-f64::MAX, 0.0]), v(&[f64::MAX, f64::INFINITY]), DType::Float64).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            let s = b.sample(&mut rng);
            assert!(s.to_f64().iter().all(|x| x.is_finite()));
            assert!(b.contains(&s));
            assert!(arrays.contains(&arrays.sample(&mut rng)));
        }
    }

    #[test]
    fn contains_fails_closed() {
        let b = BoxSpace::uniform(&[3], 0.0, 1.0, DType::Float64).unwrap();
        assert!(b.contains(&Array::F64(v(&[0.0, 0.5, 1.0]))));
        assert!(!b.contains(&Array::F64(v(&[0.0, 1.5, 1.0]))));
        assert!(!b.contains(&Array::F32(arr1(&[0.0f32, 0.5, 1.0]).into_dyn())));
        assert!(!b.contains(&Array::F64(v(&[0.5, 0.5]))));
    }

    #[test]
    fn clip_clamps_into_bounds() {
        let b = BoxSpace::from_arrays(v(&[-1.0, 0.0]), v(&[1.0, 2.0]), DType::Float64).unwrap();
        assert_eq!(b.clip(&v(&[-5.0, 3.0])), Array::F64(v(&[-1.0, 2.0])));
    }
}
