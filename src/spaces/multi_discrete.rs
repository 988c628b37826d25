//! A multi-dimensional discrete space with per-element ranges `[start[i], start[i] + nvec[i])`.

use ndarray::{Array1, ArrayD, Zip};
use rand::Rng;

use super::{Array, DType, Space};
use crate::core::{GymError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiDiscrete {
    nvec: ArrayD<i64>,
    start: ArrayD<i64>,
}

impl MultiDiscrete {
    /// `nvec` must be integer-typed with positive entries; `start` defaults to zeros.
    pub fn new(nvec: impl Into<Array>, start: Option<Array>) -> Result<Self> {
        let nvec = nvec.into();
        let nvec = nvec.to_i64().ok_or_else(|| {
            GymError::InvalidSpace(format!("MultiDiscrete nvec must have an integer dtype, got {}", nvec.dtype()))
        })?;
        if let Some((i, n)) = nvec.iter().enumerate().find(|(_, n)| **n <= 0) {
            return Err(GymError::InvalidSpace(format!("MultiDiscrete nvec[{i}] must be > 0, got {n}")));
        }
        let start = match start {
            None => ArrayD::zeros(nvec.raw_dim()),
            Some(s) => s.to_i64().ok_or_else(|| {
                GymError::InvalidSpace(format!("MultiDiscrete start must have an integer dtype, got {}", s.dtype()))
            })?,
        };
        if start.shape() != nvec.shape() {
            return Err(GymError::InvalidSpace(format!(
                "MultiDiscrete start shape {:?} does not match nvec shape {:?}",
                start.shape(),
                nvec.shape()
            )));
        }
        let overflow = start.iter().zip(nvec.iter()).enumerate().find(|(_, (s, n))| s.checked_add(**n).is_none());
        if let Some((i, (s, n))) = overflow {
            return Err(GymError::InvalidSpace(format!("MultiDiscrete range {i}: start={s}, n={n} overflows i64")));
        }
        Ok(Self { nvec, start })
    }

    /// A one-dimensional space from a list of counts.
    pub fn from_counts(counts: &[i64]) -> Result<Self> {
        Self::new(Array1::from(counts.to_vec()).into_dyn(), None)
    }

    pub fn nvec(&self) -> &ArrayD<i64> { &self.nvec }
    pub fn start(&self) -> &ArrayD<i64> { &self.start }
}

impl Space for MultiDiscrete {
    type Element = ArrayD<i64>;

    fn shape(&self) -> Option<&[usize]> { Some(self.nvec.shape()) }

    fn dtype(&self) -> Option<DType> { Some(DType::Int64) }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element {
        let mut out = ArrayD::zeros(self.nvec.raw_dim());
        Zip::from(&mut out).and(&self.nvec).and(&self.start).for_each(|o, &n, &s| {
            let k = (rng.r#gen::<f64>() * n as f64).floor() as i64;
            *o = s + k.min(n - 1);
        });
        out
    }

    fn contains(&self, elem: &Self::Element) -> bool {
        elem.shape() == self.nvec.shape()
            && elem
                .iter()
                .zip(self.nvec.iter())
                .zip(self.start.iter())
                .all(|((&x, &n), &s)| s <= x && x < s + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn samples_respect_offsets() {
        let md = MultiDiscrete::new(arr1(&[1i64, 2, 5]).into_dyn(), Some(Array::I64(arr1(&[-1, 10, 0]).into_dyn())))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let s = md.sample(&mut rng);
            assert!(md.contains(&s));
            assert_eq!(s.as_slice().unwrap()[0], -1);
        }
        assert!(!md.contains(&arr1(&[-1, 12, 0]).into_dyn()));
        assert!(!md.contains(&arr1(&[-1, 10]).into_dyn()));
    }

    #[test]
    fn construction_rejects_bad_nvec_and_start() {
        assert!(MultiDiscrete::new(arr1(&[2.0f32, 3.0]).into_dyn(), None).is_err());
        assert!(MultiDiscrete::from_counts(&[2, 0]).is_err());
        assert!(MultiDiscrete::new(arr1(&[2i64, 3]).into_dyn(), Some(Array::I64(arr1(&[0]).into_dyn()))).is_err());
        assert!(MultiDiscrete::new(arr1(&[2i32, 3]).into_dyn(), None).is_ok());
    }

    #[test]
    fn overflowing_range_is_rejected() {
        let start = Some(Array::I64(arr1(&[i64::MAX]).into_dyn()));
        assert!(matches!(MultiDiscrete::new(arr1(&[2i64]).into_dyn(), start), Err(GymError::InvalidSpace(_))));
        let tight = MultiDiscrete::new(arr1(&[1i64]).into_dyn(), Some(Array::I64(arr1(&[i64::MAX - 1]).into_dyn())))
            .unwrap();
        assert!(tight.contains(&arr1(&[i64::MAX - 1]).into_dyn()));
        assert!(!tight.contains(&arr1(&[i64::MAX]).into_dyn()));
    }
}
