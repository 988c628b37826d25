// Common trait for spaces

use rand::Rng;

use super::DType;

/// A trait implemented by all spaces.
/// `Element` is the value type that lives in the space (e.g., `i64` for Discrete,
/// or a dtype-tagged array for a BoxSpace).
pub trait Space {
    type Element;

    /// Dimensions of a sampled element; empty for scalars, `None` for composite spaces.
    fn shape(&self) -> Option<&[usize]>;

    /// Numeric kind of a sampled element; `None` for composite spaces.
    fn dtype(&self) -> Option<DType>;

    /// Draw a sample from the space using the provided RNG.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element;

    /// Return true if the given element is a valid member of the space.
    fn contains(&self, elem: &Self::Element) -> bool;
}
