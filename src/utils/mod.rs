pub mod pacing;
pub mod rng;

pub use pacing::FramePacer;
pub use rng::{RngStream, reseed, rng_from_seed, seeded_or_entropy};
