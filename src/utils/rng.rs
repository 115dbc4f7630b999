//! # Random Sources
//!
//! Seeded generators for the frame advancer. Nothing in the engine touches a
//! thread-local or global generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Odd multiplier spreading consecutive frame numbers across the seed space.
const FRAME_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Creates the generator for one frame of a session.
///
/// The same seed and frame number always produce the same sequence.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use ticktale::frame_rng;
///
/// let a: u64 = frame_rng(42, 3).gen();
/// let b: u64 = frame_rng(42, 3).gen();
/// assert_eq!(a, b);
/// ```
pub fn frame_rng(seed: u64, frame_number: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ frame_number.wrapping_mul(FRAME_SEED_STRIDE))
}

/// Returns true with probability `chance`.
///
/// Unlike `Rng::gen_bool` this never panics: values at or below 0 (and NaN)
/// never succeed, values at or above 1 always do.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.gen::<f64>() < chance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_get_distinct_streams() {
        let first: u64 = frame_rng(42, 0).gen();
        let second: u64 = frame_rng(42, 1).gen();
        assert_ne!(first, second);
    }

    #[test]
    fn test_roll_extremes() {
        let mut rng = frame_rng(1, 1);
        for _ in 0..100 {
            assert!(roll(&mut rng, 1.0));
            assert!(!roll(&mut rng, 0.0));
            assert!(!roll(&mut rng, f64::NAN));
            assert!(!roll(&mut rng, -3.0));
        }
    }
}
