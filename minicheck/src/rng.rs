//! Session random source.
//!
//! A session owns exactly one random source and lends it to generators, so
//! a fixed seed and a fixed registration order always replay the same trials.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Trait for providing random number generators
pub trait RngProvider {
    /// The type of RNG this provider creates
    type Rng: rand::RngCore;

    /// Create a new RNG instance with an optional seed
    fn create_rng(&self, seed: Option<u64>) -> Self::Rng;
}

/// Default RNG provider using `StdRng`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRngProvider;

impl RngProvider for DefaultRngProvider {
    type Rng = StdRng;

    fn create_rng(&self, seed: Option<u64>) -> Self::Rng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Create the random source of a session
pub fn session_rng(seed: Option<u64>) -> StdRng {
    DefaultRngProvider.create_rng(seed)
}
