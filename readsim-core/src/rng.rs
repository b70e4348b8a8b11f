//! Seeded linear congruential generator.
//!
//! One [`SeededRng`] is built per request. Its initial state doubles as the
//! seed reported back to the caller, so replaying a request with that seed
//! yields the same region and the same simulator seed.

use rand::Rng;

/// Modulus of the generator, `2^31`.
pub const LCG_MODULUS: u64 = 0x8000_0000;
/// Multiplier (GCC's constant).
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;
/// Increment (GCC's constant).
pub const LCG_INCREMENT: u64 = 12_345;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    seed: u32,
    state: u32,
}

impl SeededRng {
    ///
    /// Create a generator from an explicit seed, or from a process-random seed
    /// in `[1, 2^31 - 1)` when `seed` is `None`.
    ///
    pub fn new(seed: Option<u32>) -> Self {
        let seed = match seed {
            Some(seed) => seed % LCG_MODULUS as u32,
            None => rand::rng().random_range(1..(LCG_MODULUS - 1) as u32),
        };
        SeededRng { seed, state: seed }
    }

    /// The initial state.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    ///
    /// Advance the generator and return the new state.
    ///
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u32 {
        let next = (LCG_MULTIPLIER * self.state as u64 + LCG_INCREMENT) % LCG_MODULUS;
        self.state = next as u32;
        self.state
    }

    ///
    /// Draw a value in `[0, bound)`. A zero bound yields zero.
    ///
    pub fn next_below(&mut self, bound: u64) -> u64 {
        let value = self.next() as u64;
        if bound == 0 { 0 } else { value % bound }
    }
}
