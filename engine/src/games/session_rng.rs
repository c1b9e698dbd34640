use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source consumed by the move strategies.
///
/// Strategies only ever need a uniform draw in `[0, 1)` (for the medium
/// difficulty blend) and a uniform index into a candidate list, so tests can
/// script both without touching a real generator.
pub trait MoveRng {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `[0, len)`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MoveRng for SessionRng {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}
