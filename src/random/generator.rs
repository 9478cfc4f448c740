//! Generator strategies.

use rand::rngs::{SmallRng, StdRng};
use rand::{RngCore, SeedableRng};

/// A seeded random number generator that can be installed into a
/// [`RandomSource`](super::RandomSource).
///
/// Any [`RngCore`] works as the bit source; all typed draws are derived
/// from it by the source. The seed is kept so the generator can identify
/// itself for reproducibility audits.
pub trait Generator: RngCore + Send {
    /// The seed this generator was created from.
    fn seed(&self) -> u64;

    /// Short algorithm name.
    fn name(&self) -> &'static str;

    /// Human-readable identity including the seed.
    fn info(&self) -> String {
        format!("{} generator with seed {}", self.name(), self.seed())
    }
}

/// A bit-source algorithm usable inside [`Seeded`].
pub trait Algorithm: RngCore + SeedableRng + Send {
    /// Short algorithm name reported by [`Generator::name`].
    const NAME: &'static str;
}

impl Algorithm for StdRng {
    const NAME: &'static str = "std";
}

impl Algorithm for SmallRng {
    const NAME: &'static str = "small";
}

/// A generator that remembers the seed its algorithm was created from.
#[derive(Debug, Clone)]
pub struct Seeded<R> {
    seed: u64,
    rng: R,
}

/// Cryptographically strong default generator ([`StdRng`]).
pub type StdGenerator = Seeded<StdRng>;

/// Small, fast, non-cryptographic generator ([`SmallRng`]).
///
/// Its stream may differ between platforms and `rand` versions; prefer
/// [`StdGenerator`] when runs must be reproducible across machines.
pub type SmallGenerator = Seeded<SmallRng>;

impl<R: SeedableRng> Seeded<R> {
    /// Creates a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: R::seed_from_u64(seed),
        }
    }

    /// Creates a generator from a fresh entropy-derived seed.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl<R: RngCore> RngCore for Seeded<R> {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng.fill_bytes(dst)
    }
}

impl<R: Algorithm> Generator for Seeded<R> {
    fn seed(&self) -> u64 {
        self.seed
    }

    fn name(&self) -> &'static str {
        R::NAME
    }
}

/// Selects a built-in generator strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GeneratorKind {
    #[default]
    Std,
    Small,
}

impl GeneratorKind {
    /// Builds a boxed generator of this kind.
    pub fn build(self, seed: u64) -> Box<dyn Generator> {
        match self {
            GeneratorKind::Std => Box::new(StdGenerator::new(seed)),
            GeneratorKind::Small => Box::new(SmallGenerator::new(seed)),
        }
    }
}
