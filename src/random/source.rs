//! The installable random source and its process-wide instance.

use super::generator::{Generator, StdGenerator};
use parking_lot::Mutex;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, StandardNormal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// What a [`RandomSource`] does when drawn from before a generator has
/// been installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InitPolicy {
    /// Install an entropy-seeded [`StdGenerator`] and log a warning.
    /// The run is no longer reproducible.
    #[default]
    SelfSeed,
    /// Treat the missing generator as a configuration fault and panic.
    Strict,
}

/// A shared source of random draws backed by one installed [`Generator`].
///
/// All draws lock an internal mutex, so a `RandomSource` may be shared
/// across threads. Sequences are reproducible only when draws happen in a
/// fixed order: concurrent callers are memory safe but interleave
/// nondeterministically.
///
/// # Examples
///
/// ```
/// use u_locopt::random::{RandomSource, StdGenerator};
///
/// let a = RandomSource::seeded(42);
/// let b = RandomSource::seeded(42);
/// let xs: Vec<f64> = (0..5).map(|_| a.next_f64()).collect();
/// let ys: Vec<f64> = (0..5).map(|_| b.next_f64()).collect();
/// assert_eq!(xs, ys);
///
/// b.install(StdGenerator::new(7));
/// assert!(b.info().contains("seed 7"));
/// ```
pub struct RandomSource {
    generator: Mutex<Option<Box<dyn Generator>>>,
    strict: AtomicBool,
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(InitPolicy::default())
    }
}

impl std::fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomSource")
            .field("generator", &self.info())
            .field("policy", &self.policy())
            .finish()
    }
}

impl RandomSource {
    /// Creates a source with no generator installed.
    pub fn new(policy: InitPolicy) -> Self {
        Self {
            generator: Mutex::new(None),
            strict: AtomicBool::new(policy == InitPolicy::Strict),
        }
    }

    /// Creates a strict source with `generator` already installed.
    pub fn with_generator<G: Generator + 'static>(generator: G) -> Self {
        let source = Self::new(InitPolicy::Strict);
        source.install(generator);
        source
    }

    /// Creates a strict source with a [`StdGenerator`] seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_generator(StdGenerator::new(seed))
    }

    /// Installs `generator`, discarding the previous one and its stream.
    pub fn install<G: Generator + 'static>(&self, generator: G) {
        self.install_boxed(Box::new(generator));
    }

    /// Installs an already boxed generator.
    pub fn install_boxed(&self, generator: Box<dyn Generator>) {
        debug!(generator = %generator.info(), "installing random generator");
        *self.generator.lock() = Some(generator);
    }

    /// Whether a generator is installed.
    pub fn is_installed(&self) -> bool {
        self.generator.lock().is_some()
    }

    pub fn policy(&self) -> InitPolicy {
        if self.strict.load(Ordering::Relaxed) {
            InitPolicy::Strict
        } else {
            InitPolicy::SelfSeed
        }
    }

    pub fn set_policy(&self, policy: InitPolicy) {
        self.strict
            .store(policy == InitPolicy::Strict, Ordering::Relaxed);
    }

    /// Identity of the installed generator.
    pub fn info(&self) -> String {
        match self.generator.lock().as_ref() {
            Some(g) => g.info(),
            None => "no generator installed".to_string(),
        }
    }

    /// Runs `f` on the installed generator, applying the init policy if
    /// none is installed yet.
    ///
    /// # Panics
    /// Panics under [`InitPolicy::Strict`] if no generator is installed.
    pub fn draw_with<T>(&self, f: impl FnOnce(&mut dyn Generator) -> T) -> T {
        let mut guard = self.generator.lock();
        let generator = guard.get_or_insert_with(|| self.self_seed());
        f(generator.as_mut())
    }

    fn self_seed(&self) -> Box<dyn Generator> {
        assert!(
            !self.strict.load(Ordering::Relaxed),
            "random source used before a generator was installed"
        );
        let generator = StdGenerator::from_entropy();
        warn!(
            generator = %generator.info(),
            "no random generator installed, self-seeding from entropy; this run is not reproducible"
        );
        Box::new(generator)
    }

    pub fn next_bool(&self) -> bool {
        self.draw_with(|g| g.random())
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f32(&self) -> f32 {
        self.draw_with(|g| g.random())
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&self) -> f64 {
        self.draw_with(|g| g.random())
    }

    /// Standard normal (mean 0, standard deviation 1).
    pub fn next_gaussian(&self) -> f64 {
        self.draw_with(|g| StandardNormal.sample(g))
    }

    /// Uniform over the full `i32` range.
    pub fn next_i32(&self) -> i32 {
        self.draw_with(|g| g.random())
    }

    /// Uniform in `[0, n)`.
    ///
    /// # Panics
    /// Panics if `n <= 0`.
    pub fn next_i32_below(&self, n: i32) -> i32 {
        assert!(n > 0, "bound must be positive, got {n}");
        self.draw_with(|g| g.random_range(0..n))
    }

    /// Uniform over the full `i64` range.
    pub fn next_i64(&self) -> i64 {
        self.draw_with(|g| g.random())
    }

    /// Uniform over the full `u64` range.
    pub fn next_u64(&self) -> u64 {
        self.draw_with(|g| g.next_u64())
    }

    /// An [`RngCore`] view for APIs generic over `R: Rng`.
    pub fn rng(&self) -> SourceRng<'_> {
        SourceRng { source: self }
    }
}

/// Borrowed [`RngCore`] adapter over a [`RandomSource`].
///
/// Each call locks the source once, so interleaving with other users of the
/// same source follows the same rules as direct draws.
#[derive(Debug, Clone, Copy)]
pub struct SourceRng<'a> {
    source: &'a RandomSource,
}

impl RngCore for SourceRng<'_> {
    fn next_u32(&mut self) -> u32 {
        self.source.draw_with(|g| g.next_u32())
    }

    fn next_u64(&mut self) -> u64 {
        self.source.draw_with(|g| g.next_u64())
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.source.draw_with(|g| g.fill_bytes(dst))
    }
}

static GLOBAL: OnceLock<RandomSource> = OnceLock::new();

/// The process-wide random source.
///
/// Starts without a generator under [`InitPolicy::SelfSeed`]. Install a
/// seeded generator with [`set_generator`] before the first draw to make a
/// run reproducible.
pub fn global() -> &'static RandomSource {
    GLOBAL.get_or_init(RandomSource::default)
}

/// Installs `generator` into the process-wide source.
pub fn set_generator<G: Generator + 'static>(generator: G) {
    global().install(generator);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SmallGenerator;
    use std::sync::Arc;

    #[test]
    fn test_reinstall_same_seed_repeats_sequence() {
        let source = RandomSource::seeded(1234);
        let first: Vec<f64> = (0..10).map(|_| source.next_f64()).collect();
        source.install(StdGenerator::new(1234));
        let second: Vec<f64> = (0..10).map(|_| source.next_f64()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_replacement_discards_stream() {
        let source = RandomSource::seeded(5);
        let a = source.next_u64();
        source.install(StdGenerator::new(5));
        assert_eq!(source.next_u64(), a);
    }

    #[test]
    fn test_all_draw_kinds_deterministic() {
        let draw = |s: &RandomSource| {
            (
                s.next_bool(),
                s.next_f32(),
                s.next_f64(),
                s.next_gaussian(),
                s.next_i32(),
                s.next_i32_below(17),
                s.next_i64(),
            )
        };
        let a = RandomSource::with_generator(SmallGenerator::new(3));
        let b = RandomSource::with_generator(SmallGenerator::new(3));
        for _ in 0..20 {
            assert_eq!(draw(&a), draw(&b));
        }
    }

    #[test]
    fn test_unit_interval() {
        let s = RandomSource::seeded(11);
        for _ in 0..1000 {
            let x = s.next_f64();
            assert!((0.0..1.0).contains(&x));
            let y = s.next_f32();
            assert!((0.0..1.0).contains(&y));
        }
    }

    #[test]
    fn test_bounded_int_in_range() {
        let s = RandomSource::seeded(99);
        for n in [1, 2, 3, 10, 1000, i32::MAX] {
            for _ in 0..500 {
                let k = s.next_i32_below(n);
                assert!((0..n).contains(&k), "{k} not in [0, {n})");
            }
        }
    }

    #[test]
    #[should_panic(expected = "bound must be positive")]
    fn test_bounded_int_rejects_zero() {
        RandomSource::seeded(1).next_i32_below(0);
    }

    #[test]
    #[should_panic(expected = "bound must be positive")]
    fn test_bounded_int_rejects_negative() {
        RandomSource::seeded(1).next_i32_below(-4);
    }

    #[test]
    fn test_gaussian_moments() {
        let s = RandomSource::seeded(2024);
        let n = 20_000;
        let xs: Vec<f64> = (0..n).map(|_| s.next_gaussian()).collect();
        let mean = xs.iter().sum::<f64>() / n as f64;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    #[test]
    fn test_self_seed_policy_installs_generator() {
        let s = RandomSource::new(InitPolicy::SelfSeed);
        assert!(!s.is_installed());
        assert_eq!(s.info(), "no generator installed");
        let _ = s.next_bool();
        assert!(s.is_installed());
        assert!(s.info().starts_with("std generator with seed"));
    }

    #[test]
    #[should_panic(expected = "random source used before a generator was installed")]
    fn test_strict_policy_panics() {
        RandomSource::new(InitPolicy::Strict).next_f64();
    }

    #[test]
    fn test_set_policy() {
        let s = RandomSource::default();
        assert_eq!(s.policy(), InitPolicy::SelfSeed);
        s.set_policy(InitPolicy::Strict);
        assert_eq!(s.policy(), InitPolicy::Strict);
    }

    #[test]
    fn test_concurrent_draws_are_safe() {
        let s = Arc::new(RandomSource::seeded(8));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = Arc::clone(&s);
                std::thread::spawn(move || {
                    (0..1000).map(|_| s.next_i32_below(10)).collect::<Vec<_>>()
                })
            })
            .collect();
        for h in handles {
            let draws = h.join().unwrap();
            assert!(draws.iter().all(|&k| (0..10).contains(&k)));
        }
    }

    #[test]
    fn test_source_rng_view() {
        let a = RandomSource::seeded(77);
        let b = RandomSource::seeded(77);
        let mut view = a.rng();
        assert_eq!(view.random_range(0..100u32), b.rng().random_range(0..100u32));
    }

    #[test]
    fn test_global_source() {
        set_generator(StdGenerator::new(31));
        assert!(global().is_installed());
        let x = global().next_f64();
        assert!((0.0..1.0).contains(&x));
    }
}
