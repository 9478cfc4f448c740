//! Reproducible random numbers for stochastic search.
//!
//! A [`RandomSource`] holds one installable [`Generator`] behind a mutex.
//! Installing a seeded generator before the first draw makes a run
//! reproducible; reinstalling the same seed restarts the same stream.
//!
//! # Policies
//!
//! Drawing from a source with no generator installed is governed by its
//! [`InitPolicy`]:
//!
//! | Policy | Behaviour |
//! |--------|-----------|
//! | [`InitPolicy::SelfSeed`] | entropy-seeded [`StdGenerator`], logged at `warn` |
//! | [`InitPolicy::Strict`] | panic |
//!
//! The process-wide source returned by [`global`] uses `SelfSeed`.
//!
//! # Examples
//!
//! ```
//! use u_locopt::random::{RandomSource, SmallGenerator};
//!
//! let source = RandomSource::with_generator(SmallGenerator::new(3));
//! let x = source.gauss_between(-1.0, 1.0, 1.0);
//! assert!((-1.0..=1.0).contains(&x));
//!
//! let picks = source.distinct_indices(3, 10, 20);
//! assert_eq!(picks.len(), 3);
//! assert!(picks.windows(2).all(|w| w[0] < w[1]));
//! ```

mod generator;
mod sampling;
mod source;

pub use generator::{Algorithm, Generator, GeneratorKind, Seeded, SmallGenerator, StdGenerator};
pub use sampling::MAX_REJECTION_TRIES;
pub use source::{global, set_generator, InitPolicy, RandomSource, SourceRng};
