//! The [`OptContext`] handle.

use super::config::ContextConfig;
use crate::random::{self, RandomSource};
use crate::stats::{self, Statistics};
use thiserror::Error;
use tracing::debug;

/// Error returned when a context cannot be built from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid context configuration: {0}")]
    Invalid(String),
}

/// Random source and statistics for one optimization process.
///
/// Components that need randomness or counters take `&OptContext` (or the
/// individual parts), so tests can run several fully isolated contexts in
/// one process.
///
/// # Examples
///
/// ```
/// use u_locopt::context::{ContextConfig, OptContext, StatsConfig};
///
/// let config = ContextConfig::default()
///     .with_seed(7)
///     .with_stats(StatsConfig::default().with_enabled(true));
/// let a = OptContext::new(&config).unwrap();
/// let b = OptContext::new(&config).unwrap();
/// assert_eq!(a.random().next_u64(), b.random().next_u64());
///
/// a.stats().increment_trials();
/// assert_eq!(a.stats().total_trials(), 1);
/// assert_eq!(b.stats().total_trials(), 0);
/// ```
#[derive(Debug, Default)]
pub struct OptContext {
    random: RandomSource,
    stats: Statistics,
}

impl OptContext {
    /// Builds a context from `config`.
    pub fn new(config: &ContextConfig) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let random = RandomSource::new(config.random.policy());
        if let Some(seed) = config.random.seed {
            random.install_boxed(config.random.generator.build(seed));
        }

        let stats = Statistics::new();
        if config.stats.enabled {
            stats.enable_with(config.stats.custom_mode);
        }

        debug!(
            random = %random.info(),
            statistics = stats.is_enabled(),
            "optimization context created"
        );
        Ok(Self { random, stats })
    }

    pub fn random(&self) -> &RandomSource {
        &self.random
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Applies `config` to the process-wide [`random::global`] source and
    /// [`stats::global`] statistics.
    ///
    /// Statistics can only be switched on: a disabled `stats` section
    /// leaves already enabled global statistics running.
    pub fn install_global(config: &ContextConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let source = random::global();
        if let Some(seed) = config.random.seed {
            source.install_boxed(config.random.generator.build(seed));
        }
        source.set_policy(config.random.policy());
        if config.stats.enabled {
            stats::global().enable_with(config.stats.custom_mode);
        }
        Ok(())
    }
}
