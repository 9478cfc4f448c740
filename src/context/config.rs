//! Context configuration.

use crate::random::{GeneratorKind, InitPolicy};
use crate::stats::CustomCounterMode;

/// Random source settings.
///
/// A seed makes the context strict: drawing before the generator is
/// installed cannot happen, and a missing generator is a bug rather than a
/// reason to self-seed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RandomConfig {
    /// Seed for the generator. `None` leaves the source uninitialized.
    pub seed: Option<u64>,

    /// Generator algorithm used with `seed`.
    pub generator: GeneratorKind,

    /// Panic on draws from an uninitialized source instead of self-seeding.
    pub strict: bool,
}

impl RandomConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_generator(mut self, generator: GeneratorKind) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Initialization policy implied by these settings.
    pub fn policy(&self) -> InitPolicy {
        if self.strict || self.seed.is_some() {
            InitPolicy::Strict
        } else {
            InitPolicy::SelfSeed
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.strict && self.seed.is_none() {
            return Err("strict random source requires a seed".into());
        }
        Ok(())
    }
}

/// Statistics settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatsConfig {
    /// Start with the counting backend installed.
    pub enabled: bool,

    /// Behaviour of string-keyed counters.
    pub custom_mode: CustomCounterMode,
}

impl StatsConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_custom_mode(mut self, mode: CustomCounterMode) -> Self {
        self.custom_mode = mode;
        self
    }
}

/// Configuration for an [`OptContext`](super::OptContext).
///
/// # Examples
///
/// ```
/// use u_locopt::context::{ContextConfig, StatsConfig};
/// use u_locopt::random::GeneratorKind;
///
/// let config = ContextConfig::default()
///     .with_seed(42)
///     .with_generator(GeneratorKind::Small)
///     .with_stats(StatsConfig::default().with_enabled(true));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContextConfig {
    pub random: RandomConfig,
    pub stats: StatsConfig,
}

impl ContextConfig {
    pub fn with_random(mut self, random: RandomConfig) -> Self {
        self.random = random;
        self
    }

    pub fn with_stats(mut self, stats: StatsConfig) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random.seed = Some(seed);
        self
    }

    pub fn with_generator(mut self, generator: GeneratorKind) -> Self {
        self.random.generator = generator;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.random.validate()
    }
}
