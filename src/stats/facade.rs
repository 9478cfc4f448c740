//! The switchable [`Statistics`] facade and its process-wide instance.

use super::backend::{
    Counter, CountingStatistics, CustomCounterMode, NoopStatistics, StatisticsBackend,
};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

static NOOP: NoopStatistics = NoopStatistics;

/// Activity counters that cost nothing until enabled.
///
/// A fresh `Statistics` forwards to [`NoopStatistics`]. [`enable`](Self::enable)
/// installs a [`CountingStatistics`] backend for the lifetime of the value;
/// there is no way back to the no-op backend, so counts never disappear
/// mid-run.
///
/// # Examples
///
/// ```
/// use u_locopt::stats::Statistics;
///
/// let stats = Statistics::new();
/// stats.increment_trials();
/// assert_eq!(stats.total_trials(), 0);
///
/// stats.enable();
/// stats.increment_trials();
/// stats.increment_trials();
/// assert_eq!(stats.total_trials(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Statistics {
    counting: OnceLock<CountingStatistics>,
}

impl Statistics {
    /// Creates disabled statistics.
    pub const fn new() -> Self {
        Self {
            counting: OnceLock::new(),
        }
    }

    /// Switches to the counting backend with accumulating custom counters.
    /// Idempotent.
    pub fn enable(&self) {
        self.enable_with(CustomCounterMode::default());
    }

    /// Switches to the counting backend with the given custom counter mode.
    ///
    /// Only the first call takes effect; later calls keep the installed
    /// backend and its mode.
    pub fn enable_with(&self, mode: CustomCounterMode) {
        let mut installed = false;
        let counting = self.counting.get_or_init(|| {
            installed = true;
            CountingStatistics::new(mode)
        });
        if installed {
            debug!(?mode, "detailed statistics enabled");
        } else if counting.mode() != mode {
            debug!(
                requested = ?mode,
                active = ?counting.mode(),
                "statistics already enabled, keeping active custom counter mode"
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.counting.get().is_some()
    }

    /// The currently installed backend.
    pub fn backend(&self) -> &dyn StatisticsBackend {
        match self.counting.get() {
            Some(counting) => counting,
            None => &NOOP,
        }
    }

    pub fn increment(&self, counter: Counter) {
        self.backend().increment(counter);
    }

    pub fn total(&self, counter: Counter) -> u64 {
        self.backend().total(counter)
    }

    pub fn increment_trials(&self) {
        self.increment(Counter::Trials);
    }

    pub fn increment_local_opts(&self) {
        self.increment(Counter::LocalOpts);
    }

    pub fn increment_fitness_evals(&self) {
        self.increment(Counter::FitnessEvals);
    }

    pub fn increment_gradient_evals(&self) {
        self.increment(Counter::GradientEvals);
    }

    pub fn increment_sanity_discards(&self) {
        self.increment(Counter::SanityDiscards);
    }

    pub fn increment_custom(&self, key: &str) {
        self.backend().increment_custom(key);
    }

    pub fn total_trials(&self) -> u64 {
        self.total(Counter::Trials)
    }

    pub fn total_local_opts(&self) -> u64 {
        self.total(Counter::LocalOpts)
    }

    pub fn total_fitness_evals(&self) -> u64 {
        self.total(Counter::FitnessEvals)
    }

    pub fn total_gradient_evals(&self) -> u64 {
        self.total(Counter::GradientEvals)
    }

    pub fn total_sanity_discards(&self) -> u64 {
        self.total(Counter::SanityDiscards)
    }

    /// Snapshot of all custom counters, ordered by key.
    pub fn custom_counters(&self) -> BTreeMap<String, u64> {
        self.backend().custom_counters()
    }
}

static GLOBAL: Statistics = Statistics::new();

/// The process-wide statistics, disabled until
/// [`enable_detailed_statistics`] is called.
pub fn global() -> &'static Statistics {
    &GLOBAL
}

/// Enables the process-wide statistics. Irreversible.
pub fn enable_detailed_statistics() {
    GLOBAL.enable();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_ignores_increments() {
        let stats = Statistics::new();
        for _ in 0..10 {
            stats.increment_trials();
            stats.increment_local_opts();
            stats.increment_fitness_evals();
            stats.increment_gradient_evals();
            stats.increment_sanity_discards();
            stats.increment_custom("anything");
        }
        assert!(!stats.is_enabled());
        for c in Counter::ALL {
            assert_eq!(stats.total(c), 0);
        }
        assert!(stats.custom_counters().is_empty());
    }

    #[test]
    fn test_enable_then_count_exactly() {
        let stats = Statistics::new();
        stats.increment_trials();
        stats.enable();
        for _ in 0..7 {
            stats.increment_trials();
        }
        assert_eq!(stats.total_trials(), 7);
        assert!(stats.backend().is_counting());
    }

    #[test]
    fn test_enable_is_idempotent_and_keeps_counts() {
        let stats = Statistics::new();
        stats.enable();
        stats.increment_local_opts();
        stats.enable();
        stats.enable_with(CustomCounterMode::FirstTouch);
        stats.increment_local_opts();
        assert_eq!(stats.total_local_opts(), 2);

        stats.increment_custom("k");
        stats.increment_custom("k");
        assert_eq!(stats.custom_counters()["k"], 2);
    }

    #[test]
    fn test_first_touch_mode() {
        let stats = Statistics::new();
        stats.enable_with(CustomCounterMode::FirstTouch);
        stats.increment_custom("k");
        stats.increment_custom("k");
        assert_eq!(stats.custom_counters()["k"], 0);
    }

    #[test]
    fn test_global_enable() {
        enable_detailed_statistics();
        assert!(global().is_enabled());
        let before = global().total_sanity_discards();
        global().increment_sanity_discards();
        assert!(global().total_sanity_discards() > before);
    }
}
