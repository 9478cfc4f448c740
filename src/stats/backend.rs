//! Counter storage backends.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Built-in activity counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Counter {
    /// Global-search trials (one mating event each).
    Trials,
    /// Local optimization runs.
    LocalOpts,
    /// Objective value evaluations.
    FitnessEvals,
    /// Objective gradient evaluations.
    GradientEvals,
    /// Candidates discarded by sanity checks.
    SanityDiscards,
}

const COUNTER_KINDS: usize = 5;

impl Counter {
    pub const ALL: [Counter; COUNTER_KINDS] = [
        Counter::Trials,
        Counter::LocalOpts,
        Counter::FitnessEvals,
        Counter::GradientEvals,
        Counter::SanityDiscards,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// How [`CountingStatistics`] treats repeated increments of a custom key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CustomCounterMode {
    /// Every increment adds one.
    #[default]
    Accumulate,
    /// The first increment registers the key at zero; later increments are
    /// ignored. Useful for marking which events occurred at all.
    FirstTouch,
}

/// Storage for the activity counters.
///
/// Implementations must tolerate concurrent increments from many threads.
pub trait StatisticsBackend: Send + Sync {
    fn increment(&self, counter: Counter);

    fn total(&self, counter: Counter) -> u64;

    /// Increments the ad-hoc counter `key`.
    fn increment_custom(&self, key: &str);

    /// Snapshot of all custom counters, ordered by key.
    fn custom_counters(&self) -> BTreeMap<String, u64>;

    /// Whether this backend records anything.
    fn is_counting(&self) -> bool;
}

/// Backend that records nothing and reads zero everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStatistics;

impl StatisticsBackend for NoopStatistics {
    fn increment(&self, _counter: Counter) {}

    fn total(&self, _counter: Counter) -> u64 {
        0
    }

    fn increment_custom(&self, _key: &str) {}

    fn custom_counters(&self) -> BTreeMap<String, u64> {
        BTreeMap::new()
    }

    fn is_counting(&self) -> bool {
        false
    }
}

/// Backend with one atomic per counter and a concurrent map of custom keys.
#[derive(Debug, Default)]
pub struct CountingStatistics {
    counters: [AtomicU64; COUNTER_KINDS],
    custom: DashMap<String, AtomicU64>,
    mode: CustomCounterMode,
}

impl CountingStatistics {
    pub fn new(mode: CustomCounterMode) -> Self {
        Self {
            counters: Default::default(),
            custom: DashMap::new(),
            mode,
        }
    }

    pub fn mode(&self) -> CustomCounterMode {
        self.mode
    }
}

impl StatisticsBackend for CountingStatistics {
    fn increment(&self, counter: Counter) {
        self.counters[counter.slot()].fetch_add(1, Ordering::Relaxed);
    }

    fn total(&self, counter: Counter) -> u64 {
        self.counters[counter.slot()].load(Ordering::Relaxed)
    }

    fn increment_custom(&self, key: &str) {
        match self.mode {
            CustomCounterMode::Accumulate => {
                // fast path avoids allocating the key once it exists
                if let Some(count) = self.custom.get(key) {
                    count.fetch_add(1, Ordering::Relaxed);
                    return;
                }
                self.custom
                    .entry(key.to_owned())
                    .or_insert_with(|| AtomicU64::new(0))
                    .fetch_add(1, Ordering::Relaxed);
            }
            CustomCounterMode::FirstTouch => {
                if !self.custom.contains_key(key) {
                    self.custom
                        .entry(key.to_owned())
                        .or_insert_with(|| AtomicU64::new(0));
                }
            }
        }
    }

    fn custom_counters(&self) -> BTreeMap<String, u64> {
        self.custom
            .iter()
            .map(|e| (e.key().clone(), e.value().load(Ordering::Relaxed)))
            .collect()
    }

    fn is_counting(&self) -> bool {
        true
    }
}
