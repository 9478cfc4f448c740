//! Bounded and combinatorial draws built on [`RandomSource`].

use super::source::RandomSource;
use rand::seq::{index, SliceRandom};
use tracing::warn;

/// Rejection-sampling budget for the bounded Gaussian draws.
pub const MAX_REJECTION_TRIES: usize = 10_000;

impl RandomSource {
    /// Gaussian draw restricted to `[low, high]`.
    ///
    /// Centred on the midpoint with standard deviation
    /// `std_dev * (high - low) / 2`. Returns the midpoint if no sample lands
    /// inside the interval within [`MAX_REJECTION_TRIES`] attempts.
    ///
    /// # Panics
    /// Panics if `low > high` or `std_dev` is not positive.
    pub fn gauss_between(&self, low: f64, high: f64, std_dev: f64) -> f64 {
        assert!(low <= high, "invalid interval [{low}, {high}]");
        assert!(std_dev > 0.0, "standard deviation must be positive, got {std_dev}");

        let mid = 0.5 * (low + high);
        let sigma = std_dev * 0.5 * (high - low);
        for _ in 0..MAX_REJECTION_TRIES {
            let d = mid + sigma * self.next_gaussian();
            if (low..=high).contains(&d) {
                return d;
            }
        }

        warn!(low, high, std_dev, "gaussian rejection sampling exhausted, returning midpoint");
        mid
    }

    /// One-sided Gaussian draw in `[low, high)`.
    ///
    /// Returns `low + |N(0, 1)| * std_dev * (high - low)`, redrawn until it
    /// falls below `high`. Returns `low` if that fails within
    /// [`MAX_REJECTION_TRIES`] attempts.
    ///
    /// # Panics
    /// Panics if `low >= high` or `std_dev` is not positive.
    pub fn half_gauss_between(&self, low: f64, high: f64, std_dev: f64) -> f64 {
        assert!(low < high, "invalid interval [{low}, {high})");
        assert!(std_dev > 0.0, "standard deviation must be positive, got {std_dev}");

        let scale = std_dev * (high - low);
        for _ in 0..MAX_REJECTION_TRIES {
            let d = low + self.next_gaussian().abs() * scale;
            if d < high {
                return d;
            }
        }

        warn!(low, high, std_dev, "half-gaussian rejection sampling exhausted, returning lower bound");
        low
    }

    /// `count` distinct integers from `[low, high)`, ascending.
    ///
    /// # Panics
    /// Panics if `low > high` or the range holds fewer than `count` values.
    pub fn distinct_indices(&self, count: usize, low: usize, high: usize) -> Vec<usize> {
        assert!(low <= high, "invalid range [{low}, {high})");
        let len = high - low;
        assert!(
            count <= len,
            "cannot draw {count} distinct values from a range of {len}"
        );

        let mut picks = self.draw_with(|g| index::sample(g, len, count).into_vec());
        picks.sort_unstable();
        for p in &mut picks {
            *p += low;
        }
        picks
    }

    /// Shuffles `items` in place.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        self.draw_with(|g| items.shuffle(g));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::StdGenerator;
    use proptest::prelude::*;

    #[test]
    fn test_gauss_between_stays_inside() {
        let s = RandomSource::seeded(17);
        for _ in 0..2000 {
            let x = s.gauss_between(2.0, 3.0, 1.0);
            assert!((2.0..=3.0).contains(&x), "{x}");
        }
    }

    #[test]
    fn test_gauss_between_is_centred() {
        let s = RandomSource::seeded(18);
        let n = 5000;
        let mean = (0..n).map(|_| s.gauss_between(-4.0, 6.0, 0.5)).sum::<f64>() / n as f64;
        assert!((mean - 1.0).abs() < 0.1, "mean {mean}");
    }

    #[test]
    fn test_gauss_between_degenerate_interval() {
        let s = RandomSource::seeded(1);
        // zero-width interval: every draw equals the midpoint
        assert_eq!(s.gauss_between(4.0, 4.0, 1.0), 4.0);
    }

    #[test]
    fn test_half_gauss_between() {
        let s = RandomSource::seeded(19);
        let xs: Vec<f64> = (0..2000).map(|_| s.half_gauss_between(1.0, 2.0, 0.3)).collect();
        assert!(xs.iter().all(|x| (1.0..2.0).contains(x)));
        let below_mid = xs.iter().filter(|&&x| x < 1.5).count();
        assert!(below_mid > xs.len() / 2);
    }

    #[test]
    #[should_panic(expected = "standard deviation must be positive")]
    fn test_gauss_rejects_nonpositive_std_dev() {
        RandomSource::seeded(1).gauss_between(0.0, 1.0, 0.0);
    }

    #[test]
    #[should_panic(expected = "invalid interval")]
    fn test_half_gauss_rejects_empty_interval() {
        RandomSource::seeded(1).half_gauss_between(1.0, 1.0, 1.0);
    }

    #[test]
    fn test_distinct_indices_full_range() {
        let s = RandomSource::seeded(5);
        assert_eq!(s.distinct_indices(5, 3, 8), vec![3, 4, 5, 6, 7]);
        assert!(s.distinct_indices(0, 3, 3).is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot draw 4 distinct values")]
    fn test_distinct_indices_too_many() {
        RandomSource::seeded(5).distinct_indices(4, 0, 3);
    }

    #[test]
    fn test_shuffle_is_permutation_and_reproducible() {
        let a = RandomSource::with_generator(StdGenerator::new(21));
        let b = RandomSource::with_generator(StdGenerator::new(21));
        let mut xs: Vec<u32> = (0..50).collect();
        let mut ys = xs.clone();
        a.shuffle(&mut xs);
        b.shuffle(&mut ys);
        assert_eq!(xs, ys);
        let mut sorted = xs.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn prop_distinct_indices(seed in any::<u64>(), low in 0usize..100, len in 0usize..60, frac in 0.0f64..=1.0) {
            let count = (len as f64 * frac) as usize;
            let s = RandomSource::seeded(seed);
            let picks = s.distinct_indices(count, low, low + len);
            prop_assert_eq!(picks.len(), count);
            prop_assert!(picks.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(picks.iter().all(|&p| p >= low && p < low + len));
        }
    }
}
