//! Normalization, denormalization and clamping.

use super::types::Bounds;

impl Bounds {
    /// Maps a physical point into the unit hypercube.
    ///
    /// A degenerate dimension (`lower == upper`) maps to `0.0`.
    ///
    /// # Panics
    /// Panics if `point.len() != self.dim()`. In debug builds, also panics
    /// if `point` lies outside the bounds.
    pub fn normalize(&self, point: &[f64]) -> Vec<f64> {
        let mut normalized = vec![0.0; point.len()];
        self.normalize_into(point, &mut normalized);
        normalized
    }

    /// Like [`normalize`](Self::normalize), writing into `normalized`.
    ///
    /// # Panics
    /// Panics on any dimension mismatch.
    pub fn normalize_into(&self, point: &[f64], normalized: &mut [f64]) {
        assert_eq!(point.len(), self.dim(), "point dimension mismatch");
        assert_eq!(normalized.len(), self.dim(), "output dimension mismatch");

        for (i, (out, &x)) in normalized.iter_mut().zip(point).enumerate() {
            let lo = self.lower()[i];
            let diff = self.width(i);
            *out = if diff > 0.0 { (x - lo) / diff } else { 0.0 };
            debug_assert!(
                (0.0..=1.0).contains(&*out),
                "normalized component {i} is {out}, point {x} outside [{lo}, {}]",
                self.upper()[i]
            );
        }
    }

    /// Maps a unit-hypercube point back into physical space.
    ///
    /// # Panics
    /// Panics if `normalized.len() != self.dim()`. In debug builds, also
    /// panics if a component lies outside `[0, 1]`.
    pub fn denormalize(&self, normalized: &[f64]) -> Vec<f64> {
        let mut point = vec![0.0; normalized.len()];
        self.denormalize_into(normalized, &mut point);
        point
    }

    /// Like [`denormalize`](Self::denormalize), writing into `point`.
    ///
    /// # Panics
    /// Panics on any dimension mismatch.
    pub fn denormalize_into(&self, normalized: &[f64], point: &mut [f64]) {
        assert_eq!(normalized.len(), self.dim(), "normalized dimension mismatch");
        assert_eq!(point.len(), self.dim(), "output dimension mismatch");

        for (i, (out, &u)) in point.iter_mut().zip(normalized).enumerate() {
            debug_assert!(
                (0.0..=1.0).contains(&u),
                "normalized component {i} is {u}, expected [0, 1]"
            );
            // min() guards against rounding past the upper bound when u == 1
            *out = (u * self.width(i) + self.lower()[i]).min(self.upper()[i]);
        }
    }

    /// Pulls every component of `point` back into its interval.
    ///
    /// Returns the number of components that were moved.
    ///
    /// # Panics
    /// Panics if `point.len() != self.dim()`.
    pub fn clamp(&self, point: &mut [f64]) -> usize {
        assert_eq!(point.len(), self.dim(), "point dimension mismatch");

        let mut moved = 0;
        for (x, (&lo, &hi)) in point.iter_mut().zip(self.lower().iter().zip(self.upper())) {
            if *x < lo {
                *x = lo;
                moved += 1;
            } else if *x > hi {
                *x = hi;
                moved += 1;
            }
        }
        moved
    }
}
