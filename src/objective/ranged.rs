//! Optimizing a subset of a larger parameter vector.

use super::types::{DifferentiableObjective, Objective};
use crate::bounds::Bounds;
use thiserror::Error;

/// Error returned when parameter ranges are inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("at least one parameter range is required")]
    NoRanges,

    #[error("range start {low} exceeds range end {up}")]
    Inverted { low: usize, up: usize },

    #[error("range end {up} is out of bounds for {len} parameters")]
    OutOfBounds { up: usize, len: usize },

    #[error("parameter {0} is covered by more than one range")]
    Overlap(usize),
}

/// An inclusive index range `[low, up]` of active parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamRange {
    low: usize,
    up: usize,
}

impl ParamRange {
    /// Creates the inclusive range `[low, up]`.
    pub fn new(low: usize, up: usize) -> Result<Self, RangeError> {
        if low > up {
            return Err(RangeError::Inverted { low, up });
        }
        Ok(Self { low, up })
    }

    /// A range covering the single index `i`.
    pub fn single(i: usize) -> Self {
        Self { low: i, up: i }
    }

    pub fn low(&self) -> usize {
        self.low
    }

    pub fn up(&self) -> usize {
        self.up
    }

    /// Number of indices covered.
    pub fn len(&self) -> usize {
        self.up - self.low + 1
    }

    /// Always `false`; a range covers at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.low..=self.up
    }
}

/// Wraps an objective over a full parameter vector so that only the
/// parameters inside the given ranges are exposed to the optimizer.
///
/// The active coordinates are the concatenation of all ranges in the order
/// they were given. Inactive parameters keep the values they had at
/// construction (or at the last [`commit`](Self::commit)).
///
/// # Examples
///
/// ```
/// use u_locopt::objective::{Objective, ParamRange, RangedObjective};
///
/// struct Sum;
/// impl Objective for Sum {
///     type Error = std::convert::Infallible;
///     fn fitness(&self, p: &[f64], _: usize) -> Result<f64, Self::Error> {
///         Ok(p.iter().sum())
///     }
/// }
///
/// let ranged = RangedObjective::new(
///     Sum,
///     vec![1.0, 1.0, 1.0, 1.0],
///     vec![ParamRange::new(1, 2).unwrap()],
/// )
/// .unwrap();
///
/// assert_eq!(ranged.dim(), 2);
/// assert_eq!(ranged.fitness(&[0.0, 0.0], 0).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct RangedObjective<O> {
    inner: O,
    ranges: Vec<ParamRange>,
    parameters: Vec<f64>,
    clamp: Option<Bounds>,
}

impl<O> RangedObjective<O> {
    /// Creates a ranged view of `inner` over `parameters`.
    pub fn new(
        inner: O,
        parameters: Vec<f64>,
        ranges: Vec<ParamRange>,
    ) -> Result<Self, RangeError> {
        if ranges.is_empty() {
            return Err(RangeError::NoRanges);
        }

        let mut covered = vec![false; parameters.len()];
        for r in &ranges {
            if r.up >= parameters.len() {
                return Err(RangeError::OutOfBounds {
                    up: r.up,
                    len: parameters.len(),
                });
            }
            for i in r.indices() {
                if covered[i] {
                    return Err(RangeError::Overlap(i));
                }
                covered[i] = true;
            }
        }

        Ok(Self {
            inner,
            ranges,
            parameters,
            clamp: None,
        })
    }

    /// Clamps active coordinates into `full_bounds` (given over the full
    /// parameter vector) before every evaluation and commit.
    ///
    /// # Panics
    /// Panics if `full_bounds` does not match the parameter count.
    pub fn with_clamp(mut self, full_bounds: &Bounds) -> Self {
        self.clamp = Some(self.active_bounds(full_bounds));
        self
    }

    /// Number of active coordinates.
    pub fn dim(&self) -> usize {
        self.ranges.iter().map(ParamRange::len).sum()
    }

    pub fn ranges(&self) -> &[ParamRange] {
        &self.ranges
    }

    /// The full parameter vector, including inactive parameters.
    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    /// Full-vector indices of the active coordinates, in active order.
    pub fn active_indices(&self) -> Vec<usize> {
        self.ranges.iter().flat_map(ParamRange::indices).collect()
    }

    /// Current values of the active coordinates.
    pub fn active_parameters(&self) -> Vec<f64> {
        self.ranges
            .iter()
            .flat_map(|r| self.parameters[r.indices()].iter().copied())
            .collect()
    }

    /// Bounds of the active coordinates, selected from full-vector bounds.
    ///
    /// # Panics
    /// Panics if `full_bounds` does not match the parameter count.
    pub fn active_bounds(&self, full_bounds: &Bounds) -> Bounds {
        assert_eq!(
            full_bounds.dim(),
            self.parameters.len(),
            "bounds must cover the full parameter vector"
        );
        full_bounds.select(&self.active_indices())
    }

    /// Builds the full parameter vector with `active` written into the
    /// active ranges.
    ///
    /// # Panics
    /// Panics if `active.len() != self.dim()`.
    pub fn expand(&self, active: &[f64]) -> Vec<f64> {
        let mut full = self.parameters.clone();
        self.scatter(active, &mut full);
        full
    }

    /// Writes `active` into the stored parameter vector.
    ///
    /// # Panics
    /// Panics if `active.len() != self.dim()`.
    pub fn commit(&mut self, active: &[f64]) {
        let mut full = std::mem::take(&mut self.parameters);
        self.scatter(active, &mut full);
        self.parameters = full;
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn into_inner(self) -> O {
        self.inner
    }

    fn scatter(&self, active: &[f64], full: &mut [f64]) {
        assert_eq!(active.len(), self.dim(), "active dimension mismatch");

        let mut offset = 0;
        for r in &self.ranges {
            full[r.indices()].copy_from_slice(&active[offset..offset + r.len()]);
            offset += r.len();
        }

        if let Some(bounds) = &self.clamp {
            let indices = self.active_indices();
            let mut values: Vec<f64> = indices.iter().map(|&i| full[i]).collect();
            bounds.clamp(&mut values);
            for (&i, v) in indices.iter().zip(values) {
                full[i] = v;
            }
        }
    }

    fn gather(&self, full: &[f64], active: &mut [f64]) {
        let mut offset = 0;
        for r in &self.ranges {
            active[offset..offset + r.len()].copy_from_slice(&full[r.indices()]);
            offset += r.len();
        }
    }
}

impl<O: Objective> Objective for RangedObjective<O> {
    type Error = O::Error;

    fn fitness(&self, point: &[f64], iteration: usize) -> Result<f64, Self::Error> {
        let full = self.expand(point);
        self.inner.fitness(&full, iteration)
    }

    fn does_normalize(&self) -> bool {
        self.inner.does_normalize()
    }
}

impl<O: DifferentiableObjective> DifferentiableObjective for RangedObjective<O> {
    fn gradient(
        &self,
        point: &[f64],
        gradient: &mut [f64],
        iteration: usize,
    ) -> Result<f64, Self::Error> {
        let full = self.expand(point);
        let mut full_gradient = vec![0.0; full.len()];
        let energy = self.inner.gradient(&full, &mut full_gradient, iteration)?;
        self.gather(&full_gradient, gradient);
        Ok(energy)
    }
}
