//! `point -> gradient` adapter.

use super::eval::{EvalCore, PointMapping};
use super::types::GradientFunction;
use crate::bounds::Bounds;
use crate::objective::DifferentiableObjective;
use crate::stats::Statistics;

/// Exposes a [`DifferentiableObjective`] as a gradient-only function.
///
/// Intended for optimizers that take separate value and gradient callbacks;
/// pair it with a [`ScalarAdapter`](super::ScalarAdapter) for the value
/// side. Convergence tracking is left to the optimizer, so no best point is
/// kept; the energy computed alongside the most recent gradient is
/// available through [`last_energy`](Self::last_energy).
///
/// When the mapping normalizes, the returned gradient is expressed in
/// normalized coordinates.
pub struct GradientAdapter<'a, O: ?Sized> {
    core: EvalCore<'a, O>,
    last_energy: Option<f64>,
}

impl<'a, O: DifferentiableObjective + ?Sized> GradientAdapter<'a, O> {
    /// Creates an adapter that passes points through unchanged.
    pub fn new(objective: &'a O) -> Self {
        Self::with_mapping(objective, PointMapping::Identity)
    }

    /// Creates an adapter that normalizes against `bounds` if the objective
    /// asks for it.
    pub fn with_bounds(objective: &'a O, bounds: Bounds) -> Self {
        let mapping = PointMapping::for_objective(objective, bounds);
        Self::with_mapping(objective, mapping)
    }

    pub fn with_mapping(objective: &'a O, mapping: PointMapping) -> Self {
        Self {
            core: EvalCore::new(objective, mapping),
            last_energy: None,
        }
    }

    /// Counts every evaluation as a gradient evaluation in `stats`.
    pub fn with_statistics(mut self, stats: &'a Statistics) -> Self {
        self.core.set_statistics(stats);
        self
    }

    /// Computes the gradient at an optimizer-space point.
    pub fn evaluate(&mut self, point: &[f64]) -> Result<Vec<f64>, O::Error> {
        let mut gradient = vec![0.0; point.len()];
        let energy = self.core.gradient(point, &mut gradient)?;
        self.last_energy = Some(energy);
        Ok(gradient)
    }

    /// Energy from the most recent successful evaluation.
    pub fn last_energy(&self) -> Option<f64> {
        self.last_energy
    }

    /// Number of evaluations so far.
    pub fn iterations(&self) -> usize {
        self.core.iterations()
    }

    pub fn mapping(&self) -> &PointMapping {
        self.core.mapping()
    }
}

impl<O: DifferentiableObjective + ?Sized> GradientFunction for GradientAdapter<'_, O> {
    type Error = O::Error;

    fn gradient_at(&mut self, point: &[f64]) -> Result<Vec<f64>, Self::Error> {
        self.evaluate(point)
    }
}
