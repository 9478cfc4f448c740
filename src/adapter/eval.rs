//! Shared evaluation core: point mapping, iteration counting, best tracking.

use crate::bounds::Bounds;
use crate::objective::{DifferentiableObjective, Objective};
use crate::stats::Statistics;
use tracing::trace;

/// How optimizer-space points relate to the objective's physical space.
#[derive(Debug, Clone, PartialEq)]
pub enum PointMapping {
    /// The optimizer works in physical coordinates.
    Identity,
    /// The optimizer works in the unit hypercube of these bounds.
    Normalized(Bounds),
}

impl PointMapping {
    /// Picks [`Normalized`](Self::Normalized) if the objective asks for
    /// normalization, [`Identity`](Self::Identity) otherwise.
    pub fn for_objective<O: Objective + ?Sized>(objective: &O, bounds: Bounds) -> Self {
        if objective.does_normalize() {
            PointMapping::Normalized(bounds)
        } else {
            PointMapping::Identity
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, PointMapping::Identity)
    }

    /// Converts an optimizer-space point to physical space, reusing `out`.
    pub fn to_physical_into(&self, point: &[f64], out: &mut Vec<f64>) {
        out.clear();
        out.resize(point.len(), 0.0);
        match self {
            PointMapping::Identity => out.copy_from_slice(point),
            PointMapping::Normalized(bounds) => bounds.denormalize_into(point, out),
        }
    }

    /// Converts an optimizer-space point to physical space.
    pub fn to_physical(&self, point: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(point.len());
        self.to_physical_into(point, &mut out);
        out
    }

    /// Converts a physical point (e.g. a starting guess) to optimizer space.
    pub fn to_optimizer(&self, physical: &[f64]) -> Vec<f64> {
        match self {
            PointMapping::Identity => physical.to_vec(),
            PointMapping::Normalized(bounds) => bounds.normalize(physical),
        }
    }

    /// Rescales a physical-space gradient into optimizer space in place.
    ///
    /// With `x = u * (upper - lower) + lower`, `df/du = df/dx * (upper - lower)`.
    pub fn gradient_to_optimizer(&self, gradient: &mut [f64]) {
        if let PointMapping::Normalized(bounds) = self {
            for (i, g) in gradient.iter_mut().enumerate() {
                *g *= bounds.width(i);
            }
        }
    }
}

/// Tracks the lowest energy seen and the point that produced it.
///
/// Only strict improvements replace the current best, so ties keep the
/// first point that reached the minimum.
#[derive(Debug, Clone)]
pub struct BestTracker {
    point: Option<Vec<f64>>,
    energy: f64,
}

impl Default for BestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BestTracker {
    pub fn new() -> Self {
        Self {
            point: None,
            energy: f64::INFINITY,
        }
    }

    /// Records one evaluation. Returns `true` if it became the new best.
    ///
    /// # Panics
    /// Panics if `point` changes dimension between calls.
    pub fn observe(&mut self, point: &[f64], energy: f64) -> bool {
        let best = self.point.get_or_insert_with(|| vec![0.0; point.len()]);
        if energy < self.energy {
            best.copy_from_slice(point);
            self.energy = energy;
            true
        } else {
            false
        }
    }

    /// Lowest energy seen, `+inf` before any finite evaluation.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Point of the lowest energy, `None` until one has been recorded.
    pub fn point(&self) -> Option<&[f64]> {
        if self.energy < f64::INFINITY {
            self.point.as_deref()
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.point = None;
        self.energy = f64::INFINITY;
    }
}

/// State shared by every adapter: the objective, the mapping, and the
/// iteration counter.
pub(crate) struct EvalCore<'a, O: ?Sized> {
    objective: &'a O,
    mapping: PointMapping,
    stats: Option<&'a Statistics>,
    iteration: usize,
    physical: Vec<f64>,
}

impl<'a, O: Objective + ?Sized> EvalCore<'a, O> {
    pub(crate) fn new(objective: &'a O, mapping: PointMapping) -> Self {
        Self {
            objective,
            mapping,
            stats: None,
            iteration: 0,
            physical: Vec::new(),
        }
    }

    pub(crate) fn set_statistics(&mut self, stats: &'a Statistics) {
        self.stats = Some(stats);
    }

    pub(crate) fn iterations(&self) -> usize {
        self.iteration
    }

    pub(crate) fn mapping(&self) -> &PointMapping {
        &self.mapping
    }

    pub(crate) fn objective(&self) -> &'a O {
        self.objective
    }

    /// Claims the next iteration index and maps `point` into the physical
    /// work buffer.
    fn advance(&mut self, point: &[f64]) -> usize {
        let iteration = self.iteration;
        self.iteration += 1;
        self.mapping.to_physical_into(point, &mut self.physical);
        iteration
    }

    pub(crate) fn fitness(&mut self, point: &[f64]) -> Result<f64, O::Error> {
        let iteration = self.advance(point);
        if let Some(stats) = self.stats {
            stats.increment_fitness_evals();
        }

        let energy = self.objective.fitness(&self.physical, iteration)?;
        trace!(iteration, energy, "fitness evaluated");
        Ok(energy)
    }
}

impl<O: DifferentiableObjective + ?Sized> EvalCore<'_, O> {
    pub(crate) fn gradient(&mut self, point: &[f64], gradient: &mut [f64]) -> Result<f64, O::Error> {
        let iteration = self.advance(point);
        if let Some(stats) = self.stats {
            stats.increment_gradient_evals();
        }

        let energy = self
            .objective
            .gradient(&self.physical, gradient, iteration)?;
        self.mapping.gradient_to_optimizer(gradient);
        trace!(iteration, energy, "gradient evaluated");
        Ok(energy)
    }
}
