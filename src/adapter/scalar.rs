//! `point -> energy` adapter with best-point tracking.

use super::eval::{BestTracker, EvalCore, PointMapping};
use super::types::ScalarFunction;
use crate::bounds::Bounds;
use crate::objective::Objective;
use crate::stats::Statistics;

/// Exposes an [`Objective`] as a scalar function for derivative-free
/// optimizers.
///
/// Every call forwards the (mapped) point and the current iteration index
/// to [`Objective::fitness`], then advances the iteration counter. The
/// adapter remembers the best energy and the optimizer-space point that
/// produced it, because many optimizers do not guarantee that their final
/// iterate is the best one they evaluated.
///
/// # Examples
///
/// ```
/// use u_locopt::adapter::ScalarAdapter;
/// use u_locopt::objective::Objective;
///
/// struct Parabola;
/// impl Objective for Parabola {
///     type Error = std::convert::Infallible;
///     fn fitness(&self, p: &[f64], _: usize) -> Result<f64, Self::Error> {
///         Ok((p[0] - 1.0).powi(2))
///     }
/// }
///
/// let objective = Parabola;
/// let mut adapter = ScalarAdapter::new(&objective);
/// for x in [3.0, 1.5, 0.0] {
///     adapter.evaluate(&[x]).unwrap();
/// }
/// assert_eq!(adapter.iterations(), 3);
/// assert_eq!(adapter.best_point(), Some(&[1.5][..]));
/// ```
pub struct ScalarAdapter<'a, O: ?Sized> {
    core: EvalCore<'a, O>,
    best: BestTracker,
}

impl<'a, O: Objective + ?Sized> ScalarAdapter<'a, O> {
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

    /// Creates an adapter with an explicit mapping.
    pub fn with_mapping(objective: &'a O, mapping: PointMapping) -> Self {
        Self {
            core: EvalCore::new(objective, mapping),
            best: BestTracker::new(),
        }
    }

    /// Counts every evaluation as a fitness evaluation in `stats`.
    pub fn with_statistics(mut self, stats: &'a Statistics) -> Self {
        self.core.set_statistics(stats);
        self
    }

    /// Evaluates the objective at an optimizer-space point.
    pub fn evaluate(&mut self, point: &[f64]) -> Result<f64, O::Error> {
        let energy = self.core.fitness(point)?;
        self.best.observe(point, energy);
        Ok(energy)
    }

    /// Number of evaluations so far.
    pub fn iterations(&self) -> usize {
        self.core.iterations()
    }

    /// Lowest energy seen (`+inf` before the first evaluation).
    pub fn best_energy(&self) -> f64 {
        self.best.energy()
    }

    /// Optimizer-space point of the lowest energy.
    pub fn best_point(&self) -> Option<&[f64]> {
        self.best.point()
    }

    /// Physical-space point of the lowest energy.
    pub fn best_physical_point(&self) -> Option<Vec<f64>> {
        self.best.point().map(|p| self.core.mapping().to_physical(p))
    }

    /// Converts a physical starting point into the optimizer's space.
    pub fn start_point(&self, physical: &[f64]) -> Vec<f64> {
        self.core.mapping().to_optimizer(physical)
    }

    pub fn mapping(&self) -> &PointMapping {
        self.core.mapping()
    }

    pub fn objective(&self) -> &'a O {
        self.core.objective()
    }
}

impl<O: Objective + ?Sized> ScalarFunction for ScalarAdapter<'_, O> {
    type Error = O::Error;

    fn value(&mut self, point: &[f64]) -> Result<f64, Self::Error> {
        self.evaluate(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Returns a scripted energy sequence and records every call.
    struct Scripted {
        energies: Vec<f64>,
        calls: RefCell<Vec<(Vec<f64>, usize)>>,
        normalize: bool,
    }

    impl Scripted {
        fn new(energies: Vec<f64>) -> Self {
            Self {
                energies,
                calls: RefCell::new(Vec::new()),
                normalize: false,
            }
        }
    }

    impl Objective for Scripted {
        type Error = String;

        fn fitness(&self, point: &[f64], iteration: usize) -> Result<f64, String> {
            self.calls.borrow_mut().push((point.to_vec(), iteration));
            self.energies
                .get(iteration)
                .copied()
                .ok_or_else(|| format!("no energy scripted for iteration {iteration}"))
        }

        fn does_normalize(&self) -> bool {
            self.normalize
        }
    }

    #[test]
    fn test_best_is_first_minimum() {
        let obj = Scripted::new(vec![3.0, 1.0, 4.0, 1.0]);
        let mut adapter = ScalarAdapter::new(&obj);

        let points = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let energies: Vec<f64> = points
            .iter()
            .map(|p| adapter.evaluate(p).unwrap())
            .collect();

        assert_eq!(energies, vec![3.0, 1.0, 4.0, 1.0]);
        assert_eq!(adapter.best_energy(), 1.0);
        assert_eq!(adapter.best_point(), Some(&[1.0, 1.0][..]));
        assert_eq!(adapter.iterations(), 4);
    }

    #[test]
    fn test_iteration_hint_is_sequential() {
        let obj = Scripted::new(vec![5.0; 5]);
        let mut adapter = ScalarAdapter::new(&obj);
        for _ in 0..5 {
            adapter.evaluate(&[0.0]).unwrap();
        }
        let hints: Vec<usize> = obj.calls.borrow().iter().map(|(_, it)| *it).collect();
        assert_eq!(hints, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_identity_when_objective_does_not_normalize() {
        let obj = Scripted::new(vec![1.0]);
        let bounds = Bounds::new(vec![0.0], vec![10.0]).unwrap();
        let mut adapter = ScalarAdapter::with_bounds(&obj, bounds);

        assert!(adapter.mapping().is_identity());
        adapter.evaluate(&[7.0]).unwrap();
        assert_eq!(obj.calls.borrow()[0].0, vec![7.0]);
    }

    #[test]
    fn test_denormalizes_when_objective_normalizes() {
        let mut obj = Scripted::new(vec![2.0, 1.0]);
        obj.normalize = true;
        let bounds = Bounds::new(vec![0.0, -5.0], vec![10.0, 5.0]).unwrap();
        let mut adapter = ScalarAdapter::with_bounds(&obj, bounds);

        let start = adapter.start_point(&[5.0, 0.0]);
        assert_eq!(start, vec![0.5, 0.5]);

        adapter.evaluate(&start).unwrap();
        adapter.evaluate(&[0.2, 1.0]).unwrap();

        assert_eq!(obj.calls.borrow()[0].0, vec![5.0, 0.0]);
        assert_eq!(obj.calls.borrow()[1].0, vec![2.0, 5.0]);
        assert_eq!(adapter.best_point(), Some(&[0.2, 1.0][..]));
        assert_eq!(adapter.best_physical_point(), Some(vec![2.0, 5.0]));
    }

    #[test]
    fn test_error_propagates_and_keeps_best() {
        let obj = Scripted::new(vec![2.0]);
        let mut adapter = ScalarAdapter::new(&obj);

        assert_eq!(adapter.evaluate(&[1.0]).unwrap(), 2.0);
        let err = adapter.evaluate(&[9.0]).unwrap_err();
        assert_eq!(err, "no energy scripted for iteration 1");

        assert_eq!(adapter.iterations(), 2);
        assert_eq!(adapter.best_energy(), 2.0);
        assert_eq!(adapter.best_point(), Some(&[1.0][..]));
    }

    #[test]
    fn test_counts_fitness_evaluations() {
        let stats = Statistics::new();
        stats.enable();
        let obj = Scripted::new(vec![1.0, 2.0, 3.0]);
        let mut adapter = ScalarAdapter::new(&obj).with_statistics(&stats);
        for _ in 0..3 {
            adapter.value(&[0.0]).unwrap();
        }
        assert_eq!(stats.total_fitness_evals(), 3);
        assert_eq!(stats.total_gradient_evals(), 0);
    }
}
