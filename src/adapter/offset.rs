//! `(n, offset-indexed params) -> energy` adapter for legacy routines.

use super::eval::{EvalCore, PointMapping};
use super::types::OffsetFunction;
use crate::bounds::Bounds;
use crate::objective::Objective;
use crate::stats::Statistics;

/// Index offset of ALGOL/Fortran-derived routines.
pub const ONE_BASED: usize = 1;

/// Exposes an [`Objective`] to optimizers that pass their parameter arrays
/// with a leading index offset, e.g. `x[1..=n]` in a buffer of length
/// `n + 1`.
///
/// The relevant slice is copied into a zero-based work buffer before it is
/// handed to [`Objective::fitness`].
///
/// # Examples
///
/// ```
/// use u_locopt::adapter::OffsetAdapter;
/// use u_locopt::objective::Objective;
///
/// struct Sum;
/// impl Objective for Sum {
///     type Error = std::convert::Infallible;
///     fn fitness(&self, p: &[f64], _: usize) -> Result<f64, Self::Error> {
///         Ok(p.iter().sum())
///     }
/// }
///
/// let objective = Sum;
/// let mut adapter = OffsetAdapter::new(&objective);
/// let raw = OffsetAdapter::<Sum>::pack(&[1.0, 2.0], 1);
/// assert_eq!(raw, vec![0.0, 1.0, 2.0]);
/// assert_eq!(adapter.evaluate(2, &raw).unwrap(), 3.0);
/// ```
pub struct OffsetAdapter<'a, O: ?Sized> {
    core: EvalCore<'a, O>,
    offset: usize,
    work: Vec<f64>,
    last_energy: Option<f64>,
}

impl<'a, O: Objective + ?Sized> OffsetAdapter<'a, O> {
    /// Creates a one-based adapter that passes points through unchanged.
    pub fn new(objective: &'a O) -> Self {
        Self::with_mapping(objective, PointMapping::Identity)
    }

    /// Creates a one-based adapter that normalizes against `bounds` if the
    /// objective asks for it.
    pub fn with_bounds(objective: &'a O, bounds: Bounds) -> Self {
        let mapping = PointMapping::for_objective(objective, bounds);
        Self::with_mapping(objective, mapping)
    }

    pub fn with_mapping(objective: &'a O, mapping: PointMapping) -> Self {
        Self {
            core: EvalCore::new(objective, mapping),
            offset: ONE_BASED,
            work: Vec::new(),
            last_energy: None,
        }
    }

    /// Sets the index of the first coordinate in the raw buffer.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Counts every evaluation as a fitness evaluation in `stats`.
    pub fn with_statistics(mut self, stats: &'a Statistics) -> Self {
        self.core.set_statistics(stats);
        self
    }

    /// Evaluates the objective at `raw[offset..offset + n]`.
    ///
    /// # Panics
    /// Panics if `raw` is shorter than `offset + n`.
    pub fn evaluate(&mut self, n: usize, raw: &[f64]) -> Result<f64, O::Error> {
        assert!(
            raw.len() >= self.offset + n,
            "raw buffer of length {} cannot hold {} coordinates at offset {}",
            raw.len(),
            n,
            self.offset
        );

        self.work.clear();
        self.work
            .extend_from_slice(&raw[self.offset..self.offset + n]);
        let energy = self.core.fitness(&self.work)?;
        self.last_energy = Some(energy);
        Ok(energy)
    }

    pub fn offset(&self) -> usize {
        self.offset
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

    /// Lays out a zero-based point in an offset buffer of length
    /// `offset + point.len()`; leading slots are zero.
    pub fn pack(point: &[f64], offset: usize) -> Vec<f64> {
        let mut raw = vec![0.0; offset + point.len()];
        raw[offset..].copy_from_slice(point);
        raw
    }

    /// Extracts `n` zero-based coordinates from an offset buffer.
    ///
    /// # Panics
    /// Panics if `raw` is shorter than `offset + n`.
    pub fn unpack(raw: &[f64], n: usize, offset: usize) -> Vec<f64> {
        raw[offset..offset + n].to_vec()
    }
}

impl<O: Objective + ?Sized> OffsetFunction for OffsetAdapter<'_, O> {
    type Error = O::Error;

    fn value_at(&mut self, n: usize, raw: &[f64]) -> Result<f64, Self::Error> {
        self.evaluate(n, raw)
    }
}
