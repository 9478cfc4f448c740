//! Core objective traits.

/// A scalar objective over a real-valued point. Lower is better.
///
/// The `iteration` argument is a monotonically increasing hint supplied by
/// the calling adapter (0 for the first evaluation of a run). Objectives
/// may use it for logging or caching; they must not rely on it for
/// correctness.
///
/// # Errors
///
/// Evaluation failures are reported through the associated `Error` type.
/// Adapters never inspect or recover from these errors; they are returned
/// to the external optimizer unchanged.
///
/// # Examples
///
/// ```
/// use u_locopt::objective::Objective;
///
/// struct Sphere;
///
/// impl Objective for Sphere {
///     type Error = std::convert::Infallible;
///
///     fn fitness(&self, point: &[f64], _iteration: usize) -> Result<f64, Self::Error> {
///         Ok(point.iter().map(|x| x * x).sum())
///     }
/// }
///
/// assert_eq!(Sphere.fitness(&[1.0, 2.0], 0).unwrap(), 5.0);
/// ```
pub trait Objective {
    /// Error raised by a failed evaluation.
    type Error;

    /// Evaluates the objective at `point` (physical coordinates).
    fn fitness(&self, point: &[f64], iteration: usize) -> Result<f64, Self::Error>;

    /// Whether adapters should present this objective to the optimizer in
    /// normalized `[0, 1]` coordinates.
    ///
    /// When `false` (the default), adapters pass points through unchanged
    /// and never touch the bounds.
    fn does_normalize(&self) -> bool {
        false
    }
}

/// An objective that also provides its gradient.
pub trait DifferentiableObjective: Objective {
    /// Writes the gradient at `point` into `gradient` and returns the
    /// objective value at the same point.
    ///
    /// `gradient` has the same length as `point`.
    fn gradient(
        &self,
        point: &[f64],
        gradient: &mut [f64],
        iteration: usize,
    ) -> Result<f64, Self::Error>;
}

impl<O: Objective + ?Sized> Objective for &O {
    type Error = O::Error;

    fn fitness(&self, point: &[f64], iteration: usize) -> Result<f64, Self::Error> {
        (**self).fitness(point, iteration)
    }

    fn does_normalize(&self) -> bool {
        (**self).does_normalize()
    }
}

impl<O: DifferentiableObjective + ?Sized> DifferentiableObjective for &O {
    fn gradient(
        &self,
        point: &[f64],
        gradient: &mut [f64],
        iteration: usize,
    ) -> Result<f64, Self::Error> {
        (**self).gradient(point, gradient, iteration)
    }
}
