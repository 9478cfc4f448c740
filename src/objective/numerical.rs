//! Finite-difference gradients for fitness-only objectives.

use super::types::{DifferentiableObjective, Objective};

/// Finite-difference stencil.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stencil {
    /// `(f(x + h) - f(x)) / h`: one extra evaluation per dimension.
    Forward,
    /// `(f(x + h) - f(x - h)) / 2h`: two extra evaluations per dimension.
    #[default]
    Central,
}

/// Adds a numerical gradient to any [`Objective`].
///
/// The step for dimension `i` is `1000 * sqrt(eps) * x[i]`, falling back to
/// `sqrt(eps)` when `x[i] == 0`. Every probe is forwarded to the wrapped
/// objective with the same iteration hint as the gradient request.
#[derive(Debug, Clone)]
pub struct NumericalGradient<O> {
    inner: O,
    stencil: Stencil,
}

impl<O> NumericalGradient<O> {
    /// Wraps `inner` using the central stencil.
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            stencil: Stencil::default(),
        }
    }

    pub fn with_stencil(mut self, stencil: Stencil) -> Self {
        self.stencil = stencil;
        self
    }

    pub fn stencil(&self) -> Stencil {
        self.stencil
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

fn step_size(x: f64) -> f64 {
    let root_eps = f64::EPSILON.sqrt();
    let h = 1000.0 * root_eps * x;
    if h == 0.0 {
        root_eps
    } else {
        h
    }
}

impl<O: Objective> Objective for NumericalGradient<O> {
    type Error = O::Error;

    fn fitness(&self, point: &[f64], iteration: usize) -> Result<f64, Self::Error> {
        self.inner.fitness(point, iteration)
    }

    fn does_normalize(&self) -> bool {
        self.inner.does_normalize()
    }
}

impl<O: Objective> DifferentiableObjective for NumericalGradient<O> {
    fn gradient(
        &self,
        point: &[f64],
        gradient: &mut [f64],
        iteration: usize,
    ) -> Result<f64, Self::Error> {
        assert_eq!(point.len(), gradient.len(), "gradient dimension mismatch");

        let energy = self.inner.fitness(point, iteration)?;
        let mut probe = point.to_vec();

        for (i, g) in gradient.iter_mut().enumerate() {
            let x = point[i];
            let h = step_size(x);

            probe[i] = x + h;
            let forward = self.inner.fitness(&probe, iteration)?;

            *g = match self.stencil {
                Stencil::Forward => (forward - energy) / h,
                Stencil::Central => {
                    probe[i] = x - h;
                    let backward = self.inner.fitness(&probe, iteration)?;
                    (forward - backward) / (2.0 * h)
                }
            };

            probe[i] = x;
        }

        Ok(energy)
    }
}
