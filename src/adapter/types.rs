//! Call-shape traits that external optimizer drivers program against.

/// `point -> energy`.
pub trait ScalarFunction {
    type Error;

    fn value(&mut self, point: &[f64]) -> Result<f64, Self::Error>;
}

/// `point -> gradient`.
pub trait GradientFunction {
    type Error;

    fn gradient_at(&mut self, point: &[f64]) -> Result<Vec<f64>, Self::Error>;
}

/// `(n, offset-indexed params) -> energy`.
///
/// `raw` carries the `n` coordinates starting at the implementation's
/// index offset (1 for Fortran/ALGOL-derived routines).
pub trait OffsetFunction {
    type Error;

    fn value_at(&mut self, n: usize, raw: &[f64]) -> Result<f64, Self::Error>;
}
