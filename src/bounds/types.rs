//! The [`Bounds`] type and its construction errors.

use thiserror::Error;

/// Error returned when a [`Bounds`] cannot be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    /// `lower` and `upper` have different lengths.
    #[error("lower bounds have {lower} entries but upper bounds have {upper}")]
    LengthMismatch { lower: usize, upper: usize },

    /// Zero-dimensional bounds.
    #[error("bounds must have at least one dimension")]
    Empty,

    /// A lower bound exceeds its upper bound.
    #[error("dimension {index}: lower bound {lower} exceeds upper bound {upper}")]
    Inverted { index: usize, lower: f64, upper: f64 },

    /// A bound is NaN or infinite.
    #[error("dimension {index}: bounds must be finite")]
    NonFinite { index: usize },

    /// `upper - lower` overflows to infinity.
    #[error("dimension {index}: interval width overflows")]
    InfiniteWidth { index: usize },

    /// The row layout did not contain exactly two rows.
    #[error("expected 2 bound rows (lower, upper), got {0}")]
    RowCount(usize),
}

/// Per-dimension box bounds `lower[i] <= upper[i]`.
///
/// The dimension is fixed at construction. Degenerate dimensions
/// (`lower[i] == upper[i]`) are allowed and pin that variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBounds"))]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

/// Unchecked wire form of [`Bounds`]; deserialization goes through
/// [`Bounds::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBounds> for Bounds {
    type Error = BoundsError;

    fn try_from(raw: RawBounds) -> Result<Self, BoundsError> {
        Bounds::new(raw.lower, raw.upper)
    }
}

impl Bounds {
    /// Creates bounds from parallel lower/upper sequences.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, BoundsError> {
        if lower.len() != upper.len() {
            return Err(BoundsError::LengthMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(BoundsError::Empty);
        }
        for (index, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(BoundsError::NonFinite { index });
            }
            if lo > hi {
                return Err(BoundsError::Inverted {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
            if !(hi - lo).is_finite() {
                return Err(BoundsError::InfiniteWidth { index });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Creates bounds from the `[2][dim]` row layout used by external
    /// optimizers: row 0 holds the lower bounds, row 1 the upper bounds.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, BoundsError> {
        match rows {
            [lower, upper] => Self::new(lower.clone(), upper.clone()),
            _ => Err(BoundsError::RowCount(rows.len())),
        }
    }

    /// The unit hypercube `[0, 1]^dim`.
    ///
    /// # Panics
    /// Panics if `dim == 0`.
    pub fn unit(dim: usize) -> Self {
        assert!(dim > 0, "bounds must have at least one dimension");
        Self {
            lower: vec![0.0; dim],
            upper: vec![1.0; dim],
        }
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Interval width `upper[i] - lower[i]` of dimension `i`.
    pub fn width(&self, i: usize) -> f64 {
        self.upper[i] - self.lower[i]
    }

    /// Returns the `[lower, upper]` row layout.
    pub fn to_rows(&self) -> [Vec<f64>; 2] {
        [self.lower.clone(), self.upper.clone()]
    }

    /// Whether every component of `point` lies within its interval.
    ///
    /// Returns `false` on a dimension mismatch.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dim()
            && point
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&x, (&lo, &hi))| x >= lo && x <= hi)
    }

    /// Bounds restricted to the given dimensions, in the given order.
    ///
    /// # Panics
    /// Panics if `indices` is empty or any index is out of range.
    pub fn select(&self, indices: &[usize]) -> Self {
        assert!(!indices.is_empty(), "cannot select zero dimensions");
        Self {
            lower: indices.iter().map(|&i| self.lower[i]).collect(),
            upper: indices.iter().map(|&i| self.upper[i]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ok() {
        let b = Bounds::new(vec![-1.0, 0.0], vec![1.0, 0.0]).unwrap();
        assert_eq!(b.dim(), 2);
        assert!((b.width(0) - 2.0).abs() < 1e-15);
        assert_eq!(b.width(1), 0.0);
    }

    #[test]
    fn test_new_length_mismatch() {
        let err = Bounds::new(vec![0.0], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, BoundsError::LengthMismatch { lower: 1, upper: 2 });
    }

    #[test]
    fn test_new_empty() {
        assert_eq!(Bounds::new(vec![], vec![]).unwrap_err(), BoundsError::Empty);
    }

    #[test]
    fn test_new_inverted() {
        let err = Bounds::new(vec![0.0, 3.0], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, BoundsError::Inverted { index: 1, .. }));
    }

    #[test]
    fn test_new_non_finite() {
        let err = Bounds::new(vec![0.0], vec![f64::INFINITY]).unwrap_err();
        assert_eq!(err, BoundsError::NonFinite { index: 0 });
        let err = Bounds::new(vec![f64::NAN], vec![1.0]).unwrap_err();
        assert_eq!(err, BoundsError::NonFinite { index: 0 });
    }

    #[test]
    fn test_new_overflowing_width() {
        let err = Bounds::new(vec![0.0, -1e308], vec![1.0, 1e308]).unwrap_err();
        assert_eq!(err, BoundsError::InfiniteWidth { index: 1 });
        assert!(Bounds::new(vec![-1e307], vec![1e307]).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let b: Bounds = serde_json::from_str(r#"{"lower":[0.0,1.0],"upper":[2.0,3.0]}"#).unwrap();
        assert_eq!(b, Bounds::new(vec![0.0, 1.0], vec![2.0, 3.0]).unwrap());

        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(serde_json::from_str::<Bounds>(&json).unwrap(), b);

        for doc in [
            r#"{"lower":[0.0,0.0],"upper":[1.0]}"#,
            r#"{"lower":[],"upper":[]}"#,
            r#"{"lower":[2.0],"upper":[1.0]}"#,
        ] {
            let err = serde_json::from_str::<Bounds>(doc).unwrap_err();
            assert!(err.to_string().contains("bound"), "{doc}: {err}");
        }
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![vec![0.0, 0.0], vec![10.0, 10.0]];
        let b = Bounds::from_rows(&rows).unwrap();
        assert_eq!(b.lower(), &[0.0, 0.0]);
        assert_eq!(b.upper(), &[10.0, 10.0]);
        assert_eq!(b.to_rows(), [vec![0.0, 0.0], vec![10.0, 10.0]]);

        let err = Bounds::from_rows(&rows[..1]).unwrap_err();
        assert_eq!(err, BoundsError::RowCount(1));
    }

    #[test]
    fn test_contains() {
        let b = Bounds::new(vec![0.0, -1.0], vec![1.0, 1.0]).unwrap();
        assert!(b.contains(&[0.0, 1.0]));
        assert!(!b.contains(&[1.5, 0.0]));
        assert!(!b.contains(&[0.5]));
    }

    #[test]
    fn test_select() {
        let b = Bounds::new(vec![0.0, 1.0, 2.0], vec![10.0, 11.0, 12.0]).unwrap();
        let s = b.select(&[2, 0]);
        assert_eq!(s.lower(), &[2.0, 0.0]);
        assert_eq!(s.upper(), &[12.0, 10.0]);
    }

    #[test]
    fn test_unit() {
        let b = Bounds::unit(3);
        assert_eq!(b.lower(), &[0.0; 3]);
        assert_eq!(b.upper(), &[1.0; 3]);
    }
}
