//! Triangular key-rate bumps.
//!
//! A [`KeyRateBump`] is addressed by point index rather than by tenor: the
//! full shift lands on the `middle` point and fades linearly in time to zero
//! at the `start` and `end` points. Points outside `[start, end]` are not
//! moved.

use crate::error::{CurveError, CurveResult};

/// Triangular bump over a range of curve points.
///
/// # Example
///
/// ```rust
/// use curvekit_curves::bumping::KeyRateBump;
///
/// let bump = KeyRateBump::new(0, 2, 4, 100.0);
/// let times = [1.0, 2.0, 3.0, 4.0, 5.0];
///
/// assert_eq!(bump.weight(1, &times), 0.5);
/// assert_eq!(bump.weight(2, &times), 1.0);
/// assert_eq!(bump.weight(4, &times), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyRateBump {
    /// First point of the triangle (zero weight).
    pub start: usize,
    /// Peak point (full weight).
    pub middle: usize,
    /// Last point of the triangle (zero weight).
    pub end: usize,
    /// Shift at the peak in basis points.
    pub bp: f64,
}

impl KeyRateBump {
    /// Creates a bump peaking at `middle`.
    #[must_use]
    pub fn new(start: usize, middle: usize, end: usize, bp: f64) -> Self {
        Self {
            start,
            middle,
            end,
            bp,
        }
    }

    /// Bump of a single point.
    #[must_use]
    pub fn single(index: usize, bp: f64) -> Self {
        Self::new(index, index, index, bp)
    }

    /// Shift at the peak as a decimal.
    #[must_use]
    pub fn shift_decimal(&self) -> f64 {
        self.bp * 1e-4
    }

    /// Checks the indices against a curve with `len` bump points.
    pub fn validate(&self, len: usize) -> CurveResult<()> {
        if self.end >= len {
            return Err(CurveError::index_out_of_range(self.end, len));
        }
        if self.start > self.middle || self.middle > self.end {
            return Err(CurveError::construction(format!(
                "key rate bump needs start <= middle <= end, got {} / {} / {}",
                self.start, self.middle, self.end
            )));
        }
        Ok(())
    }

    /// Weight of point `index` given the times of all points.
    #[must_use]
    pub fn weight(&self, index: usize, times: &[f64]) -> f64 {
        let (s, m, e) = (self.start, self.middle, self.end);
        if index == m {
            1.0
        } else if s < index && index < m {
            (times[index] - times[s]) / (times[m] - times[s])
        } else if m < index && index < e {
            (times[e] - times[index]) / (times[e] - times[m])
        } else {
            0.0
        }
    }

    /// Decimal shift of every point.
    #[must_use]
    pub fn shifts(&self, times: &[f64]) -> Vec<f64> {
        (0..times.len())
            .map(|i| self.weight(i, times) * self.shift_decimal())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_triangle_weights() {
        let bump = KeyRateBump::new(0, 2, 4, 100.0);
        let times = [1.0, 2.0, 3.0, 4.0, 5.0];
        let shifts = bump.shifts(&times);

        assert_relative_eq!(shifts[0], 0.0);
        assert_relative_eq!(shifts[1], 0.005, epsilon = 1e-15);
        assert_relative_eq!(shifts[2], 0.01, epsilon = 1e-15);
        assert_relative_eq!(shifts[3], 0.005, epsilon = 1e-15);
        assert_relative_eq!(shifts[4], 0.0);
    }

    #[test]
    fn test_uneven_spacing() {
        let bump = KeyRateBump::new(0, 1, 3, 1.0);
        let times = [0.5, 1.0, 3.0, 11.0];
        assert_relative_eq!(bump.weight(2, &times), 0.8);
    }

    #[test]
    fn test_single_point() {
        let bump = KeyRateBump::single(1, 25.0);
        let times = [1.0, 2.0, 3.0];
        let shifts = bump.shifts(&times);
        assert_eq!(shifts[0], 0.0);
        assert_relative_eq!(shifts[1], 0.0025, epsilon = 1e-15);
        assert_eq!(shifts[2], 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(KeyRateBump::new(0, 1, 2, 1.0).validate(3).is_ok());
        assert!(matches!(
            KeyRateBump::new(0, 1, 3, 1.0).validate(3),
            Err(CurveError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            KeyRateBump::new(2, 1, 2, 1.0).validate(3),
            Err(CurveError::Construction { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_weights_within_unit_interval(
            start in 0usize..4,
            up in 0usize..4,
            down in 0usize..4,
        ) {
            let middle = start + up;
            let end = middle + down;
            let times: Vec<f64> = (0..=end + 1).map(|i| 0.25 + i as f64).collect();
            let bump = KeyRateBump::new(start, middle, end, 1.0);

            for i in 0..times.len() {
                let w = bump.weight(i, &times);
                prop_assert!((0.0..=1.0).contains(&w));
            }
            prop_assert_eq!(bump.weight(middle, &times), 1.0);
        }
    }
}
