//! Evenly spaced price ladders.

use crate::error::CoreError;

/// Candidate price points for one asset, from zero to its maximum price.
///
/// Points are produced by linear interpolation between `0` and `max` with
/// both end points included, so a ladder of `n` points has a step of
/// `max / (n - 1)`.
///
/// # Example
///
/// ```
/// use radar_core::PriceLadder;
///
/// let ladder = PriceLadder::linspace(100.0, 5).unwrap();
/// assert_eq!(ladder.points(), &[0.0, 25.0, 50.0, 75.0, 100.0]);
/// assert_eq!(ladder.step(), 25.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PriceLadder {
    points: Vec<f64>,
}

impl PriceLadder {
    /// Build a ladder of `n_tick` points spanning `[0, max]`.
    ///
    /// # Errors
    ///
    /// * `CoreError::InvalidInput` - `n_tick < 2`, or `max` not finite and positive
    pub fn linspace(max: f64, n_tick: usize) -> Result<Self, CoreError> {
        if n_tick < 2 {
            return Err(CoreError::invalid_input(format!(
                "price ladder needs at least 2 points, got {}",
                n_tick
            )));
        }
        if !max.is_finite() || max <= 0.0 {
            return Err(CoreError::invalid_input(format!(
                "price ladder maximum must be positive, got {}",
                max
            )));
        }

        let last = n_tick - 1;
        let points = (0..n_tick)
            .map(|i| {
                if i == last {
                    max
                } else {
                    max * i as f64 / last as f64
                }
            })
            .collect();

        Ok(Self { points })
    }

    /// All price points, ascending.
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed ladder.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Price at `index`, if in range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.points.get(index).copied()
    }

    /// Top of the ladder.
    #[inline]
    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Distance between adjacent points.
    #[inline]
    pub fn step(&self) -> f64 {
        self.points[1] - self.points[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_includes_both_ends() {
        let ladder = PriceLadder::linspace(200.0, 5).unwrap();
        assert_eq!(ladder.points(), &[0.0, 50.0, 100.0, 150.0, 200.0]);
        assert_eq!(ladder.len(), 5);
        assert_eq!(ladder.max(), 200.0);
        assert_eq!(ladder.get(0), Some(0.0));
        assert_eq!(ladder.get(5), None);
    }

    #[test]
    fn test_linspace_last_point_is_exact() {
        let ladder = PriceLadder::linspace(0.3, 4).unwrap();
        assert_eq!(ladder.max(), 0.3);
        assert_relative_eq!(ladder.step(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_linspace_two_points() {
        let ladder = PriceLadder::linspace(7.5, 2).unwrap();
        assert_eq!(ladder.points(), &[0.0, 7.5]);
    }

    #[test]
    fn test_linspace_rejects_bad_input() {
        assert!(PriceLadder::linspace(100.0, 1).is_err());
        assert!(PriceLadder::linspace(100.0, 0).is_err());
        assert!(PriceLadder::linspace(0.0, 5).is_err());
        assert!(PriceLadder::linspace(-1.0, 5).is_err());
        assert!(PriceLadder::linspace(f64::NAN, 5).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn test_ladder_is_evenly_spaced(
                max in 1e-3_f64..1e7,
                n_tick in 2_usize..40
            ) {
                let ladder = PriceLadder::linspace(max, n_tick).unwrap();
                let step = max / (n_tick - 1) as f64;
                prop_assert_eq!(ladder.len(), n_tick);
                prop_assert_eq!(ladder.points()[0], 0.0);
                prop_assert_eq!(ladder.max(), max);
                for pair in ladder.points().windows(2) {
                    prop_assert!(((pair[1] - pair[0]) - step).abs() <= 1e-9 * max);
                }
            }
        }
    }
}
