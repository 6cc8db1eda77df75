//! Key-rate ladders.

use crate::error::CurveResult;
use crate::yield_curve::YieldCurve;

/// One rung of a key-rate ladder.
#[derive(Debug, Clone)]
pub struct LadderPoint {
    /// Tenor label of the bumped point.
    pub tenor: String,
    /// Curve with only that point bumped.
    pub curve: YieldCurve,
}

/// Bumps every point of `curve` by `bp` basis points, one at a time.
///
/// Calibrated curves re-bootstrap once per instrument, so with the
/// `parallel` feature the rungs are built on the rayon pool.
#[cfg(feature = "parallel")]
pub fn key_rate_ladder(curve: &YieldCurve, bp: f64) -> CurveResult<Vec<LadderPoint>> {
    use rayon::prelude::*;

    (0..curve.bump_points())
        .into_par_iter()
        .map(|index| rung(curve, index, bp))
        .collect()
}

/// Bumps every point of `curve` by `bp` basis points, one at a time.
#[cfg(not(feature = "parallel"))]
pub fn key_rate_ladder(curve: &YieldCurve, bp: f64) -> CurveResult<Vec<LadderPoint>> {
    (0..curve.bump_points())
        .map(|index| rung(curve, index, bp))
        .collect()
}

fn rung(curve: &YieldCurve, index: usize, bp: f64) -> CurveResult<LadderPoint> {
    Ok(LadderPoint {
        tenor: curve.key_tenors()[index].clone(),
        curve: curve.bump_key_rate(index, bp)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::YieldCurveBuilder;
    use approx::assert_relative_eq;
    use curvekit_core::types::Date;

    #[test]
    fn test_ladder_bumps_one_point_per_rung() {
        let r = Date::from_ymd(2025, 1, 2).unwrap();
        let curve = YieldCurveBuilder::new("ladder", r)
            .from_points(vec![
                (r, 0.02),
                (r.add_days(365), 0.025),
                (r.add_days(730), 0.03),
            ])
            .unwrap();

        let ladder = key_rate_ladder(&curve, 1.0).unwrap();
        assert_eq!(ladder.len(), 3);
        assert_eq!(ladder[1].tenor, "365D");

        for (i, point) in ladder.iter().enumerate() {
            for (j, ((_, bumped), (_, base))) in point
                .curve
                .key_points()
                .iter()
                .zip(curve.key_points())
                .enumerate()
            {
                let expected = if i == j { base + 1e-4 } else { *base };
                assert_relative_eq!(*bumped, expected, epsilon = 1e-15);
            }
        }
    }
}
