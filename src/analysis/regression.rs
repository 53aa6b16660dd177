//! Ordinary least-squares regression of ciey on ciex over a coordinate
//! cloud, with the usual linear-model inference statistics.

use log::debug;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::data::filter::{filtered_indices, BinSelection};
use crate::data::model::{Coordinates, Dataset, Point};

// ---------------------------------------------------------------------------
// RegressionResult
// ---------------------------------------------------------------------------

/// OLS fit of y on x plus inference statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Two-sided p-value for the slope under the standard linear-model null
    /// (Student t with n − 2 degrees of freedom). NaN for n = 2, where the
    /// fit has zero residual degrees of freedom.
    pub p_value: f64,
    pub std_err: f64,
    /// Residual sum of squares Σ(y − ŷ)².
    pub rss: f64,
}

// ---------------------------------------------------------------------------
// Fitting
// ---------------------------------------------------------------------------

/// Fit y on x. Returns `None` for fewer than two points or a degenerate
/// cloud with zero x-variance (vertical line), both routine outcomes the
/// caller omits from its output rather than failing on.
///
/// Recentering is the caller's concern: apply the shared offset to every
/// point before calling, or pass raw points. The fit is identical either way
/// up to the intercept.
pub fn regress(points: &[Point]) -> Option<RegressionResult> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / nf;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / nf;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for p in points {
        let dx = p.x - mean_x;
        let dy = p.y - mean_y;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
        ss_xy += dx * dy;
    }
    if ss_xx == 0.0 {
        return None;
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    // r is 0 by convention when y has no variance (horizontal cloud).
    let r = if ss_yy == 0.0 {
        0.0
    } else {
        ss_xy / (ss_xx * ss_yy).sqrt()
    };
    let r_squared = r * r;

    let rss = (ss_yy - slope * ss_xy).max(0.0);
    let df = nf - 2.0;
    let std_err = if df > 0.0 {
        (rss / df / ss_xx).sqrt()
    } else {
        0.0
    };

    let p_value = slope_p_value(r, df);

    Some(RegressionResult {
        slope,
        intercept,
        r_squared,
        p_value,
        std_err,
        rss,
    })
}

/// Two-sided p-value for the slope via the t-statistic
/// t = r·√(df / (1 − r²)).
fn slope_p_value(r: f64, df: f64) -> f64 {
    if df < 1.0 {
        return f64::NAN;
    }
    let one_minus_r2 = 1.0 - r * r;
    if one_minus_r2 <= f64::EPSILON {
        // Exact fit: infinite t-statistic.
        return 0.0;
    }
    let t = r * (df / one_minus_r2).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * dist.sf(t.abs()),
        Err(_) => f64::NAN,
    }
}

/// Per-dataset regression over the bin-code-selected rows, in dataset order.
/// Datasets with fewer than two selected rows (or a degenerate cloud) are
/// skipped, not reported as errors.
pub fn regress_datasets(
    datasets: &[Dataset],
    selected_bin_codes: &BinSelection,
    coordinates: Coordinates,
) -> Vec<(String, RegressionResult)> {
    datasets
        .iter()
        .filter_map(|ds| {
            let points: Vec<Point> = filtered_indices(ds, selected_bin_codes)
                .into_iter()
                .map(|i| coordinates.resolve(ds.rows[i].point()))
                .collect();
            let result = regress(&points);
            if result.is_none() {
                debug!(
                    "dataset '{}': {} selected points, regression skipped",
                    ds.name,
                    points.len()
                );
            }
            result.map(|r| (ds.name.clone(), r))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::model::{PositionKey, Row};
    use crate::offset::Offset;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&c| Point::from(c)).collect()
    }

    #[test]
    fn collinear_points_fit_exactly() {
        let result = regress(&points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])).unwrap();
        assert_relative_eq!(result.slope, 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.intercept, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.r_squared, 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.rss, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.p_value, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn known_fit_statistics() {
        // Hand-computed reference for this cloud: ss_xx = 10, ss_yy = 6,
        // ss_xy = 6, so slope 0.6, intercept 2.2, r² 0.6, rss 2.4,
        // stderr √(2.4/3/10) = 0.2828427, and t = 2.1213203 on 3 df gives a
        // two-sided p of 0.1240286 (closed-form t CDF for ν = 3).
        let result =
            regress(&points(&[(1.0, 2.0), (2.0, 4.0), (3.0, 5.0), (4.0, 4.0), (5.0, 5.0)]))
                .unwrap();
        assert_relative_eq!(result.slope, 0.6, epsilon = 1e-12);
        assert_relative_eq!(result.intercept, 2.2, epsilon = 1e-12);
        assert_relative_eq!(result.r_squared, 0.6, epsilon = 1e-12);
        assert_relative_eq!(result.std_err, 0.282842712474619, epsilon = 1e-9);
        assert_relative_eq!(result.p_value, 0.1240286, epsilon = 1e-4);
        assert_relative_eq!(result.rss, 2.4, epsilon = 1e-12);
    }

    #[test]
    fn fewer_than_two_points_is_skipped() {
        assert!(regress(&[]).is_none());
        assert!(regress(&points(&[(1.0, 1.0)])).is_none());
    }

    #[test]
    fn zero_x_variance_is_skipped() {
        assert!(regress(&points(&[(1.0, 1.0), (1.0, 2.0), (1.0, 3.0)])).is_none());
    }

    #[test]
    fn two_points_have_nan_p_value() {
        let result = regress(&points(&[(0.0, 0.0), (1.0, 2.0)])).unwrap();
        assert_relative_eq!(result.slope, 2.0, epsilon = 1e-12);
        assert!(result.p_value.is_nan());
    }

    #[test]
    fn shift_moves_only_the_intercept() {
        let raw = points(&[(0.27, 0.26), (0.28, 0.262), (0.29, 0.263)]);
        let offset = Offset::new(0.001, -0.002);
        let shifted: Vec<Point> = raw.iter().map(|p| offset.apply(*p)).collect();

        let a = regress(&raw).unwrap();
        let b = regress(&shifted).unwrap();
        assert_relative_eq!(a.slope, b.slope, epsilon = 1e-9);
        assert_relative_eq!(a.r_squared, b.r_squared, epsilon = 1e-9);
        assert_relative_eq!(
            b.intercept,
            a.intercept - 0.002 - a.slope * 0.001,
            epsilon = 1e-9
        );
    }

    #[test]
    fn per_dataset_wrapper_skips_thin_datasets() {
        let row = |x: f64, y: f64| Row {
            pos: PositionKey::new(0, 0),
            ciex: x,
            ciey: y,
            bin_code: "DK33".to_string(),
            peak_wavelength: None,
            luminous_flux: None,
            forward_voltage: None,
        };
        let full = Dataset::new("full", vec![row(0.27, 0.26), row(0.28, 0.261), row(0.29, 0.263)]);
        let thin = Dataset::new("thin", vec![row(0.27, 0.26)]);
        let selected: BinSelection = ["DK33".to_string()].into();

        let results = regress_datasets(&[full, thin], &selected, Coordinates::Raw);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, "full");
    }
}
