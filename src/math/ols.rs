//! Straight-line least squares.
//!
//! Every cell of the range sweep fits the transformed isotherm with the same
//! tiny model:
//!
//! ```text
//! minimize Σ (y_i - (intercept + slope·x_i))^2
//! ```
//!
//! Implementation choices:
//! - We solve the 2-column least-squares problem with SVD, which stays robust
//!   when a sub-range has nearly coincident pressures (an almost rank-1
//!   design matrix).
//! - Tolerances are tried from strict to loose; a system that fails all of
//!   them is reported as unsolvable rather than returning garbage.

use nalgebra::{DMatrix, DVector};

/// A fitted straight line plus the correlation coefficient of the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient of (x, y).
    pub r: f64,
}

/// Fit `y = intercept + slope·x` by ordinary least squares.
///
/// Returns `None` if fewer than two points are given, the lengths differ,
/// or the system is too ill-conditioned to solve robustly.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LineFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len();
    let mut design = DMatrix::<f64>::zeros(n, 2);
    let mut obs = DVector::<f64>::zeros(n);
    for i in 0..n {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = x[i];
        obs[i] = y[i];
    }

    let svd = design.svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(&obs, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(LineFit {
                    intercept: beta[0],
                    slope: beta[1],
                    r: pearson_r(x, y),
                });
            }
        }
    }

    None
}

/// Pearson correlation coefficient.
///
/// Zero-variance inputs yield 0 rather than NaN; downstream grids treat 0 as
/// the unpopulated value and gate everything through the validity mask.
pub fn pearson_r(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom > 0.0 && denom.is_finite() {
        sxy / denom
    } else {
        0.0
    }
}
