//! Natural cubic spline interpolation.
//!
//! Used to resample the measured isotherm on a uniform parameter grid so its
//! curvature can be inspected for shape classification. The spline passes
//! through every knot; the natural boundary condition (zero second
//! derivative at both ends) keeps the ends from oscillating.

use nalgebra::{DMatrix, DVector};

/// A natural cubic spline through strictly increasing knots.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivative at each knot.
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fit a spline through the given knots.
    ///
    /// Returns `None` with fewer than 3 knots, mismatched lengths,
    /// non-finite values, or a non-increasing `x`.
    pub fn fit(x: &[f64], y: &[f64]) -> Option<Self> {
        let n = x.len();
        if n < 3 || y.len() != n {
            return None;
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return None;
        }

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        if h.iter().any(|&hi| hi <= 0.0) {
            return None;
        }

        // Tridiagonal system for the interior second derivatives; the
        // natural boundary fixes m[0] = m[n-1] = 0.
        let k = n - 2;
        let mut a = DMatrix::<f64>::zeros(k, k);
        let mut rhs = DVector::<f64>::zeros(k);
        for i in 0..k {
            a[(i, i)] = 2.0 * (h[i] + h[i + 1]);
            if i > 0 {
                a[(i, i - 1)] = h[i];
            }
            if i + 1 < k {
                a[(i, i + 1)] = h[i + 1];
            }
            rhs[i] = 6.0 * ((y[i + 2] - y[i + 1]) / h[i + 1] - (y[i + 1] - y[i]) / h[i]);
        }

        let interior = a.lu().solve(&rhs)?;
        if interior.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let mut m = vec![0.0; n];
        for i in 0..k {
            m[i + 1] = interior[i];
        }

        Some(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    /// Evaluate the spline at `t`, clamping to the end segments outside the
    /// knot range.
    pub fn eval(&self, t: f64) -> f64 {
        let n = self.x.len();
        let seg = match self.x.iter().position(|&xi| xi > t) {
            Some(0) => 0,
            Some(idx) => idx - 1,
            None => n - 2,
        };

        let h = self.x[seg + 1] - self.x[seg];
        let a = (self.x[seg + 1] - t) / h;
        let b = (t - self.x[seg]) / h;

        a * self.y[seg]
            + b * self.y[seg + 1]
            + ((a * a * a - a) * self.m[seg] + (b * b * b - b) * self.m[seg + 1]) * (h * h) / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spline_passes_through_knots() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 1.0, 0.0, 1.0];
        let s = CubicSpline::fit(&x, &y).unwrap();
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            assert!((s.eval(xi) - yi).abs() < 1e-9, "knot at {xi}");
        }
    }

    #[test]
    fn spline_is_exact_on_a_line() {
        // A straight line has zero second derivative everywhere, so the
        // natural spline reproduces it exactly between knots too.
        let x = [0.0, 1.0, 2.5, 4.0];
        let y: Vec<f64> = x.iter().map(|&v| 2.0 * v + 1.0).collect();
        let s = CubicSpline::fit(&x, &y).unwrap();
        for t in [0.5, 1.7, 3.2] {
            assert!((s.eval(t) - (2.0 * t + 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn spline_rejects_unsorted_knots() {
        assert!(CubicSpline::fit(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]).is_none());
        assert!(CubicSpline::fit(&[0.0, 0.0, 1.0], &[0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn spline_rejects_short_input() {
        assert!(CubicSpline::fit(&[0.0, 1.0], &[0.0, 1.0]).is_none());
    }
}
