//! Validated isotherm dataset.
//!
//! Construction is the only place input data is checked; everything
//! downstream (the range sweep, the checks, the reports) can assume:
//!
//! - at least two points
//! - every relative pressure strictly inside (0, 1)
//! - every adsorbed amount positive and finite
//! - derived columns already computed
//!
//! Data-quality findings that merely degrade results (out-of-order
//! pressures, decreasing amounts, an unusual isotherm shape) are returned
//! as advisory diagnostics and never block the analysis.

use crate::domain::{Diagnostic, IsoShape};
use crate::error::BetError;
use crate::math::CubicSpline;

/// One measured point plus its derived columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsothermPoint {
    /// Relative pressure p/p0, strictly inside (0, 1).
    pub p: f64,
    /// Adsorbed amount, moles per gram, positive.
    pub n: f64,
    /// Linearized BET ordinate `p / (n·(1 - p))`.
    pub bet: f64,
    /// Rouquerol ordinate `n·(1 - p)`, used by the consistency check.
    pub rouq: f64,
}

/// Summary statistics about the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct IsothermStats {
    pub n_points: usize,
    pub p_min: f64,
    pub p_max: f64,
    pub n_min: f64,
    pub n_max: f64,
    /// IUPAC shape classification, when the curvature analysis converged.
    pub shape: Option<IsoShape>,
}

/// A validated, immutable isotherm.
#[derive(Debug, Clone)]
pub struct Isotherm {
    points: Vec<IsothermPoint>,
    a_o: f64,
    stats: IsothermStats,
    diagnostics: Vec<Diagnostic>,
}

impl Isotherm {
    /// Build an isotherm from `(relative pressure, adsorbed amount)` pairs
    /// and the adsorbate cross-sectional area in square Angstrom.
    pub fn new(pairs: &[(f64, f64)], a_o: f64) -> Result<Self, BetError> {
        if pairs.len() < 2 {
            return Err(BetError::TooFewPoints { got: pairs.len() });
        }
        if !a_o.is_finite() || a_o <= 0.0 {
            return Err(BetError::InvalidCrossSection { value: a_o });
        }

        let mut points = Vec::with_capacity(pairs.len());
        for (index, &(p, n)) in pairs.iter().enumerate() {
            if !p.is_finite() || !n.is_finite() {
                return Err(BetError::NonFiniteInput { index });
            }
            if p <= 0.0 || p >= 1.0 {
                return Err(BetError::PressureOutOfRange { index, value: p });
            }
            if n <= 0.0 {
                return Err(BetError::NonPositiveAmount { index, value: n });
            }
            points.push(IsothermPoint {
                p,
                n,
                bet: p / (n * (1.0 - p)),
                rouq: n * (1.0 - p),
            });
        }

        let mut diagnostics = Vec::new();

        if points.windows(2).any(|w| w[1].p <= w[0].p) {
            diagnostics.push(Diagnostic::warning(
                "Relative pressures are not strictly increasing; results may be degraded.",
            ));
        }

        if points.windows(2).any(|w| w[1].n < w[0].n) {
            diagnostics.push(Diagnostic::warning(
                "Isotherm data is suspect: adsorbed amounts do not consistently increase with relative pressure.",
            ));
        } else {
            diagnostics.push(Diagnostic::info(
                "Adsorbed amounts increase with relative pressure.",
            ));
        }

        let shape = classify_shape(&points);
        match shape {
            Some(shape) => diagnostics.push(Diagnostic::info(format!(
                "Isotherm appears to be {}.",
                shape.display_name()
            ))),
            None => diagnostics.push(Diagnostic::info(
                "Isotherm shape classification was inconclusive.",
            )),
        }

        let stats = IsothermStats {
            n_points: points.len(),
            p_min: points.iter().map(|pt| pt.p).fold(f64::INFINITY, f64::min),
            p_max: points.iter().map(|pt| pt.p).fold(f64::NEG_INFINITY, f64::max),
            n_min: points.iter().map(|pt| pt.n).fold(f64::INFINITY, f64::min),
            n_max: points.iter().map(|pt| pt.n).fold(f64::NEG_INFINITY, f64::max),
            shape,
        };

        Ok(Self {
            points,
            a_o,
            stats,
            diagnostics,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[IsothermPoint] {
        &self.points
    }

    /// Adsorbate cross-sectional area, square Angstrom.
    pub fn a_o(&self) -> f64 {
        self.a_o
    }

    pub fn stats(&self) -> &IsothermStats {
        &self.stats
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn pressures(&self) -> Vec<f64> {
        self.points.iter().map(|pt| pt.p).collect()
    }

    pub fn amounts(&self) -> Vec<f64> {
        self.points.iter().map(|pt| pt.n).collect()
    }

    pub fn bet_values(&self) -> Vec<f64> {
        self.points.iter().map(|pt| pt.bet).collect()
    }

    pub fn rouq_values(&self) -> Vec<f64> {
        self.points.iter().map(|pt| pt.rouq).collect()
    }
}

/// Number of resampled points used for curvature analysis.
const SHAPE_SAMPLES: usize = 50;

/// Classify the isotherm shape from the sign pattern of the second
/// derivative of a spline through the data.
///
/// The curve is parameterized by cumulative arc length so steep sections do
/// not distort the resampling, then resampled uniformly and differentiated
/// twice by finite differences. The IUPAC type follows from the initial
/// curvature sign and the number of inflection points.
fn classify_shape(points: &[IsothermPoint]) -> Option<IsoShape> {
    let x: Vec<f64> = points.iter().map(|pt| pt.p).collect();
    let y: Vec<f64> = points.iter().map(|pt| pt.n).collect();

    let mut u = Vec::with_capacity(points.len());
    u.push(0.0);
    for w in points.windows(2) {
        let dx = w[1].p - w[0].p;
        let dy = w[1].n - w[0].n;
        u.push(u.last().copied().unwrap_or(0.0) + (dx * dx + dy * dy).sqrt());
    }

    let sx = CubicSpline::fit(&u, &x)?;
    let sy = CubicSpline::fit(&u, &y)?;

    let u_max = *u.last()?;
    let step = u_max / (SHAPE_SAMPLES as f64 - 1.0);
    let mut rx = Vec::with_capacity(SHAPE_SAMPLES);
    let mut ry = Vec::with_capacity(SHAPE_SAMPLES);
    for k in 0..SHAPE_SAMPLES {
        let t = step * k as f64;
        rx.push(sx.eval(t));
        ry.push(sy.eval(t));
    }

    let d1: Vec<f64> = (0..SHAPE_SAMPLES - 1)
        .map(|k| (ry[k + 1] - ry[k]) / (rx[k + 1] - rx[k]))
        .collect();
    let d2: Vec<f64> = (0..d1.len() - 1)
        .map(|k| (d1[k + 1] - d1[k]) / (rx[k + 2] - rx[k + 1]))
        .collect();

    if d2.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let crossings = d2
        .windows(2)
        .filter(|w| w[0].signum() != w[1].signum())
        .count();
    let concave_start = d2[0] < 0.0;

    match (crossings, concave_start) {
        (0, true) => Some(IsoShape::TypeI),
        (0, false) => Some(IsoShape::TypeIII),
        (1, true) => Some(IsoShape::TypeII),
        (1, false) => Some(IsoShape::TypeV),
        (2, true) => Some(IsoShape::TypeIV),
        _ => Some(IsoShape::TypeVI),
    }
}
