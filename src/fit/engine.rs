//! BET regression over every relative pressure range.
//!
//! For an isotherm of N points we regress the linearized BET ordinate
//! against relative pressure over every closed sub-range `[j, i]` with
//! `i > j`, and derive the BET constant, monolayer amount, specific surface
//! area, and an average deviation from theory for each.
//!
//! Results live in N×N grids indexed `(end, start)`; only cells below the
//! diagonal are populated. Grid values are meaningless without the validity
//! mask: degenerate regressions are stored as zeros, and a legitimately
//! computed zero is indistinguishable from an empty cell by value alone.
//!
//! Cells are independent, so rows are evaluated in parallel; assembly by
//! index keeps the output bit-identical to a sequential sweep.

use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::domain::Isotherm;
use crate::domain::types::EngineConfig;
use crate::error::BetError;
use crate::math::fit_line;

/// Avogadro's number, molecules per mole.
pub const AVOGADRO: f64 = 6.022e23;

/// Conversion from square Angstrom per molecule to square meters.
const A2_TO_M2: f64 = 1e-20;

/// Per-range BET results, indexed `(end, start)` with `end > start`.
#[derive(Debug, Clone, PartialEq)]
pub struct BetGrids {
    /// Fit-line slope of the BET plot.
    pub slope: DMatrix<f64>,
    /// Fit-line intercept of the BET plot.
    pub intercept: DMatrix<f64>,
    /// Correlation coefficient of the fitted points.
    pub r: DMatrix<f64>,
    /// BET constant.
    pub c: DMatrix<f64>,
    /// Monolayer amount, moles per gram.
    pub nm: DMatrix<f64>,
    /// Specific surface area, square meters per gram.
    pub ssa: DMatrix<f64>,
    /// Average relative deviation from the theoretical BET isotherm over
    /// the fitted range, percent. Exactly 0 for two-point ranges.
    pub err: DMatrix<f64>,
    /// Number of points in the range.
    pub num_pts: DMatrix<usize>,
}

impl BetGrids {
    /// Grid dimension (the isotherm point count).
    pub fn len(&self) -> usize {
        self.ssa.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.ssa.nrows() == 0
    }
}

/// One computed cell, prior to grid assembly.
#[derive(Debug, Clone, Copy)]
struct Cell {
    slope: f64,
    intercept: f64,
    r: f64,
    c: f64,
    nm: f64,
    ssa: f64,
    err: f64,
}

/// Regress every sub-range of the isotherm.
///
/// Fails fast when the isotherm exceeds `config.max_points`; the sweep is
/// cubic in the point count.
pub fn bet_grids(iso: &Isotherm, config: &EngineConfig) -> Result<BetGrids, BetError> {
    let n = iso.len();
    if n > config.max_points {
        return Err(BetError::TooManyPoints {
            got: n,
            max: config.max_points,
        });
    }

    let p = iso.pressures();
    let bet = iso.bet_values();
    let a_o = iso.a_o();

    let rows: Vec<Vec<Cell>> = (0..n)
        .into_par_iter()
        .map(|i| (0..i).map(|j| regress_cell(j, i, &p, &bet, a_o)).collect())
        .collect();

    let mut grids = BetGrids {
        slope: DMatrix::zeros(n, n),
        intercept: DMatrix::zeros(n, n),
        r: DMatrix::zeros(n, n),
        c: DMatrix::zeros(n, n),
        nm: DMatrix::zeros(n, n),
        ssa: DMatrix::zeros(n, n),
        err: DMatrix::zeros(n, n),
        num_pts: DMatrix::zeros(n, n),
    };

    for (i, row) in rows.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            grids.slope[(i, j)] = cell.slope;
            grids.intercept[(i, j)] = cell.intercept;
            grids.r[(i, j)] = cell.r;
            grids.c[(i, j)] = cell.c;
            grids.nm[(i, j)] = cell.nm;
            grids.ssa[(i, j)] = cell.ssa;
            grids.err[(i, j)] = cell.err;
            grids.num_pts[(i, j)] = i - j + 1;
        }
    }

    Ok(grids)
}

/// Regress the closed sub-range `[j, i]` of the transformed isotherm.
fn regress_cell(j: usize, i: usize, p: &[f64], bet: &[f64], a_o: f64) -> Cell {
    let fit = fit_line(&p[j..=i], &bet[j..=i]);
    let (slope, intercept, r) = match fit {
        Some(fit) => (fit.slope, fit.intercept, fit.r),
        None => (0.0, 0.0, 0.0),
    };

    // A zero intercept makes the BET constant undefined; the cell is stored
    // as zeros and excluded later by the positive-intercept check.
    let mut c = 0.0;
    let mut nm = 0.0;
    let mut err = 0.0;
    if intercept != 0.0 {
        c = slope / intercept + 1.0;
        nm = 1.0 / (intercept * c);

        if i - j > 1 {
            // Average relative deviation between each point's BET ordinate
            // and the theoretical curve for this cell's c and nm, over the
            // fitted range only. Percent.
            let mut total = 0.0;
            for k in j..=i {
                let theory = 1.0 / (nm * c) + (c - 1.0) * p[k] / (nm * c);
                total += zero_non_finite((theory - bet[k]).abs() / theory);
            }
            err = 100.0 * total / (i - j + 1) as f64;
        }
    }

    let ssa = nm * AVOGADRO * a_o * A2_TO_M2;

    Cell {
        slope: zero_non_finite(slope),
        intercept: zero_non_finite(intercept),
        r: zero_non_finite(r),
        c: zero_non_finite(c),
        nm: zero_non_finite(nm),
        ssa: zero_non_finite(ssa),
        err: zero_non_finite(err),
    }
}

/// Replace NaN/Inf with 0 so degenerate cells stay in-band; the validity
/// mask is the only authority on which cells are meaningful.
fn zero_non_finite(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Single-point BET estimates, indexed like [`BetGrids`].
///
/// Each cell takes the median point of `[start, end)` and applies the
/// one-point approximation. Comparing these against the full regression is a
/// quick agreement check.
#[derive(Debug, Clone, PartialEq)]
pub struct SinglePointGrids {
    pub ssa: DMatrix<f64>,
    pub nm: DMatrix<f64>,
}

/// Compute single-point BET estimates for every sub-range.
pub fn single_point_grids(iso: &Isotherm) -> SinglePointGrids {
    let n = iso.len();
    let p = iso.pressures();
    let amounts = iso.amounts();
    let a_o = iso.a_o();

    let mut ssa = DMatrix::zeros(n, n);
    let mut nm = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..i {
            let n_med = median(&amounts[j..i]);
            let p_med = median(&p[j..i]);
            nm[(i, j)] = n_med * (1.0 - p_med);
            ssa[(i, j)] = n_med * AVOGADRO * a_o * A2_TO_M2;
        }
    }

    SinglePointGrids { ssa, nm }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
