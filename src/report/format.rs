//! Masked statistics and formatted terminal output.
//!
//! Everything here consumes the result grids strictly through the validity
//! mask; invalid cells never leak into a statistic or a table.

use nalgebra::DMatrix;

use crate::domain::types::{CellRecord, SsaAnswer};
use crate::domain::Isotherm;
use crate::fit::engine::BetGrids;
use crate::fit::mask::RouqMask;

/// Summary statistics of one grid over the valid cells.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStats {
    pub min: f64,
    /// `(end, start)` indices of the minimum cell.
    pub min_cell: (usize, usize),
    pub max: f64,
    /// `(end, start)` indices of the maximum cell.
    pub max_cell: (usize, usize),
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

/// Statistics of `grid` over the cells the mask marks valid.
///
/// Returns `None` when no cell is valid.
pub fn masked_stats(grid: &DMatrix<f64>, mask: &RouqMask) -> Option<CellStats> {
    let n = grid.nrows();
    let mut values = Vec::new();
    let mut min = (f64::INFINITY, (0, 0));
    let mut max = (f64::NEG_INFINITY, (0, 0));

    for i in 0..n {
        for j in 0..n {
            if mask.invalid[(i, j)] {
                continue;
            }
            let v = grid[(i, j)];
            values.push(v);
            if v < min.0 {
                min = (v, (i, j));
            }
            if v > max.0 {
                max = (v, (i, j));
            }
        }
    }

    if values.is_empty() {
        return None;
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count;

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    };

    Some(CellStats {
        min: min.0,
        min_cell: min.1,
        max: max.0,
        max_cell: max.1,
        mean,
        median,
        std: variance.sqrt(),
    })
}

/// Format the run summary: dataset stats, valid-range count, diagnostics,
/// and the chosen answer when one exists.
pub fn format_run_summary(
    iso: &Isotherm,
    grids: &BetGrids,
    mask: &RouqMask,
    answer: Option<&SsaAnswer>,
) -> String {
    let mut out = String::new();
    let stats = iso.stats();

    out.push_str("=== BET range sweep ===\n");
    out.push_str(&format!(
        "Points: n={} | p/p0=[{:.3}, {:.3}] | amount=[{:.6}, {:.6}] mol/g\n",
        stats.n_points, stats.p_min, stats.p_max, stats.n_min, stats.n_max,
    ));
    if let Some(shape) = stats.shape {
        out.push_str(&format!("Shape: {}\n", shape.display_name()));
    }
    out.push_str(&format!(
        "Ranges: {} evaluated | {} valid\n",
        stats.n_points * (stats.n_points - 1) / 2,
        mask.valid_count(),
    ));

    for d in iso.diagnostics().iter().chain(mask.diagnostics.iter()) {
        out.push_str(&format!("- {:?}: {}\n", d.severity, d.message));
    }

    match answer {
        Some(ans) => {
            out.push_str(&format!(
                "\nThe specific surface area value, based on {}, is {:.2} m2/g.\n",
                ans.criterion.display_name(),
                ans.ssa,
            ));
            out.push_str(&format!(
                "Chosen range: p/p0 {:.3}..{:.3} ({} points), C={:.2}, error={:.3}%\n",
                ans.start_p, ans.end_p, ans.num_pts, ans.c, ans.err,
            ));
        }
        None => {
            out.push_str("\nNo single surface-area answer was selected.\n");
        }
    }

    let _ = grids;
    out
}

/// Format the two summary tables of valid surface areas and BET constants.
///
/// Returns `None` when every cell is invalid (there is nothing to
/// tabulate).
pub fn format_tables(iso: &Isotherm, grids: &BetGrids, mask: &RouqMask) -> Option<String> {
    let ssa = masked_stats(&grids.ssa, mask)?;
    let c = masked_stats(&grids.c, mask)?;
    let points = iso.points();

    let range_of = |cell: (usize, usize)| {
        format!("{:.3}..{:.3}", points[cell.1].p, points[cell.0].p)
    };

    let mut out = String::new();
    out.push_str("Specific surface area (m2/g)\n");
    out.push_str(&format!(
        "{:<10}{:>12}{:>12}{:>16}\n",
        "", "SSA", "C", "p/p0 range"
    ));
    out.push_str(&format!(
        "{:<10}{:>12.3}{:>12.3}{:>16}\n",
        "min",
        ssa.min,
        grids.c[ssa.min_cell],
        range_of(ssa.min_cell),
    ));
    out.push_str(&format!(
        "{:<10}{:>12.3}{:>12.3}{:>16}\n",
        "max",
        ssa.max,
        grids.c[ssa.max_cell],
        range_of(ssa.max_cell),
    ));
    out.push_str(&format!("{:<10}{:>12.3}\n", "mean", ssa.mean));
    out.push_str(&format!("{:<10}{:>12.3}\n", "median", ssa.median));
    out.push_str(&format!("{:<10}{:>12.3}\n", "std", ssa.std));

    out.push_str("\nBET constant\n");
    out.push_str(&format!(
        "{:<10}{:>12}{:>12}{:>16}{:>10}\n",
        "", "C", "SSA", "p/p0 range", "error"
    ));
    out.push_str(&format!(
        "{:<10}{:>12.3}{:>12.3}{:>16}{:>10.3}\n",
        "min",
        c.min,
        grids.ssa[c.min_cell],
        range_of(c.min_cell),
        grids.err[c.min_cell],
    ));
    out.push_str(&format!(
        "{:<10}{:>12.3}{:>12.3}{:>16}{:>10.3}\n",
        "max",
        c.max,
        grids.ssa[c.max_cell],
        range_of(c.max_cell),
        grids.err[c.max_cell],
    ));
    out.push_str(&format!("{:<10}{:>12.3}\n", "mean", c.mean));
    out.push_str(&format!("{:<10}{:>12.3}\n", "median", c.median));
    out.push_str(&format!("{:<10}{:>12.5}\n", "std", c.std));

    Some(out)
}

/// Flatten every populated cell into plain records, valid or not; the
/// `valid` flag carries the mask so consumers cannot lose it.
pub fn cell_records(iso: &Isotherm, grids: &BetGrids, mask: &RouqMask) -> Vec<CellRecord> {
    let n = iso.len();
    let points = iso.points();
    let mut out = Vec::with_capacity(n * (n - 1) / 2);

    for i in 0..n {
        for j in 0..i {
            out.push(CellRecord {
                start_p: points[j].p,
                end_p: points[i].p,
                ssa: grids.ssa[(i, j)],
                c: grids.c[(i, j)],
                nm: grids.nm[(i, j)],
                slope: grids.slope[(i, j)],
                intercept: grids.intercept[(i, j)],
                r: grids.r[(i, j)],
                err: grids.err[(i, j)],
                num_pts: grids.num_pts[(i, j)],
                valid: !mask.invalid[(i, j)],
            });
        }
    }

    out
}
