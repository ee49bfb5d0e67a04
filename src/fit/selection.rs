//! Selecting a single surface-area answer from the masked grids.
//!
//! Selection rules:
//! 1. Only cells the mask marks valid are considered; an empty valid set is
//!    an error, never a sentinel zero.
//! 2. `Error` picks the lowest average deviation. Ties are broken
//!    deterministically: more points wins, then the earlier cell in
//!    row-major scan order.
//! 3. `Points` picks the most points and refuses to choose between tied
//!    maxima (they are different answers, not noise to average away).
//! 4. `Min` / `Max` take the extreme surface area; ties keep the first cell
//!    in scan order.

use crate::domain::types::{SsaAnswer, SsaCriterion};
use crate::domain::Isotherm;
use crate::error::BetError;
use crate::fit::engine::BetGrids;
use crate::fit::mask::RouqMask;

/// Pick one specific surface area from the valid cells.
pub fn ssa_answer(
    iso: &Isotherm,
    grids: &BetGrids,
    mask: &RouqMask,
    criterion: SsaCriterion,
) -> Result<SsaAnswer, BetError> {
    if mask.all_invalid() {
        return Err(BetError::NoValidRanges);
    }

    let chosen = match criterion {
        SsaCriterion::Error => select_min_error(grids, mask),
        SsaCriterion::Points => select_most_points(grids, mask)?,
        SsaCriterion::Min => select_extreme_ssa(grids, mask, false),
        SsaCriterion::Max => select_extreme_ssa(grids, mask, true),
    };

    let Some((i, j)) = chosen else {
        return Err(BetError::NoValidRanges);
    };

    let points = iso.points();
    Ok(SsaAnswer {
        ssa: grids.ssa[(i, j)],
        c: grids.c[(i, j)],
        nm: grids.nm[(i, j)],
        err: grids.err[(i, j)],
        num_pts: grids.num_pts[(i, j)],
        start: j,
        end: i,
        start_p: points[j].p,
        end_p: points[i].p,
        criterion,
    })
}

fn valid_cells<'a>(
    grids: &'a BetGrids,
    mask: &'a RouqMask,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let n = grids.len();
    (0..n)
        .flat_map(move |i| (0..n).map(move |j| (i, j)))
        .filter(move |&(i, j)| !mask.invalid[(i, j)])
}

fn select_min_error(grids: &BetGrids, mask: &RouqMask) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (i, j) in valid_cells(grids, mask) {
        match best {
            None => best = Some((i, j)),
            Some((bi, bj)) => {
                let err = grids.err[(i, j)];
                let best_err = grids.err[(bi, bj)];
                let better = err < best_err
                    || (err == best_err && grids.num_pts[(i, j)] > grids.num_pts[(bi, bj)]);
                if better {
                    best = Some((i, j));
                }
            }
        }
    }
    best
}

fn select_most_points(
    grids: &BetGrids,
    mask: &RouqMask,
) -> Result<Option<(usize, usize)>, BetError> {
    let max_pts = valid_cells(grids, mask)
        .map(|(i, j)| grids.num_pts[(i, j)])
        .max();
    let Some(max_pts) = max_pts else {
        return Ok(None);
    };

    let mut ties = valid_cells(grids, mask).filter(|&(i, j)| grids.num_pts[(i, j)] == max_pts);
    let first = ties.next();
    let count = 1 + ties.count();
    if count > 1 {
        return Err(BetError::AmbiguousSelection {
            count,
            num_pts: max_pts,
        });
    }
    Ok(first)
}

fn select_extreme_ssa(grids: &BetGrids, mask: &RouqMask, take_max: bool) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (i, j) in valid_cells(grids, mask) {
        match best {
            None => best = Some((i, j)),
            Some((bi, bj)) => {
                let ssa = grids.ssa[(i, j)];
                let best_ssa = grids.ssa[(bi, bj)];
                let better = if take_max { ssa > best_ssa } else { ssa < best_ssa };
                if better {
                    best = Some((i, j));
                }
            }
        }
    }
    best
}
