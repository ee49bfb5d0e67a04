//! Combining the Rouquerol checks into one validity mask.
//!
//! The combined mask follows array-masking convention: `true` means the
//! cell is invalid and must be ignored. Consumers that render or select
//! from the result grids go through this mask; raw grid values carry no
//! validity information of their own.

use nalgebra::DMatrix;

use crate::domain::types::{Diagnostic, MaskConfig};
use crate::domain::Isotherm;
use crate::fit::criteria::{
    check_min_points, check_monolayer_range, check_positive_intercept, check_pressure_agreement,
    check_pressure_consistency,
};
use crate::fit::engine::BetGrids;

/// The combined validity mask plus every individual check grid.
///
/// Constructed once per (dataset, configuration) pair and immutable
/// afterwards; changing which checks are enabled means rebuilding it.
#[derive(Debug, Clone, PartialEq)]
pub struct RouqMask {
    /// `true` = invalid. Upper-triangle cells (`end <= start`) are always
    /// invalid regardless of configuration.
    pub invalid: DMatrix<bool>,
    /// Individual 0/1 check grids, kept for diagnostic display. A disabled
    /// check contributes an all-ones grid.
    pub pressure_consistency: DMatrix<f64>,
    pub positive_intercept: DMatrix<f64>,
    pub monolayer_range: DMatrix<f64>,
    pub pressure_agreement: DMatrix<f64>,
    pub min_points: DMatrix<f64>,
    /// Advisory notes, e.g. a check that passes nowhere.
    pub diagnostics: Vec<Diagnostic>,
}

impl RouqMask {
    /// Whether every cell is invalid.
    pub fn all_invalid(&self) -> bool {
        self.invalid.iter().all(|&m| m)
    }

    /// Number of valid cells.
    pub fn valid_count(&self) -> usize {
        self.invalid.iter().filter(|&&m| !m).count()
    }
}

/// Evaluate the enabled checks and combine them into a [`RouqMask`].
pub fn rouq_mask(iso: &Isotherm, grids: &BetGrids, config: &MaskConfig) -> RouqMask {
    let n = iso.len();
    let ones = DMatrix::from_element(n, n, 1.0);

    let pressure_consistency = if config.pressure_consistency {
        check_pressure_consistency(iso)
    } else {
        ones.clone()
    };
    let positive_intercept = if config.positive_intercept {
        check_positive_intercept(grids)
    } else {
        ones.clone()
    };
    let monolayer_range = if config.monolayer_range {
        check_monolayer_range(iso, grids)
    } else {
        ones.clone()
    };
    let pressure_agreement = if config.pressure_agreement {
        check_pressure_agreement(iso, grids)
    } else {
        ones.clone()
    };
    let min_points = if config.min_points_check {
        check_min_points(n, config.min_points)
    } else {
        ones
    };

    let mut diagnostics = Vec::new();
    let enabled: [(&str, bool, &DMatrix<f64>); 5] = [
        ("pressure consistency", config.pressure_consistency, &pressure_consistency),
        ("positive intercept", config.positive_intercept, &positive_intercept),
        ("monolayer range", config.monolayer_range, &monolayer_range),
        ("pressure agreement", config.pressure_agreement, &pressure_agreement),
        ("minimum points", config.min_points_check, &min_points),
    ];
    for (name, is_enabled, grid) in enabled {
        if is_enabled && grid.iter().all(|&v| v == 0.0) {
            diagnostics.push(Diagnostic::warning(format!(
                "Every relative pressure range fails the {name} check."
            )));
        }
    }

    // Base grid: 1 only where the range is actually a range (end > start).
    let base = DMatrix::from_fn(n, n, |i, j| if i > j { 1.0 } else { 0.0 });

    let product = base
        .component_mul(&pressure_consistency)
        .component_mul(&positive_intercept)
        .component_mul(&monolayer_range)
        .component_mul(&pressure_agreement)
        .component_mul(&min_points);

    let invalid = product.map(|v| v == 0.0);
    if invalid.iter().all(|&m| m) {
        diagnostics.push(Diagnostic::warning(
            "Every relative pressure range fails the enabled checks.",
        ));
    }

    RouqMask {
        invalid,
        pressure_consistency,
        positive_intercept,
        monolayer_range,
        pressure_agreement,
        min_points,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EngineConfig;
    use crate::fit::engine::bet_grids;

    fn isotherm(p: &[f64], n: &[f64]) -> Isotherm {
        let pairs: Vec<(f64, f64)> = p.iter().copied().zip(n.iter().copied()).collect();
        Isotherm::new(&pairs, 16.2).unwrap()
    }

    fn exact_bet_isotherm() -> Isotherm {
        let c_true = 80.0;
        let nm_true = 0.002;
        let p: Vec<f64> = (1..=9).map(|k| 0.05 * k as f64).collect();
        let n: Vec<f64> = p
            .iter()
            .map(|&pi| nm_true * c_true * pi / ((1.0 - pi) * (1.0 + (c_true - 1.0) * pi)))
            .collect();
        isotherm(&p, &n)
    }

    #[test]
    fn upper_triangle_is_always_invalid() {
        let iso = exact_bet_isotherm();
        let grids = bet_grids(&iso, &EngineConfig::default()).unwrap();

        // Even with every check disabled, end <= start can never be valid.
        let config = MaskConfig {
            pressure_consistency: false,
            positive_intercept: false,
            monolayer_range: false,
            pressure_agreement: false,
            min_points_check: false,
            min_points: 5,
        };
        let mask = rouq_mask(&iso, &grids, &config);
        for i in 0..iso.len() {
            for j in i..iso.len() {
                assert!(mask.invalid[(i, j)], "cell ({i}, {j}) must stay invalid");
            }
        }
        // And everything below the diagonal is valid with no checks on.
        for i in 0..iso.len() {
            for j in 0..i {
                assert!(!mask.invalid[(i, j)]);
            }
        }
    }

    #[test]
    fn disabling_a_check_weakly_grows_the_valid_set() {
        let iso = exact_bet_isotherm();
        let grids = bet_grids(&iso, &EngineConfig::default()).unwrap();

        let all_on = MaskConfig::default();
        let baseline = rouq_mask(&iso, &grids, &all_on).valid_count();

        for toggle in 0..5 {
            let mut config = MaskConfig::default();
            match toggle {
                0 => config.pressure_consistency = false,
                1 => config.positive_intercept = false,
                2 => config.monolayer_range = false,
                3 => config.pressure_agreement = false,
                _ => config.min_points_check = false,
            }
            let relaxed = rouq_mask(&iso, &grids, &config).valid_count();
            assert!(
                relaxed >= baseline,
                "disabling check {toggle} shrank the valid set: {relaxed} < {baseline}"
            );
        }
    }

    #[test]
    fn disabled_checks_contribute_all_ones_grids() {
        let iso = exact_bet_isotherm();
        let grids = bet_grids(&iso, &EngineConfig::default()).unwrap();
        let config = MaskConfig {
            monolayer_range: false,
            ..MaskConfig::default()
        };
        let mask = rouq_mask(&iso, &grids, &config);
        assert!(mask.monolayer_range.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn known_fixture_fails_monolayer_check_and_masks_everything() {
        // A measured fixture whose range starting at the first point and
        // ending at the fourth yields a monolayer amount outside its own
        // data range, and whose Rouquerol ordinate turns over near the end;
        // under default criteria nothing survives.
        let iso = isotherm(
            &[0.1, 0.2, 0.21, 0.3, 0.4, 0.5],
            &[0.001, 0.002, 0.004, 0.005, 0.0055, 0.006],
        );
        let grids = bet_grids(&iso, &EngineConfig::default()).unwrap();
        let mask = rouq_mask(&iso, &grids, &MaskConfig::default());

        assert_eq!(mask.monolayer_range[(3, 0)], 0.0);
        assert!(mask.invalid[(3, 0)]);
        assert!(mask.all_invalid());
        assert!(mask
            .diagnostics
            .iter()
            .any(|d| d.message.contains("enabled checks")));
    }
}
