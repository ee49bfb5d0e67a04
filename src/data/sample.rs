//! Sample isotherms.
//!
//! Two sources:
//!
//! - a measured nitrogen reference isotherm, useful for demos and for
//!   exercising the full pipeline against realistic numbers
//! - a seeded synthetic generator that evaluates the BET equation for a
//!   chosen constant and monolayer amount, then perturbs each amount with
//!   multiplicative Gaussian noise
//!
//! Generation is deterministic for a given seed, so tests can rely on the
//! output without pinning every value.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::domain::Isotherm;
use crate::error::BetError;

/// Cross-sectional area of a nitrogen molecule, square Angstrom.
pub const NITROGEN_A_O: f64 = 16.2;

/// A measured nitrogen adsorption isotherm on a microporous carbon.
pub fn reference_isotherm() -> Result<Isotherm, BetError> {
    let relp = [
        0.01, 0.02, 0.03, 0.04, 0.05, 0.06, 0.07, 0.08, 0.09, 0.1, 0.125, 0.15, 0.175, 0.2,
        0.225, 0.25, 0.275, 0.3, 0.35, 0.4, 0.45, 0.5, 0.55, 0.6, 0.7, 0.8, 0.9,
    ];
    let n = [
        0.00055797, 0.0006805, 0.00076186, 0.00082042, 0.00086352, 0.00089899, 0.00093262,
        0.00095784, 0.00098287, 0.00100306, 0.0010508, 0.00108762, 0.00111806, 0.00114453,
        0.00116956, 0.00119198, 0.00121517, 0.00123701, 0.00127731, 0.00132157, 0.00136776,
        0.00141743, 0.00147319, 0.00153784, 0.0017082, 0.00198351, 0.00256767,
    ];
    let pairs: Vec<(f64, f64)> = relp.iter().copied().zip(n.iter().copied()).collect();
    Isotherm::new(&pairs, NITROGEN_A_O)
}

/// Configuration for synthetic isotherm generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    /// Number of points, evenly spaced in relative pressure.
    pub n_points: usize,
    /// BET constant of the generating equation.
    pub c: f64,
    /// Monolayer amount of the generating equation, moles per gram.
    pub nm: f64,
    /// Adsorbate cross-sectional area, square Angstrom.
    pub a_o: f64,
    /// Relative standard deviation of the multiplicative noise.
    pub noise_rel: f64,
    /// RNG seed; equal seeds give equal isotherms.
    pub seed: u64,
    pub p_min: f64,
    pub p_max: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            n_points: 25,
            c: 100.0,
            nm: 0.002,
            a_o: NITROGEN_A_O,
            noise_rel: 0.0,
            seed: 0,
            p_min: 0.01,
            p_max: 0.45,
        }
    }
}

/// Evaluate the BET equation at `p` for the given constant and monolayer
/// amount.
pub fn bet_amount(p: f64, c: f64, nm: f64) -> f64 {
    nm * c * p / ((1.0 - p) * (1.0 + (c - 1.0) * p))
}

/// Generate a synthetic isotherm from the BET equation.
pub fn generate_sample(config: &SampleConfig) -> Result<Isotherm, BetError> {
    if config.n_points < 2 {
        return Err(BetError::InvalidConfig(
            "Sample needs at least 2 points.".into(),
        ));
    }
    if !(config.p_min.is_finite()
        && config.p_max.is_finite()
        && config.p_min > 0.0
        && config.p_max < 1.0
        && config.p_max > config.p_min)
    {
        return Err(BetError::InvalidConfig(format!(
            "Invalid pressure range [{}, {}] for sample generation.",
            config.p_min, config.p_max
        )));
    }
    if !(config.c.is_finite() && config.c > 0.0 && config.nm.is_finite() && config.nm > 0.0) {
        return Err(BetError::InvalidConfig(
            "Sample BET constant and monolayer amount must be positive.".into(),
        ));
    }
    if !(config.noise_rel.is_finite() && config.noise_rel >= 0.0) {
        return Err(BetError::InvalidConfig(format!(
            "Invalid noise level {}.",
            config.noise_rel
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, config.noise_rel)
        .map_err(|e| BetError::InvalidConfig(format!("Invalid noise distribution: {e}")))?;

    let step = (config.p_max - config.p_min) / (config.n_points as f64 - 1.0);
    let mut pairs = Vec::with_capacity(config.n_points);
    for k in 0..config.n_points {
        let p = config.p_min + step * k as f64;
        let clean = bet_amount(p, config.c, config.nm);
        let factor = if config.noise_rel > 0.0 {
            // Keep amounts positive even under an unlucky draw.
            (1.0 + noise.sample(&mut rng)).max(0.05)
        } else {
            1.0
        };
        pairs.push((p, clean * factor));
    }

    Isotherm::new(&pairs, config.a_o)
}
