/// Errors surfaced by the analysis core.
///
/// Numerical degeneracies confined to a single relative pressure range (a
/// zero-intercept regression, coincident points) are recovered cell-by-cell:
/// the cell is zeroed and excluded through the validity mask. Only global
/// impossibility — bad input data, an empty valid set, an ambiguous
/// selection — reaches this type.
#[derive(Debug, Clone, PartialEq)]
pub enum BetError {
    /// Fewer than two data points were supplied.
    TooFewPoints { got: usize },
    /// More points than the configured maximum (the full range sweep is
    /// cubic in the point count).
    TooManyPoints { got: usize, max: usize },
    /// An adsorbed amount was zero or negative.
    NonPositiveAmount { index: usize, value: f64 },
    /// A relative pressure was outside the open interval (0, 1).
    PressureOutOfRange { index: usize, value: f64 },
    /// A pressure or adsorbed amount was NaN or infinite.
    NonFiniteInput { index: usize },
    /// The adsorbate cross-sectional area was not a positive finite number.
    InvalidCrossSection { value: f64 },
    /// A configuration value was out of range.
    InvalidConfig(String),
    /// Every relative pressure range failed the enabled checks; no surface
    /// area answer can be given.
    NoValidRanges,
    /// The points criterion found more than one range with the maximum
    /// number of points.
    AmbiguousSelection { count: usize, num_pts: usize },
}

impl std::fmt::Display for BetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetError::TooFewPoints { got } => {
                write!(f, "Need at least 2 isotherm points, got {got}.")
            }
            BetError::TooManyPoints { got, max } => {
                write!(f, "Isotherm has {got} points, more than the configured maximum of {max}.")
            }
            BetError::NonPositiveAmount { index, value } => {
                write!(f, "Adsorbed amount at point {index} is {value}; amounts must be positive.")
            }
            BetError::PressureOutOfRange { index, value } => {
                write!(
                    f,
                    "Relative pressure at point {index} is {value}; pressures must lie strictly between 0 and 1."
                )
            }
            BetError::NonFiniteInput { index } => {
                write!(f, "Isotherm point {index} contains a NaN or infinite value.")
            }
            BetError::InvalidCrossSection { value } => {
                write!(
                    f,
                    "Adsorbate cross-sectional area {value} is not a positive finite number of square Angstrom."
                )
            }
            BetError::InvalidConfig(msg) => write!(f, "{msg}"),
            BetError::NoValidRanges => {
                write!(f, "No valid relative pressure ranges; specific surface area not calculated.")
            }
            BetError::AmbiguousSelection { count, num_pts } => {
                write!(
                    f,
                    "No single answer: {count} relative pressure ranges share the maximum of {num_pts} points."
                )
            }
        }
    }
}

impl std::error::Error for BetError {}
