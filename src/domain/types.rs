//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the range sweep
//! - handed to rendering/export collaborators as plain data
//! - reloaded later for comparisons

use serde::{Deserialize, Serialize};

/// Which criterion selects the single surface-area answer from the valid
/// relative pressure ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SsaCriterion {
    /// The valid range with the lowest average deviation from BET theory.
    Error,
    /// The valid range containing the most data points. More than one such
    /// range is an error, not an average.
    Points,
    /// The smallest surface area among valid ranges.
    Min,
    /// The largest surface area among valid ranges.
    Max,
}

impl SsaCriterion {
    /// Human-readable label for report output.
    pub fn display_name(self) -> &'static str {
        match self {
            SsaCriterion::Error => "lowest error",
            SsaCriterion::Points => "most points",
            SsaCriterion::Min => "minimum",
            SsaCriterion::Max => "maximum",
        }
    }
}

/// IUPAC isotherm shape classes, inferred from the curvature of the
/// measured isotherm.
///
/// BET analysis is meaningful mainly for types I, II and IV; the
/// classification is advisory and never blocks the range sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsoShape {
    TypeI,
    TypeII,
    TypeIII,
    TypeIV,
    TypeV,
    TypeVI,
}

impl IsoShape {
    pub fn display_name(self) -> &'static str {
        match self {
            IsoShape::TypeI => "type I",
            IsoShape::TypeII => "type II",
            IsoShape::TypeIII => "type III",
            IsoShape::TypeIV => "type IV",
            IsoShape::TypeV => "type V",
            IsoShape::TypeVI => "type VI",
        }
    }
}

/// Severity of an advisory note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// An advisory note produced during preprocessing or masking.
///
/// The core owns no logger; anything it wants to say travels with the
/// results as one of these records, and callers decide where it goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Which Rouquerol checks participate in the validity mask.
///
/// Disabling a check never shrinks the valid set; each enabled check can
/// only remove ranges from consideration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskConfig {
    /// Require `n(1 - p)` to be non-decreasing along the isotherm.
    pub pressure_consistency: bool,
    /// Require a positive fit-line intercept.
    pub positive_intercept: bool,
    /// Require the monolayer amount to fall inside the fitted range.
    pub monolayer_range: bool,
    /// Require agreement between the interpolated and the theoretical
    /// relative pressure at monolayer coverage.
    pub pressure_agreement: bool,
    /// Require a minimum number of points per range.
    pub min_points_check: bool,
    /// The minimum number of points for a valid range.
    pub min_points: usize,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            pressure_consistency: true,
            positive_intercept: true,
            monolayer_range: true,
            pressure_agreement: true,
            min_points_check: true,
            min_points: 5,
        }
    }
}

/// Resource limits for the range sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum isotherm size accepted by the engine. The sweep regresses
    /// every sub-range, so cost grows cubically with the point count; we
    /// fail fast instead of silently degrading.
    pub max_points: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_points: 1000 }
    }
}

/// A full run's configuration as understood by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub engine: EngineConfig,
    pub mask: MaskConfig,
    pub criterion: SsaCriterion,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            mask: MaskConfig::default(),
            criterion: SsaCriterion::Error,
        }
    }
}

/// The selected surface-area answer, with enough of the winning cell to
/// let a rendering collaborator highlight the chosen range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsaAnswer {
    /// Specific surface area, square meters per gram.
    pub ssa: f64,
    /// BET constant of the chosen range.
    pub c: f64,
    /// Monolayer amount of the chosen range, moles per gram.
    pub nm: f64,
    /// Average deviation from BET theory over the chosen range, percent.
    pub err: f64,
    /// Number of data points in the chosen range.
    pub num_pts: usize,
    /// Index of the first point of the range.
    pub start: usize,
    /// Index of the last point of the range.
    pub end: usize,
    /// Relative pressure at the first point.
    pub start_p: f64,
    /// Relative pressure at the last point.
    pub end_p: f64,
    /// The criterion that produced this answer.
    pub criterion: SsaCriterion,
}

/// One populated grid cell flattened into a plain record.
///
/// Export collaborators consume a `Vec` of these instead of the grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub start_p: f64,
    pub end_p: f64,
    pub ssa: f64,
    pub c: f64,
    pub nm: f64,
    pub slope: f64,
    pub intercept: f64,
    pub r: f64,
    pub err: f64,
    pub num_pts: usize,
    /// False when the range failed one or more enabled checks.
    pub valid: bool,
}
