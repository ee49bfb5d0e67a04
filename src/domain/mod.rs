//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the validated isotherm dataset (`Isotherm`, `IsothermPoint`)
//! - configuration types (`MaskConfig`, `EngineConfig`, `AnalysisConfig`)
//! - the answer-selection policy (`SsaCriterion`)
//! - advisory diagnostics and per-cell export records

pub mod isotherm;
pub mod types;

pub use isotherm::*;
pub use types::*;
