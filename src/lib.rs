//! `betscan` library crate.
//!
//! BET surface-area analysis over every relative pressure range of an
//! adsorption isotherm: regress each contiguous sub-range, score it against
//! the Rouquerol validity criteria, and select one defensible specific
//! surface area.
//!
//! The crate is a pure computation core:
//!
//! - ingestion hands it plain `(pressure, amount)` pairs
//! - rendering/export collaborators consume the result grids, the validity
//!   mask, and plain record types
//! - there is no I/O, no logger, and no global state inside

pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod pipeline;
pub mod report;
