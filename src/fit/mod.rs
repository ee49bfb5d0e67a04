//! The range sweep and everything that judges it.
//!
//! Responsibilities:
//!
//! - regress every contiguous sub-range of the isotherm (parallel)
//! - evaluate the five Rouquerol checks as 0/1 grids
//! - combine enabled checks into one validity mask
//! - select a single surface-area answer under a policy

pub mod criteria;
pub mod engine;
pub mod mask;
pub mod selection;

pub use criteria::*;
pub use engine::*;
pub use mask::*;
pub use selection::*;
