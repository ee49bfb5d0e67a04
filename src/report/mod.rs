//! Reporting utilities: masked summary statistics, formatted tables, and
//! flattened per-cell records for export collaborators.
//!
//! We keep formatting code in one place so:
//! - the sweep/check code stays clean and testable
//! - output changes are localized

pub mod format;

pub use format::*;
