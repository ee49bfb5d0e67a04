//! Built-in datasets: a measured reference isotherm and a seeded synthetic
//! generator.

pub mod sample;

pub use sample::*;
