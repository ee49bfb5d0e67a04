//! Mathematical utilities: least squares, interpolation, quadratic roots,
//! and the cubic spline used for shape classification.

pub mod interp;
pub mod ols;
pub mod quadratic;
pub mod spline;

pub use interp::*;
pub use ols::*;
pub use quadratic::*;
pub use spline::*;
