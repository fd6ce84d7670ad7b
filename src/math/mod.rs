//! Numerical helpers for the line-shape kernels.

pub mod faddeeva;
pub mod lstsq;

pub use faddeeva::*;
pub use lstsq::*;
