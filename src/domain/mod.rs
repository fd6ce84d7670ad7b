//! Domain vocabulary shared by the unit tables, Doppler converters and axes.
//!
//! This module defines:
//!
//! - the physical quantity categories an axis can carry (`QuantityType`)
//! - the Doppler conventions relating frequency and velocity (`DopplerConvention`)
//! - kinematic reference frame labels (`Frame`)
//! - the line-shape families (`ProfileKind`)

pub mod types;

pub use types::*;
