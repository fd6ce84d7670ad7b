//! Input/output helpers.
//!
//! - axis CSV read/write (`axis_csv`)
//! - header descriptor JSON read/write (`header`)

pub mod axis_csv;
pub mod header;

pub use axis_csv::*;
pub use header::*;
