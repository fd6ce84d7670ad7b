//! Unit tables and unit resolution.
//!
//! - case-insensitive key container (`case_map`)
//! - static unit / axis-type tables and the resolved [`Unit`] value (`tables`)

pub mod case_map;
pub mod tables;

pub use case_map::*;
pub use tables::*;
