//! `spectral-axis` library crate.
//!
//! Spectroscopic axes with unit, Doppler and wavelength conversion, FITS-like
//! header descriptors, and Lorentzian/Voigt line-shape kernels.
//!
//! The binary (`specax`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the axis and model code can be embedded in other tools

pub mod app;
pub mod axis;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod doppler;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod units;
