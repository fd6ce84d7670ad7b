//! Reporting utilities: residual statistics and formatted terminal output.

pub mod format;

pub use format::*;

/// Summary of `observed − model` over an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualStats {
    pub n: usize,
    pub rms: f64,
    pub max_abs: f64,
}

/// Residual statistics; `None` when the inputs are empty or differ in length.
pub fn residual_stats(observed: &[f64], model: &[f64]) -> Option<ResidualStats> {
    if observed.is_empty() || observed.len() != model.len() {
        return None;
    }
    let (sum_sq, max_abs) = observed
        .iter()
        .zip(model)
        .map(|(o, m)| o - m)
        .fold((0.0, 0.0_f64), |(s, mx), r| (s + r * r, mx.max(r.abs())));
    Some(ResidualStats {
        n: observed.len(),
        rms: (sum_sq / observed.len() as f64).sqrt(),
        max_abs,
    })
}
