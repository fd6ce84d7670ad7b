//! Lorentzian (Cauchy) line shape.
//!
//! ```text
//!            A         w
//! L(x) = ------ · ----------------------
//!         2 π     (x − dx)² + (w / 2)²
//! ```
//!
//! `A` is the integrated area, `dx` the center and `w` the full width at half
//! maximum.

use crate::domain::ProfileKind;
use crate::models::descriptor::{ModelDescriptor, ParameterSpec};

pub const LORENTZIAN_PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::free("amplitude", "A"),
    ParameterSpec::free("shift", r"\Delta x"),
    ParameterSpec::non_negative("width", r"\sigma"),
];

pub fn lorentzian(x: f64, amplitude: f64, shift: f64, width: f64) -> f64 {
    let half = width / 2.0;
    amplitude / (2.0 * std::f64::consts::PI) * width / ((x - shift).powi(2) + half * half)
}

fn evaluate(x: f64, p: &[f64]) -> f64 {
    lorentzian(x, p[0], p[1], p[2])
}

pub fn lorentzian_fitter() -> ModelDescriptor {
    ModelDescriptor {
        kind: ProfileKind::Lorentzian,
        evaluator: evaluate,
        parameters: LORENTZIAN_PARAMETERS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn peak_value() {
        let dx = 12.5;
        assert!((lorentzian(dx, 1.0, dx, 2.0) - 1.0 / PI).abs() < 1e-15);
    }

    #[test]
    fn half_maximum_at_half_width() {
        let peak = lorentzian(0.0, 3.0, 0.0, 4.0);
        assert!((lorentzian(2.0, 3.0, 0.0, 4.0) - peak / 2.0).abs() < 1e-12);
        assert!((lorentzian(-2.0, 3.0, 0.0, 4.0) - peak / 2.0).abs() < 1e-12);
    }

    #[test]
    fn area_is_amplitude() {
        // Trapezoid over ±2000 half widths; the tails hold ~3e-4 of the area.
        let (a, w) = (2.5, 0.5);
        let step = 1e-3;
        let n = 1_000_000;
        let area: f64 = (0..=n)
            .map(|i| {
                let x = -500.0 + i as f64 * step;
                let weight = if i == 0 || i == n { 0.5 } else { 1.0 };
                weight * lorentzian(x, a, 0.0, w)
            })
            .sum::<f64>()
            * step;
        assert!((area - a).abs() / a < 1e-3);
    }

    #[test]
    fn descriptor_shape() {
        let d = lorentzian_fitter();
        assert_eq!(d.npars(), 3);
        assert_eq!(d.parameter_names(), vec!["amplitude", "shift", "width"]);
        assert_eq!(d.limited(), vec![(false, false), (false, false), (true, false)]);
        assert_eq!(d.limits(), vec![(0.0, 0.0); 3]);
        assert_eq!(d.short_names(), vec!["A", r"\Delta x", r"\sigma"]);
        assert_eq!(d.within_bounds(&[1.0, 0.0, -0.1]), Ok(false));
        assert_eq!(d.within_bounds(&[-1.0, 0.0, 0.1]), Ok(true));
    }
}
