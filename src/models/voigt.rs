//! Voigt line shape: a Gaussian convolved with a Lorentzian.
//!
//! `V(x) = A · Re w(z) / (σ √(2π))` with `z = ((x − x₀) + iγ) / (σ √2)`, where
//! `σ` is the Gaussian standard deviation and `γ` the Lorentzian half width.
//! The profile integrates to `A`.

use std::f64::consts::{LN_2, PI, SQRT_2};

use crate::domain::ProfileKind;
use crate::math::{C64, faddeeva};
use crate::models::descriptor::{ModelDescriptor, ParameterSpec};

pub const VOIGT_PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec::free("amplitude", "A"),
    ParameterSpec::free("shift", r"\Delta x"),
    ParameterSpec::non_negative("gaussian_width", r"\sigma_G"),
    ParameterSpec::non_negative("lorentzian_width", r"\sigma_L"),
];

pub fn voigt(x: f64, amplitude: f64, center: f64, sigma: f64, gamma: f64) -> f64 {
    let gamma = gamma.abs();
    if sigma <= 0.0 {
        // Pure Lorentzian limit.
        return amplitude * gamma / (PI * ((x - center).powi(2) + gamma * gamma));
    }
    let scale = sigma * SQRT_2;
    let z = C64::new((x - center) / scale, gamma / scale);
    amplitude * faddeeva(z).re / (sigma * (2.0 * PI).sqrt())
}

/// Approximate full width at half maximum (Olivero & Longbothum), ~0.02% accurate.
pub fn voigt_fwhm(sigma: f64, gamma: f64) -> f64 {
    let fl = 2.0 * gamma;
    0.5346 * fl + (0.2166 * fl * fl + sigma * sigma * 8.0 * LN_2).sqrt()
}

fn evaluate(x: f64, p: &[f64]) -> f64 {
    voigt(x, p[0], p[1], p[2], p[3])
}

pub fn voigt_fitter() -> ModelDescriptor {
    ModelDescriptor {
        kind: ProfileKind::Voigt,
        evaluator: evaluate,
        parameters: VOIGT_PARAMETERS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        (a - b).abs() / b.abs()
    }

    #[test]
    fn gaussian_limit() {
        let sigma = 1.3;
        let norm = 1.0 / (sigma * (2.0 * PI).sqrt());
        for dx in [0.0, 0.5, 1.3, 2.0] {
            let expected = norm * (-(dx * dx) / (2.0 * sigma * sigma)).exp();
            assert!(rel(voigt(4.0 + dx, 1.0, 4.0, sigma, 0.0), expected) < 2e-3, "dx={dx}");
        }
    }

    #[test]
    fn lorentzian_limit() {
        let gamma = 1.0;
        let peak = voigt(0.0, 1.0, 0.0, 1e-3, gamma);
        assert!(rel(peak, 1.0 / (PI * gamma)) < 1e-3);
        assert!(rel(voigt(0.0, 1.0, 0.0, 0.0, gamma), 1.0 / PI) < 1e-12);
    }

    #[test]
    fn symmetric_about_center() {
        let a = voigt(7.0 - 0.8, 2.0, 7.0, 0.5, 0.3);
        let b = voigt(7.0 + 0.8, 2.0, 7.0, 0.5, 0.3);
        assert!(rel(a, b) < 1e-9);
    }

    #[test]
    fn fwhm_limits() {
        let sigma = 2.0;
        assert!(rel(voigt_fwhm(sigma, 0.0), 2.0 * (2.0 * LN_2).sqrt() * sigma) < 1e-12);
        // 0.5346 + sqrt(0.2166) is 1 to within 3e-6.
        assert!(rel(voigt_fwhm(0.0, 1.5), 3.0) < 1e-3);
    }

    #[test]
    fn fwhm_matches_profile() {
        let (sigma, gamma) = (1.0, 0.7);
        let half = voigt_fwhm(sigma, gamma) / 2.0;
        let peak = voigt(0.0, 1.0, 0.0, sigma, gamma);
        let at_half = voigt(half, 1.0, 0.0, sigma, gamma);
        assert!(rel(at_half, peak / 2.0) < 5e-3);
    }

    #[test]
    fn descriptor_shape() {
        let d = voigt_fitter();
        assert_eq!(d.npars(), 4);
        assert_eq!(d.parameter_names(), vec!["amplitude", "shift", "gaussian_width", "lorentzian_width"]);
        assert_eq!(
            d.limited(),
            vec![(false, false), (false, false), (true, false), (true, false)]
        );
        assert_eq!(d.short_names(), vec!["A", r"\Delta x", r"\sigma_G", r"\sigma_L"]);
        let two = [1.0, -3.0, 0.5, 0.2, 0.5, 3.0, 0.5, 0.2];
        let sum = d.evaluate(-3.0, &two).unwrap();
        let single = voigt(-3.0, 1.0, -3.0, 0.5, 0.2) + voigt(-3.0, 0.5, 3.0, 0.5, 0.2);
        assert!(rel(sum, single) < 1e-12);
    }

    #[test]
    fn amplitudes_are_recovered() {
        let d = voigt_fitter();
        let xs: Vec<f64> = (0..400).map(|i| -10.0 + 0.05 * i as f64).collect();
        let truth = [2.0, -3.0, 0.6, 0.3, 0.7, 4.0, 0.4, 0.5];
        let ys = d.evaluate_all(&xs, &truth).unwrap();
        let amps = d.fit_amplitudes(&xs, &ys, &truth).unwrap();
        assert!((amps[0] - 2.0).abs() < 1e-9);
        assert!((amps[1] - 0.7).abs() < 1e-9);
    }
}
