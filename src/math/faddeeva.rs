//! Faddeeva function `w(z) = exp(−z²) erfc(−iz)` for the upper half plane.
//!
//! Uses Humlicek's four-region rational approximation (W4, 1982). Relative
//! accuracy is about 1e-4 everywhere with `Im z ≥ 0`, which is what the Voigt
//! profile needs. The regions are chosen on `s = |x| + y` with `z = x + iy`:
//!
//! - `s ≥ 15`: one-pole asymptotic form
//! - `5.5 ≤ s < 15`: two-pole form
//! - `y ≥ 0.195|x| − 0.176`: degree-5 rational in `t = y − ix`
//! - otherwise: `exp(t²)` minus a degree-7 rational in `t²`

use nalgebra::Complex;

pub type C64 = Complex<f64>;

/// Evaluate `w(z)` for `Im z ≥ 0`.
///
/// Values below the real axis are not supported; the caller keeps `Im z`
/// non-negative (a Lorentzian width is never negative).
pub fn faddeeva(z: C64) -> C64 {
    let x = z.re;
    let y = z.im;
    let t = C64::new(y, -x);
    let s = x.abs() + y;

    if s >= 15.0 {
        return t * 0.5641896 / (0.5 + t * t);
    }
    if s >= 5.5 {
        let u = t * t;
        return t * (1.410474 + u * 0.5641896) / (0.75 + u * (3.0 + u));
    }
    if y >= 0.195 * x.abs() - 0.176 {
        let num = 16.4955 + t * (20.20933 + t * (11.96482 + t * (3.778987 + t * 0.5642236)));
        let den = 16.4955
            + t * (38.82363 + t * (39.27121 + t * (21.69274 + t * (6.699398 + t))));
        return num / den;
    }
    let u = t * t;
    let num = 36183.31
        - u * (3321.9905
            - u * (1540.787 - u * (219.0313 - u * (35.76683 - u * (1.320522 - u * 0.56419)))));
    let den = 32066.6
        - u * (24322.84
            - u * (9022.228
                - u * (2186.181 - u * (364.2191 - u * (61.57037 - u * (1.841439 - u))))));
    u.exp() - t * num / den
}
