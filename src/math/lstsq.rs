//! Linear least squares for profile amplitudes.
//!
//! Every line shape here is linear in its amplitude. With the shape parameters
//! of each component held fixed, recovering the amplitudes is the problem
//!
//! ```text
//! minimize Σ (y_i − Σ_k a_k g_k(x_i))²
//! ```
//!
//! where `g_k` is component `k` evaluated with unit amplitude. The design
//! matrix is tall (channels × components), so it is solved through SVD.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve, e.g. two
/// components with identical shape.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() != y.len() || x.ncols() == 0 || x.nrows() < x.ncols() {
        return None;
    }
    let svd = x.clone().svd(true, true);
    let max_sv = svd.singular_values.max();
    if !(max_sv > 0.0) {
        return None;
    }
    // Reject rank deficiency instead of returning a minimum-norm split.
    let min_sv = svd.singular_values.min();
    if min_sv / max_sv < 1e-10 {
        return None;
    }
    let beta = svd.solve(y, 1e-12 * max_sv).ok()?;
    beta.iter().all(|v| v.is_finite()).then_some(beta)
}
