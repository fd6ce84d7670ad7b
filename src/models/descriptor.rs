//! Fit-model descriptors.
//!
//! A descriptor packages a line-shape kernel for an external fitting
//! framework: the evaluator, parameter names, bound flags and bound values,
//! and short (TeX) display names. A parameter vector may hold several
//! components back to back; the model value is the sum of the components.

use nalgebra::{DMatrix, DVector};

use crate::domain::ProfileKind;
use crate::error::{AxisError, AxisResult};
use crate::math::solve_least_squares;

/// Evaluate one component at `x`; `params` has exactly one block.
pub type Evaluator = fn(x: f64, params: &[f64]) -> f64;

/// Name, display name and bounds of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub short_name: &'static str,
    /// `(lower, upper)`: whether each bound is enforced.
    pub limited: (bool, bool),
    /// `(lower, upper)` bound values; only meaningful where `limited` is set.
    pub limits: (f64, f64),
}

impl ParameterSpec {
    pub const fn free(name: &'static str, short_name: &'static str) -> Self {
        Self {
            name,
            short_name,
            limited: (false, false),
            limits: (0.0, 0.0),
        }
    }

    pub const fn non_negative(name: &'static str, short_name: &'static str) -> Self {
        Self {
            name,
            short_name,
            limited: (true, false),
            limits: (0.0, 0.0),
        }
    }

    pub fn admits(&self, value: f64) -> bool {
        let (lo_on, hi_on) = self.limited;
        let (lo, hi) = self.limits;
        value.is_finite() && (!lo_on || value >= lo) && (!hi_on || value <= hi)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ModelDescriptor {
    pub kind: ProfileKind,
    pub evaluator: Evaluator,
    pub parameters: &'static [ParameterSpec],
}

impl ModelDescriptor {
    pub fn name(&self) -> &'static str {
        match self.kind {
            ProfileKind::Lorentzian => "lorentzian",
            ProfileKind::Voigt => "voigt",
        }
    }

    /// Parameters per component.
    pub fn npars(&self) -> usize {
        self.parameters.len()
    }

    pub fn parameter_names(&self) -> Vec<&'static str> {
        self.parameters.iter().map(|p| p.name).collect()
    }

    pub fn short_names(&self) -> Vec<&'static str> {
        self.parameters.iter().map(|p| p.short_name).collect()
    }

    pub fn limited(&self) -> Vec<(bool, bool)> {
        self.parameters.iter().map(|p| p.limited).collect()
    }

    pub fn limits(&self) -> Vec<(f64, f64)> {
        self.parameters.iter().map(|p| p.limits).collect()
    }

    /// Number of components in `params`.
    pub fn components(&self, params: &[f64]) -> AxisResult<usize> {
        let n = self.npars();
        if params.is_empty() || params.len() % n != 0 {
            return Err(AxisError::ParameterCount {
                model: self.name(),
                per_component: n,
                actual: params.len(),
            });
        }
        Ok(params.len() / n)
    }

    /// Sum of all components at `x`.
    pub fn evaluate(&self, x: f64, params: &[f64]) -> AxisResult<f64> {
        self.components(params)?;
        Ok(self.sum_at(x, params))
    }

    /// Sum of all components at every sample of `xs`.
    pub fn evaluate_all(&self, xs: &[f64], params: &[f64]) -> AxisResult<Vec<f64>> {
        self.components(params)?;
        Ok(xs.iter().map(|&x| self.sum_at(x, params)).collect())
    }

    fn sum_at(&self, x: f64, params: &[f64]) -> f64 {
        params
            .chunks_exact(self.npars())
            .map(|block| (self.evaluator)(x, block))
            .sum()
    }

    /// Whether every parameter respects its bound flags.
    pub fn within_bounds(&self, params: &[f64]) -> AxisResult<bool> {
        self.components(params)?;
        Ok(params
            .chunks_exact(self.npars())
            .all(|block| block.iter().zip(self.parameters).all(|(&v, spec)| spec.admits(v))))
    }

    /// Least-squares amplitudes for fixed component shapes.
    ///
    /// The amplitude is the first parameter of every block; the amplitudes in
    /// `params` are ignored. Returns one amplitude per component.
    pub fn fit_amplitudes(&self, xs: &[f64], ys: &[f64], params: &[f64]) -> AxisResult<Vec<f64>> {
        let k = self.components(params)?;
        if xs.len() != ys.len() {
            return Err(AxisError::InvalidInput(format!(
                "{} x samples but {} y samples",
                xs.len(),
                ys.len()
            )));
        }
        let mut design = DMatrix::zeros(xs.len(), k);
        for (j, block) in params.chunks_exact(self.npars()).enumerate() {
            let mut unit = block.to_vec();
            unit[0] = 1.0;
            for (i, &x) in xs.iter().enumerate() {
                design[(i, j)] = (self.evaluator)(x, &unit);
            }
        }
        let y = DVector::from_column_slice(ys);
        solve_least_squares(&design, &y)
            .map(|beta| beta.iter().copied().collect())
            .ok_or_else(|| {
                AxisError::InvalidInput("component shapes are degenerate for this axis".into())
            })
    }
}
