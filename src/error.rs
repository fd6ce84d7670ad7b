//! Error types.
//!
//! - [`AxisError`] is the library error for unit lookup, Doppler conversion,
//!   axis mutation and model evaluation.
//! - [`AppError`] is the binary-facing error carrying a process exit code.

use thiserror::Error;

use crate::domain::QuantityType;

/// Result alias for library operations that may produce [`AxisError`].
pub type AxisResult<T> = Result<T, AxisError>;

/// A conversion failure recorded for one member of an axis collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberFailure {
    /// Position of the member in the input list (0-based).
    pub index: usize,
    pub error: AxisError,
}

impl std::fmt::Display for MemberFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "axis {}: {}", self.index, self.error)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AxisError {
    /// Unit name is not present in any unit table.
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    /// Frequency <-> velocity conversion requested without a reference frequency.
    #[error("cannot convert between frequency and velocity without a reference frequency")]
    MissingReference,

    /// Doppler convention outside {radio, optical, relativistic}.
    #[error("convention '{0}' is not allowed (expected radio, optical or relativistic)")]
    UnsupportedConvention(String),

    /// A unit does not belong to the quantity type an operation expects.
    #[error("unit '{unit}' is a {found} unit, expected {expected}")]
    WrongDomain {
        unit: String,
        expected: QuantityType,
        found: QuantityType,
    },

    /// No conversion path between two quantity types.
    #[error("no conversion path from {from} to {to}")]
    UnresolvableConversion { from: QuantityType, to: QuantityType },

    /// Malformed input (empty collection, bad parameter values, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Axis type tag was not recognized and strict parsing is enabled.
    #[error("unrecognized axis type '{0}'")]
    UnrecognizedXType(String),

    /// Operation needs at least one sample.
    #[error("axis has no samples")]
    EmptyAxis,

    /// Model parameter vector is not a whole number of component blocks.
    #[error("model '{model}' takes {per_component} parameters per component, got {actual}")]
    ParameterCount {
        model: &'static str,
        per_component: usize,
        actual: usize,
    },

    /// One or more collection members could not be brought to the common unit/frame.
    #[error("{} axis member(s) could not be converted: {}", .failures.len(), join_failures(.failures))]
    MemberConversion { failures: Vec<MemberFailure> },
}

fn join_failures(failures: &[MemberFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<AxisError> for AppError {
    fn from(err: AxisError) -> Self {
        let exit_code = match err {
            AxisError::UnknownUnit(_)
            | AxisError::UnsupportedConvention(_)
            | AxisError::InvalidInput(_)
            | AxisError::UnrecognizedXType(_)
            | AxisError::ParameterCount { .. } => 2,
            AxisError::EmptyAxis => 3,
            AxisError::MissingReference
            | AxisError::WrongDomain { .. }
            | AxisError::UnresolvableConversion { .. }
            | AxisError::MemberConversion { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}
