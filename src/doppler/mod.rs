//! Doppler and wavelength converters.
//!
//! Frequency, velocity and wavelength values are related through two rules:
//!
//! - `λ = c / f` (pure rescaling, no reference needed)
//! - `f ↔ v` through a reference frequency `f0` and a [`DopplerConvention`]
//!
//! Every convention is expressed as a ratio `r = f / f0` of `β = v / c`:
//!
//! - radio:        `r = 1 − β`,              `β = 1 − r`
//! - optical:      `r = 1 / (1 + β)`,        `β = (1 − r) / r`
//! - relativistic: `r = √(1 − β²) / (1 + β)`, `β = (1 − r²) / (1 + r²)`
//!
//! The four public converters work elementwise on slices. When the input is
//! already in the requested domain they return it as [`Conversion::Unchanged`]
//! instead of failing.

use log::{debug, info};

use crate::domain::{DopplerConvention, QuantityType};
use crate::error::{AxisError, AxisResult};
use crate::units::{SPEED_OF_LIGHT_MS, Unit};

/// Rest frequency anchoring velocities.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceFrequency {
    pub value: f64,
    pub unit: Unit,
}

impl ReferenceFrequency {
    /// Build a reference frequency; `unit` must be a frequency unit.
    pub fn new(value: f64, unit: &str) -> AxisResult<Self> {
        let unit = Unit::parse(unit)?;
        expect_quantity(&unit, QuantityType::Frequency)?;
        Ok(Self { value, unit })
    }

    pub fn hz(&self) -> f64 {
        self.unit.to_si(self.value)
    }
}

impl std::fmt::Display for ReferenceFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Result of an elementwise converter.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    /// Values mapped into the requested domain.
    Converted(Vec<f64>),
    /// Input already in the requested domain, returned as-is.
    Unchanged(Vec<f64>),
}

impl Conversion {
    pub fn was_converted(&self) -> bool {
        matches!(self, Conversion::Converted(_))
    }

    pub fn values(&self) -> &[f64] {
        match self {
            Conversion::Converted(v) | Conversion::Unchanged(v) => v,
        }
    }

    pub fn into_values(self) -> Vec<f64> {
        match self {
            Conversion::Converted(v) | Conversion::Unchanged(v) => v,
        }
    }
}

/// `f / f0` for a velocity fraction `β`.
pub fn frequency_ratio(beta: f64, convention: DopplerConvention) -> f64 {
    match convention {
        DopplerConvention::Radio => 1.0 - beta,
        DopplerConvention::Optical => 1.0 / (1.0 + beta),
        DopplerConvention::Relativistic => (1.0 - beta * beta).sqrt() / (1.0 + beta),
    }
}

/// `β = v / c` for a frequency ratio `r = f / f0`.
pub fn velocity_fraction(ratio: f64, convention: DopplerConvention) -> f64 {
    match convention {
        DopplerConvention::Radio => 1.0 - ratio,
        DopplerConvention::Optical => (1.0 - ratio) / ratio,
        DopplerConvention::Relativistic => {
            let r2 = ratio * ratio;
            (1.0 - r2) / (1.0 + r2)
        }
    }
}

/// Convert velocities to frequencies.
///
/// Frequencies come out in `frequency_unit`. Input already in a frequency unit
/// is returned unchanged.
pub fn velocity_to_frequency(
    values: &[f64],
    velocity_unit: &str,
    reference: Option<&ReferenceFrequency>,
    frequency_unit: &str,
    convention: DopplerConvention,
) -> AxisResult<Conversion> {
    let input = Unit::parse(velocity_unit)?;
    if input.quantity() == QuantityType::Frequency {
        info!("velocity_to_frequency: input already in frequency units ({input})");
        return Ok(Conversion::Unchanged(values.to_vec()));
    }
    expect_quantity(&input, QuantityType::Velocity)?;
    let reference = reference.ok_or(AxisError::MissingReference)?;
    let output = Unit::parse(frequency_unit)?;
    expect_quantity(&output, QuantityType::Frequency)?;

    // Scale in the reference's own unit so that v = 0 reproduces f0 exactly.
    let to_output = reference.unit.factor_to(&output);
    let out = values
        .iter()
        .map(|&v| {
            let beta = input.to_si(v) / SPEED_OF_LIGHT_MS;
            reference.value * frequency_ratio(beta, convention) * to_output
        })
        .collect();
    Ok(Conversion::Converted(out))
}

/// Convert frequencies to velocities.
///
/// Velocities come out in `velocity_unit`. Input already in a velocity unit is
/// returned unchanged.
pub fn frequency_to_velocity(
    values: &[f64],
    frequency_unit: &str,
    reference: Option<&ReferenceFrequency>,
    velocity_unit: &str,
    convention: DopplerConvention,
) -> AxisResult<Conversion> {
    let input = Unit::parse(frequency_unit)?;
    if input.quantity() == QuantityType::Velocity {
        info!("frequency_to_velocity: input already in velocity units ({input})");
        return Ok(Conversion::Unchanged(values.to_vec()));
    }
    expect_quantity(&input, QuantityType::Frequency)?;
    let reference = reference.ok_or(AxisError::MissingReference)?;
    let output = Unit::parse(velocity_unit)?;
    expect_quantity(&output, QuantityType::Velocity)?;

    let f0_hz = reference.hz();
    let out = values
        .iter()
        .map(|&f| {
            let beta = velocity_fraction(input.to_si(f) / f0_hz, convention);
            output.from_si(beta * SPEED_OF_LIGHT_MS)
        })
        .collect();
    Ok(Conversion::Converted(out))
}

/// Convert frequencies to wavelengths (`λ = c / f`).
pub fn frequency_to_wavelength(
    values: &[f64],
    frequency_unit: &str,
    wavelength_unit: &str,
) -> AxisResult<Conversion> {
    let input = Unit::parse(frequency_unit)?;
    if input.quantity() == QuantityType::Length {
        info!("frequency_to_wavelength: input already in wavelength units ({input})");
        return Ok(Conversion::Unchanged(values.to_vec()));
    }
    expect_quantity(&input, QuantityType::Frequency)?;
    let output = Unit::parse(wavelength_unit)?;
    expect_quantity(&output, QuantityType::Length)?;

    let out = values
        .iter()
        .map(|&f| output.from_si(SPEED_OF_LIGHT_MS / input.to_si(f)))
        .collect();
    Ok(Conversion::Converted(out))
}

/// Convert wavelengths to frequencies (`f = c / λ`).
pub fn wavelength_to_frequency(
    values: &[f64],
    wavelength_unit: &str,
    frequency_unit: &str,
) -> AxisResult<Conversion> {
    let input = Unit::parse(wavelength_unit)?;
    if input.quantity() == QuantityType::Frequency {
        info!("wavelength_to_frequency: input already in frequency units ({input})");
        return Ok(Conversion::Unchanged(values.to_vec()));
    }
    expect_quantity(&input, QuantityType::Length)?;
    let output = Unit::parse(frequency_unit)?;
    expect_quantity(&output, QuantityType::Frequency)?;

    let out = values
        .iter()
        .map(|&l| output.from_si(SPEED_OF_LIGHT_MS / input.to_si(l)))
        .collect();
    Ok(Conversion::Converted(out))
}

fn expect_quantity(unit: &Unit, expected: QuantityType) -> AxisResult<()> {
    if unit.quantity() == expected {
        Ok(())
    } else {
        Err(AxisError::WrongDomain {
            unit: unit.name().to_string(),
            expected,
            found: unit.quantity(),
        })
    }
}

/// Doppler parameters needed to route values between spectral quantity types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DopplerContext {
    /// Reference frequency in Hz, if defined.
    pub reference_hz: Option<f64>,
    pub convention: DopplerConvention,
}

impl DopplerContext {
    pub fn new(reference: Option<&ReferenceFrequency>, convention: DopplerConvention) -> Self {
        Self {
            reference_hz: reference.map(ReferenceFrequency::hz),
            convention,
        }
    }
}

/// A validated path from one unit to another.
///
/// Same-quantity conversions are a single multiplication; everything else goes
/// through Hz as the hub.
#[derive(Debug, Clone, Copy)]
enum Route {
    Rescale(f64),
    ViaFrequency { reference_hz: f64 },
}

fn plan(from: &Unit, to: &Unit, ctx: &DopplerContext) -> AxisResult<Route> {
    let (qf, qt) = (from.quantity(), to.quantity());
    if qf == qt {
        return Ok(Route::Rescale(from.factor_to(to)));
    }
    if !(qf.is_spectral() && qt.is_spectral()) {
        return Err(AxisError::UnresolvableConversion { from: qf, to: qt });
    }
    let needs_reference = qf == QuantityType::Velocity || qt == QuantityType::Velocity;
    let reference_hz = match ctx.reference_hz {
        Some(hz) => hz,
        None if needs_reference => return Err(AxisError::MissingReference),
        // Never read on frequency <-> length routes.
        None => f64::NAN,
    };
    debug!("routing {from} ({qf}) -> {to} ({qt}) via Hz, convention {}", ctx.convention);
    Ok(Route::ViaFrequency { reference_hz })
}

fn to_hz(value: f64, unit: &Unit, reference_hz: f64, convention: DopplerConvention) -> f64 {
    match unit.quantity() {
        QuantityType::Length => SPEED_OF_LIGHT_MS / unit.to_si(value),
        QuantityType::Velocity => {
            reference_hz * frequency_ratio(unit.to_si(value) / SPEED_OF_LIGHT_MS, convention)
        }
        _ => unit.to_si(value),
    }
}

fn from_hz(hz: f64, unit: &Unit, reference_hz: f64, convention: DopplerConvention) -> f64 {
    match unit.quantity() {
        QuantityType::Length => unit.from_si(SPEED_OF_LIGHT_MS / hz),
        QuantityType::Velocity => {
            unit.from_si(velocity_fraction(hz / reference_hz, convention) * SPEED_OF_LIGHT_MS)
        }
        _ => unit.from_si(hz),
    }
}

fn apply(route: Route, value: f64, from: &Unit, to: &Unit, convention: DopplerConvention) -> f64 {
    match route {
        Route::Rescale(factor) => value * factor,
        Route::ViaFrequency { reference_hz } => {
            let hz = to_hz(value, from, reference_hz, convention);
            from_hz(hz, to, reference_hz, convention)
        }
    }
}

/// Convert one value between any two units, crossing quantity types if needed.
pub fn convert_value(value: f64, from: &Unit, to: &Unit, ctx: &DopplerContext) -> AxisResult<f64> {
    let route = plan(from, to, ctx)?;
    Ok(apply(route, value, from, to, ctx.convention))
}

/// Elementwise [`convert_value`]; the route is validated once.
pub fn convert_values(
    values: &[f64],
    from: &Unit,
    to: &Unit,
    ctx: &DopplerContext,
) -> AxisResult<Vec<f64>> {
    let route = plan(from, to, ctx)?;
    Ok(values
        .iter()
        .map(|&v| apply(route, v, from, to, ctx.convention))
        .collect())
}
