//! Formatted terminal output.
//!
//! Formatting lives here so the axis and model code stay free of presentation
//! concerns.

use crate::axis::{ConversionReport, HeaderDescriptor, SpectroscopicAxis};
use crate::domain::QuantityType;
use crate::models::ModelDescriptor;
use crate::report::ResidualStats;
use crate::units::unit_names;

/// Known units grouped by quantity type.
pub fn format_unit_table() -> String {
    let mut out = String::new();
    for quantity in [
        QuantityType::Frequency,
        QuantityType::Velocity,
        QuantityType::Length,
        QuantityType::Redshift,
    ] {
        out.push_str(&format!("{quantity:<10} {}\n", unit_names(quantity).join(", ")));
    }
    out
}

/// One-block description of an axis.
pub fn format_axis_summary(axis: &SpectroscopicAxis, tolerance: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!("Samples: {}\n", axis.len()));
    out.push_str(&format!("Unit: {} ({})\n", axis.unit(), axis.xtype()));
    out.push_str(&format!("Frame: {}\n", axis.frame()));
    out.push_str(&format!("Convention: {}\n", axis.velocity_convention()));
    match axis.reference_frequency() {
        Some(r) => out.push_str(&format!("Reference frequency: {r}\n")),
        None => out.push_str("Reference frequency: -\n"),
    }
    if let Ok((lo, hi)) = axis.extent(None) {
        out.push_str(&format!("Range: {lo:.9} .. {hi:.9} {}\n", axis.unit()));
    }
    match axis.channel_spacing(tolerance) {
        Some(d) => out.push_str(&format!("Channel width: {d:.9} {}\n", axis.unit())),
        None => out.push_str("Channel width: non-uniform\n"),
    }
    out
}

pub fn format_conversion(from: &str, to: &str, report: &ConversionReport) -> String {
    let mut out = String::new();
    if report.is_noop() {
        out.push_str(&format!("Axis already in {to}; values unchanged.\n"));
        return out;
    }
    if report.unit_changed {
        let kind = if report.quantity_changed { "Doppler/wavelength" } else { "rescale" };
        out.push_str(&format!("Converted {from} -> {to} ({kind}).\n"));
    }
    if report.frame_change_skipped {
        out.push_str("Note: frame transformation is not supported; frame left unchanged.\n");
    }
    out
}

/// FITS-style header cards, one per line.
pub fn format_header_cards(header: &HeaderDescriptor, linear: bool) -> String {
    let mut out = String::new();
    for (key, value) in header.entries() {
        out.push_str(&format!("{key:<8}= {value}\n"));
    }
    if !linear {
        out.push_str("(axis is not uniformly sampled: CDELT1/CRVAL1/CRPIX1 undefined)\n");
    }
    out
}

pub fn format_profile_summary(
    descriptor: &ModelDescriptor,
    params: &[f64],
    residuals: Option<&ResidualStats>,
    amplitudes: Option<&[f64]>,
) -> String {
    let mut out = String::new();
    let npars = descriptor.npars().max(1);
    out.push_str(&format!(
        "Model: {} ({} component(s))\n",
        descriptor.kind.display_name(),
        params.len() / npars
    ));
    for (i, block) in params.chunks(npars).enumerate() {
        let fields: Vec<String> = descriptor
            .parameters
            .iter()
            .zip(block)
            .map(|(spec, v)| format!("{}={v}", spec.name))
            .collect();
        out.push_str(&format!("  [{}] {}\n", i + 1, fields.join(" ")));
    }
    if let Some(stats) = residuals {
        out.push_str(&format!(
            "Noise residual: rms={:.6} max|r|={:.6} (n={})\n",
            stats.rms, stats.max_abs, stats.n
        ));
    }
    if let Some(amps) = amplitudes {
        let list: Vec<String> = amps.iter().map(|a| format!("{a:.6}")).collect();
        out.push_str(&format!("Recovered amplitudes: {}\n", list.join(", ")));
    }
    out
}
