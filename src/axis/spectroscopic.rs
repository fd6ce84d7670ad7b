//! The spectroscopic axis: coordinate samples that know their unit and frame.
//!
//! An axis owns its value buffer plus the metadata needed to reinterpret it:
//!
//! - `unit` and `xtype` (the quantity the axis measures)
//! - `frame` (kinematic frame label, never transformed)
//! - reference frequency and Doppler convention (for frequency ↔ velocity)
//!
//! Invariants:
//! - after every successful conversion `unit` and `xtype` agree
//! - `spacing` always holds the consecutive differences of the current values
//!   (recomputed eagerly at the end of each mutation)
//! - a cached header descriptor is dropped whenever the values change

use std::ops::Range;

use log::{info, warn};

use crate::axis::header::HeaderDescriptor;
use crate::domain::{DopplerConvention, Frame, QuantityType};
use crate::doppler::{DopplerContext, ReferenceFrequency, convert_value, convert_values};
use crate::error::{AxisError, AxisResult};
use crate::units::{Unit, lookup_xtype};

/// Default relative tolerance for the uniform-spacing check.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Optional construction parameters.
#[derive(Debug, Clone, Default)]
pub struct AxisOptions {
    /// Frame label; overridden by the frame an explicit `xtype` implies.
    pub frame: Frame,
    /// Axis type tag (`VRAD`, `FREQ`, `wavelength`, ...).
    pub xtype: Option<String>,
    pub reference_frequency: Option<f64>,
    /// Defaults to the axis unit for frequency axes, `Hz` otherwise.
    pub reference_frequency_unit: Option<String>,
    pub redshift: Option<f64>,
    /// Explicit convention; wins over the one derived from `xtype`.
    pub convention: Option<DopplerConvention>,
    /// Reject unrecognized `xtype` tags instead of falling back to the unit's type.
    pub strict_xtype: bool,
}

/// Parameters for [`SpectroscopicAxis::convert_with`].
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Requested frame. Frame changes are reported, not performed.
    pub frame: Frame,
    /// Reference frequency to use instead of the axis' own. When given and the
    /// conversion succeeds, it becomes the axis reference.
    pub reference: Option<ReferenceFrequency>,
}

/// What a conversion call actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub quantity_changed: bool,
    pub unit_changed: bool,
    /// A different frame was requested; the frame was left as it was.
    pub frame_change_skipped: bool,
}

impl ConversionReport {
    pub fn is_noop(&self) -> bool {
        !self.quantity_changed && !self.unit_changed && !self.frame_change_skipped
    }
}

#[derive(Debug, Clone)]
pub struct SpectroscopicAxis {
    values: Vec<f64>,
    unit: Unit,
    xtype: QuantityType,
    frame: Frame,
    reference: Option<ReferenceFrequency>,
    redshift: Option<f64>,
    convention: DopplerConvention,
    spacing: Vec<f64>,
    header: Option<HeaderDescriptor>,
}

impl SpectroscopicAxis {
    /// Build an axis in the rest frame with the quantity type implied by `unit`.
    pub fn new(values: Vec<f64>, unit: &str) -> AxisResult<Self> {
        Self::with_options(values, unit, AxisOptions::default())
    }

    pub fn with_options(values: Vec<f64>, unit: &str, opts: AxisOptions) -> AxisResult<Self> {
        let unit = Unit::parse(unit)?;
        let mut frame = opts.frame;

        let (xtype, derived_convention) = match opts.xtype.as_deref() {
            Some(tag) => match lookup_xtype(tag) {
                Some((quantity, implied_frame)) => {
                    frame = implied_frame;
                    (quantity, DopplerConvention::from_xtype_tag(tag))
                }
                None if opts.strict_xtype => {
                    return Err(AxisError::UnrecognizedXType(tag.to_string()));
                }
                None => {
                    warn!("unknown axis type '{tag}'; using the {} type of unit {unit}", unit.quantity());
                    (unit.quantity(), DopplerConvention::from_xtype_tag(tag))
                }
            },
            None => (unit.quantity(), DopplerConvention::default()),
        };

        let reference = match opts.reference_frequency {
            Some(value) => {
                let ref_unit = match opts.reference_frequency_unit.as_deref() {
                    Some(name) => name.to_string(),
                    None if unit.quantity() == QuantityType::Frequency => unit.name().to_string(),
                    None => "Hz".to_string(),
                };
                Some(ReferenceFrequency::new(value, &ref_unit)?)
            }
            None => None,
        };

        Ok(Self::from_parts(
            values,
            unit,
            xtype,
            frame,
            reference,
            opts.redshift,
            opts.convention.unwrap_or(derived_convention),
        ))
    }

    pub(crate) fn from_parts(
        values: Vec<f64>,
        unit: Unit,
        xtype: QuantityType,
        frame: Frame,
        reference: Option<ReferenceFrequency>,
        redshift: Option<f64>,
        convention: DopplerConvention,
    ) -> Self {
        let spacing = differences(&values);
        Self {
            values,
            unit,
            xtype,
            frame,
            reference,
            redshift,
            convention,
            spacing,
            header: None,
        }
    }

    /// Rebuild a linear axis of `len` samples from a header descriptor.
    ///
    /// `value_i = CRVAL1 + (i + 1 − CRPIX1) · CDELT1` for 0-based `i`.
    pub fn from_header(header: &HeaderDescriptor, len: usize) -> AxisResult<Self> {
        let (Some(cdelt), Some(crval), Some(crpix)) = (header.cdelt, header.crval, header.crpix)
        else {
            return Err(AxisError::InvalidInput(
                "header does not describe a linear axis (CDELT1/CRVAL1/CRPIX1 undefined)".into(),
            ));
        };
        let values = (0..len)
            .map(|i| crval + (i as f64 + 1.0 - crpix) * cdelt)
            .collect();

        let mut axis = Self::with_options(
            values,
            &header.cunit,
            AxisOptions {
                xtype: Some(header.ctype.clone()),
                ..AxisOptions::default()
            },
        )?;
        if let Some(frame) = Frame::from_specsys(&header.specsys) {
            axis.frame = frame;
        }
        axis.reference = header
            .reffreq
            .map(|hz| ReferenceFrequency {
                value: hz,
                unit: Unit::hertz(),
            });
        Ok(axis)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn xtype(&self) -> QuantityType {
        self.xtype
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn reference_frequency(&self) -> Option<&ReferenceFrequency> {
        self.reference.as_ref()
    }

    pub fn set_reference_frequency(&mut self, reference: Option<ReferenceFrequency>) {
        self.reference = reference;
        self.header = None;
    }

    pub fn redshift(&self) -> Option<f64> {
        self.redshift
    }

    pub fn velocity_convention(&self) -> DopplerConvention {
        self.convention
    }

    pub fn set_velocity_convention(&mut self, convention: DopplerConvention) {
        self.convention = convention;
        self.header = None;
    }

    /// Consecutive differences of the values (`len − 1` entries).
    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    /// Header descriptor from the last [`build_header_descriptor`](Self::build_header_descriptor)
    /// call, if the axis has not changed since.
    pub fn header(&self) -> Option<&HeaderDescriptor> {
        self.header.as_ref()
    }

    fn doppler_context(&self, reference: Option<&ReferenceFrequency>) -> DopplerContext {
        DopplerContext::new(reference.or(self.reference.as_ref()), self.convention)
    }

    /// `(min, max)` of the axis, optionally expressed in another unit.
    ///
    /// The extremes are converted before ordering since a conversion such as
    /// frequency → wavelength reverses the axis.
    pub fn extent(&self, unit: Option<&str>) -> AxisResult<(f64, f64)> {
        if self.values.is_empty() {
            return Err(AxisError::EmptyAxis);
        }
        let lo = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        match unit {
            None => Ok((lo, hi)),
            Some(unit) => {
                let a = self.coordinate_to_external(lo, unit)?;
                let b = self.coordinate_to_external(hi, unit)?;
                Ok((a.min(b), a.max(b)))
            }
        }
    }

    /// Index of the sample closest to `x` (axis units). `None` for an empty axis.
    pub fn nearest_index(&self, x: f64) -> Option<usize> {
        self.values
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - x).abs().total_cmp(&(*b - x).abs()))
            .map(|(idx, _)| idx)
    }

    /// Express `value`, given in `external_unit`, in the axis unit.
    pub fn external_to_coordinate(&self, value: f64, external_unit: &str) -> AxisResult<f64> {
        let from = Unit::parse(external_unit)?;
        convert_value(value, &from, &self.unit, &self.doppler_context(None))
    }

    /// Express `value`, given in the axis unit, in `external_unit`.
    pub fn coordinate_to_external(&self, value: f64, external_unit: &str) -> AxisResult<f64> {
        let to = Unit::parse(external_unit)?;
        convert_value(value, &self.unit, &to, &self.doppler_context(None))
    }

    /// Convert in place to `unit`, requesting the rest frame.
    pub fn convert_to_unit(&mut self, unit: &str) -> AxisResult<ConversionReport> {
        self.convert_with(unit, &ConvertOptions::default())
    }

    /// Convert the axis values in place.
    ///
    /// Same-quantity changes rescale by `old_multiplier / new_multiplier`;
    /// quantity changes go through the Doppler/wavelength converters using the
    /// axis convention. On error the axis is left untouched.
    pub fn convert_with(&mut self, unit: &str, opts: &ConvertOptions) -> AxisResult<ConversionReport> {
        let target = Unit::parse(unit)?;
        let quantity_changed =
            target.quantity() != self.xtype || target.quantity() != self.unit.quantity();
        let renamed = !target.name().eq_ignore_ascii_case(self.unit.name());
        let report = ConversionReport {
            quantity_changed,
            unit_changed: quantity_changed || renamed,
            frame_change_skipped: opts.frame != self.frame,
        };

        if report.unit_changed {
            // Equivalent spellings (`um`/`micron`) only relabel the axis.
            if quantity_changed || !target.same_as(&self.unit) {
                let ctx = self.doppler_context(opts.reference.as_ref());
                self.values = convert_values(&self.values, &self.unit, &target, &ctx)?;
            }
            info!("converting axis from {} to {}", self.unit, target);
            self.xtype = target.quantity();
            self.unit = target;
            if let Some(reference) = &opts.reference {
                self.reference = Some(reference.clone());
            }
            self.refresh();
        }

        if report.frame_change_skipped {
            info!(
                "conversion from frame {} to {} is not supported; frame left unchanged",
                self.frame, opts.frame
            );
        }
        if report.is_noop() {
            info!("axis already in {} / {} / {}", self.unit, self.xtype, self.frame);
        }
        Ok(report)
    }

    fn refresh(&mut self) {
        self.spacing = differences(&self.values);
        self.header = None;
    }

    /// Mean channel width when the axis is uniformly sampled.
    ///
    /// Returns `None` for axes with fewer than two samples or when
    /// `(max Δ − min Δ) / |min Δ| ≥ tolerance`.
    pub fn channel_spacing(&self, tolerance: f64) -> Option<f64> {
        if self.spacing.is_empty() {
            return None;
        }
        let lo = self.spacing.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.spacing.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if (hi - lo) / lo.abs() < tolerance {
            Some(self.spacing.iter().sum::<f64>() / self.spacing.len() as f64)
        } else {
            None
        }
    }

    /// `CTYPE1` code: `V` + convention suffix for velocity axes, the quantity
    /// code otherwise, followed by the frame suffix.
    pub fn ctype(&self) -> String {
        let code = match self.xtype {
            QuantityType::Velocity => format!("V{}", self.convention.fits_suffix()),
            other => other.fits_code().to_string(),
        };
        format!("{code}{}", self.frame.fits_suffix())
    }

    /// Describe the axis without caching the result.
    pub fn describe(&self, tolerance: f64) -> (HeaderDescriptor, bool) {
        let cdelt = self.channel_spacing(tolerance);
        let linear = cdelt.is_some() && !self.values.is_empty();
        let header = HeaderDescriptor {
            ctype: self.ctype(),
            cunit: self.unit.name().to_string(),
            cdelt: cdelt.filter(|_| linear),
            crval: self.values.first().copied().filter(|_| linear),
            crpix: linear.then_some(1.0),
            specsys: self.frame.specsys().to_string(),
            reffreq: self.reference.as_ref().map(ReferenceFrequency::hz),
        };
        (header, linear)
    }

    /// Populate and cache the header descriptor; the flag reports linearity.
    pub fn build_header_descriptor(&mut self, tolerance: f64) -> (HeaderDescriptor, bool) {
        let (header, linear) = self.describe(tolerance);
        self.header = Some(header.clone());
        (header, linear)
    }

    /// Copy of a sub-range of samples with the same metadata.
    pub fn slice(&self, range: Range<usize>) -> AxisResult<Self> {
        let Some(values) = self.values.get(range.clone()) else {
            return Err(AxisError::InvalidInput(format!(
                "slice {}..{} out of bounds for axis of length {}",
                range.start,
                range.end,
                self.values.len()
            )));
        };
        Ok(Self::from_parts(
            values.to_vec(),
            self.unit.clone(),
            self.xtype,
            self.frame,
            self.reference.clone(),
            self.redshift,
            self.convention,
        ))
    }
}

fn differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * a.abs().max(b.abs()).max(1e-300)
    }

    fn co_axis_kms() -> SpectroscopicAxis {
        let values: Vec<f64> = (0..11).map(|i| -50.0 + 10.0 * i as f64).collect();
        SpectroscopicAxis::with_options(
            values,
            "km/s",
            AxisOptions {
                xtype: Some("VRAD".into()),
                reference_frequency: Some(115.271202),
                reference_frequency_unit: Some("GHz".into()),
                ..AxisOptions::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn construction_derives_xtype_and_spacing() {
        let axis = SpectroscopicAxis::new(vec![1.0, 2.0, 4.0], "GHz").unwrap();
        assert_eq!(axis.xtype(), QuantityType::Frequency);
        assert_eq!(axis.frame(), Frame::Rest);
        assert_eq!(axis.velocity_convention(), DopplerConvention::Radio);
        assert_eq!(axis.spacing(), &[1.0, 2.0]);
    }

    #[test]
    fn explicit_xtype_sets_frame_and_convention() {
        let axis = SpectroscopicAxis::with_options(
            vec![0.0, 1.0],
            "km/s",
            AxisOptions {
                frame: Frame::Rest,
                xtype: Some("VOPT".into()),
                ..AxisOptions::default()
            },
        )
        .unwrap();
        assert_eq!(axis.xtype(), QuantityType::Velocity);
        assert_eq!(axis.frame(), Frame::Lsrk);
        assert_eq!(axis.velocity_convention(), DopplerConvention::Optical);
    }

    #[test]
    fn unknown_xtype_is_lenient_unless_strict() {
        let opts = AxisOptions {
            xtype: Some("wavenumber".into()),
            ..AxisOptions::default()
        };
        let axis = SpectroscopicAxis::with_options(vec![1.0], "cm", opts.clone()).unwrap();
        assert_eq!(axis.xtype(), QuantityType::Length);

        let strict = AxisOptions {
            strict_xtype: true,
            ..opts
        };
        assert_eq!(
            SpectroscopicAxis::with_options(vec![1.0], "cm", strict).unwrap_err(),
            AxisError::UnrecognizedXType("wavenumber".into())
        );
    }

    #[test]
    fn unknown_unit_fails_construction() {
        assert!(matches!(
            SpectroscopicAxis::new(vec![1.0], "parsec"),
            Err(AxisError::UnknownUnit(_))
        ));
    }

    #[test]
    fn reference_unit_defaults_follow_axis_unit() {
        let freq = SpectroscopicAxis::with_options(
            vec![1.0],
            "MHz",
            AxisOptions {
                reference_frequency: Some(1420.405751),
                ..AxisOptions::default()
            },
        )
        .unwrap();
        assert_eq!(freq.reference_frequency().unwrap().unit.name(), "MHz");

        let vel = SpectroscopicAxis::with_options(
            vec![1.0],
            "km/s",
            AxisOptions {
                reference_frequency: Some(1.420405751e9),
                ..AxisOptions::default()
            },
        )
        .unwrap();
        assert_eq!(vel.reference_frequency().unwrap().unit.name(), "Hz");
    }

    #[test]
    fn same_type_rescale_round_trips() {
        let original = vec![100.0, 100.5, 101.0, 101.5];
        let mut axis = SpectroscopicAxis::new(original.clone(), "GHz").unwrap();
        let report = axis.convert_to_unit("MHz").unwrap();
        assert!(report.unit_changed && !report.quantity_changed);
        assert_eq!(axis.values()[0], 100_000.0);
        assert!(close(axis.spacing()[0], 500.0, 1e-12));

        axis.convert_to_unit("GHz").unwrap();
        for (a, b) in axis.values().iter().zip(&original) {
            assert!(close(*a, *b, 1e-9));
        }
    }

    #[test]
    fn chain_through_velocity_and_wavelength_round_trips() {
        let mut axis = co_axis_kms();
        let original = axis.values().to_vec();
        let opts = ConvertOptions {
            frame: Frame::Lsrk,
            ..ConvertOptions::default()
        };
        axis.convert_with("GHz", &opts).unwrap();
        assert_eq!(axis.xtype(), QuantityType::Frequency);
        axis.convert_with("mm", &opts).unwrap();
        assert_eq!(axis.xtype(), QuantityType::Length);
        axis.convert_with("m/s", &opts).unwrap();
        axis.convert_with("km/s", &opts).unwrap();
        assert_eq!(axis.xtype(), QuantityType::Velocity);
        for (a, b) in axis.values().iter().zip(&original) {
            assert!((a - b).abs() < 1e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn converting_to_current_state_is_a_noop() {
        let mut axis = SpectroscopicAxis::new(vec![1.0, 2.0, 3.0], "GHz").unwrap();
        let report = axis.convert_to_unit("ghz").unwrap();
        assert!(report.is_noop());
        assert_eq!(axis.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn frame_change_is_reported_not_performed() {
        let mut axis = SpectroscopicAxis::new(vec![1.0, 2.0], "GHz").unwrap();
        let report = axis
            .convert_with(
                "GHz",
                &ConvertOptions {
                    frame: Frame::Heliocentric,
                    ..ConvertOptions::default()
                },
            )
            .unwrap();
        assert!(report.frame_change_skipped);
        assert_eq!(axis.frame(), Frame::Rest);
    }

    #[test]
    fn failed_conversion_leaves_axis_untouched() {
        let mut axis = SpectroscopicAxis::new(vec![1.0, 2.0], "GHz").unwrap();
        assert_eq!(axis.convert_to_unit("km/s"), Err(AxisError::MissingReference));
        assert_eq!(axis.unit().name(), "GHz");
        assert_eq!(axis.values(), &[1.0, 2.0]);
    }

    #[test]
    fn reference_override_is_adopted() {
        let mut axis = SpectroscopicAxis::new(vec![115.271202], "GHz").unwrap();
        let opts = ConvertOptions {
            reference: Some(ReferenceFrequency::new(115.271202, "GHz").unwrap()),
            ..ConvertOptions::default()
        };
        axis.convert_with("km/s", &opts).unwrap();
        assert!(axis.values()[0].abs() < 1e-9);
        assert!(axis.reference_frequency().is_some());
    }

    #[test]
    fn uniform_spacing_detection() {
        let linear = SpectroscopicAxis::new(vec![0.0, 1.0, 2.0, 3.0, 4.0], "GHz").unwrap();
        assert_eq!(linear.channel_spacing(DEFAULT_TOLERANCE), Some(1.0));

        let nonlinear = SpectroscopicAxis::new(vec![0.0, 1.0, 3.0, 7.0], "GHz").unwrap();
        assert_eq!(nonlinear.channel_spacing(DEFAULT_TOLERANCE), None);

        let descending = SpectroscopicAxis::new(vec![4.0, 3.0, 2.0], "GHz").unwrap();
        assert_eq!(descending.channel_spacing(DEFAULT_TOLERANCE), Some(-1.0));

        let single = SpectroscopicAxis::new(vec![4.0], "GHz").unwrap();
        assert_eq!(single.channel_spacing(DEFAULT_TOLERANCE), None);
    }

    #[test]
    fn header_for_linear_velocity_axis() {
        let mut axis = co_axis_kms();
        let (header, linear) = axis.build_header_descriptor(DEFAULT_TOLERANCE);
        assert!(linear);
        assert_eq!(header.ctype, "VRAD-LSR");
        assert_eq!(header.cunit, "km/s");
        assert_eq!(header.specsys, "LSRK");
        assert_eq!(header.crval, Some(-50.0));
        assert_eq!(header.crpix, Some(1.0));
        assert!(close(header.cdelt.unwrap(), 10.0, 1e-12));
        assert!(close(header.reffreq.unwrap(), 115.271202e9, 1e-12));
        assert_eq!(axis.header(), Some(&header));

        axis.convert_to_unit("m/s").unwrap();
        assert!(axis.header().is_none());
    }

    #[test]
    fn header_for_nonlinear_axis_is_undefined() {
        let mut axis = SpectroscopicAxis::new(vec![0.0, 1.0, 3.0, 7.0], "GHz").unwrap();
        let (header, linear) = axis.build_header_descriptor(DEFAULT_TOLERANCE);
        assert!(!linear);
        assert_eq!(header.ctype, "FREQ-REST");
        assert_eq!(header.cdelt, None);
        assert_eq!(header.crval, None);
        assert_eq!(header.crpix, None);
    }

    #[test]
    fn header_round_trips_to_axis() {
        let mut axis = co_axis_kms();
        let (header, _) = axis.build_header_descriptor(DEFAULT_TOLERANCE);
        let rebuilt = SpectroscopicAxis::from_header(&header, axis.len()).unwrap();
        assert_eq!(rebuilt.xtype(), QuantityType::Velocity);
        assert_eq!(rebuilt.frame(), Frame::Lsrk);
        for (a, b) in rebuilt.values().iter().zip(axis.values()) {
            assert!((a - b).abs() < 1e-9);
        }
        assert!(close(rebuilt.reference_frequency().unwrap().hz(), 115.271202e9, 1e-12));
    }

    #[test]
    fn extent_and_lookups() {
        let axis = SpectroscopicAxis::with_options(
            vec![100.0, 200.0, 300.0],
            "GHz",
            AxisOptions::default(),
        )
        .unwrap();
        assert_eq!(axis.extent(None), Ok((100.0, 300.0)));

        // Wavelength ordering is reversed relative to frequency.
        let (lo, hi) = axis.extent(Some("mm")).unwrap();
        assert!(close(lo, 0.999308193, 1e-8));
        assert!(close(hi, 2.99792458, 1e-12));

        assert_eq!(axis.nearest_index(180.0), Some(1));
        assert_eq!(axis.nearest_index(1e9), Some(2));
        assert!(close(axis.external_to_coordinate(2.99792458, "mm").unwrap(), 100.0, 1e-12));
        assert!(close(axis.coordinate_to_external(200.0, "MHz").unwrap(), 200_000.0, 1e-12));

        let empty = SpectroscopicAxis::new(Vec::new(), "GHz").unwrap();
        assert_eq!(empty.extent(None), Err(AxisError::EmptyAxis));
        assert_eq!(empty.nearest_index(1.0), None);
    }

    #[test]
    fn velocity_lookups_need_reference() {
        let axis = SpectroscopicAxis::new(vec![1.0, 2.0], "GHz").unwrap();
        assert_eq!(axis.coordinate_to_external(1.0, "km/s"), Err(AxisError::MissingReference));

        let co = co_axis_kms();
        let freq = co.coordinate_to_external(0.0, "GHz").unwrap();
        assert!(close(freq, 115.271202, 1e-12));
        let back = co.external_to_coordinate(freq, "GHz").unwrap();
        assert!(back.abs() < 1e-9);
    }

    #[test]
    fn slicing_keeps_metadata() {
        let axis = co_axis_kms();
        let part = axis.slice(2..5).unwrap();
        assert_eq!(part.values(), &[-30.0, -20.0, -10.0]);
        assert_eq!(part.frame(), Frame::Lsrk);
        assert_eq!(part.spacing().len(), 2);
        assert!(axis.slice(5..20).is_err());
    }

    #[test]
    fn unrecognized_header_tag_falls_back_to_unit() {
        let mut axis = SpectroscopicAxis::with_options(
            vec![1.0, 2.0, 3.0],
            "km/s",
            AxisOptions {
                xtype: Some("FELO-HEL".into()),
                ..AxisOptions::default()
            },
        )
        .unwrap();
        assert_eq!(axis.xtype(), QuantityType::Velocity);
        let (header, linear) = axis.build_header_descriptor(DEFAULT_TOLERANCE);
        assert!(linear);
        assert_eq!(header.ctype, "VRAD-REST");
        assert!(axis.convert_to_unit("km/s").unwrap().is_noop());
    }

    #[test]
    fn equivalent_spellings_relabel_without_rescaling() {
        let values = vec![2.5, 2.6, 2.7];
        let mut axis = SpectroscopicAxis::new(values.clone(), "um").unwrap();
        let report = axis.convert_to_unit("micron").unwrap();
        assert!(report.unit_changed);
        assert!(!report.quantity_changed);
        assert_eq!(axis.unit().name(), "micron");
        assert_eq!(axis.values(), values.as_slice());
        assert!(axis.convert_to_unit("MICRON").unwrap().is_noop());
    }

    #[test]
    fn reference_and_convention_can_be_set_later() {
        let mut axis = SpectroscopicAxis::new(vec![115.271202, 115.2], "GHz").unwrap();
        assert_eq!(axis.coordinate_to_external(115.2, "km/s"), Err(AxisError::MissingReference));

        axis.set_reference_frequency(Some(ReferenceFrequency::new(115.271202, "GHz").unwrap()));
        let radio = axis.coordinate_to_external(115.2, "km/s").unwrap();
        axis.set_velocity_convention(DopplerConvention::Optical);
        let optical = axis.coordinate_to_external(115.2, "km/s").unwrap();
        assert!(radio > 0.0 && optical > radio);

        axis.convert_to_unit("km/s").unwrap();
        assert_eq!(axis.velocity_convention(), DopplerConvention::Optical);
        assert_eq!(axis.ctype(), "VOPT-REST");
        assert!(axis.values()[0].abs() < 1e-6);
    }
}
