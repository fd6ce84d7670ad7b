//! Concatenation of several axes into one.
//!
//! The first member defines the canonical unit, xtype, frame, convention and
//! redshift. Every other member is converted to that unit before its values
//! are appended. A member that cannot be converted is recorded as a
//! [`MemberFailure`]; in lenient mode it is appended as-is, in strict mode the
//! whole construction fails with every failure listed.

use log::{info, warn};

use crate::axis::spectroscopic::{ConvertOptions, SpectroscopicAxis};
use crate::doppler::ReferenceFrequency;
use crate::error::{AxisError, AxisResult, MemberFailure};

#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionOptions {
    /// Fail instead of appending members that could not be converted.
    pub strict: bool,
}

/// The merged axis plus the members it was built from.
#[derive(Debug, Clone)]
pub struct SpectroscopicAxes {
    axis: SpectroscopicAxis,
    members: Vec<SpectroscopicAxis>,
    failures: Vec<MemberFailure>,
}

impl SpectroscopicAxes {
    pub fn new(members: Vec<SpectroscopicAxis>) -> AxisResult<Self> {
        Self::with_options(members, CollectionOptions::default())
    }

    pub fn with_options(
        mut members: Vec<SpectroscopicAxis>,
        opts: CollectionOptions,
    ) -> AxisResult<Self> {
        let Some(first) = members.first() else {
            return Err(AxisError::InvalidInput(
                "an axis collection needs at least one member axis".into(),
            ));
        };
        let unit = first.unit().clone();
        let xtype = first.xtype();
        let frame = first.frame();
        let convention = first.velocity_convention();
        let redshift = first.redshift();

        let convert = ConvertOptions {
            frame,
            reference: None,
        };
        let mut failures = Vec::new();
        for (index, member) in members.iter_mut().enumerate().skip(1) {
            let matches = member.xtype() == xtype
                && member.unit().same_as(&unit)
                && member.frame() == frame;
            if matches {
                continue;
            }
            match member.convert_with(unit.name(), &convert) {
                Ok(report) if report.frame_change_skipped => {
                    info!("axis {index}: frame {} kept, values not transformed", member.frame());
                }
                Ok(_) => {}
                Err(error) => {
                    warn!("axis {index} could not be converted to {unit}: {error}");
                    failures.push(MemberFailure { index, error });
                }
            }
        }

        if opts.strict && !failures.is_empty() {
            return Err(AxisError::MemberConversion { failures });
        }

        let values: Vec<f64> = members
            .iter()
            .flat_map(|m| m.values().iter().copied())
            .collect();
        let reference = common_reference(&members);
        if reference.is_none() && members.iter().any(|m| m.reference_frequency().is_some()) {
            info!("member reference frequencies differ; merged axis has none");
        }

        let axis = SpectroscopicAxis::from_parts(
            values, unit, xtype, frame, reference, redshift, convention,
        );
        Ok(Self {
            axis,
            members,
            failures,
        })
    }

    /// The merged axis.
    pub fn axis(&self) -> &SpectroscopicAxis {
        &self.axis
    }

    pub fn axis_mut(&mut self) -> &mut SpectroscopicAxis {
        &mut self.axis
    }

    pub fn into_axis(self) -> SpectroscopicAxis {
        self.axis
    }

    /// Members after conversion, in input order.
    pub fn members(&self) -> &[SpectroscopicAxis] {
        &self.members
    }

    /// Members that were appended without being converted (lenient mode only).
    pub fn failures(&self) -> &[MemberFailure] {
        &self.failures
    }
}

/// The reference frequency shared by every member, or `None` if any differ.
fn common_reference(members: &[SpectroscopicAxis]) -> Option<ReferenceFrequency> {
    let first = members.first()?.reference_frequency()?;
    let all_agree = members.iter().all(|m| match m.reference_frequency() {
        Some(r) => r.value == first.value && r.unit.same_as(&first.unit),
        None => false,
    });
    all_agree.then(|| first.clone())
}
