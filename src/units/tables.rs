//! Static unit, axis-type and frame tables.
//!
//! Every unit name belongs to exactly one quantity type and carries its SI
//! multiplier (Hz, m/s, m, or dimensionless for redshift). Lookups are
//! case-insensitive, so `MHz` and `mhz` resolve to the same entry.

use once_cell::sync::Lazy;

use crate::domain::{Frame, QuantityType};
use crate::error::{AxisError, AxisResult};
use crate::units::CaseInsensitiveMap;

/// Speed of light in m/s.
pub const SPEED_OF_LIGHT_MS: f64 = 2.99792458e8;

const LENGTH_UNITS: &[(&str, f64)] = &[
    ("m", 1.0),
    ("meters", 1.0),
    ("cm", 1e-2),
    ("centimeters", 1e-2),
    ("mm", 1e-3),
    ("millimeters", 1e-3),
    ("um", 1e-6),
    ("micron", 1e-6),
    ("microns", 1e-6),
    ("micrometers", 1e-6),
    ("nm", 1e-9),
    ("nanometers", 1e-9),
    ("km", 1e3),
    ("kilometers", 1e3),
    ("angstrom", 1e-10),
    ("angstroms", 1e-10),
    ("A", 1e-10),
];

const FREQUENCY_UNITS: &[(&str, f64)] = &[
    ("Hz", 1.0),
    ("kHz", 1e3),
    ("MHz", 1e6),
    ("GHz", 1e9),
    ("THz", 1e12),
];

const VELOCITY_UNITS: &[(&str, f64)] = &[
    ("m/s", 1.0),
    ("meters/second", 1.0),
    ("km/s", 1e3),
    ("kms", 1e3),
    ("kilometers/s", 1e3),
    ("cm/s", 1e-2),
    ("cms", 1e-2),
    ("centimeters/s", 1e-2),
];

const REDSHIFT_UNITS: &[(&str, f64)] = &[("z", 1.0)];

/// Axis type tags as found in headers, with the quantity and frame each implies.
const XTYPE_TAGS: &[(&str, QuantityType, Frame)] = &[
    ("VLSR", QuantityType::Velocity, Frame::Lsrk),
    ("VRAD", QuantityType::Velocity, Frame::Lsrk),
    ("VELO", QuantityType::Velocity, Frame::Lsrk),
    ("VOPT", QuantityType::Velocity, Frame::Lsrk),
    ("VREL", QuantityType::Velocity, Frame::Lsrk),
    ("VHEL", QuantityType::Velocity, Frame::Heliocentric),
    ("VGEO", QuantityType::Velocity, Frame::Geocentric),
    ("VREST", QuantityType::Velocity, Frame::Rest),
    ("velocity", QuantityType::Velocity, Frame::Lsrk),
    ("Z", QuantityType::Redshift, Frame::Rest),
    ("REDS", QuantityType::Redshift, Frame::Rest),
    ("FREQ", QuantityType::Frequency, Frame::Rest),
    ("frequency", QuantityType::Frequency, Frame::Rest),
    ("WAV", QuantityType::Length, Frame::Rest),
    ("WAVE", QuantityType::Length, Frame::Rest),
    ("wavelength", QuantityType::Length, Frame::Rest),
];

fn table_for(quantity: QuantityType) -> &'static [(&'static str, f64)] {
    match quantity {
        QuantityType::Length => LENGTH_UNITS,
        QuantityType::Frequency => FREQUENCY_UNITS,
        QuantityType::Velocity => VELOCITY_UNITS,
        QuantityType::Redshift => REDSHIFT_UNITS,
        QuantityType::Unknown => &[],
    }
}

static UNIT_TABLE: Lazy<CaseInsensitiveMap<(QuantityType, f64)>> = Lazy::new(|| {
    [
        QuantityType::Length,
        QuantityType::Frequency,
        QuantityType::Velocity,
        QuantityType::Redshift,
    ]
    .into_iter()
    .flat_map(|q| table_for(q).iter().map(move |&(name, mult)| (name, (q, mult))))
    .collect()
});

static XTYPE_TABLE: Lazy<CaseInsensitiveMap<(QuantityType, Frame)>> = Lazy::new(|| {
    XTYPE_TAGS
        .iter()
        .map(|&(tag, quantity, frame)| (tag, (quantity, frame)))
        .collect()
});

/// Resolve a unit name to its quantity type and SI multiplier.
pub fn resolve_unit(name: &str) -> AxisResult<(QuantityType, f64)> {
    UNIT_TABLE
        .get(name)
        .copied()
        .ok_or_else(|| AxisError::UnknownUnit(name.to_string()))
}

/// Whether `name` is a unit of the given quantity type.
pub fn is_known(name: &str, quantity: QuantityType) -> bool {
    matches!(UNIT_TABLE.get(name), Some((q, _)) if *q == quantity)
}

/// Unit names of one quantity type, in table order.
pub fn unit_names(quantity: QuantityType) -> Vec<&'static str> {
    table_for(quantity).iter().map(|&(name, _)| name).collect()
}

/// Look up an axis type tag (`VRAD`, `FREQ`, `wavelength`, ...).
///
/// FITS-style tags with a frame suffix (`VRAD-LSR`) are matched by the part
/// before the first `-`.
pub fn lookup_xtype(tag: &str) -> Option<(QuantityType, Frame)> {
    let tag = tag.trim();
    if let Some(hit) = XTYPE_TABLE.get(tag) {
        return Some(*hit);
    }
    let head = tag.split('-').next().unwrap_or(tag);
    XTYPE_TABLE.get(head).copied()
}

/// A resolved unit: the name as written plus its table entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    name: String,
    quantity: QuantityType,
    multiplier: f64,
}

impl Unit {
    pub fn parse(name: &str) -> AxisResult<Self> {
        let (quantity, multiplier) = resolve_unit(name)?;
        Ok(Self {
            name: name.trim().to_string(),
            quantity,
            multiplier,
        })
    }

    pub fn hertz() -> Self {
        Self {
            name: "Hz".to_string(),
            quantity: QuantityType::Frequency,
            multiplier: 1.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> QuantityType {
        self.quantity
    }

    /// Multiplier taking a value in this unit to SI.
    pub fn si_multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn to_si(&self, value: f64) -> f64 {
        value * self.multiplier
    }

    pub fn from_si(&self, value: f64) -> f64 {
        value / self.multiplier
    }

    /// Same quantity and scale, whatever the spelling (`um` vs `micron`).
    pub fn same_as(&self, other: &Unit) -> bool {
        self.quantity == other.quantity && self.multiplier == other.multiplier
    }

    /// Factor turning a value in `self` into a value in `other` (same quantity type).
    pub fn factor_to(&self, other: &Unit) -> f64 {
        self.multiplier / other.multiplier
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl std::str::FromStr for Unit {
    type Err = AxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        for name in ["GHZ", "GHz", "ghz"] {
            assert_eq!(resolve_unit(name), Ok((QuantityType::Frequency, 1e9)));
        }
    }

    #[test]
    fn required_units_resolve() {
        for name in ["m", "cm", "mm", "nm", "micron", "microns", "um", "km", "angstrom"] {
            assert!(is_known(name, QuantityType::Length), "{name}");
        }
        for name in ["Hz", "kHz", "MHz", "GHz", "THz"] {
            assert!(is_known(name, QuantityType::Frequency), "{name}");
        }
        for name in ["m/s", "km/s", "kms", "cm/s", "cms"] {
            assert!(is_known(name, QuantityType::Velocity), "{name}");
        }
        assert!(!is_known("km/s", QuantityType::Length));
    }

    #[test]
    fn unknown_unit_is_an_error() {
        assert_eq!(
            resolve_unit("furlongs"),
            Err(AxisError::UnknownUnit("furlongs".to_string()))
        );
    }

    #[test]
    fn every_unit_belongs_to_one_table() {
        let total: usize = [
            QuantityType::Length,
            QuantityType::Frequency,
            QuantityType::Velocity,
            QuantityType::Redshift,
        ]
        .into_iter()
        .map(|q| unit_names(q).len())
        .sum();
        assert_eq!(UNIT_TABLE.len(), total);
    }

    #[test]
    fn xtype_tags_carry_frames() {
        assert_eq!(lookup_xtype("VHEL"), Some((QuantityType::Velocity, Frame::Heliocentric)));
        assert_eq!(lookup_xtype("vrad-lsr"), Some((QuantityType::Velocity, Frame::Lsrk)));
        assert_eq!(lookup_xtype("FREQ-REST"), Some((QuantityType::Frequency, Frame::Rest)));
        assert_eq!(lookup_xtype("wavenumber"), None);
    }

    #[test]
    fn unit_factor_rescales() {
        let ghz = Unit::parse("GHz").unwrap();
        let mhz = Unit::parse("mhz").unwrap();
        assert_eq!(ghz.factor_to(&mhz), 1e3);
        assert!(!ghz.same_as(&mhz));
        assert!(mhz.same_as(&Unit::parse("MHz").unwrap()));
        assert!(Unit::parse("um").unwrap().same_as(&Unit::parse("micron").unwrap()));
        assert!(Unit::parse("km/s").unwrap().same_as(&Unit::parse("kms").unwrap()));
        // Same multiplier, different quantity.
        assert!(!Unit::parse("m").unwrap().same_as(&Unit::parse("m/s").unwrap()));
    }
}
