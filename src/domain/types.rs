//! Shared domain types.
//!
//! These are small `Copy` enums so they can be:
//!
//! - stored on every axis without allocation
//! - parsed from header strings and CLI flags
//! - serialized into header/exports

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AxisError;

/// Physical dimension category of an axis value.
///
/// Determines which unit table and which Doppler branch applies. `Unknown` is
/// reserved for axis type tags that could not be recognized; unit lookups never
/// produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityType {
    Frequency,
    Velocity,
    Length,
    Redshift,
    Unknown,
}

impl QuantityType {
    /// Four-letter FITS `CTYPE` algorithm code.
    pub fn fits_code(self) -> &'static str {
        match self {
            QuantityType::Velocity => "VELO",
            QuantityType::Frequency => "FREQ",
            QuantityType::Length => "WAVE",
            QuantityType::Redshift => "REDS",
            QuantityType::Unknown => "UNKN",
        }
    }

    /// Whether frequency, velocity and length values can be routed into each other.
    pub fn is_spectral(self) -> bool {
        matches!(
            self,
            QuantityType::Frequency | QuantityType::Velocity | QuantityType::Length
        )
    }
}

impl fmt::Display for QuantityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuantityType::Frequency => "frequency",
            QuantityType::Velocity => "velocity",
            QuantityType::Length => "length",
            QuantityType::Redshift => "redshift",
            QuantityType::Unknown => "unknown",
        };
        f.pad(name)
    }
}

/// Definition relating frequency and velocity relative to a reference frequency.
///
/// With `β = v/c` and reference frequency `f0`:
///
/// | convention   | f(v)                      | v(f)                      |
/// |--------------|---------------------------|---------------------------|
/// | radio        | `f0 (1 − β)`              | `c (f0 − f) / f0`         |
/// | optical      | `f0 / (1 + β)`            | `c (f0 − f) / f`          |
/// | relativistic | `f0 √(1 − β²) / (1 + β)`  | `c (f0² − f²)/(f0² + f²)` |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DopplerConvention {
    #[default]
    Radio,
    Optical,
    Relativistic,
}

impl DopplerConvention {
    /// Suffix used to build velocity `CTYPE` codes (`V` + suffix).
    pub fn fits_suffix(self) -> &'static str {
        match self {
            DopplerConvention::Radio => "RAD",
            DopplerConvention::Optical => "OPT",
            DopplerConvention::Relativistic => "REL",
        }
    }

    /// Derive the convention from an axis type tag by substring match.
    ///
    /// `"VRAD"` → radio, `"VOPT"` → optical, `"VREL"` → relativistic; anything
    /// else (including plain `"VELO"` or `"FREQ"`) falls back to radio.
    pub fn from_xtype_tag(tag: &str) -> Self {
        let tag = tag.to_ascii_uppercase();
        if tag.contains("RAD") {
            DopplerConvention::Radio
        } else if tag.contains("OPT") {
            DopplerConvention::Optical
        } else if tag.contains("REL") {
            DopplerConvention::Relativistic
        } else {
            DopplerConvention::Radio
        }
    }
}

impl fmt::Display for DopplerConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DopplerConvention::Radio => "radio",
            DopplerConvention::Optical => "optical",
            DopplerConvention::Relativistic => "relativistic",
        };
        f.write_str(name)
    }
}

impl FromStr for DopplerConvention {
    type Err = AxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "radio" => Ok(DopplerConvention::Radio),
            "optical" => Ok(DopplerConvention::Optical),
            "relativistic" => Ok(DopplerConvention::Relativistic),
            _ => Err(AxisError::UnsupportedConvention(s.to_string())),
        }
    }
}

/// Kinematic reference frame label.
///
/// Frames are carried as metadata only; transforming values between kinematic
/// frames is not implemented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frame {
    #[default]
    #[serde(rename = "rest")]
    Rest,
    #[serde(rename = "LSRK")]
    Lsrk,
    #[serde(rename = "LSRD")]
    Lsrd,
    #[serde(rename = "heliocentric")]
    Heliocentric,
    #[serde(rename = "topocentric")]
    Topocentric,
    #[serde(rename = "geocentric")]
    Geocentric,
}

impl Frame {
    pub const ALL: [Frame; 6] = [
        Frame::Rest,
        Frame::Lsrk,
        Frame::Lsrd,
        Frame::Heliocentric,
        Frame::Topocentric,
        Frame::Geocentric,
    ];

    /// Canonical label (`rest`, `LSRK`, `heliocentric`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Frame::Rest => "rest",
            Frame::Lsrk => "LSRK",
            Frame::Lsrd => "LSRD",
            Frame::Heliocentric => "heliocentric",
            Frame::Topocentric => "topocentric",
            Frame::Geocentric => "geocentric",
        }
    }

    /// Quantity type a frame is naturally expressed in.
    ///
    /// Every kinematic frame is a velocity frame; `rest` is tied to frequency.
    pub fn quantity_type(self) -> QuantityType {
        match self {
            Frame::Rest => QuantityType::Frequency,
            _ => QuantityType::Velocity,
        }
    }

    /// Suffix appended to the `CTYPE1` code, including the separator.
    pub fn fits_suffix(self) -> &'static str {
        match self {
            Frame::Rest => "-REST",
            Frame::Lsrk => "-LSR",
            Frame::Lsrd => "-LSD",
            Frame::Heliocentric => "-HEL",
            Frame::Topocentric => "-TOP",
            Frame::Geocentric => "-GEO",
        }
    }

    /// `SPECSYS` header value.
    pub fn specsys(self) -> &'static str {
        match self {
            Frame::Rest => "REST",
            Frame::Lsrk => "LSRK",
            Frame::Lsrd => "LSRD",
            Frame::Heliocentric => "HEL",
            Frame::Topocentric => "TOPO",
            Frame::Geocentric => "GEO",
        }
    }

    /// Inverse of [`Frame::specsys`].
    pub fn from_specsys(code: &str) -> Option<Frame> {
        let code = code.trim();
        Frame::ALL
            .into_iter()
            .find(|frame| frame.specsys().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frame {
    type Err = AxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(Frame::Rest),
            "lsrk" | "lsr" => Ok(Frame::Lsrk),
            "lsrd" => Ok(Frame::Lsrd),
            "heliocentric" => Ok(Frame::Heliocentric),
            "topocentric" => Ok(Frame::Topocentric),
            "geocentric" => Ok(Frame::Geocentric),
            _ => Err(AxisError::InvalidInput(format!("unknown reference frame '{s}'"))),
        }
    }
}

/// Line-shape family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Lorentzian,
    Voigt,
}

impl ProfileKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ProfileKind::Lorentzian => "Lorentzian",
            ProfileKind::Voigt => "Voigt",
        }
    }

    /// Parameters per component.
    pub fn param_count(self) -> usize {
        match self {
            ProfileKind::Lorentzian => 3,
            ProfileKind::Voigt => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convention_from_tag_uses_substrings() {
        assert_eq!(DopplerConvention::from_xtype_tag("VRAD"), DopplerConvention::Radio);
        assert_eq!(DopplerConvention::from_xtype_tag("VOPT"), DopplerConvention::Optical);
        assert_eq!(DopplerConvention::from_xtype_tag("vrel-lsr"), DopplerConvention::Relativistic);
        assert_eq!(DopplerConvention::from_xtype_tag("FREQ"), DopplerConvention::Radio);
    }

    #[test]
    fn convention_parse_rejects_unknown_names() {
        assert_eq!("Optical".parse::<DopplerConvention>(), Ok(DopplerConvention::Optical));
        assert!(matches!(
            "redshift".parse::<DopplerConvention>(),
            Err(AxisError::UnsupportedConvention(_))
        ));
    }

    #[test]
    fn frame_labels_round_trip() {
        for frame in Frame::ALL {
            assert_eq!(frame.label().parse::<Frame>(), Ok(frame));
            assert_eq!(Frame::from_specsys(frame.specsys()), Some(frame));
        }
        assert_eq!("LSR".parse::<Frame>(), Ok(Frame::Lsrk));
        assert_eq!(Frame::Rest.quantity_type(), QuantityType::Frequency);
        assert_eq!(Frame::Heliocentric.quantity_type(), QuantityType::Velocity);
    }
}
