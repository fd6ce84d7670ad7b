//! FITS-like header descriptor for a spectroscopic axis.
//!
//! The descriptor is the hand-off point to FITS writers: only the axis-1 WCS
//! keywords are produced. Undefined values (non-linear axes, missing reference
//! frequency) serialize as `null`.

use serde::{Deserialize, Serialize};

/// One header value as seen by a FITS writer.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Str(String),
    Float(f64),
    Undefined,
}

impl std::fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderValue::Str(s) => write!(f, "'{s}'"),
            HeaderValue::Float(v) => write!(f, "{v}"),
            HeaderValue::Undefined => f.write_str("-"),
        }
    }
}

impl From<Option<f64>> for HeaderValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(HeaderValue::Undefined, HeaderValue::Float)
    }
}

/// Axis-1 WCS keywords.
///
/// `REFFREQ` is always expressed in Hz regardless of the unit the axis keeps
/// its reference frequency in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderDescriptor {
    #[serde(rename = "CTYPE1")]
    pub ctype: String,
    #[serde(rename = "CUNIT1")]
    pub cunit: String,
    #[serde(rename = "CDELT1")]
    pub cdelt: Option<f64>,
    #[serde(rename = "CRVAL1")]
    pub crval: Option<f64>,
    #[serde(rename = "CRPIX1")]
    pub crpix: Option<f64>,
    #[serde(rename = "SPECSYS")]
    pub specsys: String,
    #[serde(rename = "REFFREQ")]
    pub reffreq: Option<f64>,
}

impl HeaderDescriptor {
    pub const KEYS: [&'static str; 7] = [
        "CTYPE1", "CUNIT1", "CDELT1", "CRVAL1", "CRPIX1", "SPECSYS", "REFFREQ",
    ];

    /// Whether the linear WCS keywords are all defined.
    pub fn is_linear(&self) -> bool {
        self.cdelt.is_some() && self.crval.is_some() && self.crpix.is_some()
    }

    /// Look up a keyword by its FITS name (case-insensitive).
    pub fn get(&self, key: &str) -> Option<HeaderValue> {
        let value = match key.to_ascii_uppercase().as_str() {
            "CTYPE1" => HeaderValue::Str(self.ctype.clone()),
            "CUNIT1" => HeaderValue::Str(self.cunit.clone()),
            "CDELT1" => self.cdelt.into(),
            "CRVAL1" => self.crval.into(),
            "CRPIX1" => self.crpix.into(),
            "SPECSYS" => HeaderValue::Str(self.specsys.clone()),
            "REFFREQ" => self.reffreq.into(),
            _ => return None,
        };
        Some(value)
    }

    /// All keywords in FITS card order.
    pub fn entries(&self) -> Vec<(&'static str, HeaderValue)> {
        Self::KEYS
            .iter()
            .filter_map(|&key| self.get(key).map(|value| (key, value)))
            .collect()
    }
}
