//! Runtime settings for the `specax` binary.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Command-line flags override them.
//!
//! | variable            | default | meaning                                   |
//! |---------------------|---------|-------------------------------------------|
//! | `SPECAX_TOLERANCE`  | `1e-8`  | relative tolerance for linear-axis checks |
//! | `SPECAX_STRICT`     | `false` | strict xtype parsing and collection mode  |
//! | `SPECAX_CONVENTION` | `radio` | default Doppler convention                |
//! | `SPECAX_LOG`        | `info`  | log filter when `RUST_LOG` is unset       |

use crate::axis::DEFAULT_TOLERANCE;
use crate::domain::DopplerConvention;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tolerance: f64,
    pub strict: bool,
    pub convention: DopplerConvention,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            strict: false,
            convention: DopplerConvention::Radio,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut settings = Self::default();

        if let Some(raw) = lookup("SPECAX_TOLERANCE") {
            let tolerance: f64 = raw
                .trim()
                .parse()
                .map_err(|_| AppError::new(2, format!("Invalid SPECAX_TOLERANCE '{raw}'.")))?;
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(AppError::new(2, "SPECAX_TOLERANCE must be > 0."));
            }
            settings.tolerance = tolerance;
        }
        if let Some(raw) = lookup("SPECAX_STRICT") {
            settings.strict = parse_bool(&raw)
                .ok_or_else(|| AppError::new(2, format!("Invalid SPECAX_STRICT '{raw}'.")))?;
        }
        if let Some(raw) = lookup("SPECAX_CONVENTION") {
            settings.convention = raw.parse()?;
        }
        if let Some(raw) = lookup("SPECAX_LOG") {
            if !raw.trim().is_empty() {
                settings.log_filter = raw.trim().to_string();
            }
        }
        Ok(settings)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
