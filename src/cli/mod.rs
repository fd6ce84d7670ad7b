//! Command-line parsing for the spectral axis toolkit.
//!
//! Argument parsing and command dispatch stay separate from the axis and model
//! code. Flags override the environment settings in [`crate::config`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DopplerConvention, Frame, ProfileKind};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "specax",
    version,
    about = "Spectroscopic axis unit conversion and line profiles"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the known units grouped by quantity type.
    Units,
    /// Convert an axis read from CSV to another unit and print a summary.
    Convert(ConvertArgs),
    /// Print (and optionally save) the FITS-like header descriptor of an axis.
    Header(HeaderArgs),
    /// Concatenate several axes, converting each to the first member's unit.
    Merge(MergeArgs),
    /// Evaluate a Lorentzian or Voigt profile over an axis.
    Profile(ProfileArgs),
}

/// How to read an axis from CSV and what metadata to attach to it.
#[derive(Debug, Args, Clone)]
pub struct AxisArgs {
    /// Axis CSV file. Prompts for one when omitted.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Column holding the axis values.
    #[arg(long, default_value = "x")]
    pub column: String,

    /// Unit of the axis values (GHz, km/s, mm, ...).
    #[arg(short = 'u', long)]
    pub unit: String,

    /// Axis type tag (VRAD, VOPT, FREQ, wavelength, ...).
    #[arg(long)]
    pub xtype: Option<String>,

    /// Reference frame label (rest, LSRK, heliocentric, ...).
    #[arg(long, default_value = "rest")]
    pub frame: Frame,

    /// Reference (rest) frequency for frequency <-> velocity work.
    #[arg(long)]
    pub reffreq: Option<f64>,

    /// Unit of --reffreq. Defaults to the axis unit for frequency axes, Hz otherwise.
    #[arg(long)]
    pub reffreq_unit: Option<String>,

    /// Doppler convention. Defaults to the one implied by --xtype, then SPECAX_CONVENTION.
    #[arg(long, value_enum)]
    pub convention: Option<DopplerConvention>,

    /// Reject unrecognized --xtype tags.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub axis: AxisArgs,

    /// Target unit.
    #[arg(long = "to")]
    pub to: String,

    /// Target frame. Defaults to the axis frame; a different frame is
    /// reported but not applied.
    #[arg(long)]
    pub target_frame: Option<Frame>,

    /// Write the converted axis to CSV.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct HeaderArgs {
    #[command(flatten)]
    pub axis: AxisArgs,

    /// Relative tolerance for the uniform-spacing check (overrides SPECAX_TOLERANCE).
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Write the header descriptor JSON here.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Member axis as `PATH=UNIT`; repeat for every member, in order.
    #[arg(long = "member", value_name = "PATH=UNIT", required = true, value_parser = parse_member)]
    pub members: Vec<MemberArg>,

    /// Column holding the axis values in every member file.
    #[arg(long, default_value = "x")]
    pub column: String,

    /// Fail if any member cannot be converted (overrides SPECAX_STRICT).
    #[arg(long)]
    pub strict: bool,

    /// Write the merged axis to CSV.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberArg {
    pub path: PathBuf,
    pub unit: String,
}

fn parse_member(raw: &str) -> Result<MemberArg, String> {
    let (path, unit) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected PATH=UNIT, got '{raw}'"))?;
    if path.is_empty() || unit.trim().is_empty() {
        return Err(format!("expected PATH=UNIT, got '{raw}'"));
    }
    Ok(MemberArg {
        path: PathBuf::from(path),
        unit: unit.trim().to_string(),
    })
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub axis: AxisArgs,

    /// Line-shape family.
    #[arg(long, value_enum, default_value_t = ProfileKind::Lorentzian)]
    pub model: ProfileKind,

    /// Parameters, comma separated, one block per component
    /// (Lorentzian: amplitude,shift,width; Voigt: amplitude,shift,gaussian_width,lorentzian_width).
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub params: Vec<f64>,

    /// Column of measured intensities. When given, the model is compared with
    /// (and amplitudes are fitted to) these values instead of synthetic noise.
    #[arg(long, conflicts_with = "noise")]
    pub intensity: Option<String>,

    /// Standard deviation of added Gaussian noise.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Noise seed (derived from the axis and parameters when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Re-estimate component amplitudes from the noisy spectrum.
    #[arg(long)]
    pub fit_amplitudes: bool,

    /// Render an ASCII plot in the terminal.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Write x, model (and observed) columns to CSV.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}
