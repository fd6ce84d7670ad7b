//! Shared axis-loading logic used by every axis command.
//!
//! CSV ingest -> axis construction (metadata from flags and settings) -> log
//! row errors. Commands then focus on their own conversion/presentation.

use std::path::PathBuf;

use log::{debug, warn};

use crate::axis::{AxisOptions, CollectionOptions, SpectroscopicAxes, SpectroscopicAxis};
use crate::cli::{AxisArgs, MemberArg, picker};
use crate::config::Settings;
use crate::error::AppError;
use crate::io::{AxisTable, read_axis_csv};

/// An axis plus the table it was read from.
#[derive(Debug, Clone)]
pub struct LoadedAxis {
    pub path: PathBuf,
    pub table: AxisTable,
    pub axis: SpectroscopicAxis,
}

/// Construction options from CLI flags, falling back to settings.
///
/// Convention precedence: `--convention`, then the convention implied by
/// `--xtype`, then `SPECAX_CONVENTION`.
pub fn axis_options(args: &AxisArgs, settings: &Settings) -> AxisOptions {
    let convention = match (args.convention, &args.xtype) {
        (Some(c), _) => Some(c),
        (None, Some(_)) => None,
        (None, None) => Some(settings.convention),
    };
    AxisOptions {
        frame: args.frame,
        xtype: args.xtype.clone(),
        reference_frequency: args.reffreq,
        reference_frequency_unit: args.reffreq_unit.clone(),
        redshift: None,
        convention,
        strict_xtype: args.strict || settings.strict,
    }
}

pub fn load_axis(
    args: &AxisArgs,
    settings: &Settings,
    intensity_column: Option<&str>,
) -> Result<LoadedAxis, AppError> {
    let path = match &args.input {
        Some(path) => picker::validate_csv_path(path)?,
        None => picker::prompt_for_csv_path()?,
    };
    let table = read_axis_csv(&path, &args.column, intensity_column)?;
    report_row_errors(&path, &table);

    let axis = SpectroscopicAxis::with_options(
        table.values.clone(),
        &args.unit,
        axis_options(args, settings),
    )?;
    debug!("loaded {} samples from {}", axis.len(), path.display());
    Ok(LoadedAxis { path, table, axis })
}

/// Read every member file and concatenate the axes.
pub fn merge_members(
    members: &[MemberArg],
    column: &str,
    strict: bool,
) -> Result<SpectroscopicAxes, AppError> {
    let mut axes = Vec::with_capacity(members.len());
    for member in members {
        let path = picker::validate_csv_path(&member.path)?;
        let table = read_axis_csv(&path, column, None)?;
        report_row_errors(&path, &table);
        axes.push(SpectroscopicAxis::new(table.values, &member.unit)?);
    }
    Ok(SpectroscopicAxes::with_options(
        axes,
        CollectionOptions { strict },
    )?)
}

fn report_row_errors(path: &std::path::Path, table: &AxisTable) {
    if table.row_errors.is_empty() {
        return;
    }
    warn!(
        "{}: skipped {} of {} row(s)",
        path.display(),
        table.row_errors.len(),
        table.rows_read
    );
    for err in &table.row_errors {
        debug!("{}:{}: {}", path.display(), err.line, err.message);
    }
}
