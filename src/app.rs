//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - loads settings and initializes logging
//! - parses CLI arguments
//! - reads axes from CSV and converts/describes/merges them
//! - evaluates line profiles, prints reports/plots
//! - writes optional exports

use clap::Parser;
use log::{debug, info};

use crate::axis::ConvertOptions;
use crate::cli::{Command, ConvertArgs, HeaderArgs, MergeArgs, ProfileArgs};
use crate::config::Settings;
use crate::data::{SampleConfig, synthesize};
use crate::error::AppError;
use crate::io::{HeaderFile, write_columns_csv, write_header_json};
use crate::models::descriptor_for;
use crate::report::{
    format_axis_summary, format_conversion, format_header_cards, format_profile_summary,
    format_unit_table, residual_stats,
};

pub mod pipeline;

/// Entry point for the `specax` binary.
pub fn run() -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    init_logging(&settings);

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Units => {
            print!("{}", format_unit_table());
            Ok(())
        }
        Command::Convert(args) => handle_convert(args, &settings),
        Command::Header(args) => handle_header(args, &settings),
        Command::Merge(args) => handle_merge(args, &settings),
        Command::Profile(args) => handle_profile(args, &settings),
    }
}

fn init_logging(settings: &Settings) {
    // RUST_LOG wins over SPECAX_LOG.
    let env = env_logger::Env::default().default_filter_or(settings.log_filter.as_str());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn handle_convert(args: ConvertArgs, settings: &Settings) -> Result<(), AppError> {
    let mut loaded = pipeline::load_axis(&args.axis, settings, None)?;
    let axis = &mut loaded.axis;
    let from = axis.unit().name().to_string();

    let opts = ConvertOptions {
        frame: args.target_frame.unwrap_or(axis.frame()),
        reference: None,
    };
    let report = axis.convert_with(&args.to, &opts)?;
    info!("{}: {} -> {}", loaded.path.display(), from, axis.unit());

    print!("{}", format_conversion(&from, &args.to, &report));
    print!("{}", format_axis_summary(axis, settings.tolerance));

    if let Some(path) = &args.output {
        write_columns_csv(path, &[(args.axis.column.as_str(), axis.values())])?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn handle_header(args: HeaderArgs, settings: &Settings) -> Result<(), AppError> {
    let tolerance = args.tolerance.unwrap_or(settings.tolerance);
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(AppError::new(2, "--tolerance must be > 0."));
    }
    let mut loaded = pipeline::load_axis(&args.axis, settings, None)?;
    let axis = &mut loaded.axis;
    let (header, linear) = axis.build_header_descriptor(tolerance);

    print!("{}", format_header_cards(&header, linear));

    if let Some(path) = &args.output {
        write_header_json(path, &HeaderFile::new(header, axis.len(), linear))?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn handle_merge(args: MergeArgs, settings: &Settings) -> Result<(), AppError> {
    let strict = args.strict || settings.strict;
    let merged = pipeline::merge_members(&args.members, &args.column, strict)?;

    print!("{}", format_axis_summary(merged.axis(), settings.tolerance));
    if !merged.failures().is_empty() {
        println!(
            "Skipped {} member(s) that could not be converted.",
            merged.failures().len()
        );
    }

    if let Some(path) = &args.output {
        write_columns_csv(path, &[(args.column.as_str(), merged.axis().values())])?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn handle_profile(args: ProfileArgs, settings: &Settings) -> Result<(), AppError> {
    let loaded = pipeline::load_axis(&args.axis, settings, args.intensity.as_deref())?;
    let axis = &loaded.axis;
    let descriptor = descriptor_for(args.model);

    if !descriptor.within_bounds(&args.params)? {
        return Err(AppError::new(
            2,
            format!(
                "Invalid --params for {}: widths must be finite and >= 0.",
                descriptor.kind.display_name()
            ),
        ));
    }

    let spectrum = synthesize(
        axis,
        &descriptor,
        &args.params,
        &SampleConfig {
            noise_sigma: args.noise,
            seed: args.seed,
        },
    )?;
    debug!("noise seed {}", spectrum.seed);

    // Measured intensities win over synthetic noise; a noiseless model has
    // nothing to compare against.
    let observed: Option<&[f64]> = match &loaded.table.intensity {
        Some(measured) => Some(measured.as_slice()),
        None if args.noise > 0.0 => Some(spectrum.observed.as_slice()),
        None => None,
    };

    let stats = observed.and_then(|obs| residual_stats(obs, &spectrum.model));
    let amplitudes = match (args.fit_amplitudes, observed) {
        (true, Some(obs)) => Some(descriptor.fit_amplitudes(axis.values(), obs, &args.params)?),
        (true, None) => Some(descriptor.fit_amplitudes(axis.values(), &spectrum.model, &args.params)?),
        (false, _) => None,
    };

    print!(
        "{}",
        format_profile_summary(&descriptor, &args.params, stats.as_ref(), amplitudes.as_deref())
    );

    if args.plot {
        let plot = crate::plot::render_spectrum_plot(
            axis.values(),
            &spectrum.model,
            observed,
            axis.unit().name(),
            args.width,
            args.height,
        );
        println!("{plot}");
    }

    if let Some(path) = &args.output {
        let mut columns: Vec<(&str, &[f64])> = vec![
            (args.axis.column.as_str(), axis.values()),
            ("model", spectrum.model.as_slice()),
        ];
        if let Some(obs) = observed {
            columns.push(("observed", obs));
        }
        write_columns_csv(path, &columns)?;
        info!("wrote {}", path.display());
    }
    Ok(())
}
