use spectral_axis::axis::{
    AxisOptions, ConvertOptions, DEFAULT_TOLERANCE, SpectroscopicAxes, SpectroscopicAxis,
};
use spectral_axis::domain::{DopplerConvention, Frame, ProfileKind, QuantityType};
use spectral_axis::io::{HeaderFile, read_header_json, write_header_json};
use spectral_axis::models::descriptor_for;

const CO_REST_GHZ: f64 = 115.271202;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn velocity_axis() -> SpectroscopicAxis {
    let values: Vec<f64> = (0..41).map(|i| -20.0 + i as f64).collect();
    SpectroscopicAxis::with_options(
        values,
        "km/s",
        AxisOptions {
            xtype: Some("VRAD".into()),
            frame: Frame::Lsrk,
            reference_frequency: Some(CO_REST_GHZ),
            reference_frequency_unit: Some("GHz".into()),
            ..AxisOptions::default()
        },
    )
    .unwrap()
}

#[test]
fn velocity_frequency_round_trip_and_header_file() {
    init_logging();
    let mut axis = velocity_axis();
    assert_eq!(axis.velocity_convention(), DopplerConvention::Radio);

    let report = axis
        .convert_with(
            "GHz",
            &ConvertOptions {
                frame: axis.frame(),
                reference: None,
            },
        )
        .unwrap();
    assert!(report.quantity_changed);
    assert!(!report.frame_change_skipped);
    assert_eq!(axis.xtype(), QuantityType::Frequency);
    // v = 0 sits at the rest frequency.
    assert!((axis.values()[20] - CO_REST_GHZ).abs() < 1e-9);
    // Positive radio velocity lowers the frequency.
    assert!(axis.values()[40] < axis.values()[0]);

    let (header, linear) = axis.build_header_descriptor(DEFAULT_TOLERANCE);
    assert!(linear);
    assert_eq!(header.cunit, "GHz");
    assert!(header.ctype.starts_with("FREQ"));
    assert!((header.reffreq.unwrap() - CO_REST_GHZ * 1e9).abs() < 1e-3);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("axis.json");
    write_header_json(&path, &HeaderFile::new(header, axis.len(), linear)).unwrap();
    let rebuilt = read_header_json(&path).unwrap().to_axis().unwrap();
    assert_eq!(rebuilt.len(), axis.len());
    assert_eq!(rebuilt.frame(), Frame::Lsrk);
    for (a, b) in rebuilt.values().iter().zip(axis.values()) {
        assert!((a - b).abs() < 1e-9);
    }

    axis.convert_to_unit("m/s").unwrap();
    assert!((axis.values()[0] + 20_000.0).abs() < 1e-4);
    assert!((axis.values()[40] - 20_000.0).abs() < 1e-4);
}

#[test]
fn wavelength_axis_without_reference_cannot_become_velocity() {
    init_logging();
    let mut axis = SpectroscopicAxis::new(vec![2.6, 2.601, 2.602], "mm").unwrap();
    let before = axis.values().to_vec();
    assert!(axis.convert_to_unit("km/s").is_err());
    assert_eq!(axis.values(), before.as_slice());
    assert_eq!(axis.unit().name(), "mm");

    axis.convert_to_unit("GHz").unwrap();
    assert!((axis.values()[0] - 299_792_458.0 / 2.6e-3 / 1e9).abs() < 1e-9);
}

#[test]
fn collection_then_profile() {
    init_logging();
    let ghz = SpectroscopicAxis::new(vec![115.0, 115.1, 115.2], "GHz").unwrap();
    let mhz = SpectroscopicAxis::new(vec![115_300.0, 115_400.0], "MHz").unwrap();
    let merged = SpectroscopicAxes::new(vec![ghz, mhz]).unwrap();
    let axis = merged.axis();
    assert_eq!(axis.len(), 5);
    assert_eq!(axis.unit().name(), "GHz");
    assert!((axis.values()[4] - 115.4).abs() < 1e-12);
    assert!(merged.failures().is_empty());

    let voigt = descriptor_for(ProfileKind::Voigt);
    let params = [1.0, 115.2, 0.05, 0.02];
    let model = voigt.evaluate_all(axis.values(), &params).unwrap();
    let peak = model
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(peak, 2);
    assert!(voigt.evaluate_all(axis.values(), &params[..3]).is_err());
}
