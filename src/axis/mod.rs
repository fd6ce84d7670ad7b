//! Spectroscopic axes and their header descriptors.

pub mod collection;
pub mod header;
pub mod spectroscopic;

pub use collection::{CollectionOptions, SpectroscopicAxes};
pub use header::{HeaderDescriptor, HeaderValue};
pub use spectroscopic::{
    AxisOptions, ConversionReport, ConvertOptions, DEFAULT_TOLERANCE, SpectroscopicAxis,
};
