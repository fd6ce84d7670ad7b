//! Line-shape kernels and their fit-model descriptors.
//!
//! Kernels are small pure functions; the descriptors wrap them with the
//! parameter metadata an external fitter needs.

pub mod descriptor;
pub mod lorentzian;
pub mod voigt;

pub use descriptor::*;
pub use lorentzian::*;
pub use voigt::*;

use crate::domain::ProfileKind;

/// Descriptor for a profile family.
pub fn descriptor_for(kind: ProfileKind) -> ModelDescriptor {
    match kind {
        ProfileKind::Lorentzian => lorentzian_fitter(),
        ProfileKind::Voigt => voigt_fitter(),
    }
}
