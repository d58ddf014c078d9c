//! Seam between the parameter model and the solid-modeling library.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::profile::{SpoolProfile, WedgeAngle};
use crate::style::TrayStyle;
use crate::tray_spec::{Component, TraySpec};

/// A CAD library able to turn derived dimensions into a solid and write
/// that solid as a mesh file.
///
/// Implementations hold no state shared between calls; each `build` is
/// independent of every other.
pub trait GeometryBackend {
    /// Opaque solid handle. Only ever passed back to [`export`](Self::export).
    type Solid;

    fn build(&self, spec: &TraySpec, component: Component) -> Result<Self::Solid>;

    fn export(&self, solid: &Self::Solid, path: &Path) -> Result<()>;
}

/// Build one component of one wedge.
///
/// Dimensions are derived and checked before the backend is called, so a
/// spool that cannot yield a printable part never reaches the CAD library.
pub fn build_component<B: GeometryBackend>(
    backend: &B,
    profile: &SpoolProfile,
    angle: WedgeAngle,
    style: &TrayStyle,
    component: Component,
) -> Result<B::Solid> {
    let spec = TraySpec::derive(profile, angle, style)?;
    debug!(
        spool = profile.name(),
        %angle,
        %component,
        radial_depth = spec.radial_depth(),
        tray_height = spec.tray_height,
        wall = spec.wall_thickness,
        "derived tray dimensions"
    );
    backend.build(&spec, component)
}
