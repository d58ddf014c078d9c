//! [`GeometryBackend`] on top of vcad's mesh CSG.
//!
//! vcad works on meshes, so the BREP fillets and chamfers of a full CAD
//! kernel are not available; every feature is built from cylinders and
//! boxes.

use std::path::Path;

use vcad::Part;

use crate::backend::GeometryBackend;
use crate::error::{Result, TrayError};
use crate::tray_spec::{Component, TraySpec};
use crate::{base, placeholder, tray};

#[derive(Debug, Default, Clone, Copy)]
pub struct VcadBackend;

impl GeometryBackend for VcadBackend {
    type Solid = Part;

    fn build(&self, spec: &TraySpec, component: Component) -> Result<Part> {
        let part = match component {
            Component::Base => base::build(spec),
            Component::Tray => tray::build(spec),
            Component::Placeholder => placeholder::build(spec),
        };
        non_empty(part.rotate(0.0, 0.0, spec.presentation_rotation()), component)
    }

    fn export(&self, solid: &Part, path: &Path) -> Result<()> {
        solid.write_stl(path).map_err(|e| TrayError::Export {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// A CSG chain whose cuts swallow every solid leaves an empty manifold,
/// which would still export as a valid zero-triangle STL.
fn non_empty(part: Part, component: Component) -> Result<Part> {
    if part.is_empty() {
        return Err(TrayError::construction(format!("{component} came out empty")));
    }
    Ok(part)
}
