//! Recording stand-in for the CAD library.

use std::cell::{Cell, RefCell};
use std::path::Path;

use spool_trays::error::Result;
use spool_trays::{Component, GeometryBackend, TrayError, TraySpec};

/// Writes a text description of each solid instead of a mesh and counts
/// the calls it receives.
#[derive(Default)]
pub struct RecordingBackend {
    pub builds: Cell<usize>,
    pub exports: RefCell<Vec<String>>,
    /// Exports to paths containing this string fail.
    pub fail_exports_matching: Option<String>,
    /// Builds of this component fail as if the CAD library gave up.
    pub fail_builds_for: Option<Component>,
}

impl RecordingBackend {
    pub fn failing_exports(pattern: &str) -> Self {
        Self {
            fail_exports_matching: Some(pattern.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_builds(component: Component) -> Self {
        Self {
            fail_builds_for: Some(component),
            ..Self::default()
        }
    }
}

impl GeometryBackend for RecordingBackend {
    type Solid = String;

    fn build(&self, spec: &TraySpec, component: Component) -> Result<String> {
        self.builds.set(self.builds.get() + 1);
        if self.fail_builds_for == Some(component) {
            return Err(TrayError::GeometryConstruction {
                reason: format!("{component} came out empty"),
            });
        }
        Ok(format!("{component}\n{spec:#?}\n"))
    }

    fn export(&self, solid: &String, path: &Path) -> Result<()> {
        let shown = path.display().to_string();
        if let Some(pattern) = &self.fail_exports_matching {
            if shown.contains(pattern.as_str()) {
                return Err(TrayError::Export {
                    path: path.to_path_buf(),
                    reason: "simulated write failure".into(),
                });
            }
        }
        std::fs::write(path, solid).map_err(|e| TrayError::Export {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.exports.borrow_mut().push(shown);
        Ok(())
    }
}
