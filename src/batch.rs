//! Batch generation driver.
//!
//! The catalog is expanded into an ordered list of entries (spool × size ×
//! component). Each entry is built and exported on its own; a failure is
//! logged, recorded, and the run moves on to the next entry.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::backend::{build_component, GeometryBackend};
use crate::catalog::Catalog;
use crate::error::{Result, TrayError};
use crate::profile::{SpoolProfile, WedgeAngle};
use crate::style::TrayStyle;
use crate::tray_spec::Component;

/// File-name safe form of a spool name: ASCII letters, digits, `-` and `_`.
pub fn sanitize_name(name: &str) -> Option<String> {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('_');
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Directory holding every file of one spool:
/// `{hub_r}_{flange_r}_{height}_{name}`, radii and height truncated to mm.
pub fn spool_dir(root: &Path, profile: &SpoolProfile) -> Result<PathBuf> {
    let name = sanitize_name(profile.name()).ok_or_else(|| TrayError::InvalidName {
        name: profile.name().to_string(),
    })?;
    Ok(root.join(format!(
        "{}_{}_{}_{}",
        profile.hub_radius() as i64,
        profile.flange_radius() as i64,
        profile.usable_height() as i64,
        name
    )))
}

pub fn entry_path(
    root: &Path,
    profile: &SpoolProfile,
    angle: WedgeAngle,
    component: Component,
) -> Result<PathBuf> {
    Ok(spool_dir(root, profile)?.join(file_name(angle, component)))
}

fn file_name(angle: WedgeAngle, component: Component) -> String {
    format!("{component}_{}.stl", angle.label())
}

/// One mesh file to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub profile: SpoolProfile,
    pub angle: WedgeAngle,
    pub component: Component,
    pub path: PathBuf,
}

impl BatchEntry {
    /// `spool/component_size`, used to identify the entry in logs.
    pub fn label(&self) -> String {
        format!(
            "{}/{}_{}",
            self.profile.name(),
            self.component,
            self.angle.label()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub entry: String,
    pub error: TrayError,
}

/// Entries to process, plus catalog records that could not be expanded.
#[derive(Debug, Clone, Default)]
pub struct BatchPlan {
    pub entries: Vec<BatchEntry>,
    pub rejected: Vec<BatchFailure>,
}

impl BatchPlan {
    pub fn from_catalog(catalog: &Catalog, root: &Path) -> Self {
        let mut plan = Self::default();
        plan.rejected.extend(catalog.rejected.iter().cloned());
        for record in &catalog.spools {
            let profile = match record.profile() {
                Ok(profile) => profile,
                Err(error) => {
                    plan.reject(record.name.clone(), error);
                    continue;
                }
            };
            let dir = match spool_dir(root, &profile) {
                Ok(dir) => dir,
                Err(error) => {
                    plan.reject(record.name.clone(), error);
                    continue;
                }
            };
            for (i, angle) in catalog.angles_for(record).into_iter().enumerate() {
                match angle {
                    Ok(angle) => plan.push_size(&profile, angle, &catalog.batch.components, &dir),
                    Err(error) => plan.reject(format!("{}/size_{}", record.name, i + 1), error),
                }
            }
        }
        plan
    }

    /// Every requested component of one spool at one size.
    pub fn single(
        profile: &SpoolProfile,
        angle: WedgeAngle,
        components: &[Component],
        root: &Path,
    ) -> Result<Self> {
        let dir = spool_dir(root, profile)?;
        let mut plan = Self::default();
        plan.push_size(profile, angle, components, &dir);
        Ok(plan)
    }

    fn push_size(
        &mut self,
        profile: &SpoolProfile,
        angle: WedgeAngle,
        components: &[Component],
        dir: &Path,
    ) {
        for component in components {
            let path = dir.join(file_name(angle, *component));
            // `angles = [60.0]` with `wedges = [6]` asks for the same file twice.
            if self.entries.iter().any(|e| e.path == path) {
                debug!(path = %path.display(), "size already planned, skipping");
                continue;
            }
            self.entries.push(BatchEntry {
                profile: profile.clone(),
                angle,
                component: *component,
                path,
            });
        }
    }

    fn reject(&mut self, entry: String, error: TrayError) {
        warn!(entry = %entry, kind = error.kind(), %error, "catalog entry rejected");
        self.rejected.push(BatchFailure { entry, error });
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn log_summary(&self) {
        if self.is_success() {
            info!(written = self.written.len(), "all entries generated");
            return;
        }
        error!(
            written = self.written.len(),
            failed = self.failures.len(),
            "batch finished with failures"
        );
        for failure in &self.failures {
            error!(entry = %failure.entry, kind = failure.error.kind(), "  {}", failure.error);
        }
    }
}

/// Build and export every entry in order.
pub fn run_batch<B: GeometryBackend>(backend: &B, plan: &BatchPlan, style: &TrayStyle) -> BatchReport {
    let mut report = BatchReport {
        written: Vec::with_capacity(plan.entries.len()),
        failures: plan.rejected.clone(),
    };

    for entry in &plan.entries {
        match process_entry(backend, entry, style) {
            Ok(()) => {
                info!(path = %entry.path.display(), "exported");
                report.written.push(entry.path.clone());
            }
            Err(error) => {
                error!(entry = %entry.label(), kind = error.kind(), %error, "entry failed");
                report.failures.push(BatchFailure {
                    entry: entry.label(),
                    error,
                });
            }
        }
    }

    report
}

fn process_entry<B: GeometryBackend>(backend: &B, entry: &BatchEntry, style: &TrayStyle) -> Result<()> {
    let solid = build_component(backend, &entry.profile, entry.angle, style, entry.component)?;
    if let Some(dir) = entry.path.parent() {
        fs::create_dir_all(dir).map_err(|e| TrayError::Export {
            path: entry.path.clone(),
            reason: format!("cannot create {}: {e}", dir.display()),
        })?;
    }
    backend.export(&solid, &entry.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SpoolDimensions;

    fn example() -> SpoolProfile {
        SpoolProfile::new("ExampleSpool", SpoolDimensions::new(30.0, 70.0, 55.0)).unwrap()
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("ExampleSpool").as_deref(), Some("ExampleSpool"));
        assert_eq!(sanitize_name(" Filament PM ").as_deref(), Some("Filament_PM"));
        assert_eq!(sanitize_name("a/b\\c").as_deref(), Some("a_b_c"));
        assert_eq!(sanitize_name("..."), None);
        assert_eq!(sanitize_name(""), None);
    }

    #[test]
    fn test_entry_path() {
        let angle = WedgeAngle::from_count(6).unwrap();
        let path = entry_path(Path::new("out"), &example(), angle, Component::Tray).unwrap();
        assert_eq!(path, PathBuf::from("out/15_35_55_ExampleSpool/tray_60.stl"));
    }

    #[test]
    fn test_unusable_name() {
        let profile = SpoolProfile::new("???", SpoolDimensions::new(30.0, 70.0, 55.0)).unwrap();
        let err = spool_dir(Path::new("out"), &profile).unwrap_err();
        assert_eq!(err.kind(), "InvalidName");
    }

    #[test]
    fn test_single_plan_order() {
        let angle = WedgeAngle::from_degrees(15.0).unwrap();
        let plan = BatchPlan::single(&example(), angle, &Component::ALL, Path::new("preview")).unwrap();
        let labels: Vec<String> = plan.entries.iter().map(BatchEntry::label).collect();
        assert_eq!(
            labels,
            vec![
                "ExampleSpool/base_15",
                "ExampleSpool/tray_15",
                "ExampleSpool/placeholder_15"
            ]
        );
        assert!(plan.rejected.is_empty());
    }

    #[test]
    fn test_repeated_component_planned_once() {
        let angle = WedgeAngle::from_count(6).unwrap();
        let components = [Component::Tray, Component::Tray, Component::Base];
        let plan = BatchPlan::single(&example(), angle, &components, Path::new("preview")).unwrap();
        let labels: Vec<String> = plan.entries.iter().map(BatchEntry::label).collect();
        assert_eq!(labels, vec!["ExampleSpool/tray_60", "ExampleSpool/base_60"]);
    }
}
