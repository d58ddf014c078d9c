//! Spool catalog — which spools to generate, at which sizes.
//!
//! Read from a `spools.toml` file; when none can be found the built-in list
//! of known spools is used instead.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::batch::{sanitize_name, BatchFailure};
use crate::error::{Result, TrayError};
use crate::profile::{
    diameter_from_circumference, SpoolDimensions, SpoolProfile, WedgeAngle, DEFAULT_CLEARANCE,
};
use crate::style::TrayStyle;
use crate::tray_spec::Component;

/// Environment variable naming the catalog file.
pub const CONFIG_ENV: &str = "SPOOL_TRAYS_CONFIG";
pub const CONFIG_FILE_NAME: &str = "spools.toml";

/// Run-wide settings from the `[batch]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchSettings {
    pub output_dir: PathBuf,
    /// Wedge sizes in degrees, generated for every spool without its own list.
    pub angles: Vec<f64>,
    pub components: Vec<Component>,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docs/stl"),
            angles: vec![15.0, 30.0, 45.0, 60.0, 90.0, 120.0],
            components: Component::ALL.to_vec(),
        }
    }
}

/// One `[[spool]]` entry, as written by the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpoolRecord {
    pub name: String,
    pub hub_diameter: Option<f64>,
    /// Tape measurement around the hub; alternative to `hub_diameter`.
    pub hub_circumference: Option<f64>,
    pub flange_diameter: f64,
    pub outer_diameter: Option<f64>,
    pub width: f64,
    #[serde(default)]
    pub flange_thickness: f64,
    pub clearance: Option<f64>,
    /// Extra sizes given as a number of equal wedges.
    #[serde(default)]
    pub wedges: Vec<u32>,
    /// Sizes in degrees; replaces `batch.angles` for this spool.
    pub angles: Option<Vec<f64>>,
}

impl SpoolRecord {
    pub fn profile(&self) -> Result<SpoolProfile> {
        let hub_diameter = match (self.hub_diameter, self.hub_circumference) {
            (Some(d), None) => d,
            (None, Some(c)) => diameter_from_circumference(c),
            (Some(d), Some(_)) => {
                return Err(TrayError::dimension(
                    "hub_diameter",
                    d,
                    "give either hub_diameter or hub_circumference, not both",
                ))
            }
            (None, None) => {
                return Err(TrayError::dimension(
                    "hub_diameter",
                    f64::NAN,
                    "missing; give hub_diameter or hub_circumference",
                ))
            }
        };

        let mut dims = SpoolDimensions::new(hub_diameter, self.flange_diameter, self.width)
            .with_flange_thickness(self.flange_thickness)
            .with_clearance(self.clearance.unwrap_or(DEFAULT_CLEARANCE));
        if let Some(outer) = self.outer_diameter {
            dims = dims.with_outer_diameter(outer);
        }
        SpoolProfile::new(self.name.clone(), dims)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    batch: BatchSettings,
    #[serde(default)]
    style: TrayStyle,
    /// Kept as raw tables so one malformed record only rejects itself.
    #[serde(default, rename = "spool")]
    spools: Vec<toml::Table>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub batch: BatchSettings,
    pub style: TrayStyle,
    pub spools: Vec<SpoolRecord>,
    /// `[[spool]]` records that could not be read, or whose name clashes
    /// with an earlier record.
    pub rejected: Vec<BatchFailure>,
    /// File the catalog came from; `None` for the built-in list.
    pub source: Option<PathBuf>,
}

impl Catalog {
    /// The two spools the trays were first designed around.
    pub fn builtin() -> Self {
        let spool = |name: &str, circumference: f64, width: f64| SpoolRecord {
            name: name.to_string(),
            hub_diameter: None,
            hub_circumference: Some(circumference),
            flange_diameter: 200.0,
            outer_diameter: None,
            width,
            flange_thickness: 0.0,
            clearance: None,
            wedges: Vec::new(),
            angles: None,
        };
        Self {
            batch: BatchSettings::default(),
            style: TrayStyle::default(),
            spools: vec![spool("filament_pm", 347.0, 70.0), spool("matterhackers", 283.0, 55.0)],
            rejected: Vec::new(),
            source: None,
        }
    }

    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text).map_err(|e| TrayError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut catalog = Self {
            batch: file.batch,
            style: file.style,
            spools: Vec::with_capacity(file.spools.len()),
            rejected: Vec::new(),
            source: Some(path.to_path_buf()),
        };
        // Sanitized, lowercased names already taken by an accepted record.
        let mut seen = HashSet::new();

        for (i, table) in file.spools.into_iter().enumerate() {
            let label = record_label(&table, i);
            let record = match table.try_into::<SpoolRecord>() {
                Ok(record) => record,
                Err(e) => {
                    catalog.reject(path, label, e.message().to_string());
                    continue;
                }
            };
            // Unusable names are reported per entry when the batch is planned.
            if let Some(key) = sanitize_name(&record.name) {
                if !seen.insert(key.to_ascii_lowercase()) {
                    let reason = format!(
                        "spool name {:?} is used more than once; both would write to the same directory",
                        record.name
                    );
                    catalog.reject(path, label, reason);
                    continue;
                }
            }
            catalog.spools.push(record);
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TrayError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content, path)
    }

    pub fn find(&self, name: &str) -> Option<&SpoolRecord> {
        self.spools.iter().find(|s| s.name == name)
    }

    /// Sizes to generate for one spool, in catalog order. A bad size only
    /// fails itself.
    pub fn angles_for(&self, record: &SpoolRecord) -> Vec<Result<WedgeAngle>> {
        let degrees = record.angles.as_deref().unwrap_or(self.batch.angles.as_slice());
        degrees
            .iter()
            .map(|d| WedgeAngle::from_degrees(*d))
            .chain(record.wedges.iter().map(|n| WedgeAngle::from_count(*n)))
            .collect()
    }

    /// The rejection recorded for a spool that never made it into the
    /// catalog, if any.
    pub fn find_rejected(&self, name: &str) -> Option<&BatchFailure> {
        self.rejected.iter().find(|f| f.entry == name)
    }

    fn reject(&mut self, path: &Path, entry: String, reason: String) {
        warn!(entry = %entry, %reason, "spool record rejected");
        self.rejected.push(BatchFailure {
            entry,
            error: TrayError::Config {
                path: path.to_path_buf(),
                reason,
            },
        });
    }
}

/// The record's `name` when it has one, else its position in the file.
fn record_label(table: &toml::Table, index: usize) -> String {
    match table.get("name").and_then(toml::Value::as_str) {
        Some(name) => name.to_string(),
        None => format!("spool_{}", index + 1),
    }
}

/// Find the catalog file.
///
/// Tries in order:
/// 1. `explicit`, usually from the command line
/// 2. the `SPOOL_TRAYS_CONFIG` environment variable
/// 3. `spools.toml` in the crate manifest directory (compile-time)
/// 4. `spools.toml` next to the current executable
/// 5. `spools.toml` in the working directory
pub fn resolve_catalog_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }

    let manifest_relative = Path::new(env!("CARGO_MANIFEST_DIR")).join(CONFIG_FILE_NAME);
    if manifest_relative.exists() {
        return Some(manifest_relative);
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }

    let cwd = PathBuf::from(CONFIG_FILE_NAME);
    cwd.exists().then_some(cwd)
}

/// Load the catalog, falling back to [`Catalog::builtin`] when no file is
/// found. A path that was asked for explicitly must exist.
pub fn load_catalog(explicit: Option<&Path>) -> Result<Catalog> {
    match resolve_catalog_path(explicit) {
        Some(path) => {
            info!(path = %path.display(), "loading spool catalog");
            Catalog::load(&path)
        }
        None => {
            info!("no {CONFIG_FILE_NAME} found, using built-in spool catalog");
            Ok(Catalog::builtin())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[batch]
output_dir = "out"
angles = [30.0, 60.0]
components = ["tray", "base"]

[style]
wall_thickness = 1.6

[[spool]]
name = "ExampleSpool"
hub_diameter = 30.0
flange_diameter = 70.0
width = 55.0
wedges = [6]
angles = []

[[spool]]
name = "filament_pm"
hub_circumference = 347.0
flange_diameter = 200.0
width = 70.0
clearance = 0.1
"#;

    fn sample() -> Catalog {
        Catalog::from_toml(SAMPLE, Path::new("spools.toml")).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let catalog = sample();
        assert_eq!(catalog.batch.output_dir, PathBuf::from("out"));
        assert_eq!(catalog.batch.components, vec![Component::Tray, Component::Base]);
        assert_eq!(catalog.style.wall_thickness, 1.6);
        assert_eq!(catalog.spools.len(), 2);
        assert_eq!(catalog.source.as_deref(), Some(Path::new("spools.toml")));
    }

    fn degrees(angles: Vec<Result<WedgeAngle>>) -> Vec<f64> {
        angles.into_iter().map(|a| a.unwrap().degrees()).collect()
    }

    #[test]
    fn test_angles_for() {
        let catalog = sample();
        let example = catalog.find("ExampleSpool").unwrap();
        assert_eq!(degrees(catalog.angles_for(example)), vec![60.0]);
        let pm = catalog.find("filament_pm").unwrap();
        assert_eq!(degrees(catalog.angles_for(pm)), vec![30.0, 60.0]);
    }

    #[test]
    fn test_bad_size_fails_alone() {
        let mut record = sample().find("filament_pm").unwrap().clone();
        record.wedges = vec![0, 4];
        let angles = sample().angles_for(&record);
        assert_eq!(angles.len(), 4);
        assert!(angles[2].is_err());
        assert_eq!(angles[3].as_ref().unwrap().degrees(), 90.0);
    }

    #[test]
    fn test_record_profile() {
        let catalog = sample();
        let pm = catalog.find("filament_pm").unwrap().profile().unwrap();
        assert!((pm.hub_radius() - 347.0 / (2.0 * std::f64::consts::PI)).abs() < 1e-9);
        assert_eq!(pm.clearance(), 0.1);
    }

    #[test]
    fn test_hub_must_be_given_once() {
        let mut record = sample().find("ExampleSpool").unwrap().clone();
        record.hub_circumference = Some(100.0);
        assert_eq!(record.profile().unwrap_err().kind(), "InvalidDimension");
        record.hub_diameter = None;
        record.hub_circumference = None;
        assert_eq!(record.profile().unwrap_err().kind(), "InvalidDimension");
    }

    #[test]
    fn test_defaults_without_tables() {
        let catalog = Catalog::from_toml("", Path::new("empty.toml")).unwrap();
        assert_eq!(catalog.batch, BatchSettings::default());
        assert_eq!(catalog.style, TrayStyle::default());
        assert!(catalog.spools.is_empty());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let text = r#"
[[spool]]
name = "Same Spool"
hub_diameter = 30.0
flange_diameter = 70.0
width = 55.0

[[spool]]
name = "same_spool"
hub_diameter = 40.0
flange_diameter = 80.0
width = 55.0
"#;
        let catalog = Catalog::from_toml(text, Path::new("dup.toml")).unwrap();
        assert_eq!(catalog.spools.len(), 1);
        assert_eq!(catalog.spools[0].name, "Same Spool");
        assert_eq!(catalog.rejected.len(), 1);
        assert_eq!(catalog.rejected[0].entry, "same_spool");
        assert_eq!(catalog.rejected[0].error.kind(), "ConfigError");
    }

    #[test]
    fn test_malformed_record_rejected_alone() {
        let text = r#"
[[spool]]
name = "good"
hub_diameter = 30.0
flange_diameter = 70.0
width = 55.0

[[spool]]
name = "no_width"
hub_diameter = 30.0
flange_diameter = 70.0

[[spool]]
hub_diameter = 30.0
flange_diameter = 70.0
width = 55.0

[[spool]]
name = "negative_count"
hub_diameter = 30.0
flange_diameter = 70.0
width = 55.0
wedges = [-6]

[[spool]]
name = "wrong_type"
hub_diameter = 30.0
flange_diameter = "seventy"
width = 55.0
"#;
        let catalog = Catalog::from_toml(text, Path::new("mixed.toml")).unwrap();
        assert_eq!(catalog.spools.len(), 1);
        assert_eq!(catalog.spools[0].name, "good");

        let labels: Vec<&str> = catalog.rejected.iter().map(|f| f.entry.as_str()).collect();
        assert_eq!(labels, vec!["no_width", "spool_3", "negative_count", "wrong_type"]);
        assert!(catalog.rejected.iter().all(|f| f.error.kind() == "ConfigError"));
        let reason = catalog.find_rejected("no_width").unwrap().error.to_string();
        assert!(reason.contains("width"), "{reason}");
    }

    #[test]
    fn test_bad_batch_table_rejects_file() {
        let err = Catalog::from_toml("[batch]\nangles = \"sixty\"\n", Path::new("bad.toml"))
            .unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn test_syntax_error_is_config_error() {
        let err = Catalog::from_toml("[[spool]\nname =", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, TrayError::Config { .. }));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_catalog(Some(Path::new("/nonexistent/spools.toml"))).unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn test_builtin_profiles_are_valid() {
        let catalog = Catalog::builtin();
        assert!(catalog.source.is_none());
        assert!(catalog.rejected.is_empty());
        for record in &catalog.spools {
            record.profile().unwrap();
        }
    }
}
