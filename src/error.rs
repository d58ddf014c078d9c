//! Error types for tray generation.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading a spool catalog and
/// writing a mesh file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrayError {
    /// A measurement is non-positive, non-finite, or out of order.
    #[error("invalid dimension `{field}` = {value}: {reason}")]
    InvalidDimension {
        field: &'static str,
        value: f64,
        reason: String,
    },

    /// The inputs look valid but leave no room for a printable solid.
    #[error("geometry construction failed: {reason}")]
    GeometryConstruction { reason: String },

    /// Writing the mesh file failed.
    #[error("failed to export {}: {reason}", path.display())]
    Export { path: PathBuf, reason: String },

    /// The spool name has no characters usable in a file name.
    #[error("spool name {name:?} cannot be used in a file name")]
    InvalidName { name: String },

    /// The catalog file could not be read or parsed.
    #[error("invalid catalog {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl TrayError {
    /// Short stable label used in log lines and the batch summary.
    pub fn kind(&self) -> &'static str {
        match self {
            TrayError::InvalidDimension { .. } => "InvalidDimension",
            TrayError::GeometryConstruction { .. } => "GeometryConstructionError",
            TrayError::Export { .. } => "ExportError",
            TrayError::InvalidName { .. } => "InvalidName",
            TrayError::Config { .. } => "ConfigError",
        }
    }

    /// Only export failures may succeed on a plain re-run.
    pub fn is_retriable(&self) -> bool {
        matches!(self, TrayError::Export { .. })
    }

    pub(crate) fn dimension(field: &'static str, value: f64, reason: impl Into<String>) -> Self {
        TrayError::InvalidDimension {
            field,
            value,
            reason: reason.into(),
        }
    }

    pub(crate) fn construction(reason: impl Into<String>) -> Self {
        TrayError::GeometryConstruction {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(
            TrayError::dimension("width", -1.0, "must be positive").kind(),
            "InvalidDimension"
        );
        assert_eq!(
            TrayError::construction("wall collapsed").kind(),
            "GeometryConstructionError"
        );
    }

    #[test]
    fn test_only_export_is_retriable() {
        let export = TrayError::Export {
            path: PathBuf::from("out/tray_60.stl"),
            reason: "permission denied".into(),
        };
        assert!(export.is_retriable());
        assert!(!TrayError::construction("x").is_retriable());
    }

    #[test]
    fn test_display_names_field() {
        let err = TrayError::dimension("hub_diameter", 0.0, "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid dimension `hub_diameter` = 0: must be positive"
        );
    }
}
