//! Storage trays for empty filament spools, built with vcad.
//!
//! A spool's hub and flange measurements are turned into three printable
//! parts per wedge size: a base segment that links with its neighbours
//! into a ring around the hub, a tray that sits in the base, and a
//! placeholder segment for closing the ring where no tray sits. Each part
//! is written as an STL file.

pub mod backend;
pub mod base;
pub mod batch;
pub mod catalog;
pub mod error;
pub mod placeholder;
pub mod profile;
mod sector;
pub mod style;
pub mod tray;
pub mod tray_spec;
pub mod vcad_backend;

pub use backend::{build_component, GeometryBackend};
pub use batch::{run_batch, BatchEntry, BatchFailure, BatchPlan, BatchReport};
pub use catalog::{load_catalog, Catalog, SpoolRecord};
pub use error::TrayError;
pub use profile::{SpoolDimensions, SpoolProfile, WedgeAngle};
pub use style::TrayStyle;
pub use tray_spec::{Component, TraySpec};
pub use vcad_backend::VcadBackend;

/// Console logging, filtered by `RUST_LOG` (default `info`).
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
