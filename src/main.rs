//! Spool tray generator.
//!
//! With no subcommand, builds every spool in the catalog at every listed
//! size and writes one STL per component. `single` writes the parts of one
//! spool at one size for a quick look in a mesh viewer.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing::error;

use spool_trays::batch::{run_batch, BatchPlan, BatchReport};
use spool_trays::catalog::{load_catalog, Catalog};
use spool_trays::{init_logging, Component, VcadBackend, WedgeAngle};

#[derive(Parser, Debug)]
#[command(name = "spool-trays", version, about = "Generate STL storage trays for empty filament spools")]
struct Cli {
    /// Spool catalog (TOML). Defaults to $SPOOL_TRAYS_CONFIG or spools.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory, overriding the catalog's `batch.output_dir`.
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build base, tray and placeholder for one spool at one size.
    Single {
        /// Spool name as listed in the catalog.
        #[arg(long)]
        spool: String,

        /// Wedge size in degrees.
        #[arg(long, default_value_t = 15.0)]
        angle: f64,

        /// Printing clearance in mm, overriding the catalog.
        #[arg(long)]
        clearance: Option<f64>,
    },
    /// Print the spools in the catalog.
    List,
}

fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("failed to initialise logging: {e}");
    }

    match run(Cli::parse()) {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(report)) => {
            report.log_summary();
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns the batch report, or `None` for commands that build nothing.
fn run(cli: Cli) -> anyhow::Result<Option<BatchReport>> {
    let catalog = load_catalog(cli.config.as_deref()).context("failed to load spool catalog")?;
    let backend = VcadBackend;

    match cli.command {
        None => {
            let root = cli.output.unwrap_or_else(|| catalog.batch.output_dir.clone());
            let plan = BatchPlan::from_catalog(&catalog, &root);
            Ok(Some(run_batch(&backend, &plan, &catalog.style)))
        }
        Some(Command::Single {
            spool,
            angle,
            clearance,
        }) => {
            let record = match catalog.find(&spool) {
                Some(record) => record,
                None => match catalog.find_rejected(&spool) {
                    Some(failure) => {
                        return Err(anyhow!(failure.error.clone())
                            .context(format!("spool {spool:?} was rejected")))
                    }
                    None => return Err(anyhow!("no spool named {spool:?} in the catalog")),
                },
            };
            let mut profile = record.profile()?;
            if let Some(c) = clearance {
                profile = profile.with_clearance(c)?;
            }
            let angle = WedgeAngle::from_degrees(angle)?;
            let root = cli.output.unwrap_or_else(|| PathBuf::from("preview"));
            let plan = BatchPlan::single(&profile, angle, &Component::ALL, &root)?;
            Ok(Some(run_batch(&backend, &plan, &catalog.style)))
        }
        Some(Command::List) => {
            print_catalog(&catalog);
            Ok(None)
        }
    }
}

fn print_catalog(catalog: &Catalog) {
    match &catalog.source {
        Some(path) => println!("Catalog: {}", path.display()),
        None => println!("Catalog: built-in"),
    }
    for record in &catalog.spools {
        match record.profile() {
            Ok(p) => println!(
                "  {:<20} hub {:>7.2}  flange {:>7.2}  height {:>6.2}  clearance {:.2}",
                p.name(),
                p.hub_radius() * 2.0,
                p.flange_radius() * 2.0,
                p.usable_height(),
                p.clearance()
            ),
            Err(e) => println!("  {:<20} invalid: {e}", record.name),
        }
    }
    for failure in &catalog.rejected {
        println!("  {:<20} rejected: {}", failure.entry, failure.error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_builds_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("spools.toml");
        std::fs::write(
            &config,
            "[[spool]]\nname = \"example\"\nhub_diameter = 30.0\nflange_diameter = 70.0\nwidth = 55.0\n",
        )
        .unwrap();

        let cli = Cli::parse_from(["spool-trays", "--config", config.to_str().unwrap(), "list"]);
        assert!(run(cli).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_single_reports_rejected_spool() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("spools.toml");
        std::fs::write(&config, "[[spool]]\nname = \"no_width\"\nhub_diameter = 30.0\nflange_diameter = 70.0\n")
            .unwrap();

        let cli = Cli::parse_from([
            "spool-trays",
            "--config",
            config.to_str().unwrap(),
            "single",
            "--spool",
            "no_width",
        ]);
        let err = run(cli).unwrap_err();
        assert!(format!("{err:#}").contains("rejected"), "{err:#}");
    }
}
