//! Printing and feature constants shared by every spool.
//!
//! Any field can be overridden from the `[style]` table of the catalog.
//! Interactions between overrides are not checked beyond what
//! [`TraySpec::derive`](crate::tray_spec::TraySpec::derive) rejects.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrayStyle {
    /// Radial depth of the ring segments that link around the hub.
    pub ring_depth: f64,
    /// Height of the ring segments, rails and fence.
    pub ring_height: f64,
    /// Radial depth of the outer fence holding the tray in.
    pub latch_depth: f64,
    /// How far the fence leans into the tray.
    pub latch_protrude: f64,
    /// Radius of the peg linking neighbouring bases.
    pub tab_radius: f64,
    /// Angle past the wedge edge where the linking peg sits.
    pub tab_offset_deg: f64,
    /// Nominal tray wall, before clearance is taken off.
    pub wall_thickness: f64,
    /// Nominal tray floor, before clearance is taken off.
    pub floor_thickness: f64,
    pub handle_width: f64,
    pub handle_depth: f64,
    pub rib_spacing: f64,
    pub rib_radius: f64,
    /// Facets per full revolution for every circular feature.
    pub segments: u32,
}

impl Default for TrayStyle {
    fn default() -> Self {
        let ring_depth = 6.0;
        Self {
            ring_depth,
            ring_height: 4.0,
            latch_depth: 5.0,
            latch_protrude: 0.5,
            tab_radius: ring_depth / 4.0,
            tab_offset_deg: 3.0,
            wall_thickness: 2.0,
            floor_thickness: 2.0,
            handle_width: 4.0,
            handle_depth: 5.0,
            rib_spacing: 7.5,
            rib_radius: 1.5,
            segments: 128,
        }
    }
}
