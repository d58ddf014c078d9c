//! Derived tray dimensions.
//!
//! [`TraySpec::derive`] turns a spool, a wedge size and the style constants
//! into every length the part builders need, and is the single place that
//! decides whether a printable solid exists at all. Nothing here touches
//! the CAD library.

use std::fmt;

use serde::Deserialize;

use crate::error::{Result, TrayError};
use crate::profile::{SpoolProfile, WedgeAngle};
use crate::style::TrayStyle;

/// One printable piece of the storage ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    /// Ring segment with rails, fence, link tab and slot.
    Base,
    /// Hollow storage wedge sitting in a base.
    Tray,
    /// Ring segment without rails or fence.
    Placeholder,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::Base, Component::Tray, Component::Placeholder];

    pub fn as_str(self) -> &'static str {
        match self {
            Component::Base => "base",
            Component::Tray => "tray",
            Component::Placeholder => "placeholder",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every length needed to build one wedge of one spool, in millimeters.
///
/// Radii are measured from the spool axis. Angles are in degrees with the
/// wedge spanning `[0, angle]` before the final presentation rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct TraySpec {
    pub angle: WedgeAngle,
    pub hub_radius: f64,
    pub flange_radius: f64,
    pub usable_height: f64,
    pub clearance: f64,

    pub ring_height: f64,
    pub ring_inner_radius: f64,
    pub ring_outer_radius: f64,
    pub fence_inner_radius: f64,
    pub rail_width: f64,

    pub tab_radius: f64,
    pub tab_position_radius: f64,
    pub tab_offset_deg: f64,

    pub tray_inner_radius: f64,
    pub tray_outer_radius: f64,
    pub tray_height: f64,
    pub wall_thickness: f64,
    pub floor_thickness: f64,

    pub cavity_inner_radius: f64,
    pub cavity_outer_radius: f64,
    pub cavity_floor: f64,
    /// Distance from each radial face of the wedge to the cavity.
    pub cavity_side_offset: f64,

    pub handle_width: f64,
    pub handle_depth: f64,
    pub rib_radius: f64,
    pub rib_positions: Vec<f64>,

    pub segments: u32,
}

impl TraySpec {
    pub fn derive(profile: &SpoolProfile, angle: WedgeAngle, style: &TrayStyle) -> Result<Self> {
        check_style(style)?;

        let c = profile.clearance();
        let hub_radius = profile.hub_radius();
        let flange_radius = profile.flange_radius();
        let usable_height = profile.usable_height();

        let wall_thickness = style.wall_thickness - c;
        if wall_thickness <= 0.0 {
            return Err(TrayError::construction(format!(
                "wall thickness {} leaves {wall_thickness:.3} mm after {c} mm clearance",
                style.wall_thickness
            )));
        }
        let floor_thickness = style.floor_thickness - c;
        if floor_thickness <= 0.0 {
            return Err(TrayError::construction(format!(
                "floor thickness {} leaves {floor_thickness:.3} mm after {c} mm clearance",
                style.floor_thickness
            )));
        }

        // Ribs sit half a radius into the side walls.
        if style.rib_radius / 2.0 >= wall_thickness {
            return Err(TrayError::construction(format!(
                "ribs of radius {} break through a {wall_thickness:.3} mm wall",
                style.rib_radius
            )));
        }

        let tray_inner_radius = hub_radius + c;
        let tray_outer_radius = flange_radius - c;

        let ring_inner_radius = hub_radius + c;
        let ring_outer_radius = hub_radius + style.ring_depth;
        let fence_inner_radius = flange_radius - style.latch_depth + style.latch_protrude + c;
        if ring_outer_radius + c >= fence_inner_radius - c {
            return Err(TrayError::construction(format!(
                "ring root (to r={ring_outer_radius:.2}) runs into the fence (from r={fence_inner_radius:.2})"
            )));
        }
        if fence_inner_radius >= tray_outer_radius {
            return Err(TrayError::construction(format!(
                "fence has no material between r={fence_inner_radius:.2} and r={tray_outer_radius:.2}"
            )));
        }

        let tab_radius = style.tab_radius;
        let tab_position_radius = hub_radius + style.ring_depth / 2.0 + tab_radius / 2.0;
        if tab_position_radius - tab_radius - c <= ring_inner_radius
            || tab_position_radius + tab_radius + c >= ring_outer_radius
        {
            return Err(TrayError::construction(format!(
                "link tab of radius {tab_radius} does not fit a {} mm ring",
                style.ring_depth
            )));
        }

        let tray_height = usable_height - style.ring_height - c;
        let cavity_floor = style.ring_height + c + floor_thickness;
        if tray_height <= cavity_floor {
            return Err(TrayError::construction(format!(
                "tray height {tray_height:.2} leaves no cavity above the floor at {cavity_floor:.2}"
            )));
        }

        let cavity_inner_radius = tray_inner_radius + wall_thickness;
        let cavity_outer_radius = tray_outer_radius - wall_thickness;
        if cavity_outer_radius <= cavity_inner_radius {
            return Err(TrayError::construction(format!(
                "walls of {wall_thickness:.2} mm close the cavity between r={tray_inner_radius:.2} and r={tray_outer_radius:.2}"
            )));
        }

        // Offset side walls meet on the bisector at this distance from the axis.
        let cavity_side_offset = c / 2.0 + wall_thickness;
        let apex = cavity_side_offset / (angle.radians() / 2.0).sin();
        if apex >= cavity_outer_radius {
            return Err(TrayError::construction(format!(
                "a {angle} wedge is too narrow for its walls (cavity starts at r={apex:.2})"
            )));
        }
        let cavity_inner_radius = cavity_inner_radius.max(apex);

        if style.handle_depth >= cavity_outer_radius - cavity_inner_radius {
            return Err(TrayError::construction(format!(
                "handle of depth {} does not fit a cavity {:.2} mm deep",
                style.handle_depth,
                cavity_outer_radius - cavity_inner_radius
            )));
        }

        let rib_positions = rib_positions(cavity_inner_radius, cavity_outer_radius, style.rib_spacing);

        Ok(Self {
            angle,
            hub_radius,
            flange_radius,
            usable_height,
            clearance: c,
            ring_height: style.ring_height,
            ring_inner_radius,
            ring_outer_radius,
            fence_inner_radius,
            rail_width: style.ring_height / 4.0,
            tab_radius,
            tab_position_radius,
            tab_offset_deg: style.tab_offset_deg,
            tray_inner_radius,
            tray_outer_radius,
            tray_height,
            wall_thickness,
            floor_thickness,
            cavity_inner_radius,
            cavity_outer_radius,
            cavity_floor,
            cavity_side_offset,
            handle_width: style.handle_width,
            handle_depth: style.handle_depth,
            rib_radius: style.rib_radius,
            rib_positions,
            segments: style.segments,
        })
    }

    pub fn available_radius(&self) -> f64 {
        self.flange_radius - self.hub_radius
    }

    pub fn radial_depth(&self) -> f64 {
        self.tray_outer_radius - self.tray_inner_radius
    }

    /// Largest distance from the axis any component reaches.
    pub fn bounding_radius(&self) -> f64 {
        self.tray_outer_radius
    }

    /// Z rotation applied before export so the wedge is centered on -Y.
    pub fn presentation_rotation(&self) -> f64 {
        -(90.0 + self.angle.degrees() / 2.0)
    }
}

/// Evenly spaced rib radii strictly inside `(inner, outer)`.
fn rib_positions(inner: f64, outer: f64, target_spacing: f64) -> Vec<f64> {
    let span = outer - inner;
    let count = (span / target_spacing).floor() as usize;
    if count < 2 {
        return Vec::new();
    }
    let spacing = span / count as f64;
    (1..count).map(|i| inner + i as f64 * spacing).collect()
}

fn check_style(style: &TrayStyle) -> Result<()> {
    let fields = [
        ("ring_depth", style.ring_depth),
        ("ring_height", style.ring_height),
        ("latch_depth", style.latch_depth),
        ("tab_radius", style.tab_radius),
        ("tab_offset_deg", style.tab_offset_deg),
        ("wall_thickness", style.wall_thickness),
        ("floor_thickness", style.floor_thickness),
        ("handle_width", style.handle_width),
        ("handle_depth", style.handle_depth),
        ("rib_spacing", style.rib_spacing),
        ("rib_radius", style.rib_radius),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value <= 0.0 {
            return Err(TrayError::dimension(field, value, "must be a positive number"));
        }
    }
    if !style.latch_protrude.is_finite() || style.latch_protrude < 0.0 {
        return Err(TrayError::dimension(
            "latch_protrude",
            style.latch_protrude,
            "must not be negative",
        ));
    }
    if style.segments < 3 {
        return Err(TrayError::dimension(
            "segments",
            f64::from(style.segments),
            "a circle needs at least 3 facets",
        ));
    }
    Ok(())
}
