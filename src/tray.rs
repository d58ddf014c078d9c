//! Tray — the hollow storage wedge.
//!
//! The shell stands on the spool flange between the ring root and the
//! fence of its base, notched underneath to clear both and grooved along
//! the radial edges to clear the rails. Hexagonal ribs stiffen the inside
//! of the flat side walls and a fin at the outer wall serves as a handle.

use vcad::*;

use crate::sector::{radial_bar, ring, Sector, MARGIN};
use crate::tray_spec::TraySpec;

pub fn build(spec: &TraySpec) -> Part {
    let span = spec.angle.degrees();
    let c = spec.clearance;
    let seg = spec.segments;

    let shell = Sector::new(
        spec.tray_inner_radius,
        spec.tray_outer_radius,
        0.0,
        spec.tray_height,
        span,
    )
    .inset(c / 2.0, c / 2.0)
    .build("shell", seg);

    let cavity = Sector::new(
        spec.cavity_inner_radius,
        spec.cavity_outer_radius,
        spec.cavity_floor,
        spec.tray_height + MARGIN,
        span,
    )
    .inset(spec.cavity_side_offset, spec.cavity_side_offset)
    .build("cavity", seg);

    let mut tray = shell - underside_clearance(spec) - cavity;
    if let Some(ribs) = ribs(spec) {
        tray = tray + ribs;
    }
    tray + handle(spec)
}

/// Everything the base occupies below the tray, grown by the clearance.
fn underside_clearance(spec: &TraySpec) -> Part {
    let span = spec.angle.degrees();
    let c = spec.clearance;
    let top = spec.ring_height + c;
    let reach = spec.tray_outer_radius + MARGIN;

    let root_notch = ring("root_notch", 0.0, spec.ring_outer_radius + c, -MARGIN, top, spec.segments);
    let fence_notch = ring(
        "fence_notch",
        spec.fence_inner_radius - c,
        reach,
        -MARGIN,
        top,
        spec.segments,
    );

    let groove_width = spec.rail_width + 2.0 * c + MARGIN;
    let leading_groove = radial_bar("leading_groove", 0.0, reach, -MARGIN, groove_width, -MARGIN, top + MARGIN);
    let trailing_groove = radial_bar(
        "trailing_groove",
        0.0,
        reach,
        MARGIN - groove_width,
        groove_width,
        -MARGIN,
        top + MARGIN,
    )
    .rotate(0.0, 0.0, span);

    root_notch + fence_notch + leading_groove + trailing_groove
}

/// Hexagonal prisms along the inside of both side walls.
fn ribs(spec: &TraySpec) -> Option<Part> {
    let span = spec.angle.degrees();
    let height = spec.tray_height - spec.cavity_floor;
    let z = spec.cavity_floor + height / 2.0;
    let offset = spec.cavity_side_offset + spec.rib_radius / 2.0;

    spec.rib_positions
        .iter()
        .enumerate()
        .flat_map(|(i, r)| {
            let rib = centered_cylinder(&format!("rib_{i}"), spec.rib_radius, height, 6);
            [
                rib.translate(*r, offset, z),
                rib.translate(*r, -offset, z).rotate(0.0, 0.0, span),
            ]
        })
        .reduce(|acc, rib| acc + rib)
}

/// Fin on the bisector, fused into the outer wall.
fn handle(spec: &TraySpec) -> Part {
    let start = spec.cavity_outer_radius - spec.handle_depth;
    let end = spec.cavity_outer_radius + spec.wall_thickness / 2.0;
    radial_bar(
        "handle",
        start,
        end,
        -spec.handle_width / 2.0,
        spec.handle_width,
        spec.cavity_floor,
        spec.tray_height - spec.cavity_floor,
    )
    .rotate(0.0, 0.0, spec.angle.degrees() / 2.0)
}
