//! Base — the ring segment a tray sits in.
//!
//! Bases link around the hub with a peg past one edge and a matching slot
//! inside the other. Rails along both radial edges locate the tray and a
//! short fence at the flange end keeps it from sliding out.

use vcad::*;

use crate::sector::{radial_bar, Sector, MARGIN};
use crate::tray_spec::TraySpec;

pub fn build(spec: &TraySpec) -> Part {
    let span = spec.angle.degrees();
    let h = spec.ring_height;
    let c = spec.clearance;

    let fence = Sector::new(spec.fence_inner_radius, spec.tray_outer_radius, 0.0, h, span)
        .inset(c, 0.0)
        .build("fence", spec.segments);

    // Rails overlap the root and fence so the union is a single solid.
    let rail_start = spec.ring_outer_radius - MARGIN;
    let rail_end = spec.fence_inner_radius + MARGIN;
    let leading_rail = radial_bar("leading_rail", rail_start, rail_end, c, spec.rail_width, 0.0, h);
    let trailing_rail = radial_bar(
        "trailing_rail",
        rail_start,
        rail_end,
        -spec.rail_width,
        spec.rail_width,
        0.0,
        h,
    )
    .rotate(0.0, 0.0, span);

    ring_segment(spec) + fence + leading_rail + trailing_rail
}

/// Ring root with link tab and slot; the whole placeholder and the core
/// of every base.
pub fn ring_segment(spec: &TraySpec) -> Part {
    let root = Sector::new(
        spec.ring_inner_radius,
        spec.ring_outer_radius,
        0.0,
        spec.ring_height,
        spec.angle.degrees(),
    )
    .inset(spec.clearance, 0.0)
    .build("ring_root", spec.segments);

    root + link_tab(spec) - link_slot(spec)
}

/// Peg standing just past the far edge, joined to the root by a short arm.
fn link_tab(spec: &TraySpec) -> Part {
    let span = spec.angle.degrees();
    let h = spec.ring_height;
    let arm_half = spec.tab_radius / 2.0;

    let peg = centered_cylinder("tab_peg", spec.tab_radius, h, spec.segments)
        .translate(spec.tab_position_radius, 0.0, h / 2.0)
        .rotate(0.0, 0.0, span + spec.tab_offset_deg);

    let arm = Sector::new(
        spec.tab_position_radius - arm_half,
        spec.tab_position_radius + arm_half,
        0.0,
        h,
        spec.tab_offset_deg + 2.0,
    )
    .starting_at(span - 2.0)
    .build("tab_arm", spec.segments);

    peg + arm
}

/// Pocket for the neighbour's peg, grown by the clearance all round.
fn link_slot(spec: &TraySpec) -> Part {
    let c = spec.clearance;
    let h = spec.ring_height;
    let arm_half = spec.tab_radius / 2.0 + c;

    let pocket = centered_cylinder("slot_pocket", spec.tab_radius + c, h + 2.0 * MARGIN, spec.segments)
        .translate(spec.tab_position_radius, 0.0, h / 2.0)
        .rotate(0.0, 0.0, spec.tab_offset_deg);

    let arm = Sector::new(
        spec.tab_position_radius - arm_half,
        spec.tab_position_radius + arm_half,
        -MARGIN,
        h + MARGIN,
        spec.tab_offset_deg + MARGIN,
    )
    .starting_at(-MARGIN)
    .build("slot_arm", spec.segments);

    pocket + arm
}
