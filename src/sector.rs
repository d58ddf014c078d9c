//! Annular sectors from cylinder and box primitives.
//!
//! vcad has no revolve, so a sector is a ring with everything outside the
//! wedge cut away by two boxes, each standing in for a half-space.

use vcad::*;

/// How far cutting tools overshoot the surfaces they trim.
pub const MARGIN: f64 = 1.0;

/// Ring between two radii over `[bottom, top]`, swept from 0° to `span`
/// about +Z.
#[derive(Debug, Clone, Copy)]
pub struct Sector {
    inner: f64,
    outer: f64,
    bottom: f64,
    top: f64,
    span: f64,
    start_inset: f64,
    end_inset: f64,
    start_angle: f64,
}

impl Sector {
    pub fn new(inner: f64, outer: f64, bottom: f64, top: f64, span: f64) -> Self {
        Self {
            inner,
            outer,
            bottom,
            top,
            span,
            start_inset: 0.0,
            end_inset: 0.0,
            start_angle: 0.0,
        }
    }

    /// Move the flat radial faces inward by a fixed distance (not an angle).
    pub fn inset(mut self, start: f64, end: f64) -> Self {
        self.start_inset = start;
        self.end_inset = end;
        self
    }

    /// Rotate the finished sector so it starts at `degrees`.
    pub fn starting_at(mut self, degrees: f64) -> Self {
        self.start_angle = degrees;
        self
    }

    pub fn build(&self, name: &str, segments: u32) -> Part {
        let height = self.top - self.bottom;
        let body = ring(name, self.inner, self.outer, -height / 2.0, height / 2.0, segments);

        let reach = 2.0 * (self.outer + MARGIN);
        let cut_height = height + 2.0 * MARGIN;

        // Half-space behind the 0° face.
        let before = centered_cube(&format!("{name}_before"), reach, reach, cut_height)
            .translate(0.0, -reach / 2.0 + self.start_inset, 0.0);
        // Half-space past the far face.
        let after = centered_cube(&format!("{name}_after"), reach, reach, cut_height)
            .translate(0.0, reach / 2.0 - self.end_inset, 0.0)
            .rotate(0.0, 0.0, self.span);

        (body - before - after)
            .rotate(0.0, 0.0, self.start_angle)
            .translate(0.0, 0.0, self.bottom + height / 2.0)
    }
}

/// Full ring (or disc when `inner` is zero) over `[bottom, top]`.
pub fn ring(name: &str, inner: f64, outer: f64, bottom: f64, top: f64, segments: u32) -> Part {
    let height = top - bottom;
    let disc = centered_cylinder(name, outer, height, segments);
    let part = if inner > 0.0 {
        disc - centered_cylinder(&format!("{name}_bore"), inner, height + 2.0 * MARGIN, segments)
    } else {
        disc
    };
    part.translate(0.0, 0.0, bottom + height / 2.0)
}

/// Straight bar lying along the +X axis from `start` to `end`, its near
/// long side on `y = y_min`, standing on `z = bottom`.
pub fn radial_bar(
    name: &str,
    start: f64,
    end: f64,
    y_min: f64,
    width: f64,
    bottom: f64,
    height: f64,
) -> Part {
    centered_cube(name, end - start, width, height).translate(
        (start + end) / 2.0,
        y_min + width / 2.0,
        bottom + height / 2.0,
    )
}
