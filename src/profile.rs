//! Spool dimensions and wedge sizes.
//!
//! Both types validate on construction, so anything holding a
//! [`SpoolProfile`] or [`WedgeAngle`] can assume positive, ordered
//! measurements.

use std::fmt;

use crate::error::{Result, TrayError};

/// Default printing tolerance between mating surfaces (mm).
pub const DEFAULT_CLEARANCE: f64 = 0.25;

/// Raw measurements of a spool, as typed in by a user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpoolDimensions {
    pub hub_diameter: f64,
    pub flange_diameter: f64,
    pub outer_diameter: Option<f64>,
    pub width: f64,
    pub flange_thickness: f64,
    pub clearance: f64,
}

impl SpoolDimensions {
    /// Hub, usable flange diameter and width; everything else defaulted.
    pub fn new(hub_diameter: f64, flange_diameter: f64, width: f64) -> Self {
        Self {
            hub_diameter,
            flange_diameter,
            outer_diameter: None,
            width,
            flange_thickness: 0.0,
            clearance: DEFAULT_CLEARANCE,
        }
    }

    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance;
        self
    }

    pub fn with_outer_diameter(mut self, outer_diameter: f64) -> Self {
        self.outer_diameter = Some(outer_diameter);
        self
    }

    pub fn with_flange_thickness(mut self, flange_thickness: f64) -> Self {
        self.flange_thickness = flange_thickness;
        self
    }
}

/// Hub diameter from a tape measurement around the hub.
pub fn diameter_from_circumference(circumference: f64) -> f64 {
    circumference / std::f64::consts::PI
}

/// One validated spool variant. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SpoolProfile {
    name: String,
    dims: SpoolDimensions,
}

impl SpoolProfile {
    pub fn new(name: impl Into<String>, dims: SpoolDimensions) -> Result<Self> {
        let name = name.into();

        positive("hub_diameter", dims.hub_diameter)?;
        positive("flange_diameter", dims.flange_diameter)?;
        positive("width", dims.width)?;
        if let Some(outer) = dims.outer_diameter {
            positive("outer_diameter", outer)?;
        }
        non_negative("flange_thickness", dims.flange_thickness)?;
        non_negative("clearance", dims.clearance)?;

        if dims.hub_diameter >= dims.flange_diameter {
            return Err(TrayError::dimension(
                "hub_diameter",
                dims.hub_diameter,
                format!(
                    "must be smaller than flange_diameter ({})",
                    dims.flange_diameter
                ),
            ));
        }
        if let Some(outer) = dims.outer_diameter {
            if dims.flange_diameter >= outer {
                return Err(TrayError::dimension(
                    "flange_diameter",
                    dims.flange_diameter,
                    format!("must be smaller than outer_diameter ({outer})"),
                ));
            }
        }
        let usable = dims.width - 2.0 * dims.flange_thickness;
        if usable <= 0.0 {
            return Err(TrayError::dimension(
                "flange_thickness",
                dims.flange_thickness,
                format!("two flanges leave no usable height in width {}", dims.width),
            ));
        }

        Ok(Self { name, dims })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hub_radius(&self) -> f64 {
        self.dims.hub_diameter / 2.0
    }

    pub fn flange_radius(&self) -> f64 {
        self.dims.flange_diameter / 2.0
    }

    /// Distance between the inner faces of the two flanges.
    pub fn usable_height(&self) -> f64 {
        self.dims.width - 2.0 * self.dims.flange_thickness
    }

    pub fn clearance(&self) -> f64 {
        self.dims.clearance
    }

    /// Same spool printed with a different tolerance.
    pub fn with_clearance(&self, clearance: f64) -> Result<Self> {
        Self::new(self.name.clone(), self.dims.with_clearance(clearance))
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TrayError::dimension(field, value, "must be a positive number"));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TrayError::dimension(field, value, "must not be negative"));
    }
    Ok(())
}

/// Angular span of one wedge, in degrees.
///
/// Wedges are bounded by two half-spaces, so the span tops out at 180°.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeAngle(f64);

impl WedgeAngle {
    pub const MAX_DEGREES: f64 = 180.0;

    pub fn from_degrees(degrees: f64) -> Result<Self> {
        if !degrees.is_finite() || degrees <= 0.0 || degrees > Self::MAX_DEGREES {
            return Err(TrayError::dimension(
                "angle",
                degrees,
                format!("wedge span must be within (0, {}] degrees", Self::MAX_DEGREES),
            ));
        }
        Ok(Self(degrees))
    }

    /// Span of one of `count` equal wedges filling the ring.
    pub fn from_count(count: u32) -> Result<Self> {
        if count < 2 {
            return Err(TrayError::dimension(
                "wedges",
                f64::from(count),
                "a ring needs at least two wedges",
            ));
        }
        Self::from_degrees(360.0 / f64::from(count))
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// File-name friendly form: `60`, `22p5`.
    pub fn label(self) -> String {
        let rounded = (self.0 * 1000.0).round() / 1000.0;
        if rounded.fract() == 0.0 {
            format!("{}", rounded as i64)
        } else {
            format!("{rounded}").replace('.', "p")
        }
    }
}

impl fmt::Display for WedgeAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.label().replace('p', "."))
    }
}
