//! Placeholder — a base without rails or fence.
//!
//! Fills the ring where no tray sits so the linked segments still close
//! around the hub.

use vcad::Part;

use crate::base::ring_segment;
use crate::tray_spec::TraySpec;

pub fn build(spec: &TraySpec) -> Part {
    ring_segment(spec)
}
