//! Collision helpers shared by the entities
//!
//! Two kinds of contact exist in Extinguished:
//! - a circle against the rectangular world edge (velocity reflection + clamp)
//! - sprite against sprite, tested on their pixel masks

use glam::{IVec2, Vec2};

use crate::gfx::{Mask, Rect};

/// Which world edges a circle was pushed back from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl EdgeHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Keep a circle inside `[0, bounds]`
///
/// Each edge is checked on its own: crossing it inverts that axis of the
/// velocity and places the circle exactly tangent to the edge. A corner can
/// therefore flip both axes in one call.
pub fn bounce_off_bounds(pos: &mut Vec2, vel: &mut Vec2, radius: f32, bounds: Vec2) -> EdgeHits {
    let mut hits = EdgeHits::default();
    if pos.x - radius < 0.0 {
        vel.x = -vel.x;
        pos.x = radius;
        hits.left = true;
    }
    if pos.x + radius > bounds.x {
        vel.x = -vel.x;
        pos.x = bounds.x - radius;
        hits.right = true;
    }
    if pos.y - radius < 0.0 {
        vel.y = -vel.y;
        pos.y = radius;
        hits.top = true;
    }
    if pos.y + radius > bounds.y {
        vel.y = -vel.y;
        pos.y = bounds.y - radius;
        hits.bottom = true;
    }
    hits
}

/// Test two placed masks for overlap
///
/// Returns the first overlapping pixel in `a`'s local coordinates.
pub fn sprites_overlap(a_rect: &Rect, a_mask: &Mask, b_rect: &Rect, b_mask: &Mask) -> Option<IVec2> {
    let offset = b_rect.top_left() - a_rect.top_left();
    a_mask.overlap(b_mask, offset)
}
