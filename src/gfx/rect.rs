//! Integer rectangles

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size whose center is `center`
    ///
    /// The center is rounded to the nearest pixel first, then the top-left
    /// corner is offset by half the (integer) size.
    pub fn from_center(center: Vec2, size: IVec2) -> Self {
        let c = center.round().as_ivec2();
        Self::new(c.x - size.x / 2, c.y - size.y / 2, size.x, size.y)
    }

    #[inline]
    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.w, self.h)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Whether the two rectangles share at least one pixel
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Overlapping region, if any
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, right - x, bottom - y))
    }
}
