//! Geometry primitives and the rounded-rectangle hit test

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: `[x, x+width) × [y, y+height)`.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let (px, py) = (px as i64, py as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && px < x + self.width as i64 && py >= y && py < y + self.height as i64
    }

    /// Largest radius whose corner arcs do not overlap.
    pub fn max_radius(&self) -> u32 {
        self.width.min(self.height) / 2
    }
}

/// Is `(x, y)` inside the rectangle at `(left, top)` of the given extent with
/// corners rounded by `radius`?
///
/// Hard-edged: corner pixels are tested against the arc circle with no
/// coverage estimate. `radius == 0` is a plain rectangle test. A radius larger
/// than half the shorter side is not rejected; arc centers are clamped to the
/// rectangle's midlines.
pub fn inside(x: i32, y: i32, left: i32, top: i32, width: u32, height: u32, radius: u32) -> bool {
    if !Rect::new(left, top, width, height).contains(x, y) {
        return false;
    }

    let (x, y) = (x as i64, y as i64);
    let (left, top) = (left as i64, top as i64);
    let right = left + width as i64 - 1;
    let bottom = top + height as i64 - 1;
    let r = radius as i64;

    // Arc centers may not cross the midlines
    let inner_left = (left + r).min(left + (width as i64 - 1) / 2);
    let inner_right = (right - r).max(right - (width as i64 - 1) / 2);
    let inner_top = (top + r).min(top + (height as i64 - 1) / 2);
    let inner_bottom = (bottom - r).max(bottom - (height as i64 - 1) / 2);

    // Plus-shaped core
    if (x >= inner_left && x <= inner_right) || (y >= inner_top && y <= inner_bottom) {
        return true;
    }

    let cx = if x < inner_left { inner_left } else { inner_right };
    let cy = if y < inner_top { inner_top } else { inner_bottom };
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= r * r
}
