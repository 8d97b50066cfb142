/// Axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True once no part of the rect is inside `bounds`
    pub fn is_off_screen(&self, bounds: &Rect) -> bool {
        self.right() <= bounds.x
            || self.x >= bounds.right()
            || self.bottom() <= bounds.y
            || self.y >= bounds.bottom()
    }
}

/// Bounding box overlap test. Edges that merely touch do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}
