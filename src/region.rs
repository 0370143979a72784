//! Grid rectangles and the accumulated repaint area.

/// Axis-aligned rectangle in grid cells. `x + width` and `y + height` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `2 * reach + 1` centered on a cell, grown by `margin` on every side.
    pub fn around(cx: i32, cy: i32, reach: i32, margin: i32) -> Self {
        let r = reach + margin;
        Self::new(cx - r, cy - r, 2 * r + 1, 2 * r + 1)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }

    /// Overlap with `[0, width) x [0, height)`, or None if they do not meet.
    pub fn clip(&self, width: usize, height: usize) -> Option<Rect> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(width as i32);
        let y1 = self.bottom().min(height as i32);
        let clipped = Rect::new(x0, y0, x1 - x0, y1 - y0);
        (!clipped.is_empty()).then_some(clipped)
    }
}

/// Union of everything touched since the last repaint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyRegion {
    rect: Option<Rect>,
}

impl DirtyRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grow(&mut self, rect: Rect) {
        self.rect = Some(match self.rect {
            Some(current) => current.union(&rect),
            None => rect,
        });
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn is_clean(&self) -> bool {
        self.rect.is_none()
    }

    /// Hand out the accumulated area and start over.
    pub fn take(&mut self) -> Option<Rect> {
        self.rect.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_around_with_margin() {
        let r = Rect::around(5, 5, 2, 1);
        assert_eq!(r, Rect::new(2, 2, 7, 7));
        assert!(r.contains(8, 8));
        assert!(!r.contains(9, 8));
    }

    #[test]
    fn test_dirty_region_accumulates() {
        let mut dirty = DirtyRegion::new();
        assert!(dirty.is_clean());
        dirty.grow(Rect::new(0, 0, 2, 2));
        dirty.grow(Rect::new(5, -3, 1, 1));
        assert_eq!(dirty.rect(), Some(Rect::new(0, -3, 6, 5)));
        assert_eq!(dirty.take(), Some(Rect::new(0, -3, 6, 5)));
        assert!(dirty.is_clean());
    }

    #[test]
    fn test_clip() {
        let r = Rect::new(-3, 8, 6, 6);
        assert_eq!(r.clip(10, 10), Some(Rect::new(0, 8, 3, 2)));
        assert_eq!(Rect::new(12, 0, 3, 3).clip(10, 10), None);
    }
}
