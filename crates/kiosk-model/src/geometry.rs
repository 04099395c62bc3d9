//! Screen-space geometry for widgets and the cursor.
//!
//! All coordinates are in pixels of the kiosk surface, `(0, 0)` top-left.

use serde::{Deserialize, Serialize};

/// A 2D pixel-space point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle: a widget's hit region or a draw target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// A rectangle of the given size horizontally centered in `container_w`.
    pub fn centered_h(container_w: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new((container_w - w) / 2.0, y, w, h)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// The center point of this rectangle.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Point-in-rectangle test. Edges count as inside.
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Shrink by `padding` on every side (never below zero size).
    pub fn inset(&self, padding: f64) -> Rect {
        Rect {
            x: self.x + padding,
            y: self.y + padding,
            w: (self.w - 2.0 * padding).max(0.0),
            h: (self.h - 2.0 * padding).max(0.0),
        }
    }

    /// Move by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_includes_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Point2D::new(10.0, 20.0)));
        assert!(r.contains(Point2D::new(110.0, 70.0)));
        assert!(r.contains(Point2D::new(60.0, 45.0)));
        assert!(!r.contains(Point2D::new(9.9, 45.0)));
        assert!(!r.contains(Point2D::new(60.0, 70.1)));
    }

    #[test]
    fn test_centered_h() {
        let r = Rect::centered_h(1280.0, 410.0, 300.0, 60.0);
        assert_eq!(r.x, 490.0);
        assert_eq!(r.center().x, 640.0);
    }

    #[test]
    fn test_inset_never_negative() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset(8.0);
        assert_eq!(r.w, 0.0);
        assert_eq!(r.h, 0.0);
    }

    #[test]
    fn test_translate_keeps_size() {
        let r = Rect::new(0.0, 0.0, 200.0, 40.0);
        assert_eq!(r.translate(5.0, -5.0), Rect::new(5.0, -5.0, 200.0, 40.0));
    }
}
