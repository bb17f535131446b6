//! Integer rectangle and point arithmetic used throughout the editor.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// A point in integer diagram coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pt {
    pub x: i32,
    pub y: i32,
}

impl Pt {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move the point by a delta.
    pub fn offset(self, delta: Delta) -> Self {
        Self::new(self.x + delta.dx, self.y + delta.dy)
    }

    /// Convert to a kurbo point.
    pub fn to_kurbo(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

impl Sub for Pt {
    type Output = Delta;

    fn sub(self, rhs: Pt) -> Delta {
        Delta::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A movement vector in integer diagram units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    /// No movement.
    pub const ZERO: Delta = Delta { dx: 0, dy: 0 };

    /// Create a new delta.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Component-wise absolute value.
    pub fn abs(self) -> Self {
        Self::new(self.dx.abs(), self.dy.abs())
    }

    /// Check if this delta moves nothing.
    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl Add for Delta {
    type Output = Delta;

    fn add(self, rhs: Delta) -> Delta {
        Delta::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Neg for Delta {
    type Output = Delta;

    fn neg(self) -> Delta {
        Delta::new(-self.dx, -self.dy)
    }
}

/// Position and size of an element in integer diagram coordinates.
///
/// The rectangle covers `x..x + width` horizontally and `y..y + height`
/// vertically; the right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DisplayRect {
    /// Create a new rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create the smallest rectangle spanning two corner points.
    pub fn from_corners(a: Pt, b: Pt) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner.
    pub fn origin(&self) -> Pt {
        Pt::new(self.x, self.y)
    }

    /// Center point, rounded towards the origin.
    pub fn center(&self) -> Pt {
        Pt::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// A rectangle with no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Translate the rectangle.
    pub fn offset(&self, delta: Delta) -> Self {
        Self::new(self.x + delta.dx, self.y + delta.dy, self.width, self.height)
    }

    /// Inflate by `dx` horizontally and `dy` vertically on every side.
    pub fn inflate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x - dx,
            self.y - dy,
            self.width + 2 * dx,
            self.height + 2 * dy,
        )
    }

    /// Grow on every side by the magnitude of a motion delta so the result
    /// covers the rectangle both before and after the motion.
    pub fn grow(&self, delta: Delta) -> Self {
        let d = delta.abs();
        self.inflate(d.dx, d.dy)
    }

    /// Strict overlap test. Rectangles that only share an edge do not
    /// intersect, and an empty rectangle intersects nothing.
    pub fn intersects(&self, other: &DisplayRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Overlapping area, if any.
    pub fn intersection(&self, other: &DisplayRect) -> Option<DisplayRect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &DisplayRect) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }

    /// Check if a point lies inside (right/bottom edges exclusive).
    pub fn contains(&self, point: Pt) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Convert to a kurbo rectangle for path construction.
    pub fn to_kurbo(&self) -> Rect {
        Rect::new(
            self.x as f64,
            self.y as f64,
            self.right() as f64,
            self.bottom() as f64,
        )
    }
}

/// Bounding box of a set of rectangles.
pub fn bounding_box<I>(rects: I) -> Option<DisplayRect>
where
    I: IntoIterator<Item = DisplayRect>,
{
    rects.into_iter().reduce(|acc, r| acc.union(&r))
}

/// Sort ids by their position in a z-ordered sequence (topmost first).
/// Ids without a position sort last.
pub fn sort_by_index<T, F>(items: &mut [T], index_of: F)
where
    F: Fn(&T) -> Option<usize>,
{
    items.sort_by_key(|item| index_of(item).unwrap_or(usize::MAX));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_covers_motion() {
        let rect = DisplayRect::new(10, 10, 20, 20);
        let grown = rect.grow(Delta::new(-5, 3));
        assert_eq!(grown, DisplayRect::new(5, 7, 30, 26));
        assert!(grown.union(&rect.offset(Delta::new(-5, 3))) == grown);
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = DisplayRect::new(0, 0, 10, 10);
        let touching = DisplayRect::new(10, 0, 10, 10);
        let overlapping = DisplayRect::new(9, 9, 10, 10);
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(a.intersects(&a));
    }

    #[test]
    fn test_empty_rect_intersects_nothing() {
        let empty = DisplayRect::new(5, 5, 0, 10);
        assert!(!empty.intersects(&DisplayRect::new(0, 0, 20, 20)));
    }

    #[test]
    fn test_intersection_area() {
        let a = DisplayRect::new(0, 0, 50, 50);
        let b = DisplayRect::new(40, 40, 50, 50);
        assert_eq!(a.intersection(&b), Some(DisplayRect::new(40, 40, 10, 10)));
    }

    #[test]
    fn test_bounding_box() {
        let rects = [
            DisplayRect::new(0, 0, 50, 50),
            DisplayRect::new(85, 85, 50, 50),
            DisplayRect::new(-10, 20, 5, 5),
        ];
        assert_eq!(bounding_box(rects), Some(DisplayRect::new(-10, 0, 145, 135)));
        assert_eq!(bounding_box(Vec::new()), None);
    }

    #[test]
    fn test_from_corners() {
        let rect = DisplayRect::from_corners(Pt::new(30, 5), Pt::new(10, 25));
        assert_eq!(rect, DisplayRect::new(10, 5, 20, 20));
    }

    #[test]
    fn test_sort_by_index() {
        let order = ['c', 'a', 'b'];
        let mut items = vec!['a', 'b', 'x', 'c'];
        sort_by_index(&mut items, |c| order.iter().position(|o| o == c));
        assert_eq!(items, vec!['c', 'a', 'b', 'x']);
    }
}
