//! Rectangle shape.

use super::{box_connection_points, box_move_anchor, paint_outline};
use crate::element::{ConnectionPoint, ConnectionPointKind, Element, ElementId};
use crate::error::{DiagramResult, RenderResult};
use crate::geometry::{DisplayRect, Pt};
use crate::style::ShapeStyle;
use crate::surface::{Backdrop, Canvas};
use kurbo::{BezPath, Shape as KurboShape};
use uuid::Uuid;

/// An axis-aligned box.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub(crate) id: ElementId,
    rect: DisplayRect,
    /// Style properties.
    pub style: ShapeStyle,
    path: BezPath,
    background: Option<Backdrop>,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(rect: DisplayRect) -> Self {
        Self::with_style(rect, ShapeStyle::default())
    }

    /// Create a rectangle with a specific style.
    pub fn with_style(rect: DisplayRect, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            rect,
            style,
            path: rect.to_kurbo().to_path(0.1),
            background: None,
        }
    }

    /// Cached outline.
    pub fn path(&self) -> &BezPath {
        &self.path
    }
}

impl Element for Rectangle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn display_rect(&self) -> DisplayRect {
        self.rect
    }

    fn set_display_rect(&mut self, rect: DisplayRect) {
        self.rect = rect;
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn update_path(&mut self) {
        self.path = self.rect.to_kurbo().to_path(0.1);
    }

    fn draw(&self, canvas: &mut dyn Canvas) -> RenderResult<()> {
        paint_outline(canvas, &self.path, &self.style)
    }

    fn connection_points(&self) -> Vec<ConnectionPoint> {
        box_connection_points(self.rect)
    }

    fn move_anchor(&mut self, kind: ConnectionPointKind, target: Pt) -> DiagramResult<()> {
        box_move_anchor(self, kind, target)
    }

    fn background(&self) -> Option<&Backdrop> {
        self.background.as_ref()
    }

    fn background_mut(&mut self) -> &mut Option<Backdrop> {
        &mut self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Delta;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(DisplayRect::new(10, 20, 100, 50));
        assert_eq!(rect.display_rect(), DisplayRect::new(10, 20, 100, 50));
        assert!(rect.background().is_none());
    }

    #[test]
    fn test_update_path_follows_rect() {
        let mut rect = Rectangle::new(DisplayRect::new(0, 0, 100, 50));
        rect.move_by(Delta::new(10, 10));
        rect.update_path();
        let bbox = rect.path().bounding_box();
        assert!((bbox.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bbox.y1 - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_rect_includes_stroke() {
        let rect = Rectangle::new(DisplayRect::new(10, 10, 20, 20));
        assert_eq!(rect.update_rect(Delta::ZERO), DisplayRect::new(8, 8, 24, 24));
        assert_eq!(rect.update_rect(Delta::new(5, -5)), DisplayRect::new(3, 3, 34, 34));
    }

    #[test]
    fn test_connection_points() {
        let rect = Rectangle::new(DisplayRect::new(0, 0, 100, 50));
        let points = rect.connection_points();
        let right = points
            .iter()
            .find(|p| p.kind == ConnectionPointKind::Right)
            .unwrap();
        assert_eq!(right.position, Pt::new(100, 25));
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn test_hit_test() {
        let rect = Rectangle::new(DisplayRect::new(0, 0, 100, 100));
        assert!(rect.hit_test(Pt::new(50, 50)));
        assert!(!rect.hit_test(Pt::new(150, 50)));
    }
}
