//! Ellipse shape.

use super::{box_connection_points, box_move_anchor, paint_outline};
use crate::element::{ConnectionPoint, ConnectionPointKind, Element, ElementId};
use crate::error::{DiagramResult, RenderResult};
use crate::geometry::{DisplayRect, Pt};
use crate::style::ShapeStyle;
use crate::surface::{Backdrop, Canvas};
use kurbo::{BezPath, Ellipse as KurboEllipse, Shape as KurboShape};
use uuid::Uuid;

/// An ellipse inscribed in its display rectangle.
#[derive(Debug, Clone)]
pub struct Ellipse {
    pub(crate) id: ElementId,
    rect: DisplayRect,
    /// Style properties.
    pub style: ShapeStyle,
    path: BezPath,
    background: Option<Backdrop>,
}

impl Ellipse {
    /// Create a new ellipse filling `rect`.
    pub fn new(rect: DisplayRect) -> Self {
        Self::with_style(rect, ShapeStyle::default())
    }

    /// Create an ellipse with a specific style.
    pub fn with_style(rect: DisplayRect, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            rect,
            style,
            path: outline(rect),
            background: None,
        }
    }

    /// Create a circle.
    pub fn circle(center: Pt, radius: i32) -> Self {
        Self::new(DisplayRect::new(
            center.x - radius,
            center.y - radius,
            radius * 2,
            radius * 2,
        ))
    }

    /// Cached outline.
    pub fn path(&self) -> &BezPath {
        &self.path
    }
}

fn outline(rect: DisplayRect) -> BezPath {
    KurboEllipse::from_rect(rect.to_kurbo()).to_path(0.1)
}

impl Element for Ellipse {
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
        self.path = outline(self.rect);
    }

    fn draw(&self, canvas: &mut dyn Canvas) -> RenderResult<()> {
        paint_outline(canvas, &self.path, &self.style)
    }

    fn connection_points(&self) -> Vec<ConnectionPoint> {
        // The extremes of an inscribed ellipse are the edge midpoints.
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

    fn hit_test(&self, point: Pt) -> bool {
        let rx = self.rect.width as f64 / 2.0;
        let ry = self.rect.height as f64 / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let cx = self.rect.x as f64 + rx;
        let cy = self.rect.y as f64 + ry;
        let dx = (point.x as f64 - cx) / rx;
        let dy = (point.y as f64 - cy) / ry;
        dx * dx + dy * dy <= 1.0
    }
}
