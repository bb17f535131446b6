//! Connector shape (straight line with an optional arrowhead).

use super::paint_outline;
use crate::element::{ConnectionPoint, ConnectionPointKind, Element, ElementId};
use crate::error::{DiagramError, DiagramResult, RenderResult};
use crate::geometry::{Delta, DisplayRect, Pt};
use crate::style::ShapeStyle;
use crate::surface::{Backdrop, Canvas, Stroke};
use kurbo::{BezPath, Point, Vec2};
use uuid::Uuid;

/// A line between two anchors, usually attached to other elements.
#[derive(Debug, Clone)]
pub struct Connector {
    pub(crate) id: ElementId,
    start: Pt,
    end: Pt,
    /// Size of the arrowhead at the end anchor (0 = none).
    pub head_size: i32,
    /// Style properties.
    pub style: ShapeStyle,
    shaft: BezPath,
    head: BezPath,
    background: Option<Backdrop>,
}

impl Connector {
    /// Create a new connector with an arrowhead.
    pub fn new(start: Pt, end: Pt) -> Self {
        let mut connector = Self {
            id: Uuid::new_v4(),
            start,
            end,
            head_size: 12,
            style: ShapeStyle::default(),
            shaft: BezPath::new(),
            head: BezPath::new(),
            background: None,
        };
        connector.update_path();
        connector
    }

    /// Start anchor.
    pub fn start(&self) -> Pt {
        self.start
    }

    /// End anchor.
    pub fn end(&self) -> Pt {
        self.end
    }

    /// Unit direction from start to end.
    pub fn direction(&self) -> Vec2 {
        let dx = (self.end.x - self.start.x) as f64;
        let dy = (self.end.y - self.start.y) as f64;
        let len = (dx * dx + dy * dy).sqrt();
        if len < f64::EPSILON {
            Vec2::new(1.0, 0.0)
        } else {
            Vec2::new(dx / len, dy / len)
        }
    }

    fn arrow_head(&self) -> BezPath {
        let mut path = BezPath::new();
        if self.head_size <= 0 || self.start == self.end {
            return path;
        }
        let size = self.head_size as f64;
        let dir = self.direction();
        let perp = Vec2::new(-dir.y, dir.x);
        let tip = self.end.to_kurbo();
        let back = Point::new(tip.x - dir.x * size, tip.y - dir.y * size);
        path.move_to(tip);
        path.line_to(Point::new(
            back.x + perp.x * size * 0.5,
            back.y + perp.y * size * 0.5,
        ));
        path.line_to(Point::new(
            back.x - perp.x * size * 0.5,
            back.y - perp.y * size * 0.5,
        ));
        path.close_path();
        path
    }
}

/// Map a point from one rectangle into another, proportionally.
fn remap(p: Pt, from: DisplayRect, to: DisplayRect) -> Pt {
    let axis = |v: i32, from_start: i32, from_len: i32, to_start: i32, to_len: i32| {
        if from_len == 0 {
            to_start + (v - from_start)
        } else {
            to_start + ((v - from_start) as i64 * to_len as i64 / from_len as i64) as i32
        }
    };
    Pt::new(
        axis(p.x, from.x, from.width, to.x, to.width),
        axis(p.y, from.y, from.height, to.y, to.height),
    )
}

impl Element for Connector {
    fn id(&self) -> ElementId {
        self.id
    }

    fn display_rect(&self) -> DisplayRect {
        DisplayRect::from_corners(self.start, self.end)
    }

    fn set_display_rect(&mut self, rect: DisplayRect) {
        let current = self.display_rect();
        self.start = remap(self.start, current, rect);
        self.end = remap(self.end, current, rect);
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn update_path(&mut self) {
        let mut shaft = BezPath::new();
        shaft.move_to(self.start.to_kurbo());
        shaft.line_to(self.end.to_kurbo());
        self.shaft = shaft;
        self.head = self.arrow_head();
    }

    fn draw(&self, canvas: &mut dyn Canvas) -> RenderResult<()> {
        if self.style.stroke_width > 0.0 {
            canvas.stroke_path(
                &self.shaft,
                &Stroke {
                    color: self.style.stroke(),
                    width: self.style.stroke_width,
                    style: self.style.stroke_style,
                },
            )?;
        }
        if !self.head.elements().is_empty() {
            // Arrowheads are always solid.
            let mut head_style = self.style.clone();
            head_style.fill_color = Some(self.style.stroke_color);
            head_style.stroke_style = Default::default();
            paint_outline(canvas, &self.head, &head_style)?;
        }
        Ok(())
    }

    fn connection_points(&self) -> Vec<ConnectionPoint> {
        vec![
            ConnectionPoint::new(ConnectionPointKind::Start, self.start),
            ConnectionPoint::new(ConnectionPointKind::End, self.end),
        ]
    }

    fn move_anchor(&mut self, kind: ConnectionPointKind, target: Pt) -> DiagramResult<()> {
        match kind {
            ConnectionPointKind::Start => self.start = target,
            ConnectionPointKind::End => self.end = target,
            _ => {
                return Err(DiagramError::UnsupportedAnchor {
                    element: self.id,
                    kind,
                });
            }
        }
        self.update_path();
        Ok(())
    }

    fn background(&self) -> Option<&Backdrop> {
        self.background.as_ref()
    }

    fn background_mut(&mut self) -> &mut Option<Backdrop> {
        &mut self.background
    }

    fn update_rect(&self, delta: Delta) -> DisplayRect {
        // The arrowhead can reach past the anchor bounding box.
        let margin = self.style.stroke_margin() + self.head_size.max(0);
        self.display_rect().inflate(margin, margin).grow(delta)
    }

    fn move_by(&mut self, delta: Delta) {
        self.start = self.start.offset(delta);
        self.end = self.end.offset(delta);
    }

    fn hit_test(&self, point: Pt) -> bool {
        let a = self.start.to_kurbo();
        let b = self.end.to_kurbo();
        let p = point.to_kurbo();
        let seg = b - a;
        let pv = p - a;
        let len_sq = seg.hypot2();
        let tolerance = self.style.stroke_width / 2.0 + 3.0;
        if len_sq < f64::EPSILON {
            return pv.hypot() <= tolerance;
        }
        let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
        let projection = a + seg * t;
        (p - projection).hypot() <= tolerance
    }
}
