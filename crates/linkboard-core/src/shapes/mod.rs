//! Concrete element variants.

mod connector;
mod ellipse;
mod rectangle;

pub use connector::Connector;
pub use ellipse::Ellipse;
pub use rectangle::Rectangle;

use crate::element::{ConnectionPoint, ConnectionPointKind, Element, ElementId};
use crate::error::{DiagramError, DiagramResult, RenderResult};
use crate::geometry::{Delta, DisplayRect, Pt};
use crate::style::ShapeStyle;
use crate::surface::{Backdrop, Canvas, Stroke};
use kurbo::BezPath;

/// Enum wrapper for the built-in element types.
#[derive(Debug, Clone)]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Connector(Connector),
}

impl Shape {
    /// Box this shape for insertion into an editor.
    pub fn boxed(self) -> Box<dyn Element> {
        Box::new(self)
    }

    fn inner(&self) -> &dyn Element {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Connector(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Element {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Connector(s) => s,
        }
    }

    /// Check if this shape is a connector.
    pub fn is_connector(&self) -> bool {
        matches!(self, Shape::Connector(_))
    }
}

impl From<Rectangle> for Shape {
    fn from(shape: Rectangle) -> Self {
        Shape::Rectangle(shape)
    }
}

impl From<Ellipse> for Shape {
    fn from(shape: Ellipse) -> Self {
        Shape::Ellipse(shape)
    }
}

impl From<Connector> for Shape {
    fn from(shape: Connector) -> Self {
        Shape::Connector(shape)
    }
}

impl Element for Shape {
    fn id(&self) -> ElementId {
        self.inner().id()
    }

    fn display_rect(&self) -> DisplayRect {
        self.inner().display_rect()
    }

    fn set_display_rect(&mut self, rect: DisplayRect) {
        self.inner_mut().set_display_rect(rect)
    }

    fn style(&self) -> &ShapeStyle {
        self.inner().style()
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        self.inner_mut().style_mut()
    }

    fn update_path(&mut self) {
        self.inner_mut().update_path()
    }

    fn draw(&self, canvas: &mut dyn Canvas) -> RenderResult<()> {
        self.inner().draw(canvas)
    }

    fn connection_points(&self) -> Vec<ConnectionPoint> {
        self.inner().connection_points()
    }

    fn move_anchor(&mut self, kind: ConnectionPointKind, target: Pt) -> DiagramResult<()> {
        self.inner_mut().move_anchor(kind, target)
    }

    fn background(&self) -> Option<&Backdrop> {
        self.inner().background()
    }

    fn background_mut(&mut self) -> &mut Option<Backdrop> {
        self.inner_mut().background_mut()
    }

    fn update_rect(&self, delta: Delta) -> DisplayRect {
        self.inner().update_rect(delta)
    }

    fn move_by(&mut self, delta: Delta) {
        self.inner_mut().move_by(delta)
    }

    fn hit_test(&self, point: Pt) -> bool {
        self.inner().hit_test(point)
    }
}

/// Connection points shared by box-like shapes: edge midpoints and center.
fn box_connection_points(rect: DisplayRect) -> Vec<ConnectionPoint> {
    let center = rect.center();
    vec![
        ConnectionPoint::new(ConnectionPointKind::Top, Pt::new(center.x, rect.y)),
        ConnectionPoint::new(ConnectionPointKind::Right, Pt::new(rect.right(), center.y)),
        ConnectionPoint::new(ConnectionPointKind::Bottom, Pt::new(center.x, rect.bottom())),
        ConnectionPoint::new(ConnectionPointKind::Left, Pt::new(rect.x, center.y)),
        ConnectionPoint::new(ConnectionPointKind::Center, center),
    ]
}

/// Box-like shapes follow an anchor by translating the whole shape.
fn box_move_anchor(
    element: &mut dyn Element,
    kind: ConnectionPointKind,
    target: Pt,
) -> DiagramResult<()> {
    let point = element
        .connection_points()
        .into_iter()
        .find(|p| p.kind == kind)
        .ok_or(DiagramError::UnsupportedAnchor {
            element: element.id(),
            kind,
        })?;
    element.move_by(target - point.position);
    element.update_path();
    Ok(())
}

/// Fill then outline a closed path.
fn paint_outline(canvas: &mut dyn Canvas, path: &BezPath, style: &ShapeStyle) -> RenderResult<()> {
    if let Some(fill) = style.fill() {
        canvas.fill_path(path, fill)?;
    }
    if style.stroke_width > 0.0 {
        canvas.stroke_path(
            path,
            &Stroke {
                color: style.stroke(),
                width: style.stroke_width,
                style: style.stroke_style,
            },
        )?;
    }
    Ok(())
}
