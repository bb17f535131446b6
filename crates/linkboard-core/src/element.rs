//! The capability contract every drawable element fulfils.
//!
//! The editor only ever sees `dyn Element`. Concrete variants live in
//! [`crate::shapes`], but hosts may bring their own.

use crate::error::{DiagramResult, RenderResult};
use crate::geometry::{Delta, DisplayRect, Pt};
use crate::style::ShapeStyle;
use crate::surface::{Backdrop, Canvas};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Named attachment location on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionPointKind {
    Top,
    Right,
    Bottom,
    Left,
    Center,
    /// First endpoint of a connector.
    Start,
    /// Last endpoint of a connector.
    End,
}

/// A connection point with its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionPoint {
    pub kind: ConnectionPointKind,
    pub position: Pt,
}

impl ConnectionPoint {
    pub fn new(kind: ConnectionPointKind, position: Pt) -> Self {
        Self { kind, position }
    }
}

/// A drawable, movable diagram element.
pub trait Element: fmt::Debug {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Logical position and size.
    fn display_rect(&self) -> DisplayRect;

    /// Replace the logical position and size. Does not recompute the path.
    fn set_display_rect(&mut self, rect: DisplayRect);

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Recompute the cached outline after a geometry change.
    fn update_path(&mut self);

    /// Paint the outline and fill.
    fn draw(&self, canvas: &mut dyn Canvas) -> RenderResult<()>;

    /// Current connection points.
    fn connection_points(&self) -> Vec<ConnectionPoint>;

    /// Move the anchor identified by `kind` so it sits on `target`.
    fn move_anchor(&mut self, kind: ConnectionPointKind, target: Pt) -> DiagramResult<()>;

    /// Pixels saved from under the element when it was last drawn.
    fn background(&self) -> Option<&Backdrop>;

    /// Storage for [`Element::background`].
    fn background_mut(&mut self) -> &mut Option<Backdrop>;

    /// On-screen extent, grown to cover an in-flight motion of `delta`.
    fn update_rect(&self, delta: Delta) -> DisplayRect {
        let margin = self.style().stroke_margin();
        self.display_rect().inflate(margin, margin).grow(delta)
    }

    /// Whether any part of the element (including motion) is visible.
    fn on_screen(&self, delta: Delta, viewport: DisplayRect) -> bool {
        self.update_rect(delta).intersects(&viewport)
    }

    /// Translate the logical position.
    fn move_by(&mut self, delta: Delta) {
        let rect = self.display_rect().offset(delta);
        self.set_display_rect(rect);
    }

    /// Paint the label, if any.
    fn draw_text(&self, canvas: &mut dyn Canvas) -> RenderResult<()> {
        let style = self.style();
        match &style.label {
            Some(label) if !label.is_empty() => canvas.draw_text(
                label,
                self.display_rect(),
                style.font_size,
                style.text_color.into(),
            ),
            _ => Ok(()),
        }
    }

    /// Restore the pixels that were under the element.
    fn erase(&mut self, canvas: &mut dyn Canvas) -> RenderResult<()> {
        match self.background() {
            Some(backdrop) => canvas.restore(backdrop),
            None => Ok(()),
        }
    }

    /// Save the pixels under the element before it is drawn.
    fn capture_background(&mut self, canvas: &dyn Canvas) -> RenderResult<()> {
        let backdrop = canvas.capture(self.update_rect(Delta::ZERO))?;
        *self.background_mut() = Some(backdrop);
        Ok(())
    }

    /// Drop the saved background.
    fn cancel_background(&mut self) {
        *self.background_mut() = None;
    }

    /// Check if a point hits this element.
    fn hit_test(&self, point: Pt) -> bool {
        self.display_rect().contains(point)
    }
}
