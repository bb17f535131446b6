//! In-memory surface and instrumented element for unit tests.

use crate::element::{ConnectionPoint, ConnectionPointKind, Element, ElementId};
use crate::error::{DiagramError, DiagramResult, RenderError, RenderResult};
use crate::geometry::{Delta, DisplayRect, Pt};
use crate::style::ShapeStyle;
use crate::surface::{Backdrop, Bitmap, Canvas, Screen, Stroke};
use kurbo::{BezPath, Shape as KurboShape};
use peniko::Color;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// A surface call, with paths reduced to their pixel bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear,
    Fill(DisplayRect),
    Stroke(DisplayRect),
    Text(String, DisplayRect),
    Capture(DisplayRect),
    Restore(DisplayRect),
    Flush(DisplayRect),
}

pub type OpLog = Rc<RefCell<Vec<Op>>>;

fn path_rect(path: &BezPath) -> DisplayRect {
    let b = path.bounding_box();
    DisplayRect::new(
        b.x0.round() as i32,
        b.y0.round() as i32,
        (b.x1 - b.x0).round() as i32,
        (b.y1 - b.y0).round() as i32,
    )
}

fn blank(rect: DisplayRect) -> RenderResult<Backdrop> {
    let len = rect.width.max(0) as usize * rect.height.max(0) as usize * 4;
    Backdrop::new(rect, vec![0; len])
}

/// Records every call instead of rasterizing.
#[derive(Debug)]
pub struct RecordingScreen {
    bounds: DisplayRect,
    ops: Vec<Op>,
    invalidations: usize,
    bitmap_ops: OpLog,
    bitmap_sizes: Rc<RefCell<Vec<(u32, u32)>>>,
}

impl RecordingScreen {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            bounds: DisplayRect::new(0, 0, width, height),
            ops: Vec::new(),
            invalidations: 0,
            bitmap_ops: Rc::default(),
            bitmap_sizes: Rc::default(),
        }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub fn flushes(&self) -> Vec<DisplayRect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Flush(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations
    }

    /// Calls made on bitmaps this screen allocated.
    pub fn bitmap_ops(&self) -> Vec<Op> {
        self.bitmap_ops.borrow().clone()
    }

    pub fn bitmap_sizes(&self) -> Vec<(u32, u32)> {
        self.bitmap_sizes.borrow().clone()
    }
}

impl Canvas for RecordingScreen {
    fn bounds(&self) -> DisplayRect {
        self.bounds
    }

    fn clear(&mut self, _color: Color) {
        self.ops.push(Op::Clear);
    }

    fn fill_path(&mut self, path: &BezPath, _color: Color) -> RenderResult<()> {
        self.ops.push(Op::Fill(path_rect(path)));
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, _stroke: &Stroke) -> RenderResult<()> {
        self.ops.push(Op::Stroke(path_rect(path)));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        rect: DisplayRect,
        _size: f32,
        _color: Color,
    ) -> RenderResult<()> {
        self.ops.push(Op::Text(text.to_string(), rect));
        Ok(())
    }

    fn capture(&self, rect: DisplayRect) -> RenderResult<Backdrop> {
        blank(rect)
    }

    fn restore(&mut self, backdrop: &Backdrop) -> RenderResult<()> {
        self.ops.push(Op::Restore(backdrop.rect()));
        Ok(())
    }
}

impl Screen for RecordingScreen {
    fn flush(&mut self, rect: DisplayRect) -> RenderResult<()> {
        self.ops.push(Op::Flush(rect));
        Ok(())
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }

    fn create_bitmap(&self, width: u32, height: u32) -> RenderResult<Box<dyn Bitmap>> {
        self.bitmap_sizes.borrow_mut().push((width, height));
        Ok(Box::new(RecordingBitmap {
            width,
            height,
            ops: Rc::clone(&self.bitmap_ops),
        }))
    }
}

/// Off-screen counterpart of [`RecordingScreen`].
#[derive(Debug)]
pub struct RecordingBitmap {
    width: u32,
    height: u32,
    ops: OpLog,
}

impl Canvas for RecordingBitmap {
    fn bounds(&self) -> DisplayRect {
        DisplayRect::new(0, 0, self.width as i32, self.height as i32)
    }

    fn clear(&mut self, _color: Color) {
        self.ops.borrow_mut().push(Op::Clear);
    }

    fn fill_path(&mut self, path: &BezPath, _color: Color) -> RenderResult<()> {
        self.ops.borrow_mut().push(Op::Fill(path_rect(path)));
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, _stroke: &Stroke) -> RenderResult<()> {
        self.ops.borrow_mut().push(Op::Stroke(path_rect(path)));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        rect: DisplayRect,
        _size: f32,
        _color: Color,
    ) -> RenderResult<()> {
        self.ops
            .borrow_mut()
            .push(Op::Text(text.to_string(), rect));
        Ok(())
    }

    fn capture(&self, rect: DisplayRect) -> RenderResult<Backdrop> {
        blank(rect)
    }

    fn restore(&mut self, backdrop: &Backdrop) -> RenderResult<()> {
        self.ops.borrow_mut().push(Op::Restore(backdrop.rect()));
        Ok(())
    }
}

impl Bitmap for RecordingBitmap {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn encode_png(&self) -> RenderResult<Vec<u8>> {
        Ok(b"\x89PNG\r\n\x1a\n".to_vec())
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        self
    }
}

/// What a [`Tracer`] was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintEvent {
    Erase(ElementId),
    Draw(ElementId),
}

impl PaintEvent {
    pub fn log() -> Rc<RefCell<Vec<PaintEvent>>> {
        Rc::default()
    }
}

/// Box element that logs its erase/draw calls.
#[derive(Debug)]
pub struct Tracer {
    id: ElementId,
    rect: DisplayRect,
    style: ShapeStyle,
    background: Option<Backdrop>,
    log: Rc<RefCell<Vec<PaintEvent>>>,
    points: Vec<ConnectionPointKind>,
    fail_draw: bool,
}

impl Tracer {
    pub fn new(rect: DisplayRect, log: &Rc<RefCell<Vec<PaintEvent>>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            rect,
            style: ShapeStyle::default(),
            background: None,
            log: Rc::clone(log),
            points: vec![ConnectionPointKind::Right, ConnectionPointKind::Left],
            fail_draw: false,
        }
    }

    /// Advertise these connection point kinds (duplicates allowed).
    pub fn with_points(mut self, points: Vec<ConnectionPointKind>) -> Self {
        self.points = points;
        self
    }

    pub fn failing_draw(mut self) -> Self {
        self.fail_draw = true;
        self
    }
}

impl Element for Tracer {
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

    fn update_path(&mut self) {}

    fn draw(&self, canvas: &mut dyn Canvas) -> RenderResult<()> {
        self.log.borrow_mut().push(PaintEvent::Draw(self.id));
        if self.fail_draw {
            return Err(RenderError::Encode("tracer draw failure".into()));
        }
        canvas.fill_path(&self.rect.to_kurbo().to_path(0.1), Color::from_rgba8(0, 0, 0, 255))
    }

    fn connection_points(&self) -> Vec<ConnectionPoint> {
        let center = self.rect.center();
        self.points
            .iter()
            .map(|&kind| {
                let position = match kind {
                    ConnectionPointKind::Right => Pt::new(self.rect.right(), center.y),
                    ConnectionPointKind::Left => Pt::new(self.rect.x, center.y),
                    _ => center,
                };
                ConnectionPoint::new(kind, position)
            })
            .collect()
    }

    fn move_anchor(&mut self, kind: ConnectionPointKind, target: Pt) -> DiagramResult<()> {
        let point = self
            .connection_points()
            .into_iter()
            .find(|p| p.kind == kind)
            .ok_or(DiagramError::UnsupportedAnchor {
                element: self.id,
                kind,
            })?;
        self.move_by(target - point.position);
        Ok(())
    }

    fn background(&self) -> Option<&Backdrop> {
        self.background.as_ref()
    }

    fn background_mut(&mut self) -> &mut Option<Backdrop> {
        &mut self.background
    }

    fn erase(&mut self, canvas: &mut dyn Canvas) -> RenderResult<()> {
        self.log.borrow_mut().push(PaintEvent::Erase(self.id));
        match &self.background {
            Some(backdrop) => canvas.restore(backdrop),
            None => Ok(()),
        }
    }

    fn update_rect(&self, delta: Delta) -> DisplayRect {
        self.rect.grow(delta)
    }
}
