//! Drawing surface contracts.
//!
//! The editor never touches pixels itself. Elements paint through a
//! [`Canvas`]; the live display is a [`Screen`], which can also allocate
//! off-screen [`Bitmap`]s for export.

use crate::error::{RenderError, RenderResult};
use crate::geometry::DisplayRect;
use crate::style::StrokeStyle;
use kurbo::BezPath;
use peniko::Color;
use std::path::Path;

/// A saved copy of the pixels under a rectangle.
///
/// Pixels are RGBA8, premultiplied, row-major, `rect.width * 4` bytes per row.
/// Regions outside the canvas are stored as transparent pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backdrop {
    rect: DisplayRect,
    pixels: Vec<u8>,
}

impl Backdrop {
    /// Wrap captured pixels. Fails if the buffer length does not match the rectangle.
    pub fn new(rect: DisplayRect, pixels: Vec<u8>) -> RenderResult<Self> {
        let expected = rect.width.max(0) as usize * rect.height.max(0) as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::Backdrop(format!(
                "{} bytes for a {}x{} region, expected {}",
                pixels.len(),
                rect.width,
                rect.height,
                expected
            )));
        }
        Ok(Self { rect, pixels })
    }

    /// Region the pixels were captured from.
    pub fn rect(&self) -> DisplayRect {
        self.rect
    }

    /// Raw pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Stroke parameters for path outlines.
#[derive(Debug, Clone, Copy)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub style: StrokeStyle,
}

/// Anti-aliased drawing target.
pub trait Canvas {
    /// Pixel extent of the canvas in diagram coordinates.
    fn bounds(&self) -> DisplayRect;

    /// Fill the whole canvas with a color.
    fn clear(&mut self, color: Color);

    /// Fill a closed path.
    fn fill_path(&mut self, path: &BezPath, color: Color) -> RenderResult<()>;

    /// Outline a path.
    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke) -> RenderResult<()>;

    /// Draw a single line of text centered in `rect` and clipped to it.
    fn draw_text(&mut self, text: &str, rect: DisplayRect, size: f32, color: Color)
    -> RenderResult<()>;

    /// Copy the pixels under `rect`.
    fn capture(&self, rect: DisplayRect) -> RenderResult<Backdrop>;

    /// Put previously captured pixels back.
    fn restore(&mut self, backdrop: &Backdrop) -> RenderResult<()>;
}

/// The live, on-screen drawing surface.
pub trait Screen: Canvas {
    /// Push a region of the drawing buffer to the physical display.
    fn flush(&mut self, rect: DisplayRect) -> RenderResult<()>;

    /// Request a full repaint of the canvas by the host.
    fn invalidate(&mut self);

    /// Allocate an off-screen bitmap.
    fn create_bitmap(&self, width: u32, height: u32) -> RenderResult<Box<dyn Bitmap>>;
}

/// An off-screen surface that can be persisted.
pub trait Bitmap: Canvas {
    /// Size in pixels.
    fn size(&self) -> (u32, u32);

    /// Encode as PNG.
    fn encode_png(&self) -> RenderResult<Vec<u8>>;

    /// The bitmap as a plain drawing target.
    fn canvas(&mut self) -> &mut dyn Canvas;

    /// Write the bitmap to a PNG file.
    fn save_png(&self, path: &Path) -> RenderResult<()> {
        let data = self.encode_png()?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
