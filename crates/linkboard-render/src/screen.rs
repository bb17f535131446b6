//! Double-buffered live surface.

use crate::bitmap::RasterBitmap;
use crate::raster::Raster;
use kurbo::BezPath;
use linkboard_core::error::RenderResult;
use linkboard_core::surface::{Backdrop, Bitmap, Canvas, Screen, Stroke};
use linkboard_core::DisplayRect;
use peniko::Color;

/// The on-screen canvas.
///
/// Elements paint into a back buffer; `flush` copies regions of it into the
/// front buffer, which is what the host presents.
#[derive(Debug, Clone)]
pub struct RasterScreen {
    back: Raster,
    front: Raster,
    background: Color,
    invalidated: bool,
}

impl RasterScreen {
    /// Create a screen cleared to `background`.
    pub fn new(width: u32, height: u32, background: Color) -> RenderResult<Self> {
        let mut back = Raster::new(width, height)?;
        back.clear(background);
        let front = back.clone();
        Ok(Self {
            back,
            front,
            background,
            invalidated: false,
        })
    }

    /// Buffer elements paint into.
    pub fn back(&self) -> &Raster {
        &self.back
    }

    /// Buffer last pushed to the display.
    pub fn front(&self) -> &Raster {
        &self.front
    }

    /// Color the canvas shows where no element is.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Return and reset the pending full-repaint request.
    ///
    /// A host that honours it clears the canvas with [`Self::reset`] and then
    /// calls `Editor::repaint`.
    pub fn take_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    /// Clear both buffers to the background color.
    pub fn reset(&mut self) {
        self.back.clear(self.background);
        self.front.clear(self.background);
    }

    /// Resize, discarding all content.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        *self = Self::new(width, height, self.background)?;
        self.invalidated = true;
        Ok(())
    }

    /// Encode what the display currently shows.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.front.encode_png()
    }
}

impl Canvas for RasterScreen {
    fn bounds(&self) -> DisplayRect {
        self.back.bounds()
    }

    fn clear(&mut self, color: Color) {
        self.back.clear(color);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) -> RenderResult<()> {
        self.back.fill_path(path, color)
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke) -> RenderResult<()> {
        self.back.stroke_path(path, stroke)
    }

    fn draw_text(
        &mut self,
        text: &str,
        rect: DisplayRect,
        size: f32,
        color: Color,
    ) -> RenderResult<()> {
        self.back.draw_text(text, rect, size, color)
    }

    fn capture(&self, rect: DisplayRect) -> RenderResult<Backdrop> {
        self.back.capture(rect)
    }

    fn restore(&mut self, backdrop: &Backdrop) -> RenderResult<()> {
        self.back.restore(backdrop)
    }
}

impl Screen for RasterScreen {
    fn flush(&mut self, rect: DisplayRect) -> RenderResult<()> {
        log::trace!("Flush {:?}", rect);
        self.front.copy_from(&self.back, rect);
        Ok(())
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
    }

    fn create_bitmap(&self, width: u32, height: u32) -> RenderResult<Box<dyn Bitmap>> {
        Ok(Box::new(RasterBitmap::new(width, height)?))
    }
}
