//! Off-screen export surface.

use crate::raster::Raster;
use kurbo::BezPath;
use linkboard_core::error::RenderResult;
use linkboard_core::surface::{Backdrop, Bitmap, Canvas, Stroke};
use linkboard_core::DisplayRect;
use peniko::Color;

/// A standalone raster that can be written out as PNG.
#[derive(Debug, Clone)]
pub struct RasterBitmap {
    raster: Raster,
}

impl RasterBitmap {
    /// Allocate a transparent bitmap.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Ok(Self {
            raster: Raster::new(width, height)?,
        })
    }
}

impl Canvas for RasterBitmap {
    fn bounds(&self) -> DisplayRect {
        self.raster.bounds()
    }

    fn clear(&mut self, color: Color) {
        self.raster.clear(color);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) -> RenderResult<()> {
        self.raster.fill_path(path, color)
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke) -> RenderResult<()> {
        self.raster.stroke_path(path, stroke)
    }

    fn draw_text(
        &mut self,
        text: &str,
        rect: DisplayRect,
        size: f32,
        color: Color,
    ) -> RenderResult<()> {
        self.raster.draw_text(text, rect, size, color)
    }

    fn capture(&self, rect: DisplayRect) -> RenderResult<Backdrop> {
        self.raster.capture(rect)
    }

    fn restore(&mut self, backdrop: &Backdrop) -> RenderResult<()> {
        self.raster.restore(backdrop)
    }
}

impl Bitmap for RasterBitmap {
    fn size(&self) -> (u32, u32) {
        (self.raster.width(), self.raster.height())
    }

    fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.raster.encode_png()
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        self
    }
}
