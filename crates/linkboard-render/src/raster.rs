//! Anti-aliased software painter over a `tiny_skia` pixmap.

use crate::text;
use kurbo::{BezPath, PathEl};
use linkboard_core::error::{RenderError, RenderResult};
use linkboard_core::surface::{Backdrop, Canvas, Stroke};
use linkboard_core::DisplayRect;
use peniko::Color;
use tiny_skia as sk;

/// Convert a kurbo path into a tiny-skia path. Empty paths yield `None`.
pub fn to_skia_path(path: &BezPath) -> Option<sk::Path> {
    let mut pb = sk::PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Convert a peniko color into a tiny-skia color.
pub fn to_skia_color(color: Color) -> sk::Color {
    let rgba = color.to_rgba8();
    sk::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn paint_for(color: Color) -> sk::Paint<'static> {
    let mut paint = sk::Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

/// A pixmap that fulfils the [`Canvas`] contract. Diagram coordinates map
/// one-to-one onto pixels.
#[derive(Debug, Clone)]
pub struct Raster {
    pixmap: sk::Pixmap,
}

impl Raster {
    /// Allocate a transparent raster.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap =
            sk::Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Underlying pixmap.
    pub fn pixmap(&self) -> &sk::Pixmap {
        &self.pixmap
    }

    /// Non-premultiplied color of one pixel, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::from_rgba8(px.red(), px.green(), px.blue(), px.alpha()))
    }

    /// Copy `rect` (clipped to both rasters) from `source` into this raster.
    pub fn copy_from(&mut self, source: &Raster, rect: DisplayRect) {
        let Some(area) = rect.intersection(&self.bounds()) else {
            return;
        };
        let Some(area) = area.intersection(&source.bounds()) else {
            return;
        };
        let row_bytes = area.width as usize * 4;
        for y in area.y..area.bottom() {
            let dst = row_offset(self.width(), area.x, y);
            let src = row_offset(source.width(), area.x, y);
            self.pixmap.data_mut()[dst..dst + row_bytes]
                .copy_from_slice(&source.pixmap.data()[src..src + row_bytes]);
        }
    }

    /// Encode as non-premultiplied RGBA8 PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let mut rgba = Vec::with_capacity(self.pixmap.data().len());
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| RenderError::Encode(e.to_string()))?;
            writer
                .write_image_data(&rgba)
                .map_err(|e| RenderError::Encode(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| RenderError::Encode(e.to_string()))?;
        }
        Ok(png_data)
    }
}

fn row_offset(width: u32, x: i32, y: i32) -> usize {
    (y as usize * width as usize + x as usize) * 4
}

impl Canvas for Raster {
    fn bounds(&self) -> DisplayRect {
        DisplayRect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    fn clear(&mut self, color: Color) {
        self.pixmap.fill(to_skia_color(color));
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) -> RenderResult<()> {
        if let Some(path) = to_skia_path(path) {
            self.pixmap.fill_path(
                &path,
                &paint_for(color),
                sk::FillRule::Winding,
                sk::Transform::identity(),
                None,
            );
        }
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke) -> RenderResult<()> {
        let Some(path) = to_skia_path(path) else {
            return Ok(());
        };
        let dash = stroke
            .style
            .dash_pattern(stroke.width)
            .and_then(|[on, off]| sk::StrokeDash::new(vec![on as f32, off as f32], 0.0));
        let sk_stroke = sk::Stroke {
            width: stroke.width as f32,
            line_cap: sk::LineCap::Round,
            line_join: sk::LineJoin::Round,
            dash,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint_for(stroke.color),
            &sk_stroke,
            sk::Transform::identity(),
            None,
        );
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        rect: DisplayRect,
        size: f32,
        color: Color,
    ) -> RenderResult<()> {
        text::draw_centered(&mut self.pixmap, text, rect, size, color);
        Ok(())
    }

    fn capture(&self, rect: DisplayRect) -> RenderResult<Backdrop> {
        let width = rect.width.max(0) as usize;
        let height = rect.height.max(0) as usize;
        let mut pixels = vec![0u8; width * height * 4];

        if let Some(area) = rect.intersection(&self.bounds()) {
            let row_bytes = area.width as usize * 4;
            let data = self.pixmap.data();
            for y in area.y..area.bottom() {
                let src = row_offset(self.width(), area.x, y);
                let dst = ((y - rect.y) as usize * width + (area.x - rect.x) as usize) * 4;
                pixels[dst..dst + row_bytes].copy_from_slice(&data[src..src + row_bytes]);
            }
        }

        Backdrop::new(rect, pixels)
    }

    fn restore(&mut self, backdrop: &Backdrop) -> RenderResult<()> {
        let rect = backdrop.rect();
        let Some(area) = rect.intersection(&self.bounds()) else {
            return Ok(());
        };
        let width = rect.width as usize;
        let row_bytes = area.width as usize * 4;
        let canvas_width = self.width();
        let data = self.pixmap.data_mut();
        for y in area.y..area.bottom() {
            let src = ((y - rect.y) as usize * width + (area.x - rect.x) as usize) * 4;
            let dst = row_offset(canvas_width, area.x, y);
            data[dst..dst + row_bytes].copy_from_slice(&backdrop.pixels()[src..src + row_bytes]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Shape};
    use linkboard_core::style::StrokeStyle;

    fn red() -> Color {
        Color::from_rgba8(255, 0, 0, 255)
    }

    fn white() -> Color {
        Color::from_rgba8(255, 255, 255, 255)
    }

    fn rgba(color: Option<Color>) -> [u8; 4] {
        let c = color.unwrap().to_rgba8();
        [c.r, c.g, c.b, c.a]
    }

    #[test]
    fn test_zero_size_fails() {
        assert!(matches!(
            Raster::new(0, 10),
            Err(RenderError::Allocation { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_fill_path() {
        let mut raster = Raster::new(40, 40).unwrap();
        raster.clear(white());
        let path = Rect::new(10.0, 10.0, 20.0, 20.0).to_path(0.1);
        raster.fill_path(&path, red()).unwrap();

        assert_eq!(rgba(raster.pixel(15, 15)), [255, 0, 0, 255]);
        assert_eq!(rgba(raster.pixel(5, 5)), [255, 255, 255, 255]);
        assert!(raster.pixel(40, 0).is_none());
    }

    #[test]
    fn test_dashed_stroke_leaves_gaps() {
        let mut raster = Raster::new(100, 10).unwrap();
        let mut path = BezPath::new();
        path.move_to((0.0, 5.0));
        path.line_to((100.0, 5.0));
        let stroke = Stroke {
            color: red(),
            width: 2.0,
            style: StrokeStyle::Dashed,
        };
        raster.stroke_path(&path, &stroke).unwrap();

        let painted = (0..100)
            .filter(|&x| raster.pixel(x, 5).is_some_and(|c| c.to_rgba8().a > 0))
            .count();
        assert!(painted > 20);
        assert!(painted < 100);
    }

    #[test]
    fn test_empty_path_is_ignored() {
        let mut raster = Raster::new(10, 10).unwrap();
        raster.fill_path(&BezPath::new(), red()).unwrap();
        assert_eq!(rgba(raster.pixel(5, 5)), [0, 0, 0, 0]);
    }

    #[test]
    fn test_capture_and_restore() {
        let mut raster = Raster::new(30, 30).unwrap();
        raster.clear(white());
        let region = DisplayRect::new(5, 5, 10, 10);
        let backdrop = raster.capture(region).unwrap();

        let path = Rect::new(0.0, 0.0, 30.0, 30.0).to_path(0.1);
        raster.fill_path(&path, red()).unwrap();
        raster.restore(&backdrop).unwrap();

        assert_eq!(rgba(raster.pixel(10, 10)), [255, 255, 255, 255]);
        assert_eq!(rgba(raster.pixel(2, 2)), [255, 0, 0, 255]);
        assert_eq!(rgba(raster.pixel(15, 15)), [255, 0, 0, 255]);
    }

    #[test]
    fn test_capture_outside_is_transparent() {
        let mut raster = Raster::new(10, 10).unwrap();
        raster.clear(white());
        let backdrop = raster.capture(DisplayRect::new(-2, -2, 4, 4)).unwrap();

        assert_eq!(backdrop.pixels().len(), 4 * 4 * 4);
        // Row 0 lies above the raster, row 3 column 3 is inside.
        assert_eq!(&backdrop.pixels()[0..4], &[0, 0, 0, 0]);
        let inside = (3 * 4 + 3) * 4;
        assert_eq!(&backdrop.pixels()[inside..inside + 4], &[255, 255, 255, 255]);

        raster.clear(red());
        raster.restore(&backdrop).unwrap();
        assert_eq!(rgba(raster.pixel(0, 0)), [255, 255, 255, 255]);
        assert_eq!(rgba(raster.pixel(2, 2)), [255, 0, 0, 255]);
    }

    #[test]
    fn test_copy_from_clips() {
        let mut source = Raster::new(20, 20).unwrap();
        source.clear(red());
        let mut target = Raster::new(10, 10).unwrap();
        target.copy_from(&source, DisplayRect::new(5, 5, 50, 50));

        assert_eq!(rgba(target.pixel(7, 7)), [255, 0, 0, 255]);
        assert_eq!(rgba(target.pixel(2, 2)), [0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_png_roundtrip() {
        let mut raster = Raster::new(7, 3).unwrap();
        raster.clear(Color::from_rgba8(10, 20, 30, 128));
        let bytes = raster.encode_png().unwrap();

        let decoder = png::Decoder::new(bytes.as_slice());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (7, 3));
        assert_eq!(info.color_type, png::ColorType::Rgba);
    }
}
