//! Label rendering with the host's sans-serif font.

use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use linkboard_core::{DisplayRect, Pt};
use peniko::Color;
use rusttype::{Font, Scale, point};
use std::fs;
use std::sync::OnceLock;
use tiny_skia::Pixmap;

/// First sans-serif face found on the system, loaded once.
pub fn system_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font = load_sans_serif();
        if font.is_none() {
            log::warn!("No usable system font found; labels will not be drawn");
        }
        font
    })
    .as_ref()
}

fn load_sans_serif() -> Option<Font<'static>> {
    let mut db = Database::new();
    db.load_system_fonts();

    let families = [Family::SansSerif];
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = db.query(&query).or_else(|| db.faces().into_iter().next().map(|face| face.id))?;
    let face = db.face(id)?;

    match &face.source {
        Source::File(path) | Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        Source::Binary(bytes) => {
            Font::try_from_vec_and_index(bytes.as_ref().as_ref().to_vec(), face.index)
        }
    }
}

/// Width and height of a single line of text in pixels.
pub fn measure(font: &Font<'_>, text: &str, size: f32) -> (f32, f32) {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let width = font
        .layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);
    (width, v_metrics.ascent - v_metrics.descent)
}

/// Draw `text` centered in `rect`, clipped to it. Skipped when no font is
/// available.
pub fn draw_centered(pixmap: &mut Pixmap, text: &str, rect: DisplayRect, size: f32, color: Color) {
    let Some(font) = system_font() else {
        log::debug!("Skipping label {:?}: no font", text);
        return;
    };

    let scale = Scale::uniform(size);
    let ascent = font.v_metrics(scale).ascent;
    let (width, height) = measure(font, text, size);
    let origin_x = rect.x as f32 + (rect.width as f32 - width) / 2.0;
    let origin_y = rect.y as f32 + (rect.height as f32 - height) / 2.0 + ascent;

    let rgba = color.to_rgba8();
    for glyph in font.layout(text, scale, point(origin_x, origin_y)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let x = bb.min.x + gx as i32;
            let y = bb.min.y + gy as i32;
            if rect.contains(Pt::new(x, y)) {
                blend(pixmap, x, y, [rgba.r, rgba.g, rgba.b, rgba.a], coverage);
            }
        });
    }
}

/// Source-over blend of one pixel into premultiplied RGBA8 storage.
fn blend(pixmap: &mut Pixmap, x: i32, y: i32, rgba: [u8; 4], coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= pixmap.width() || y as u32 >= pixmap.height() {
        return;
    }
    let alpha = rgba[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let idx = (y as usize * pixmap.width() as usize + x as usize) * 4;
    let data = pixmap.data_mut();
    for c in 0..3 {
        let src = rgba[c] as f32 * alpha;
        let dst = data[idx + c] as f32 * (1.0 - alpha);
        data[idx + c] = (src + dst).round().min(255.0) as u8;
    }
    let dst_a = data[idx + 3] as f32 * (1.0 - alpha);
    data[idx + 3] = (alpha * 255.0 + dst_a).round().min(255.0) as u8;
}
