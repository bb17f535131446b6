//! Off-screen snapshot of a whole diagram.

use crate::config::EditorConfig;
use crate::diagram::Diagram;
use crate::error::{DiagramError, DiagramResult};
use crate::geometry::Delta;
use crate::surface::{Bitmap, Screen};
use std::path::Path;

/// Paint every element onto a fresh bitmap sized to the diagram's bounding
/// box plus `config.export_margin` on each side.
///
/// Elements are shifted into the bitmap's coordinate space one at a time
/// and shifted back right after painting, even if painting fails. Only
/// integer translations are involved, so positions come back exactly.
pub fn compose_snapshot<S: Screen + ?Sized>(
    diagram: &mut Diagram,
    screen: &S,
    config: &EditorConfig,
) -> DiagramResult<Box<dyn Bitmap>> {
    let bounds = diagram.bounds().ok_or(DiagramError::EmptyExport)?;
    let margin = config.export_margin.max(0);
    let width = (bounds.width + 2 * margin).max(1) as u32;
    let height = (bounds.height + 2 * margin).max(1) as u32;

    let mut bitmap = screen.create_bitmap(width, height)?;
    let canvas = bitmap.canvas();
    canvas.clear(config.export_background.into());

    let shift = Delta::new(margin - bounds.x, margin - bounds.y);
    for element in diagram.iter_mut().rev() {
        element.move_by(shift);
        element.update_path();
        let painted = match element.draw(canvas) {
            Ok(()) => element.draw_text(canvas),
            Err(err) => Err(err),
        };
        element.move_by(-shift);
        element.update_path();
        painted?;
    }

    Ok(bitmap)
}

/// Compose a snapshot and write it to `path` as PNG.
pub fn save_as_png<S: Screen + ?Sized>(
    diagram: &mut Diagram,
    screen: &S,
    config: &EditorConfig,
    path: &Path,
) -> DiagramResult<()> {
    let bitmap = compose_snapshot(diagram, screen, config)?;
    bitmap.save_png(path)?;
    let (width, height) = bitmap.size();
    log::info!(
        "Exported {} element(s) to {} ({}x{})",
        diagram.len(),
        path.display(),
        width,
        height
    );
    Ok(())
}
