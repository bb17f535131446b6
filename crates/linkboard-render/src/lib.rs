//! Linkboard Render Library
//!
//! Software raster surfaces for the Linkboard editor core: an anti-aliased
//! `tiny-skia` painter, a double-buffered live screen and PNG export.

mod bitmap;
pub mod raster;
mod screen;
pub mod text;

pub use bitmap::RasterBitmap;
pub use raster::Raster;
pub use screen::RasterScreen;
