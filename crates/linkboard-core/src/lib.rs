//! Linkboard Core Library
//!
//! Element ordering, connection tracking and minimal-area redraw for the
//! Linkboard diagram editor. Pixels are reached only through the surface
//! traits in [`surface`].

pub mod config;
pub mod connection;
pub mod diagram;
pub mod editor;
pub mod element;
pub mod error;
pub mod export;
pub mod geometry;
pub mod redraw;
pub mod selection;
pub mod shapes;
pub mod style;
pub mod surface;

#[cfg(test)]
mod testing;

pub use config::EditorConfig;
pub use connection::{Connection, ConnectionTable};
pub use diagram::Diagram;
pub use editor::{Editor, EditorEvent};
pub use element::{ConnectionPoint, ConnectionPointKind, Element, ElementId};
pub use error::{DiagramError, DiagramResult, RenderError, RenderResult};
pub use geometry::{Delta, DisplayRect, Pt};
pub use redraw::RedrawSet;
pub use selection::{Anchor, AnchorKind, Selection};
pub use shapes::{Connector, Ellipse, Rectangle, Shape};
pub use style::{SerializableColor, ShapeStyle, StrokeStyle};
pub use surface::{Backdrop, Bitmap, Canvas, Screen, Stroke};
