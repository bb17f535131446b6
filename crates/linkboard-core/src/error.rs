//! Error types for diagram and surface operations.

use crate::element::{ConnectionPointKind, ElementId};
use thiserror::Error;

/// Errors raised by a drawing surface.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to allocate a {width}x{height} surface")]
    Allocation { width: u32, height: u32 },
    #[error("Invalid background snapshot: {0}")]
    Backdrop(String),
    #[error("Image encoding failed: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by editor operations.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("Element not found: {0}")]
    UnknownElement(ElementId),
    #[error("Element {element} has {matches} connection points of kind {kind:?}, expected exactly one")]
    ConnectionPoint {
        element: ElementId,
        kind: ConnectionPointKind,
        matches: usize,
    },
    #[error("Element {element} has no anchor of kind {kind:?}")]
    UnsupportedAnchor {
        element: ElementId,
        kind: ConnectionPointKind,
    },
    #[error("Nothing to export: the diagram is empty")]
    EmptyExport,
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Result type for surface operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for editor operations.
pub type DiagramResult<T> = Result<T, DiagramError>;
