//! Links between a connection point on one element and an anchor on another.
//!
//! Connections live in a relation table owned by the diagram rather than in
//! the elements themselves, so neither endpoint holds a reference to the
//! other.

use crate::element::{ConnectionPoint, ConnectionPointKind, Element, ElementId};
use crate::error::{DiagramError, DiagramResult};
use serde::{Deserialize, Serialize};

/// A directed link: when `owner` changes geometry, the `to_point` anchor of
/// `to_element` follows the owner's `element_point`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// Element whose geometry drives the link.
    pub owner: ElementId,
    /// Kind of the owner's connection point the link is attached to.
    pub element_point: ConnectionPointKind,
    /// Element whose anchor follows.
    pub to_element: ElementId,
    /// Anchor on `to_element` that tracks the owner's point.
    pub to_point: ConnectionPointKind,
}

impl Connection {
    /// Check if an element takes part in this connection at either end.
    pub fn involves(&self, id: ElementId) -> bool {
        self.owner == id || self.to_element == id
    }

    /// Find the single connection point on `owner` this connection is
    /// attached to. Zero or multiple matches is a configuration error.
    pub fn resolve(&self, owner: &dyn Element) -> DiagramResult<ConnectionPoint> {
        let mut matches = owner
            .connection_points()
            .into_iter()
            .filter(|p| p.kind == self.element_point);
        match (matches.next(), matches.next()) {
            (Some(point), None) => Ok(point),
            (first, second) => {
                let count = first.iter().count() + second.iter().count() + matches.count();
                Err(DiagramError::ConnectionPoint {
                    element: owner.id(),
                    kind: self.element_point,
                    matches: count,
                })
            }
        }
    }
}

/// Relation table of all connections in a diagram, in creation order.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTable {
    connections: Vec<Connection>,
}

impl ConnectionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a connection. Linking the same pair of points twice is a no-op.
    pub fn connect(&mut self, connection: Connection) -> bool {
        if self.connections.contains(&connection) {
            return false;
        }
        self.connections.push(connection);
        true
    }

    /// Connections driven by `owner`.
    pub fn connections_of(&self, owner: ElementId) -> Vec<Connection> {
        self.connections
            .iter()
            .filter(|c| c.owner == owner)
            .copied()
            .collect()
    }

    /// Connections where `id` is either endpoint.
    pub fn involving(&self, id: ElementId) -> Vec<Connection> {
        self.connections
            .iter()
            .filter(|c| c.involves(id))
            .copied()
            .collect()
    }

    /// Remove every connection touching `id`. Returns how many were removed.
    pub fn detach_all(&mut self, id: ElementId) -> usize {
        let before = self.connections.len();
        self.connections.retain(|c| !c.involves(id));
        before - self.connections.len()
    }

    /// All connections.
    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    /// Number of connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Check if there are no connections.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
