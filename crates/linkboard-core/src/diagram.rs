//! The z-ordered element sequence and its connection table.

use crate::connection::ConnectionTable;
use crate::element::{Element, ElementId};
use crate::error::{DiagramError, DiagramResult};
use crate::geometry::{self, DisplayRect, Pt};
use std::collections::HashMap;

/// All elements of one diagram in paint order.
///
/// Index 0 is the topmost element. An id→index map is kept in sync with the
/// sequence so z-order lookups stay O(1) under frequent reordering.
#[derive(Debug, Default)]
pub struct Diagram {
    elements: Vec<Box<dyn Element>>,
    index: HashMap<ElementId, usize>,
    connections: ConnectionTable,
}

impl Diagram {
    /// Create an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the diagram is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Place an element on top of all others.
    pub fn insert_top(&mut self, element: Box<dyn Element>) -> ElementId {
        let id = element.id();
        self.elements.insert(0, element);
        self.reindex(0);
        id
    }

    /// Remove an element. Its connections are left untouched.
    pub fn remove(&mut self, id: ElementId) -> Option<Box<dyn Element>> {
        let idx = self.index.remove(&id)?;
        let element = self.elements.remove(idx);
        self.reindex(idx);
        Some(element)
    }

    /// Exchange the z-order positions of two elements.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b || a >= self.elements.len() || b >= self.elements.len() {
            return;
        }
        self.elements.swap(a, b);
        self.index.insert(self.elements[a].id(), a);
        self.index.insert(self.elements[b].id(), b);
    }

    fn reindex(&mut self, from: usize) {
        for (i, element) in self.elements.iter().enumerate().skip(from) {
            self.index.insert(element.id(), i);
        }
    }

    /// Z-order position of an element (0 = topmost).
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Check if an element is in the diagram.
    pub fn contains(&self, id: ElementId) -> bool {
        self.index.contains_key(&id)
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&dyn Element> {
        let idx = self.index_of(id)?;
        Some(self.elements[idx].as_ref())
    }

    /// Get a mutable element by id.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut (dyn Element + 'static)> {
        let idx = self.index_of(id)?;
        Some(self.elements[idx].as_mut())
    }

    /// Get an element by id, failing if it is unknown.
    pub fn element(&self, id: ElementId) -> DiagramResult<&dyn Element> {
        self.get(id).ok_or(DiagramError::UnknownElement(id))
    }

    /// Get a mutable element by id, failing if it is unknown.
    pub fn element_mut(&mut self, id: ElementId) -> DiagramResult<&mut (dyn Element + 'static)> {
        self.get_mut(id).ok_or(DiagramError::UnknownElement(id))
    }

    /// Element at a z-order position.
    pub fn at(&self, index: usize) -> Option<&dyn Element> {
        self.elements.get(index).map(|e| e.as_ref())
    }

    /// Elements from topmost to bottommost.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &dyn Element> + '_ {
        self.elements.iter().map(|e| e.as_ref())
    }

    /// Mutable elements from topmost to bottommost.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut Box<dyn Element>> + '_ {
        self.elements.iter_mut()
    }

    /// Ids from topmost to bottommost.
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id()).collect()
    }

    /// Bounding box of every element's display rectangle.
    pub fn bounds(&self) -> Option<DisplayRect> {
        geometry::bounding_box(self.elements.iter().map(|e| e.display_rect()))
    }

    /// Topmost element under a point.
    pub fn element_at(&self, point: Pt) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|e| e.hit_test(point))
            .map(|e| e.id())
    }

    /// Connection table.
    pub fn connections(&self) -> &ConnectionTable {
        &self.connections
    }

    /// Mutable connection table.
    pub fn connections_mut(&mut self) -> &mut ConnectionTable {
        &mut self.connections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, Shape};

    fn rect(x: i32, y: i32) -> Box<dyn Element> {
        Shape::from(Rectangle::new(DisplayRect::new(x, y, 50, 50))).boxed()
    }

    #[test]
    fn test_insert_places_on_top() {
        let mut diagram = Diagram::new();
        let a = diagram.insert_top(rect(0, 0));
        let b = diagram.insert_top(rect(10, 10));
        assert_eq!(diagram.ids(), vec![b, a]);
        assert_eq!(diagram.index_of(b), Some(0));
        assert_eq!(diagram.index_of(a), Some(1));
    }

    #[test]
    fn test_remove_reindexes() {
        let mut diagram = Diagram::new();
        let a = diagram.insert_top(rect(0, 0));
        let b = diagram.insert_top(rect(10, 10));
        let c = diagram.insert_top(rect(20, 20));

        assert!(diagram.remove(b).is_some());
        assert_eq!(diagram.ids(), vec![c, a]);
        assert_eq!(diagram.index_of(a), Some(1));
        assert_eq!(diagram.index_of(b), None);
        assert!(diagram.remove(b).is_none());
    }

    #[test]
    fn test_swap_updates_index() {
        let mut diagram = Diagram::new();
        let a = diagram.insert_top(rect(0, 0));
        let b = diagram.insert_top(rect(10, 10));
        let c = diagram.insert_top(rect(20, 20));

        diagram.swap(0, 2);
        assert_eq!(diagram.ids(), vec![a, b, c]);
        assert_eq!(diagram.index_of(c), Some(2));
        assert_eq!(diagram.index_of(a), Some(0));
    }

    #[test]
    fn test_element_at_prefers_topmost() {
        let mut diagram = Diagram::new();
        let _below = diagram.insert_top(rect(0, 0));
        let above = diagram.insert_top(rect(25, 25));
        assert_eq!(diagram.element_at(Pt::new(30, 30)), Some(above));
        assert_eq!(diagram.element_at(Pt::new(500, 500)), None);
    }

    #[test]
    fn test_bounds() {
        let mut diagram = Diagram::new();
        assert!(diagram.bounds().is_none());
        diagram.insert_top(rect(0, 0));
        diagram.insert_top(rect(100, 20));
        assert_eq!(diagram.bounds(), Some(DisplayRect::new(0, 0, 150, 70)));
    }
}
