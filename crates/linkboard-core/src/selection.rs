//! Selection state and resize anchors.

use crate::element::ElementId;
use crate::geometry::{Delta, DisplayRect, Pt};
use serde::{Deserialize, Serialize};

/// Resize handle positions around a display rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorKind {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl AnchorKind {
    /// All anchors, clockwise from the top-left corner.
    pub const ALL: [AnchorKind; 8] = [
        AnchorKind::TopLeft,
        AnchorKind::Top,
        AnchorKind::TopRight,
        AnchorKind::Right,
        AnchorKind::BottomRight,
        AnchorKind::Bottom,
        AnchorKind::BottomLeft,
        AnchorKind::Left,
    ];

    fn moves_left(self) -> bool {
        matches!(
            self,
            AnchorKind::TopLeft | AnchorKind::Left | AnchorKind::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            AnchorKind::TopRight | AnchorKind::Right | AnchorKind::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            AnchorKind::TopLeft | AnchorKind::Top | AnchorKind::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            AnchorKind::BottomLeft | AnchorKind::Bottom | AnchorKind::BottomRight
        )
    }
}

/// A resize handle bound to one edge or corner of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub kind: AnchorKind,
}

impl Anchor {
    /// Create an anchor.
    pub fn new(kind: AnchorKind) -> Self {
        Self { kind }
    }

    /// Handle position on `rect`.
    pub fn position(&self, rect: DisplayRect) -> Pt {
        let center = rect.center();
        let x = if self.kind.moves_left() {
            rect.x
        } else if self.kind.moves_right() {
            rect.right()
        } else {
            center.x
        };
        let y = if self.kind.moves_top() {
            rect.y
        } else if self.kind.moves_bottom() {
            rect.bottom()
        } else {
            center.y
        };
        Pt::new(x, y)
    }

    /// Clamp a raw drag delta so the resized rectangle keeps at least
    /// `min_size` in both dimensions. Components the anchor does not move
    /// along are zeroed.
    pub fn adjust_delta(&self, rect: DisplayRect, delta: Delta, min_size: i32) -> Delta {
        let dx = if self.kind.moves_right() {
            delta.dx.max(min_size - rect.width)
        } else if self.kind.moves_left() {
            delta.dx.min(rect.width - min_size)
        } else {
            0
        };
        let dy = if self.kind.moves_bottom() {
            delta.dy.max(min_size - rect.height)
        } else if self.kind.moves_top() {
            delta.dy.min(rect.height - min_size)
        } else {
            0
        };
        Delta::new(dx, dy)
    }

    /// Rectangle after dragging this anchor by an already adjusted delta.
    pub fn resize(&self, rect: DisplayRect, delta: Delta) -> DisplayRect {
        let mut out = rect;
        if self.kind.moves_left() {
            out.x += delta.dx;
            out.width -= delta.dx;
        } else if self.kind.moves_right() {
            out.width += delta.dx;
        }
        if self.kind.moves_top() {
            out.y += delta.dy;
            out.height -= delta.dy;
        } else if self.kind.moves_bottom() {
            out.height += delta.dy;
        }
        out
    }

    /// Check if a point (in diagram coordinates) hits this handle.
    pub fn hit_test(&self, rect: DisplayRect, point: Pt, tolerance: i32) -> bool {
        let p = self.position(rect);
        (point.x - p.x).abs() <= tolerance && (point.y - p.y).abs() <= tolerance
    }
}

/// All handles for a rectangle with their positions.
pub fn anchors_for(rect: DisplayRect) -> Vec<(Anchor, Pt)> {
    AnchorKind::ALL
        .iter()
        .map(|&kind| {
            let anchor = Anchor::new(kind);
            (anchor, anchor.position(rect))
        })
        .collect()
}

/// Find which handle (if any) is hit at the given point.
pub fn anchor_at(rect: DisplayRect, point: Pt, tolerance: i32) -> Option<Anchor> {
    AnchorKind::ALL
        .iter()
        .map(|&kind| Anchor::new(kind))
        .find(|anchor| anchor.hit_test(rect, point, tolerance))
}

/// The selected element, its active resize anchor and which element shows
/// its anchors. Either nothing is selected, or `element` and
/// `showing_anchors` name the same element and `anchor`, if set, belongs
/// to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    element: Option<ElementId>,
    anchor: Option<Anchor>,
    showing_anchors: Option<ElementId>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an element, dropping any active anchor.
    pub fn select(&mut self, id: ElementId) {
        self.element = Some(id);
        self.showing_anchors = Some(id);
        self.anchor = None;
    }

    /// Activate a resize anchor on the selected element.
    /// Returns false if nothing is selected.
    pub fn select_anchor(&mut self, anchor: Anchor) -> bool {
        if self.element.is_none() {
            return false;
        }
        self.anchor = Some(anchor);
        true
    }

    /// Release the active anchor, keeping the element selected.
    pub fn release_anchor(&mut self) {
        self.anchor = None;
    }

    /// Clear all three references at once.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Selected element.
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// Active resize anchor.
    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// Element currently showing its anchors.
    pub fn showing_anchors(&self) -> Option<ElementId> {
        self.showing_anchors
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.element.is_none()
    }

    /// Check if an element is selected.
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.element == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_right_edge_clamps_to_minimum() {
        let anchor = Anchor::new(AnchorKind::Right);
        let rect = DisplayRect::new(0, 0, 100, 50);
        let delta = anchor.adjust_delta(rect, Delta::new(-95, 30), 20);
        assert_eq!(delta, Delta::new(-80, 0));
        assert_eq!(anchor.resize(rect, delta), DisplayRect::new(0, 0, 20, 50));
    }

    #[test]
    fn test_top_left_clamps_both_axes() {
        let anchor = Anchor::new(AnchorKind::TopLeft);
        let rect = DisplayRect::new(10, 10, 50, 40);
        let delta = anchor.adjust_delta(rect, Delta::new(100, 100), 20);
        let resized = anchor.resize(rect, delta);
        assert_eq!(resized, DisplayRect::new(40, 30, 20, 20));
        assert_eq!(resized.right(), rect.right());
        assert_eq!(resized.bottom(), rect.bottom());
    }

    #[test]
    fn test_growing_is_not_clamped() {
        let anchor = Anchor::new(AnchorKind::BottomRight);
        let rect = DisplayRect::new(0, 0, 30, 30);
        let delta = anchor.adjust_delta(rect, Delta::new(25, 40), 20);
        assert_eq!(anchor.resize(rect, delta), DisplayRect::new(0, 0, 55, 70));
    }

    #[test]
    fn test_anchor_positions() {
        let rect = DisplayRect::new(0, 0, 100, 50);
        assert_eq!(Anchor::new(AnchorKind::TopLeft).position(rect), Pt::new(0, 0));
        assert_eq!(Anchor::new(AnchorKind::Bottom).position(rect), Pt::new(50, 50));
        assert_eq!(anchors_for(rect).len(), 8);
    }

    #[test]
    fn test_anchor_at() {
        let rect = DisplayRect::new(0, 0, 100, 50);
        let hit = anchor_at(rect, Pt::new(98, 26), 4).unwrap();
        assert_eq!(hit.kind, AnchorKind::Right);
        assert!(anchor_at(rect, Pt::new(50, 25), 4).is_none());
    }

    #[test]
    fn test_selection_clear_resets_everything() {
        let mut selection = Selection::new();
        let id = Uuid::new_v4();
        assert!(!selection.select_anchor(Anchor::new(AnchorKind::Top)));
        selection.select(id);
        assert!(selection.select_anchor(Anchor::new(AnchorKind::Top)));
        assert_eq!(selection.showing_anchors(), Some(id));

        selection.clear();
        assert_eq!(selection, Selection::default());
        assert!(selection.element().is_none());
        assert!(selection.anchor().is_none());
        assert!(selection.showing_anchors().is_none());
    }
}
