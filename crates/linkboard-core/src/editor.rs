//! Selection, z-order and geometry operations over a live screen.
//!
//! Every structural change runs the same protocol: erase the affected set
//! topmost first, apply the change, redraw bottommost first, flush. The
//! editor is the only place that mutates element order.

use crate::config::EditorConfig;
use crate::connection::Connection;
use crate::diagram::Diagram;
use crate::element::{ConnectionPointKind, Element, ElementId};
use crate::error::{DiagramError, DiagramResult};
use crate::export;
use crate::geometry::{Delta, DisplayRect, Pt};
use crate::redraw;
use crate::selection::{self, Anchor, Selection};
use crate::style::ShapeStyle;
use crate::surface::Screen;
use std::path::Path;

/// Notifications for the UI layer, drained with [`Editor::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// The selected element changed (None = nothing selected).
    SelectionChanged(Option<ElementId>),
}

/// Owns one diagram and the screen it is shown on.
pub struct Editor<S: Screen> {
    diagram: Diagram,
    screen: S,
    selection: Selection,
    config: EditorConfig,
    events: Vec<EditorEvent>,
}

impl<S: Screen> Editor<S> {
    /// Create an editor with default settings.
    pub fn new(screen: S) -> Self {
        Self::with_config(screen, EditorConfig::default())
    }

    /// Create an editor with explicit settings.
    pub fn with_config(screen: S, config: EditorConfig) -> Self {
        Self {
            diagram: Diagram::new(),
            screen,
            selection: Selection::new(),
            config,
            events: Vec::new(),
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Take all pending notifications.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Erase everything around `id`, mutate it, redraw and flush.
    fn redraw_around<F>(&mut self, id: ElementId, delta: Delta, mutate: F) -> DiagramResult<()>
    where
        F: FnOnce(&mut (dyn Element + 'static)) -> DiagramResult<()>,
    {
        let set = redraw::erase_top_to_bottom(&mut self.diagram, &mut self.screen, id, delta)?;
        mutate(self.diagram.element_mut(id)?)?;
        redraw::draw_bottom_to_top(&mut self.diagram, &mut self.screen, &set, delta)?;
        redraw::update_screen(&self.diagram, &mut self.screen, &set, delta)
    }

    // --- Lifecycle ---

    /// Add an element on top of all others and paint it.
    pub fn insert(&mut self, mut element: Box<dyn Element>) -> DiagramResult<ElementId> {
        element.update_path();
        let id = self.diagram.insert_top(element);
        log::debug!("Inserted {}", id);
        self.redraw_around(id, Delta::ZERO, |_| Ok(()))?;
        Ok(id)
    }

    /// Remove the selected element. Does nothing when nothing is selected.
    ///
    /// The whole canvas is invalidated afterwards: removing an element can
    /// uncover pixels no element has a saved background for.
    pub fn delete_element(&mut self) -> DiagramResult<Option<Box<dyn Element>>> {
        let Some(id) = self.selection.element() else {
            return Ok(None);
        };

        let detached = self.diagram.connections_mut().detach_all(id);
        log::debug!("Deleting {} ({} connection(s) detached)", id, detached);

        redraw::erase_all(&mut self.diagram, &mut self.screen, Delta::ZERO)?;
        let mut removed = self.diagram.remove(id);
        if let Some(element) = removed.as_mut() {
            element.cancel_background();
        }
        self.selection.clear();
        redraw::draw_all(&mut self.diagram, &mut self.screen, Delta::ZERO)?;

        self.events.push(EditorEvent::SelectionChanged(None));
        self.screen.invalidate();
        Ok(removed)
    }

    /// Full bottom-to-top repaint after the host painted a blank canvas.
    pub fn repaint(&mut self) -> DiagramResult<()> {
        redraw::repaint(&mut self.diagram, &mut self.screen)
    }

    // --- Z-order ---

    /// Bring the selected element to the front.
    pub fn topmost(&mut self) -> DiagramResult<()> {
        if self.selection.is_empty() {
            return Ok(());
        }
        self.reorder(0)
    }

    /// Send the selected element to the back.
    pub fn bottommost(&mut self) -> DiagramResult<()> {
        if self.selection.is_empty() || self.diagram.is_empty() {
            return Ok(());
        }
        self.reorder(self.diagram.len() - 1)
    }

    /// Move the selected element one step towards the front.
    /// No-op when it is already topmost.
    pub fn move_up(&mut self) -> DiagramResult<()> {
        match self.selected_index() {
            Some(idx) if idx > 0 => self.reorder(idx - 1),
            _ => Ok(()),
        }
    }

    /// Move the selected element one step towards the back.
    /// No-op when it is already bottommost.
    pub fn move_down(&mut self) -> DiagramResult<()> {
        match self.selected_index() {
            Some(idx) if idx + 1 < self.diagram.len() => self.reorder(idx + 1),
            _ => Ok(()),
        }
    }

    fn selected_index(&self) -> Option<usize> {
        self.selection
            .element()
            .and_then(|id| self.diagram.index_of(id))
    }

    /// Swap the selected element with whatever sits at z-order position `n`.
    pub fn reorder(&mut self, n: usize) -> DiagramResult<()> {
        let Some(current) = self.selected_index() else {
            return Ok(());
        };
        if n == current || n >= self.diagram.len() {
            return Ok(());
        }
        log::debug!("Reorder {} -> {}", current, n);

        redraw::erase_all(&mut self.diagram, &mut self.screen, Delta::ZERO)?;
        self.diagram.swap(current, n);
        let set = redraw::draw_all(&mut self.diagram, &mut self.screen, Delta::ZERO)?;
        redraw::update_screen(&self.diagram, &mut self.screen, &set, Delta::ZERO)
    }

    // --- Geometry ---

    /// Resize an element by dragging one of its anchors, keeping it at least
    /// `min_element_size` in both dimensions, then re-anchor its connections.
    pub fn update_size(&mut self, id: ElementId, anchor: Anchor, delta: Delta) -> DiagramResult<()> {
        let rect = self.diagram.element(id)?.display_rect();
        let adjusted = anchor.adjust_delta(rect, delta, self.config.min_element_size);
        let resized = anchor.resize(rect, adjusted);
        self.update_display_rectangle(id, resized, adjusted)?;
        self.update_connections(id)
    }

    /// Resize the selected element with its active anchor.
    pub fn resize_selected(&mut self, delta: Delta) -> DiagramResult<()> {
        match (self.selection.element(), self.selection.anchor()) {
            (Some(id), Some(anchor)) => self.update_size(id, anchor, delta),
            _ => Ok(()),
        }
    }

    /// Replace an element's display rectangle. `delta` bounds the area that
    /// is erased and redrawn.
    pub fn update_display_rectangle(
        &mut self,
        id: ElementId,
        rect: DisplayRect,
        delta: Delta,
    ) -> DiagramResult<()> {
        self.redraw_around(id, delta, |element| {
            element.set_display_rect(rect);
            element.update_path();
            Ok(())
        })
    }

    /// Move every anchor attached to `id` onto the connection point it
    /// tracks. Targets are redrawn, but their own connections are not
    /// followed further.
    pub fn update_connections(&mut self, id: ElementId) -> DiagramResult<()> {
        for connection in self.diagram.connections().connections_of(id) {
            self.follow(connection)?;
        }
        Ok(())
    }

    fn follow(&mut self, connection: Connection) -> DiagramResult<()> {
        let (target, delta) = self.anchor_offset(&connection)?;
        if delta.is_zero() {
            return Ok(());
        }
        self.redraw_around(connection.to_element, delta, |element| {
            element.move_anchor(connection.to_point, target)?;
            element.update_path();
            Ok(())
        })
    }

    /// Where the followed anchor must go, and how far that is from where it is.
    fn anchor_offset(&self, connection: &Connection) -> DiagramResult<(Pt, Delta)> {
        let point = connection.resolve(self.diagram.element(connection.owner)?)?;
        let follower = self.diagram.element(connection.to_element)?;
        let current = follower
            .connection_points()
            .into_iter()
            .find(|p| p.kind == connection.to_point)
            .ok_or(DiagramError::UnsupportedAnchor {
                element: connection.to_element,
                kind: connection.to_point,
            })?;
        Ok((point.position, point.position - current.position))
    }

    /// Move one element. Off-screen elements are moved without painting.
    pub fn move_element(&mut self, id: ElementId, delta: Delta) -> DiagramResult<()> {
        let viewport = self.screen.bounds();
        if self.diagram.element(id)?.on_screen(delta, viewport) {
            self.redraw_around(id, delta, |element| {
                element.move_by(delta);
                element.update_path();
                Ok(())
            })?;
        } else {
            log::trace!("Move {} off screen", id);
            let element = self.diagram.element_mut(id)?;
            element.cancel_background();
            element.move_by(delta);
            element.update_path();
        }
        self.update_connections(id)
    }

    /// Move the whole diagram at once.
    pub fn move_all_elements(&mut self, delta: Delta) -> DiagramResult<()> {
        redraw::erase_all(&mut self.diagram, &mut self.screen, delta)?;
        for element in self.diagram.iter_mut() {
            element.move_by(delta);
            element.update_path();
        }
        let connections: Vec<Connection> = self.diagram.connections().iter().copied().collect();
        for connection in connections {
            let (target, offset) = self.anchor_offset(&connection)?;
            if !offset.is_zero() {
                let element = self.diagram.element_mut(connection.to_element)?;
                element.move_anchor(connection.to_point, target)?;
                element.update_path();
            }
        }
        let set = redraw::draw_all(&mut self.diagram, &mut self.screen, delta)?;
        redraw::update_screen(&self.diagram, &mut self.screen, &set, delta)
    }

    /// Replace an element's style and repaint it.
    pub fn set_style(&mut self, id: ElementId, style: ShapeStyle) -> DiagramResult<()> {
        let old_margin = self.diagram.element(id)?.style().stroke_margin();
        // Cover the wider of the two borders: the new one when it grows, the
        // ring left by the old one when it shrinks.
        let growth = (style.stroke_margin() - old_margin).abs();
        self.redraw_around(id, Delta::new(growth, growth), |element| {
            *element.style_mut() = style;
            element.update_path();
            Ok(())
        })
    }

    // --- Connections ---

    /// Attach `to_point` of `target` to `element_point` of `owner` and snap
    /// it into place. Returns false if the link already existed.
    pub fn connect(
        &mut self,
        owner: ElementId,
        element_point: ConnectionPointKind,
        target: ElementId,
        to_point: ConnectionPointKind,
    ) -> DiagramResult<bool> {
        let connection = Connection {
            owner,
            element_point,
            to_element: target,
            to_point,
        };
        self.anchor_offset(&connection)?;
        let added = self.diagram.connections_mut().connect(connection);
        if added {
            log::debug!("Connected {} -> {}", owner, target);
            self.follow(connection)?;
        }
        Ok(added)
    }

    // --- Selection ---

    /// Select an element.
    pub fn select(&mut self, id: ElementId) -> DiagramResult<()> {
        self.diagram.element(id)?;
        if self.selection.is_selected(id) {
            return Ok(());
        }
        self.selection.select(id);
        self.events.push(EditorEvent::SelectionChanged(Some(id)));
        Ok(())
    }

    /// Select the topmost element under a point, or clear the selection if
    /// there is none.
    pub fn select_at(&mut self, point: Pt) -> Option<ElementId> {
        match self.diagram.element_at(point) {
            Some(id) => {
                if !self.selection.is_selected(id) {
                    self.selection.select(id);
                    self.events.push(EditorEvent::SelectionChanged(Some(id)));
                }
                Some(id)
            }
            None => {
                self.clear_selection();
                None
            }
        }
    }

    /// Activate a resize anchor on the selected element.
    pub fn select_anchor(&mut self, anchor: Anchor) -> bool {
        self.selection.select_anchor(anchor)
    }

    /// End a handle drag. The element stays selected.
    pub fn release_anchor(&mut self) {
        self.selection.release_anchor();
    }

    /// Resize handle of the selected element under a point.
    pub fn anchor_at(&self, point: Pt) -> Option<Anchor> {
        let id = self.selection.showing_anchors()?;
        let rect = self.diagram.get(id)?.display_rect();
        selection::anchor_at(rect, point, self.config.anchor_tolerance)
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.events.push(EditorEvent::SelectionChanged(None));
    }

    /// Topmost element under a point.
    pub fn element_at(&self, point: Pt) -> Option<ElementId> {
        self.diagram.element_at(point)
    }

    // --- Export ---

    /// Write the whole diagram to a PNG file. The live screen is not touched.
    pub fn save_as_png(&mut self, path: &Path) -> DiagramResult<()> {
        export::save_as_png(&mut self.diagram, &self.screen, &self.config, path)
    }
}
