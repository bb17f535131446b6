//! Minimal-area redraw.
//!
//! When an element changes, every element whose on-screen extent overlaps
//! it has to be repainted, and so does everything overlapping *those*,
//! transitively; redrawing only direct neighbours leaves stale pixels once
//! more than two elements stack up. The affected set is erased topmost
//! first (each element restores the pixels it saved when drawn), the change
//! is applied, and the set is redrawn bottommost first so upper elements
//! occlude lower ones. Finally the touched regions are flushed to the
//! display.

use crate::diagram::Diagram;
use crate::element::ElementId;
use crate::error::DiagramResult;
use crate::geometry::{self, Delta};
use crate::surface::{Canvas, Screen};
use std::collections::{HashSet, VecDeque};

/// Elements to repaint, ordered topmost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedrawSet {
    ids: Vec<ElementId>,
}

impl RedrawSet {
    /// Every element of the diagram.
    pub fn all(diagram: &Diagram) -> Self {
        Self { ids: diagram.ids() }
    }

    /// Build a set from arbitrary ids, sorted by current z-order.
    /// Ids not in the diagram are dropped.
    pub fn from_ids(diagram: &Diagram, ids: impl IntoIterator<Item = ElementId>) -> Self {
        let mut ids: Vec<ElementId> = ids
            .into_iter()
            .filter(|id| diagram.contains(*id))
            .collect();
        geometry::sort_by_index(&mut ids, |id| diagram.index_of(*id));
        ids.dedup();
        Self { ids }
    }

    /// Ids, topmost first.
    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// Check if an element is in the set.
    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Transitive closure of elements whose update rectangles overlap `origin`,
/// with every rectangle grown by `delta` to cover motion.
///
/// The result always contains `origin` and never contains duplicates. Ids
/// are returned in discovery order.
pub fn find_all_intersections(
    diagram: &Diagram,
    origin: ElementId,
    delta: Delta,
) -> DiagramResult<Vec<ElementId>> {
    diagram.element(origin)?;

    let mut found = vec![origin];
    let mut visited: HashSet<ElementId> = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);

    while let Some(current) = queue.pop_front() {
        let area = diagram.element(current)?.update_rect(delta);
        for element in diagram.iter() {
            let id = element.id();
            if visited.contains(&id) || !element.update_rect(delta).intersects(&area) {
                continue;
            }
            visited.insert(id);
            found.push(id);
            queue.push_back(id);
        }
    }

    Ok(found)
}

/// Erase everything affected by a change to `origin`, topmost first.
///
/// Returns the affected set so the caller can redraw it after mutating.
pub fn erase_top_to_bottom<C: Canvas>(
    diagram: &mut Diagram,
    canvas: &mut C,
    origin: ElementId,
    delta: Delta,
) -> DiagramResult<RedrawSet> {
    let found = find_all_intersections(diagram, origin, delta)?;
    let set = RedrawSet::from_ids(diagram, found);
    log::debug!("Redraw set for {}: {} element(s)", origin, set.len());
    erase_set(diagram, canvas, &set, delta)?;
    Ok(set)
}

/// Erase the on-screen members of a set, topmost first.
pub fn erase_set<C: Canvas>(
    diagram: &mut Diagram,
    canvas: &mut C,
    set: &RedrawSet,
    delta: Delta,
) -> DiagramResult<()> {
    let viewport = canvas.bounds();
    for &id in set.ids() {
        let element = diagram.element_mut(id)?;
        if element.on_screen(delta, viewport) {
            log::trace!("Erase {}", id);
            element.erase(canvas)?;
        }
    }
    Ok(())
}

/// Redraw the on-screen members of a set, bottommost first, refreshing each
/// element's saved background just before it paints.
pub fn draw_bottom_to_top<C: Canvas>(
    diagram: &mut Diagram,
    canvas: &mut C,
    set: &RedrawSet,
    delta: Delta,
) -> DiagramResult<()> {
    let viewport = canvas.bounds();
    for &id in set.ids().iter().rev() {
        let element = diagram.element_mut(id)?;
        if element.on_screen(delta, viewport) {
            log::trace!("Draw {}", id);
            element.capture_background(canvas)?;
            element.draw(canvas)?;
            element.draw_text(canvas)?;
        }
    }
    Ok(())
}

/// Push the regions of the on-screen members of a set to the display.
pub fn update_screen<S: Screen>(
    diagram: &Diagram,
    screen: &mut S,
    set: &RedrawSet,
    delta: Delta,
) -> DiagramResult<()> {
    let viewport = screen.bounds();
    for &id in set.ids() {
        let element = diagram.element(id)?;
        if element.on_screen(delta, viewport) {
            screen.flush(element.update_rect(delta))?;
        }
    }
    Ok(())
}

/// Erase the whole collection, topmost first. Returns the set erased.
pub fn erase_all<C: Canvas>(
    diagram: &mut Diagram,
    canvas: &mut C,
    delta: Delta,
) -> DiagramResult<RedrawSet> {
    let set = RedrawSet::all(diagram);
    erase_set(diagram, canvas, &set, delta)?;
    Ok(set)
}

/// Redraw the whole collection, bottommost first. Returns the set drawn.
pub fn draw_all<C: Canvas>(
    diagram: &mut Diagram,
    canvas: &mut C,
    delta: Delta,
) -> DiagramResult<RedrawSet> {
    let set = RedrawSet::all(diagram);
    draw_bottom_to_top(diagram, canvas, &set, delta)?;
    Ok(set)
}

/// Full bottom-to-top repaint, used when the host reports a completed
/// paint of the bare canvas.
pub fn repaint<S: Screen>(diagram: &mut Diagram, screen: &mut S) -> DiagramResult<()> {
    draw_all(diagram, screen, Delta::ZERO)?;
    screen.flush(screen.bounds())?;
    Ok(())
}
