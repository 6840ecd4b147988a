//! Drag gesture state machine.
//!
//! Nothing here touches the DOM: the grid glue feeds it resolved items,
//! bounding boxes and cursor positions, and applies the resulting moves
//! through [`SortList`].

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn mid_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

impl From<web_sys::DomRect> for Rect {
    fn from(r: web_sys::DomRect) -> Self {
        Self {
            left: r.left(),
            top: r.top(),
            width: r.width(),
            height: r.height(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InsertSide {
    Before,
    After,
}

/// Midpoint tie-break: past the horizontal centre OR past the vertical
/// centre means after. Grids wrap, so either axis counts.
pub(crate) fn insert_side(hovered: &Rect, cursor: Point) -> InsertSide {
    if cursor.x > hovered.mid_x() || cursor.y > hovered.mid_y() {
        InsertSide::After
    } else {
        InsertSide::Before
    }
}

/// An ordered, mutable run of items belonging to one container.
pub(crate) trait SortList {
    type Item: Clone + PartialEq;

    /// Moves `item` directly before or after `anchor`.
    fn place(&mut self, item: &Self::Item, anchor: &Self::Item, side: InsertSide);

    /// Entry identifiers in current order.
    fn entry_ids(&self) -> Vec<String>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DragState<C, I> {
    Idle,
    Dragging { container: C, item: I },
}

/// At most one gesture is tracked per session owner.
#[derive(Clone, Debug)]
pub(crate) struct DragSession<C, I> {
    state: DragState<C, I>,
}

impl<C, I> Default for DragSession<C, I> {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
        }
    }
}

impl<C: PartialEq, I: Clone + PartialEq> DragSession<C, I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active item, if a gesture started in `container`.
    pub fn active_in(&self, container: &C) -> Option<&I> {
        match &self.state {
            DragState::Dragging { container: c, item } if c == container => Some(item),
            _ => None,
        }
    }

    /// Idle -> Dragging. A new start replaces a stale gesture that never
    /// delivered its end event.
    pub fn start(&mut self, container: C, item: I) {
        self.state = DragState::Dragging { container, item };
    }

    /// Applies one hover event. Returns the side the active item was placed
    /// on, or `None` when the event does not qualify (idle, other container,
    /// or hovering the active item itself).
    pub fn hover<L>(
        &self,
        container: &C,
        list: &mut L,
        hovered: &I,
        hovered_rect: &Rect,
        cursor: Point,
    ) -> Option<InsertSide>
    where
        L: SortList<Item = I>,
    {
        let active = self.active_in(container)?;
        if active == hovered {
            return None;
        }

        let side = insert_side(hovered_rect, cursor);
        list.place(active, hovered, side);
        Some(side)
    }

    /// Dragging -> Idle for the gesture owned by `container`. Returns the
    /// released item exactly once per gesture.
    pub fn end(&mut self, container: &C) -> Option<I> {
        if self.active_in(container).is_none() {
            return None;
        }
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging { item, .. } => Some(item),
            DragState::Idle => None,
        }
    }
}

/// In-memory list used to replay hover sequences.
impl SortList for Vec<String> {
    type Item = String;

    fn place(&mut self, item: &String, anchor: &String, side: InsertSide) {
        let Some(from) = self.iter().position(|x| x == item) else {
            return;
        };
        let moved = self.remove(from);
        let Some(at) = self.iter().position(|x| x == anchor) else {
            self.insert(from, moved);
            return;
        };
        let at = match side {
            InsertSide::Before => at,
            InsertSide::After => at + 1,
        };
        self.insert(at, moved);
    }

    fn entry_ids(&self) -> Vec<String> {
        self.clone()
    }
}
