//! Browser glue for sortable grids.

use super::session::{InsertSide, Point, Rect, SortList};
use crate::config::DomContract;
use crate::persist::PersistRequest;
use crate::state::PageInteractions;
use crate::util::{attr, closest, event_element, listen, node_list_elements, query_all};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element};

/// Result of visiting one sortable container during a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GridBind {
    /// First visit: listeners attached.
    Bound { items: usize },
    /// Listeners were already attached; only newly inserted items were marked.
    AlreadyBound { new_items: usize },
    /// No group identifier on the container.
    Skipped,
}

/// Membership registry for containers and items that already carry our
/// bindings. Held in a `WeakSet` so replaced subtrees can be collected.
pub(crate) struct GridRegistrar {
    bound: js_sys::WeakSet,
}

impl Default for GridRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

impl GridRegistrar {
    pub fn new() -> Self {
        Self {
            bound: js_sys::WeakSet::new(),
        }
    }

    pub fn is_bound(&self, el: &Element) -> bool {
        self.bound.has(el)
    }

    /// Records `el`; false when it was already present.
    fn mark(&self, el: &Element) -> bool {
        if self.bound.has(el) {
            return false;
        }
        self.bound.add(el);
        true
    }

    /// Binds every sortable container in the document that is not bound yet.
    pub fn init_drag_drop(&self, page: &PageInteractions) -> Vec<GridBind> {
        let contract = page.contract();
        let Ok(grids) = leptos::prelude::document().query_selector_all(contract.grid_selector)
        else {
            return vec![];
        };

        node_list_elements(&grids)
            .iter()
            .map(|grid| self.init_grid(page, grid))
            .collect()
    }

    fn init_grid(&self, page: &PageInteractions, grid: &Element) -> GridBind {
        let contract = page.contract();
        let Some(group_id) = attr(grid, contract.group_attr) else {
            leptos::logging::debug_warn!(
                "sortable container without {}, skipping",
                contract.group_attr
            );
            return GridBind::Skipped;
        };

        let new_items = self.bind_items(grid, contract);

        if !self.mark(grid) {
            return GridBind::AlreadyBound { new_items };
        }
        bind_grid_listeners(page, grid, group_id);
        GridBind::Bound { items: new_items }
    }

    fn bind_items(&self, grid: &Element, contract: &DomContract) -> usize {
        let mut count = 0;
        for item in query_all(grid, contract.item_selector) {
            if !self.mark(&item) {
                continue;
            }
            count += 1;

            let _ = item.set_attribute("draggable", "true");
            if let Ok(Some(handle)) = item.query_selector(contract.handle_selector) {
                let _ = handle.set_attribute("draggable", "true");
            }
            // Native link/image drags would hijack the gesture.
            for inner in query_all(&item, contract.undraggable_selector) {
                let _ = inner.set_attribute("draggable", "false");
            }
        }
        count
    }
}

/// Live DOM order of one container's items.
pub(crate) struct DomGrid<'a> {
    grid: &'a Element,
    contract: &'a DomContract,
}

impl<'a> DomGrid<'a> {
    pub fn new(grid: &'a Element, contract: &'a DomContract) -> Self {
        Self { grid, contract }
    }
}

impl SortList for DomGrid<'_> {
    type Item = Element;

    fn place(&mut self, item: &Element, anchor: &Element, side: InsertSide) {
        let Some(parent) = anchor.parent_node() else {
            return;
        };
        let reference = match side {
            InsertSide::Before => Some(web_sys::Node::from(anchor.clone())),
            InsertSide::After => anchor.next_sibling(),
        };
        let _ = parent.insert_before(item, reference.as_ref());
    }

    fn entry_ids(&self) -> Vec<String> {
        query_all(self.grid, self.contract.item_selector)
            .iter()
            .filter_map(|item| attr(item, self.contract.entry_attr))
            .collect()
    }
}

fn bind_grid_listeners(page: &PageInteractions, grid: &Element, group_id: String) {
    let (p, g) = (page.clone(), grid.clone());
    listen(grid, "dragstart", move |ev| {
        if let Ok(ev) = ev.dyn_into::<DragEvent>() {
            on_drag_start(&p, &g, &ev);
        }
    });

    let (p, g) = (page.clone(), grid.clone());
    listen(grid, "dragover", move |ev| {
        if let Ok(ev) = ev.dyn_into::<DragEvent>() {
            on_drag_over(&p, &g, &ev);
        }
    });

    let (p, g) = (page.clone(), grid.clone());
    listen(grid, "dragend", move |_ev| {
        on_drag_end(&p, &g, &group_id);
    });

    // Order was applied while hovering; a drop only has to be accepted.
    listen(grid, "drop", |ev| ev.prevent_default());
}

fn on_drag_start(page: &PageInteractions, grid: &Element, ev: &DragEvent) {
    let contract = page.contract();
    let Some(target) = event_element(ev) else {
        return;
    };
    let Some(item) = closest(&target, contract.item_selector) else {
        return;
    };
    if !grid.contains(Some(item.as_ref())) || !page.registrar().is_bound(&item) {
        return;
    }

    let _ = item.class_list().add_1(contract.dragging_class);

    if let Some(dt) = ev.data_transfer() {
        dt.set_effect_allowed("move");
        let entry_id = item.get_attribute(contract.entry_attr).unwrap_or_default();
        let _ = dt.set_data("text/plain", &entry_id);
        if target.matches(contract.handle_selector).unwrap_or(false) {
            dt.set_drag_image(&item, 20, 20);
        }
    }

    page.drag().borrow_mut().start(grid.clone(), item);
}

fn on_drag_over(page: &PageInteractions, grid: &Element, ev: &DragEvent) {
    // Accept drops anywhere over the container.
    ev.prevent_default();

    let contract = page.contract();
    let session = page.drag().borrow();
    if session.active_in(grid).is_none() {
        return;
    }
    if let Some(dt) = ev.data_transfer() {
        dt.set_drop_effect("move");
    }

    let Some(over) = event_element(ev).and_then(|t| closest(&t, contract.item_selector)) else {
        return;
    };
    if !grid.contains(Some(over.as_ref())) {
        return;
    }

    let rect = Rect::from(over.get_bounding_client_rect());
    let cursor = Point {
        x: ev.client_x() as f64,
        y: ev.client_y() as f64,
    };
    let mut list = DomGrid::new(grid, contract);
    session.hover(grid, &mut list, &over, &rect, cursor);
}

fn on_drag_end(page: &PageInteractions, grid: &Element, group_id: &str) {
    let contract = page.contract();
    let Some(item) = page.drag().borrow_mut().end(grid) else {
        return;
    };
    let _ = item.class_list().remove_1(contract.dragging_class);

    // Always persist, even when the order did not change.
    let list = DomGrid::new(grid, contract);
    page.persister().persist(PersistRequest::from_list(group_id, &list));
}
