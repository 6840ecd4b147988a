//! Wires a [`PageInteractions`] to the document: focus observers, the
//! content-swap lifecycle events and initial registration.

use crate::state::PageInteractions;
use crate::util::{event_element, listen};
use wasm_bindgen::JsCast;

/// Element being replaced, from `event.detail.target` of a swap event.
fn swap_target(ev: &web_sys::Event) -> Option<web_sys::Element> {
    let detail = ev.dyn_ref::<web_sys::CustomEvent>()?.detail();
    if detail.is_undefined() || detail.is_null() {
        return None;
    }
    js_sys::Reflect::get(&detail, &"target".into())
        .ok()?
        .dyn_into::<web_sys::Element>()
        .ok()
}

pub(crate) fn install(page: &PageInteractions) {
    let document = leptos::prelude::document();
    let contract = page.contract();

    let p = page.clone();
    listen(&document, "focusin", move |ev| {
        p.on_focus_in(event_element(&ev).as_ref());
    });

    let p = page.clone();
    listen(&document, "pointerdown", move |ev| {
        p.on_pointer_down(event_element(&ev).as_ref());
    });

    let p = page.clone();
    listen(&document, contract.before_replace_event, move |ev| {
        p.before_replace(swap_target(&ev).as_ref());
    });

    let p = page.clone();
    listen(&document, contract.after_settle_event, move |_ev| {
        p.after_settle();
    });

    // The module can finish loading after DOMContentLoaded has fired.
    if document.ready_state() == "loading" {
        let p = page.clone();
        listen(&document, "DOMContentLoaded", move |_ev| {
            p.init_drag_drop();
        });
    } else {
        page.init_drag_drop();
    }
}
