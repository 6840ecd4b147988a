use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Attaches a listener for the lifetime of the page.
///
/// The closure is leaked on purpose: containers and the document keep their
/// listeners until they are discarded by the browser.
pub(crate) fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    if target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .is_err()
    {
        leptos::logging::warn!("could not listen for {event}");
    }
    cb.forget();
}

/// The element an event was dispatched to. Text-node targets resolve to
/// their parent element.
pub(crate) fn event_element(ev: &web_sys::Event) -> Option<web_sys::Element> {
    let target = ev.target()?;
    match target.dyn_into::<web_sys::Element>() {
        Ok(el) => Some(el),
        Err(other) => other
            .dyn_into::<web_sys::Node>()
            .ok()
            .and_then(|n| n.parent_element()),
    }
}

pub(crate) fn closest(el: &web_sys::Element, selector: &str) -> Option<web_sys::Element> {
    el.closest(selector).ok().flatten()
}

pub(crate) fn query_all(root: &web_sys::Element, selector: &str) -> Vec<web_sys::Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return vec![];
    };
    node_list_elements(&list)
}

pub(crate) fn node_list_elements(list: &web_sys::NodeList) -> Vec<web_sys::Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web_sys::Element>().ok())
        .collect()
}

/// Non-empty attribute value.
pub(crate) fn attr(el: &web_sys::Element, name: &str) -> Option<String> {
    el.get_attribute(name).filter(|v| !v.trim().is_empty())
}

#[cfg(all(test, target_arch = "wasm32"))]
pub(crate) mod test_dom;
