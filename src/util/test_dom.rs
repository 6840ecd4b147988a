//! Fixtures shared by the browser tests.

use crate::api::ApiClient;
use crate::config::DomContract;
use crate::state::PageInteractions;
use crate::toast::Toast;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Element;

/// Mounts `html` in a fresh container appended to `body`.
pub(crate) fn fixture(html: &str) -> Element {
    let doc = leptos::prelude::document();
    let root = doc.create_element("div").expect("create root");
    root.set_inner_html(html);
    doc.body().expect("body").append_child(&root).expect("append");
    root
}

pub(crate) fn q(root: &Element, selector: &str) -> Element {
    root.query_selector(selector)
        .expect("valid selector")
        .unwrap_or_else(|| panic!("no element for {selector}"))
}

/// A page whose order saves go to `base`. Also sets up the task spawner,
/// which `main` does outside of tests.
pub(crate) fn page_with_api(base: &str) -> PageInteractions {
    let _ = any_spawner::Executor::init_wasm_bindgen();
    PageInteractions::new(DomContract::default(), ApiClient::new(base.to_string()))
}

/// Bubbling, cancelable drag event at the given viewport position.
pub(crate) fn drag_event(kind: &str, client_x: i32, client_y: i32) -> web_sys::DragEvent {
    let init = web_sys::DragEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_client_x(client_x);
    init.set_client_y(client_y);
    web_sys::DragEvent::new_with_event_init_dict(kind, &init).expect("drag event")
}

pub(crate) async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let _ = leptos::prelude::window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    let _ = JsFuture::from(promise).await;
}

/// Resolves from an animation frame callback, after callbacks requested
/// earlier in the same frame.
pub(crate) async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let _ = leptos::prelude::window().request_animation_frame(&resolve);
    });
    let _ = JsFuture::from(promise).await;
}

/// Records toast events reaching `target` until dropped.
pub(crate) struct ToastSink {
    target: web_sys::EventTarget,
    event: &'static str,
    seen: Rc<RefCell<Vec<Toast>>>,
    cb: Closure<dyn FnMut(web_sys::Event)>,
}

impl ToastSink {
    pub fn attach(target: &web_sys::EventTarget, event: &'static str) -> Self {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let cb = Closure::wrap(Box::new(move |ev: web_sys::Event| {
            let Some(ev) = ev.dyn_ref::<web_sys::CustomEvent>() else {
                return;
            };
            let json = js_sys::JSON::stringify(&ev.detail())
                .map(String::from)
                .unwrap_or_default();
            let toast: Toast = serde_json::from_str(&json).expect("toast detail");
            sink.borrow_mut().push(toast);
        }) as Box<dyn FnMut(web_sys::Event)>);
        target
            .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
            .expect("listen");

        Self {
            target: target.clone(),
            event,
            seen,
            cb,
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.seen.borrow().clone()
    }

    /// Polls until a toast arrives or `max_ms` has passed.
    pub async fn wait_for_first(&self, max_ms: i32) {
        let mut waited = 0;
        while self.seen.borrow().is_empty() && waited < max_ms {
            sleep(25).await;
            waited += 25;
        }
    }
}

impl Drop for ToastSink {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.cb.as_ref().unchecked_ref());
    }
}
