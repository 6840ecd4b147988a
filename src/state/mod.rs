use crate::api::ApiClient;
use crate::config::DomContract;
use crate::dnd::{DragSession, GridBind, GridRegistrar};
use crate::focus::{
    classify_target, focused_rating_key, replacement_touches_region, schedule_restore, RatingFocus,
};
use crate::persist::OrderPersister;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::Element;

struct PageInner {
    contract: DomContract,
    registrar: GridRegistrar,
    persister: OrderPersister,
    /// Active gesture: (source container, dragged item).
    drag: RefCell<DragSession<Element, Element>>,
    focus: RefCell<RatingFocus>,
}

/// All interaction state for one page. Cheap to clone; clones share state.
///
/// The host drives it through four entry points: `init_drag_drop` on load,
/// `before_replace` / `after_settle` around every content swap, and the
/// focus/pointer observers.
#[derive(Clone)]
pub(crate) struct PageInteractions {
    inner: Rc<PageInner>,
}

impl PageInteractions {
    pub fn new(contract: DomContract, client: ApiClient) -> Self {
        let persister = OrderPersister::new(client, contract.toast_event);
        Self {
            inner: Rc::new(PageInner {
                contract,
                registrar: GridRegistrar::new(),
                persister,
                drag: RefCell::new(DragSession::new()),
                focus: RefCell::new(RatingFocus::default()),
            }),
        }
    }

    pub fn contract(&self) -> &DomContract {
        &self.inner.contract
    }

    pub(crate) fn registrar(&self) -> &GridRegistrar {
        &self.inner.registrar
    }

    pub(crate) fn persister(&self) -> &OrderPersister {
        &self.inner.persister
    }

    pub(crate) fn drag(&self) -> &RefCell<DragSession<Element, Element>> {
        &self.inner.drag
    }

    pub fn init_drag_drop(&self) -> Vec<GridBind> {
        self.inner.registrar.init_drag_drop(self)
    }

    pub fn on_focus_in(&self, target: Option<&Element>) {
        let target = classify_target(target, &self.inner.contract);
        self.inner.focus.borrow_mut().tracker.focus_in(target);
    }

    pub fn on_pointer_down(&self, target: Option<&Element>) {
        let target = classify_target(target, &self.inner.contract);
        self.inner.focus.borrow_mut().tracker.pointer_down(target);
    }

    /// Pre-replace hook. Only replacements of (or inside) the ratings
    /// region touch the pending slot.
    pub fn before_replace(&self, target: Option<&Element>) {
        let contract = &self.inner.contract;
        let Some(target) = target else {
            return;
        };
        if !replacement_touches_region(target, contract) {
            return;
        }
        let focused = focused_rating_key(contract);
        self.inner.focus.borrow_mut().before_replace(focused);
    }

    /// Post-replace hook: bind newly inserted grids and hand back focus.
    pub fn after_settle(&self) {
        self.init_drag_drop();

        let pending = self.inner.focus.borrow_mut().take_restore();
        if let Some(person_key) = pending {
            schedule_restore(person_key, self.inner.contract.clone());
        }
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    pub(crate) fn pending_restore(&self) -> Option<String> {
        self.inner.focus.borrow().swap.pending().map(str::to_string)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::util::test_dom::{fixture, next_frame, page_with_api, q};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    const PAGE: &str = r#"<section id="ratings-section">
        <input name="score" data-person-id="7"><input name="score" data-person-id="8">
    </section>
    <div id="groups"><button id="outside">x</button><input id="stray" name="score" data-person-id="9"></div>"#;

    const PAGE_WITHOUT_8: &str = r#"<section id="ratings-section">
        <input name="score" data-person-id="7">
    </section>"#;

    fn page() -> PageInteractions {
        page_with_api("http://localhost")
    }

    fn focus(el: &Element) {
        el.unchecked_ref::<web_sys::HtmlElement>().focus().unwrap();
    }

    #[wasm_bindgen_test]
    fn test_focused_rating_input_becomes_pending() {
        let root = fixture(PAGE);
        let page = page();
        let input = q(&root, "input[data-person-id='7']");
        focus(&input);
        page.on_focus_in(Some(&input));

        page.before_replace(Some(&q(&root, "#ratings-section")));
        assert_eq!(page.pending_restore().as_deref(), Some("7"));

        page.after_settle();
        assert_eq!(page.pending_restore(), None);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_unrelated_replacement_leaves_pending_slot_alone() {
        let root = fixture(PAGE);
        let page = page();
        page.on_focus_in(Some(&q(&root, "input[data-person-id='8']")));

        page.before_replace(Some(&q(&root, "#groups")));
        assert_eq!(page.pending_restore(), None);
        page.before_replace(None);
        assert_eq!(page.pending_restore(), None);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_pointer_down_outside_cancels_restore() {
        let root = fixture(PAGE);
        let page = page();
        page.on_focus_in(Some(&q(&root, "input[data-person-id='7']")));
        page.on_pointer_down(Some(&q(&root, "#outside")));

        page.before_replace(Some(&q(&root, "#ratings-section")));
        assert_eq!(page.pending_restore(), None);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_pointer_down_on_score_input_outside_region_cancels_restore() {
        let root = fixture(PAGE);
        let page = page();
        page.on_focus_in(Some(&q(&root, "input[data-person-id='7']")));
        page.on_pointer_down(Some(&q(&root, "#stray")));

        page.before_replace(Some(&q(&root, "#ratings-section")));
        assert_eq!(page.pending_restore(), None);
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn test_settle_refocuses_recreated_input_on_next_frame() {
        let root = fixture(PAGE);
        let page = page();
        let old_input = q(&root, "input[data-person-id='7']");
        focus(&old_input);
        page.on_focus_in(Some(&old_input));

        page.before_replace(Some(&q(&root, "#ratings-section")));
        root.set_inner_html(PAGE);
        page.after_settle();
        assert_eq!(focused_rating_key(page.contract()), None);

        next_frame().await;

        let fresh = q(&root, "#ratings-section input[data-person-id='7']");
        let active = leptos::prelude::document()
            .active_element()
            .expect("an element has focus");
        assert_eq!(active, fresh);
        assert!(!old_input.is_connected());
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn test_settle_without_the_row_moves_no_focus() {
        let root = fixture(PAGE);
        let page = page();
        let input = q(&root, "input[data-person-id='8']");
        focus(&input);
        page.on_focus_in(Some(&input));

        page.before_replace(Some(&q(&root, "#ratings-section")));
        root.set_inner_html(PAGE_WITHOUT_8);
        page.after_settle();
        next_frame().await;

        assert_eq!(focused_rating_key(page.contract()), None);
        assert_eq!(page.pending_restore(), None);
        root.remove();
    }
}
