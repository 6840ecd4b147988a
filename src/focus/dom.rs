use super::FocusTarget;
use crate::config::DomContract;
use crate::util::{attr, closest};
use wasm_bindgen::JsCast;
use web_sys::Element;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RestoreOutcome {
    Focused,
    /// The person's row is gone from the new content.
    Missing,
}

/// Person key of a qualifying rating input, if `el` is one.
pub(crate) fn rating_person_key(el: &Element, contract: &DomContract) -> Option<String> {
    let input = el.dyn_ref::<web_sys::HtmlInputElement>()?;
    if input.name() != contract.score_field_name {
        return None;
    }
    attr(el, contract.person_attr)
}

pub(crate) fn classify_target(target: Option<&Element>, contract: &DomContract) -> FocusTarget {
    let Some(el) = target else {
        return FocusTarget::Unknown;
    };
    let in_region = closest(el, &contract.ratings_region_selector()).is_some();
    match rating_person_key(el, contract) {
        Some(key) => FocusTarget::RatingInput { key, in_region },
        None if in_region => FocusTarget::InsideRegion,
        None => FocusTarget::OutsideRegion,
    }
}

/// True when the replacement target is the ratings region or lies inside it.
pub(crate) fn replacement_touches_region(target: &Element, contract: &DomContract) -> bool {
    target.id() == contract.ratings_region_id
        || closest(target, &contract.ratings_region_selector()).is_some()
}

pub(crate) fn focused_rating_key(contract: &DomContract) -> Option<String> {
    let active = leptos::prelude::document().active_element()?;
    rating_person_key(&active, contract)
}

pub(crate) fn restore_focus(person_key: &str, contract: &DomContract) -> RestoreOutcome {
    let selector = contract.rating_input_selector(person_key);
    let input = leptos::prelude::document()
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match input {
        Some(input) => {
            let _ = input.focus();
            RestoreOutcome::Focused
        }
        None => RestoreOutcome::Missing,
    }
}

/// Refocuses on the next animation frame, once the new content is laid out.
pub(crate) fn schedule_restore(person_key: String, contract: DomContract) {
    let window = leptos::prelude::window();
    let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
        if restore_focus(&person_key, &contract) == RestoreOutcome::Missing {
            leptos::logging::debug_warn!("no rating input for person {person_key} after swap");
        }
    });
    let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
}
