use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ToastKind {
    Success,
    Error,
}

/// Detail payload of the `showToast` event. The rendering layer reads
/// `message` and `type`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }
}

/// Dispatches `event_name` on `document.body` with the toast as `detail`.
pub(crate) fn dispatch_toast(event_name: &str, toast: &Toast) {
    let Some(body) = leptos::prelude::document().body() else {
        return;
    };

    let detail = serde_json::to_string(toast)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL);

    let init = web_sys::CustomEventInit::new();
    init.set_detail(&detail);
    init.set_bubbles(true);

    match web_sys::CustomEvent::new_with_event_init_dict(event_name, &init) {
        Ok(event) => {
            let _ = body.dispatch_event(&event);
        }
        Err(_) => {
            leptos::logging::warn!("could not create {event_name} event");
        }
    }
}
