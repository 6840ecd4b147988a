use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let Some(window) = web_sys::window() else {
            return Self {
                api_url: String::new(),
            };
        };

        // Pages may override the endpoint host with `window.ENV.API_URL`
        // (or the older `window.ENV.api_url`).
        if let Some(env) = window.get("ENV") {
            if !env.is_undefined() && env.is_object() {
                for key in ["API_URL", "api_url"] {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }
                }
            }
        }

        // reqwest needs an absolute URL even for same-origin requests.
        let api_url = window.location().origin().unwrap_or_default();
        Self { api_url }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors, attribute names and event names the server-rendered markup
/// agrees to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DomContract {
    pub grid_selector: &'static str,
    pub group_attr: &'static str,
    pub item_selector: &'static str,
    pub entry_attr: &'static str,
    pub handle_selector: &'static str,
    /// Inner elements whose native drag must not start a gesture.
    pub undraggable_selector: &'static str,
    pub dragging_class: &'static str,

    pub ratings_region_id: &'static str,
    pub score_field_name: &'static str,
    pub person_attr: &'static str,

    pub before_replace_event: &'static str,
    pub after_settle_event: &'static str,
    pub toast_event: &'static str,
}

impl Default for DomContract {
    fn default() -> Self {
        Self {
            grid_selector: ".sortable-grid",
            group_attr: "data-group",
            item_selector: ".draggable-item",
            entry_attr: "data-entry-id",
            handle_selector: ".drag-handle",
            undraggable_selector: "a, img",
            dragging_class: "dragging",
            ratings_region_id: "ratings-section",
            score_field_name: "score",
            person_attr: "data-person-id",
            before_replace_event: "htmx:beforeSwap",
            after_settle_event: "htmx:afterSettle",
            toast_event: "showToast",
        }
    }
}

impl DomContract {
    pub fn ratings_region_selector(&self) -> String {
        format!("#{}", self.ratings_region_id)
    }

    /// Selector for the rating input of one person inside the ratings region.
    pub fn rating_input_selector(&self, person_key: &str) -> String {
        format!(
            "#{} input[name=\"{}\"][{}=\"{}\"]",
            self.ratings_region_id,
            self.score_field_name,
            self.person_attr,
            css_escape_attr(person_key)
        )
    }
}

/// Escapes a value for use inside a double-quoted CSS attribute selector.
pub(crate) fn css_escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
