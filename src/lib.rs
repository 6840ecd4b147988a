mod api;
mod config;
mod dnd;
mod focus;
mod host;
mod persist;
mod state;
mod toast;
mod util;

use crate::api::ApiClient;
use crate::config::DomContract;
use crate::state::PageInteractions;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    // Nothing is mounted, so the spawner used by order saves is set up here.
    let _ = any_spawner::Executor::init_wasm_bindgen();

    let page = PageInteractions::new(DomContract::default(), ApiClient::from_env());
    host::install(&page);
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);
