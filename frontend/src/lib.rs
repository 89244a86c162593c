pub mod api;
pub mod components;
pub mod config;
pub mod fixtures;
pub mod pages;
pub mod router;
pub mod state;
mod test_support;
pub mod utils;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("logger setup failed: {}", err).into());
    }
    log::info!("starting People Planner frontend");

    // Runtime config loads from ./config.json in the background;
    // window.__PEOPLE_PLANNER_ENV (env.js) takes precedence when present.
    wasm_bindgen_futures::spawn_local(async move {
        config::init().await;
        log::debug!("runtime config initialized");
    });

    router::mount_app();
}
