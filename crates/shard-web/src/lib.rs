//! Browser entry points for the shard story engine.
//!
//! The hosting page loads the generated module and calls `story_init()` on
//! every story page and `choice_links_init()` on pages of the plain
//! choice-link family. Each is a no-op on pages it does not apply to.

use wasm_bindgen::prelude::*;

pub mod dom;
pub mod runner;
pub mod storage;

pub use runner::StoryRunner;

fn init_logging() {
    console_error_panic_hook::set_once();
    // A second init on the same page returns Err; the first logger stays.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

#[wasm_bindgen]
pub fn story_init() {
    init_logging();
    let Some(doc) = document() else { return };
    let runner = StoryRunner::new(doc);
    if let Err(err) = runner.init() {
        log::warn!("story page setup failed: {err:?}");
        return;
    }
    log::info!("shard-story: initialized");
}

#[wasm_bindgen]
pub fn choice_links_init() {
    init_logging();
    let Some(doc) = document() else { return };
    let Some(body) = doc.body() else { return };
    if !runner::is_choice_link_page(&body.class_name()) {
        return;
    }
    let config = runner::load_config(&doc);
    if let Err(err) = runner::wire_choice_links(&doc, &config) {
        log::warn!("choice links setup failed: {err:?}");
        return;
    }
    log::info!("shard-story: choice links ready");
}
