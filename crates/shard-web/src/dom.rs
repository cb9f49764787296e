//! Browser adapters for the engine's seams: choice surface, navigation and
//! delayed tasks.

use shard_engine::{ChoiceSurface, Emphasis, Navigator, Scheduler, Task, TaskHandle};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList};

/// All elements matching `selector`, in document order.
pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    doc.query_selector_all(selector).map(elements).unwrap_or_default()
}

/// Descendants of `root` matching `selector`, in document order.
pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector).map(elements).unwrap_or_default()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

pub fn set_style(el: &HtmlElement, name: &str, value: &str) {
    if let Err(err) = el.style().set_property(name, value) {
        log::debug!("style {name}: {err:?}");
    }
}

pub fn add_class(el: &Element, class: &str) {
    if let Err(err) = el.class_list().add_1(class) {
        log::debug!("class {class}: {err:?}");
    }
}

/// A choice group backed by DOM elements.
pub struct DomChoiceSurface {
    elements: Vec<HtmlElement>,
}

impl DomChoiceSurface {
    pub fn new(elements: &[Element]) -> Self {
        Self {
            elements: elements
                .iter()
                .filter_map(|e| e.clone().dyn_into::<HtmlElement>().ok())
                .collect(),
        }
    }
}

impl ChoiceSurface for DomChoiceSurface {
    fn disable_all(&mut self) {
        for el in &self.elements {
            set_style(el, "pointer-events", "none");
        }
    }

    fn eliminate(&mut self, index: usize) {
        if let Some(el) = self.elements.get(index) {
            add_class(el, "vanish");
        }
    }

    fn emphasize(&mut self, index: usize, emphasis: Emphasis) {
        let Some(el) = self.elements.get(index) else { return };
        match emphasis {
            Emphasis::ChosenClass => add_class(el, "chosen"),
            Emphasis::Lifted => {
                set_style(el, "opacity", "1");
                set_style(el, "transform", "scale(1.03)");
            }
        }
    }
}

/// Navigation through `window.location`.
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, href: &str) {
        let Some(window) = web_sys::window() else { return };
        if let Err(err) = window.location().set_href(href) {
            log::warn!("navigation to {href} failed: {err:?}");
        }
    }

    fn reload(&self) {
        let Some(window) = web_sys::window() else { return };
        if let Err(err) = window.location().reload() {
            log::warn!("reload failed: {err:?}");
        }
    }
}

/// Scheduler on `setTimeout`.
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        let task = handle.guard(task);
        let Some(window) = web_sys::window() else {
            return handle;
        };
        let callback = Closure::once_into_js(move || task());
        let timeout = delay_ms.min(i32::MAX as u32) as i32;
        if let Err(err) = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
        {
            log::warn!("setTimeout failed: {err:?}");
        }
        handle
    }
}
