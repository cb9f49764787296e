use std::rc::Rc;
use std::sync::LazyLock;
use shard_engine::{
    capture_fragment, feedback_html, layout_cloud, visited_flags, Activation, Choice, Code,
    NarrativeStateRepository, Navigator, PageContext, PuzzleEngine, Rng, StoreRepository, StoryConfig,
    TransitionController, TransitionVariant,
};
use regex::Regex;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};

use crate::dom::{
    add_class, query, query_all, query_all_in, set_style, BrowserNavigator, DomChoiceSurface,
    TimeoutScheduler,
};
use crate::storage::LocalStorage;

const KEY_SELECTOR: &str = "[data-bos-key]";
const CHOICE_LINK_SELECTOR: &str = "a.choice";

type Repo = StoreRepository<LocalStorage>;

/// Wires one story page: reads its identity, then activates the matching
/// subsystem against the shared persistent state.
pub struct StoryRunner {
    doc: Document,
    config: Rc<StoryConfig>,
    repo: Rc<Repo>,
}

impl StoryRunner {
    pub fn new(doc: Document) -> Self {
        let config = load_config(&doc);
        let repo = StoreRepository::new(LocalStorage::new(), config.keys.clone());
        Self {
            doc,
            config: Rc::new(config),
            repo: Rc::new(repo),
        }
    }

    /// Identity of the current page, if it is a story page at all.
    pub fn page_context(&self) -> Option<PageContext> {
        let body = self.doc.body()?;
        PageContext::from_attrs(
            body.get_attribute("data-bos").as_deref(),
            body.get_attribute("data-code").as_deref(),
        )
    }

    pub fn init(&self) -> Result<(), JsValue> {
        let Some(page) = self.page_context() else {
            log::debug!("not a story page");
            return Ok(());
        };
        match page.activation() {
            Some(Activation::KeywordCloud) => {
                self.init_cloud();
                self.apply_visited();
                self.wire_reset()?;
                self.wire_keyword_clicks()
            }
            Some(Activation::FragmentCapture { .. }) => {
                let text = query(&self.doc, ".story p")
                    .and_then(|p| p.dyn_into::<HtmlElement>().ok())
                    .map(|p| p.inner_text());
                let outcome =
                    capture_fragment(&page, text.as_deref(), &*self.repo, &self.config.capture);
                log::debug!("fragment capture: {outcome:?}");
                Ok(())
            }
            Some(Activation::Puzzle) => self.wire_puzzle(),
            None => {
                log::debug!("fragment page without a code");
                Ok(())
            }
        }
    }

    fn init_cloud(&self) {
        let Some(cloud) = query(&self.doc, "[data-bos-cloud]") else {
            log::debug!("no keyword cloud on this page");
            return;
        };
        let items = query_all_in(&cloud, KEY_SELECTOR);

        let mut rng = Rng::new(seed());
        let placements = layout_cloud(
            items.len(),
            cloud.client_width() as f64,
            cloud.client_height() as f64,
            &self.config.layout,
            &mut rng,
        );
        for p in &placements {
            let el = &items[p.element];
            if let Err(err) = cloud.append_child(el) {
                log::debug!("reorder: {err:?}");
            }
            if let Some(el) = el.dyn_ref::<HtmlElement>() {
                set_style(el, "left", &p.left_css());
                set_style(el, "top", &p.top_css());
                set_style(el, "--floatDelay", &p.delay_css());
                set_style(el, "--floatAmp", &p.amp_css());
            }
        }
    }

    fn apply_visited(&self) {
        let elements = query_all(&self.doc, KEY_SELECTOR);
        let codes: Vec<Option<Code>> = elements.iter().map(element_code).collect();
        for (el, visited) in elements.iter().zip(visited_flags(&*self.repo, &codes)) {
            if visited {
                add_class(el, "visited-choice");
            }
        }
    }

    fn wire_reset(&self) -> Result<(), JsValue> {
        let Some(btn) = query(&self.doc, ".reset-marks") else {
            return Ok(());
        };
        let repo = self.repo.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            e.prevent_default();
            if let Err(err) = repo.reset() {
                log::warn!("reset incomplete: {err}");
            }
            BrowserNavigator.reload();
        });
        btn.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
        Ok(())
    }

    fn wire_keyword_clicks(&self) -> Result<(), JsValue> {
        let controller = TransitionController::new(TransitionVariant::KeywordCloud, &self.config.transition);
        let repo = self.repo.clone();
        wire_choice_group(&self.doc, KEY_SELECTOR, controller, Some(repo))
    }

    fn wire_puzzle(&self) -> Result<(), JsValue> {
        let Some(form) = query(&self.doc, "[data-bos-form]") else {
            log::debug!("puzzle page without a form");
            return Ok(());
        };
        let inputs: Vec<HtmlInputElement> = query_all(&self.doc, ".bos-input")
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
            .collect();
        let feedback = query(&self.doc, "[data-bos-feedback]");
        let rebuild = query(&self.doc, "[data-bos-rebuild]").and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let fulltext = query(&self.doc, "[data-bos-fulltext]");

        let engine = PuzzleEngine::new(self.config.puzzle);
        let repo = self.repo.clone();
        let onsubmit = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            e.prevent_default();
            let values: Vec<String> = inputs.iter().map(|i| i.value()).collect();
            let verdict = engine.submit(&values, &*repo);

            if let Some(feedback) = &feedback {
                feedback.set_inner_html(&feedback_html(&verdict, engine.config()));
            }
            if let (Some(html), Some(rebuild), Some(fulltext)) =
                (verdict.narrative_html(), &rebuild, &fulltext)
            {
                fulltext.set_inner_html(&html);
                set_style(rebuild, "display", "block");
            }
        });
        form.add_event_listener_with_callback("submit", onsubmit.as_ref().unchecked_ref())?;
        onsubmit.forget();
        Ok(())
    }
}

/// Wire the secondary page family's plain choice links.
pub fn wire_choice_links(doc: &Document, config: &StoryConfig) -> Result<(), JsValue> {
    let controller = TransitionController::new(TransitionVariant::ChoiceLinks, &config.transition);
    wire_choice_group(doc, CHOICE_LINK_SELECTOR, controller, None)
}

/// Capture-phase click handling for a choice group so it runs before the
/// link's own navigation.
fn wire_choice_group(
    doc: &Document,
    selector: &'static str,
    controller: TransitionController,
    repo: Option<Rc<Repo>>,
) -> Result<(), JsValue> {
    let doc_for_click = doc.clone();
    let onclick = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
        let Some(picked) = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|t| t.closest(selector).ok().flatten())
        else {
            return;
        };
        e.prevent_default();

        let elements = query_all(&doc_for_click, selector);
        let Some(selected) = elements.iter().position(|el| *el == picked) else {
            return;
        };
        let choices: Vec<Choice> = elements
            .iter()
            .map(|el| Choice::new(element_code(el), el.get_attribute("href")))
            .collect();
        let mut surface = DomChoiceSurface::new(&elements);
        let repo_ref = repo.as_deref().map(|r| r as &dyn NarrativeStateRepository);
        controller.select(
            &choices,
            selected,
            &mut surface,
            repo_ref,
            &TimeoutScheduler,
            Rc::new(BrowserNavigator),
        );
    });
    doc.add_event_listener_with_callback_and_bool("click", onclick.as_ref().unchecked_ref(), true)?;
    onclick.forget();
    Ok(())
}

fn element_code(el: &Element) -> Option<Code> {
    el.get_attribute("data-code").as_deref().and_then(Code::from_attr)
}

/// Page-supplied config overrides, or defaults.
pub fn load_config(doc: &Document) -> StoryConfig {
    let Some(json) = query(doc, "script[data-bos-config]").and_then(|s| s.text_content()) else {
        return StoryConfig::default();
    };
    StoryConfig::from_json(&json).unwrap_or_else(|err| {
        log::warn!("ignoring malformed story config: {err}");
        StoryConfig::default()
    })
}

/// Body class word like `fg3` or `fg12` marking the secondary page family.
static CHOICE_LINK_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfg\d+\b").expect("choice-link class regex is valid"));

/// Whether the body class list marks the secondary page family.
pub fn is_choice_link_page(class_name: &str) -> bool {
    CHOICE_LINK_CLASS.is_match(class_name)
}

fn seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    now ^ (noise << 21)
}
