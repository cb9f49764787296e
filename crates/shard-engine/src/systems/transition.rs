//! Vanish-then-navigate transition.
//!
//! Picking one element of a choice group locks the whole group, fades out
//! the others, emphasizes the pick and navigates after a short pause.

use std::cell::Cell;
use std::rc::Rc;
use crate::api::config::TransitionConfig;
use crate::api::types::Code;
use crate::core::repository::NarrativeStateRepository;
use crate::core::schedule::{Scheduler, TaskHandle};
use crate::systems::visited::mark_visited;

/// Which choice group the transition serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionVariant {
    /// Keyword cloud on the story entry page.
    KeywordCloud,
    /// Plain choice links on the secondary page family.
    ChoiceLinks,
}

impl TransitionVariant {
    pub fn delay_ms(self, config: &TransitionConfig) -> u32 {
        match self {
            TransitionVariant::KeywordCloud => config.keyword_delay_ms,
            TransitionVariant::ChoiceLinks => config.choice_link_delay_ms,
        }
    }

    pub fn emphasis(self) -> Emphasis {
        match self {
            TransitionVariant::KeywordCloud => Emphasis::ChosenClass,
            TransitionVariant::ChoiceLinks => Emphasis::Lifted,
        }
    }

    /// Only the keyword cloud feeds the visited tracker.
    pub fn records_visits(self) -> bool {
        matches!(self, TransitionVariant::KeywordCloud)
    }
}

/// How the picked element is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Add the `chosen` class.
    ChosenClass,
    /// Inline full opacity and a slight scale-up.
    Lifted,
}

/// One selectable element of a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choice {
    pub code: Option<Code>,
    pub href: Option<String>,
}

impl Choice {
    pub fn new(code: Option<Code>, href: Option<String>) -> Self {
        Self { code, href }
    }

    fn target(&self) -> Option<&str> {
        self.href.as_deref().filter(|h| !h.is_empty())
    }
}

/// Visual side of a choice group, indexed like the `Choice` slice.
pub trait ChoiceSurface {
    /// Stop pointer interaction on every element of the group.
    fn disable_all(&mut self);
    /// Apply the eliminated (vanish) state to one element.
    fn eliminate(&mut self, index: usize);
    fn emphasize(&mut self, index: usize, emphasis: Emphasis);
}

/// Client navigation. Fire-and-forget.
pub trait Navigator {
    fn navigate(&self, href: &str);
    fn reload(&self);
}

/// One controller per page. After the first accepted pick it ignores
/// every later one until the page is left.
pub struct TransitionController {
    variant: TransitionVariant,
    delay_ms: u32,
    in_flight: Cell<bool>,
}

impl TransitionController {
    pub fn new(variant: TransitionVariant, config: &TransitionConfig) -> Self {
        Self {
            variant,
            delay_ms: variant.delay_ms(config),
            in_flight: Cell::new(false),
        }
    }

    pub fn variant(&self) -> TransitionVariant {
        self.variant
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Whether a pick has been accepted and navigation is pending.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Handle the pick of `choices[selected]`.
    /// Returns the pending navigation, or None when the pick is inert
    /// (out of range, without a target, or after an earlier pick).
    pub fn select(
        &self,
        choices: &[Choice],
        selected: usize,
        surface: &mut dyn ChoiceSurface,
        repo: Option<&dyn NarrativeStateRepository>,
        scheduler: &dyn Scheduler,
        navigator: Rc<dyn Navigator>,
    ) -> Option<TaskHandle> {
        if self.in_flight.get() {
            log::debug!("transition: already navigating, ignoring choice {selected}");
            return None;
        }
        let choice = choices.get(selected)?;
        let Some(href) = choice.target() else {
            log::debug!("transition: choice {selected} has no target, ignoring");
            return None;
        };
        self.in_flight.set(true);

        surface.disable_all();
        for index in (0..choices.len()).filter(|&i| i != selected) {
            surface.eliminate(index);
        }
        surface.emphasize(selected, self.variant.emphasis());

        if self.variant.records_visits() {
            if let (Some(code), Some(repo)) = (choice.code, repo) {
                if let Err(err) = mark_visited(repo, code) {
                    log::warn!("transition: could not record visit to {code}: {err}");
                }
            }
        }

        let href = href.to_string();
        log::debug!("transition: navigating to {href} in {}ms", self.delay_ms);
        Some(scheduler.schedule(
            self.delay_ms,
            Box::new(move || navigator.navigate(&href)),
        ))
    }
}
