pub mod api;
pub mod core;
pub mod components;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{
    StoryConfig, StoreKeys, LayoutConfig, TransitionConfig, PuzzleConfig, CaptureConfig,
};
pub use api::page::{PageMode, PageContext, Activation};
pub use api::types::{Code, InvalidCode, CANONICAL_ORDER, FRAGMENT_COUNT, normalize_code};
pub use components::state::{VisitedSet, FragmentStore, AttemptCounter};
pub use core::store::{StorageBackend, MemoryStorage, PersistentStore, StoreError};
pub use core::repository::{NarrativeStateRepository, StoreRepository};
pub use core::schedule::{Scheduler, ManualScheduler, Task, TaskHandle};
pub use systems::rng::Rng;
pub use systems::layout::{layout_cloud, Placement};
pub use systems::visited::{mark_visited, visited_flags};
pub use systems::transition::{
    TransitionController, TransitionVariant, Choice, ChoiceSurface, Emphasis, Navigator,
};
pub use systems::capture::{capture_fragment, is_placeholder, CaptureOutcome};
pub use systems::puzzle::{score_guess, PuzzleEngine, Score, Verdict};
pub use systems::feedback::{feedback_html, hint_strip};
pub use systems::reconstruct::{
    reconstruct, reconstruct_html, display_html, escape_html, missing_placeholder,
};
