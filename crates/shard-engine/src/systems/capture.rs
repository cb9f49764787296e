use crate::api::config::CaptureConfig;
use crate::api::page::{PageContext, PageMode};
use crate::core::repository::NarrativeStateRepository;

/// What a capture pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    NotFragmentPage,
    /// The page declares no (valid) code.
    NoCode,
    /// The narrative text container is missing.
    NoContainer,
    /// The container has no text yet.
    Empty,
    /// The container still shows placeholder text.
    Placeholder,
    /// The same text is already stored.
    Unchanged,
    Captured,
}

/// Whether `text` still contains one of the placeholder markers.
pub fn is_placeholder(text: &str, config: &CaptureConfig) -> bool {
    config
        .placeholder_markers
        .iter()
        .any(|marker| !marker.is_empty() && text.contains(marker.as_str()))
}

/// Store the fragment page's rendered text under its code.
/// `text` is the container's rendered text, or None if there is no container.
pub fn capture_fragment(
    page: &PageContext,
    text: Option<&str>,
    repo: &dyn NarrativeStateRepository,
    config: &CaptureConfig,
) -> CaptureOutcome {
    if page.mode != PageMode::Fragment {
        return CaptureOutcome::NotFragmentPage;
    }
    let Some(code) = page.code else {
        return CaptureOutcome::NoCode;
    };
    let Some(text) = text else {
        return CaptureOutcome::NoContainer;
    };
    let text = text.trim();
    if text.is_empty() {
        return CaptureOutcome::Empty;
    }
    if is_placeholder(text, config) {
        log::debug!("capture: fragment {code} still shows placeholder text");
        return CaptureOutcome::Placeholder;
    }

    let mut fragments = repo.fragments();
    if !fragments.insert(code, text) {
        return CaptureOutcome::Unchanged;
    }
    if let Err(err) = repo.set_fragments(&fragments) {
        log::warn!("capture: could not save fragment {code}: {err}");
    }
    log::info!("capture: stored fragment {code} ({} chars)", text.chars().count());
    CaptureOutcome::Captured
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::StoreKeys;
    use crate::api::types::Code;
    use crate::core::repository::StoreRepository;
    use crate::core::store::MemoryStorage;

    fn code(n: u8) -> Code {
        Code::from_number(n).unwrap()
    }

    fn setup() -> (StoreRepository<MemoryStorage>, CaptureConfig) {
        (
            StoreRepository::new(MemoryStorage::new(), StoreKeys::default()),
            CaptureConfig::default(),
        )
    }

    fn fragment_page(n: u8) -> PageContext {
        PageContext::new(PageMode::Fragment).with_code(code(n))
    }

    #[test]
    fn captures_trimmed_text() {
        let (repo, config) = setup();
        let outcome = capture_fragment(&fragment_page(4), Some("  The door opened.\n"), &repo, &config);
        assert_eq!(outcome, CaptureOutcome::Captured);
        assert_eq!(repo.fragments().get(code(4)), Some("The door opened."));
    }

    #[test]
    fn capture_is_idempotent_and_overwrites() {
        let (repo, config) = setup();
        let page = fragment_page(6);
        capture_fragment(&page, Some("first"), &repo, &config);
        let before = repo.fragments();
        assert_eq!(capture_fragment(&page, Some("first"), &repo, &config), CaptureOutcome::Unchanged);
        assert_eq!(repo.fragments(), before);
        assert_eq!(capture_fragment(&page, Some("second"), &repo, &config), CaptureOutcome::Captured);
        assert_eq!(repo.fragments().get(code(6)), Some("second"));
    }

    #[test]
    fn placeholder_text_is_never_stored() {
        let (repo, config) = setup();
        let page = fragment_page(1);
        assert_eq!(
            capture_fragment(&page, Some("PASTE HERE your story"), &repo, &config),
            CaptureOutcome::Placeholder
        );
        assert_eq!(
            capture_fragment(&page, Some("【PASTE 01】"), &repo, &config),
            CaptureOutcome::Placeholder
        );
        assert!(repo.fragments().is_empty());
    }

    #[test]
    fn placeholder_does_not_erase_earlier_capture() {
        let (repo, config) = setup();
        let page = fragment_page(1);
        capture_fragment(&page, Some("real text"), &repo, &config);
        capture_fragment(&page, Some("PASTE HERE"), &repo, &config);
        assert_eq!(repo.fragments().get(code(1)), Some("real text"));
    }

    #[test]
    fn missing_hooks_are_no_ops() {
        let (repo, config) = setup();
        assert_eq!(
            capture_fragment(&PageContext::new(PageMode::Fragment), Some("x"), &repo, &config),
            CaptureOutcome::NoCode
        );
        assert_eq!(
            capture_fragment(&fragment_page(2), None, &repo, &config),
            CaptureOutcome::NoContainer
        );
        assert_eq!(
            capture_fragment(&fragment_page(2), Some("   "), &repo, &config),
            CaptureOutcome::Empty
        );
        assert_eq!(
            capture_fragment(&PageContext::new(PageMode::Puzzle), Some("x"), &repo, &config),
            CaptureOutcome::NotFragmentPage
        );
        assert!(repo.fragments().is_empty());
    }

    #[test]
    fn custom_markers() {
        let config = CaptureConfig {
            placeholder_markers: vec!["TODO-TEXT".into()],
        };
        assert!(is_placeholder("a TODO-TEXT b", &config));
        assert!(!is_placeholder("PASTE HERE", &config));
    }
}
