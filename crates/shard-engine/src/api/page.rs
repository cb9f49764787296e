use crate::api::types::Code;

/// Which part of the story a page hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Entry page with the floating keyword cloud.
    Start,
    /// A page revealing one fragment.
    Fragment,
    /// The ordering puzzle.
    Puzzle,
}

impl PageMode {
    /// Parse the page's declared mode attribute.
    pub fn from_attr(raw: &str) -> Option<Self> {
        match raw.trim() {
            "start" => Some(PageMode::Start),
            "frag" | "fragment" => Some(PageMode::Fragment),
            "puzzle" => Some(PageMode::Puzzle),
            _ => None,
        }
    }
}

/// The subsystem a page activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Layout, visited marks, reset and keyword transitions.
    KeywordCloud,
    /// Capture of the fragment text for `code`.
    FragmentCapture { code: Code },
    /// Ordering verification and reconstruction.
    Puzzle,
}

/// Identity of the current page, built once at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    pub mode: PageMode,
    /// Declared fragment code (fragment pages only).
    pub code: Option<Code>,
}

impl PageContext {
    pub fn new(mode: PageMode) -> Self {
        Self { mode, code: None }
    }

    pub fn with_code(mut self, code: Code) -> Self {
        self.code = Some(code);
        self
    }

    /// Build from raw page attributes. Returns None when the page does not
    /// declare a recognised story mode.
    pub fn from_attrs(mode: Option<&str>, code: Option<&str>) -> Option<Self> {
        let mode = PageMode::from_attr(mode?)?;
        Some(Self {
            mode,
            code: code.and_then(Code::from_attr),
        })
    }

    /// Decide which subsystem runs. A fragment page without a code
    /// activates nothing.
    pub fn activation(&self) -> Option<Activation> {
        match self.mode {
            PageMode::Start => Some(Activation::KeywordCloud),
            PageMode::Fragment => self.code.map(|code| Activation::FragmentCapture { code }),
            PageMode::Puzzle => Some(Activation::Puzzle),
        }
    }
}
