use std::fmt;
use serde::{Deserialize, Serialize};

/// Number of fragments in a story.
pub const FRAGMENT_COUNT: usize = 12;

/// Identifier of one narrative fragment and of the choice leading to it.
/// Always in 1..=12; displayed zero-padded ("01".."12").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(u8);

impl Code {
    const fn new_unchecked(n: u8) -> Self {
        Code(n)
    }

    /// Build a code from its number. Returns None outside 1..=12.
    pub fn from_number(n: u8) -> Option<Self> {
        if (1..=FRAGMENT_COUNT as u8).contains(&n) {
            Some(Code(n))
        } else {
            None
        }
    }

    /// Parse an exact two-digit code ("01".."12").
    /// Use `normalize_code` first for raw reader input.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let n = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        Self::from_number(n)
    }

    /// Lenient parse for page attributes: trims and pads before parsing.
    pub fn from_attr(raw: &str) -> Option<Self> {
        Self::parse(&normalize_code(raw))
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl TryFrom<String> for Code {
    type Error = InvalidCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Code::parse(&value).ok_or(InvalidCode(value))
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

/// A string that is not a valid two-digit fragment code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fragment code: {0:?}")]
pub struct InvalidCode(pub String);

/// True chronological order of the story, expressed as the codes a reader
/// must enter for steps 1..12.
pub const CANONICAL_ORDER: [Code; FRAGMENT_COUNT] = [
    Code::new_unchecked(5),
    Code::new_unchecked(10),
    Code::new_unchecked(2),
    Code::new_unchecked(7),
    Code::new_unchecked(11),
    Code::new_unchecked(4),
    Code::new_unchecked(12),
    Code::new_unchecked(8),
    Code::new_unchecked(6),
    Code::new_unchecked(1),
    Code::new_unchecked(9),
    Code::new_unchecked(3),
];

/// Normalize raw reader input toward the two-digit form.
/// Trims whitespace and left-pads a single character with "0".
/// Empty input stays empty. No validation beyond that.
pub fn normalize_code(raw: &str) -> String {
    let v = raw.trim();
    if v.chars().count() == 1 {
        format!("0{v}")
    } else {
        v.to_string()
    }
}
