use crate::api::types::{Code, CANONICAL_ORDER};
use crate::components::state::FragmentStore;

/// Separator between consecutive fragments.
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Stand-in for a fragment the reader has not captured yet.
pub fn missing_placeholder(code: Code) -> String {
    format!("[MISSING {code} — open that fragment page first]")
}

/// Join the captured fragments in canonical order, with placeholders for gaps.
pub fn reconstruct(fragments: &FragmentStore) -> String {
    CANONICAL_ORDER
        .iter()
        .map(|&code| match fragments.get(code) {
            Some(text) => text.to_string(),
            None => missing_placeholder(code),
        })
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

/// `reconstruct`, escaped for insertion as HTML with `<br>` line breaks.
pub fn reconstruct_html(fragments: &FragmentStore) -> String {
    display_html(&reconstruct(fragments))
}

/// Escape plain text and turn its line breaks into `<br>`.
pub fn display_html(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
