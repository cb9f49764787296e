use crate::api::config::PuzzleConfig;
use crate::systems::puzzle::{Score, Verdict};

/// Markup for the puzzle feedback region.
pub fn feedback_html(verdict: &Verdict, config: &PuzzleConfig) -> String {
    match verdict {
        Verdict::Unlocked { score, .. } => {
            format!(r#"<div class="bos-msg ok">Accuracy: {}% — unlocked.</div>"#, score.percent())
        }
        Verdict::TryAgain { score, attempt, limit } => format!(
            r#"<div class="bos-msg bad">Accuracy: {}% — try again. (Attempt {attempt}/{limit})</div>"#,
            score.percent()
        ),
        Verdict::Hinted { score, .. } => {
            let threshold = (config.unlock_threshold * 100.0).round() as u32;
            format!(
                concat!(
                    r#"<div class="bos-msg bad">Accuracy: {}% — hints enabled.</div>"#,
                    r#"<div class="bos-hints">{}</div>"#,
                    r#"<div class="bos-msg muted">Unlock requires ≥ {}%.</div>"#,
                ),
                score.percent(),
                hint_strip(score),
                threshold
            )
        }
    }
}

/// One marker per position: step number plus ✓ when that position is right.
pub fn hint_strip(score: &Score) -> String {
    score
        .marks
        .iter()
        .enumerate()
        .map(|(i, &ok)| {
            let (class, glyph) = if ok { ("yes", '✓') } else { ("no", '·') };
            format!(r#"<span class="bos-hint {class}">{:02}{glyph}</span>"#, i + 1)
        })
        .collect()
}
