//! Ordering puzzle: scores a guess against the canonical order and drives
//! the failed-attempt counter.
//!
//! States, keyed on the persisted attempt count after a submission:
//!   score >= threshold          -> Unlocked (count untouched)
//!   fail, count < hint_after    -> TryAgain
//!   fail, count >= hint_after   -> Hinted (per-position correctness only)

use crate::api::config::PuzzleConfig;
use crate::api::types::{normalize_code, FRAGMENT_COUNT, CANONICAL_ORDER};
use crate::core::repository::NarrativeStateRepository;
use crate::systems::reconstruct::{display_html, reconstruct};

/// Positional comparison of one guess with the canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Positions whose guess matched.
    pub correct: usize,
    /// Per-position match, step 1 first.
    pub marks: [bool; FRAGMENT_COUNT],
}

impl Score {
    /// Fraction of positions guessed correctly.
    pub fn accuracy(&self) -> f64 {
        self.correct as f64 / FRAGMENT_COUNT as f64
    }

    /// Accuracy as a whole percentage, rounded to nearest.
    pub fn percent(&self) -> u32 {
        (self.accuracy() * 100.0).round() as u32
    }
}

/// Score raw input values. Each value is normalized; invalid or blank
/// entries never match, duplicates are scored independently, missing
/// trailing inputs count as blank and extra ones are ignored.
pub fn score_guess<S: AsRef<str>>(inputs: &[S]) -> Score {
    let mut marks = [false; FRAGMENT_COUNT];
    for (i, expected) in CANONICAL_ORDER.iter().enumerate() {
        let guess = inputs.get(i).map(|s| normalize_code(s.as_ref())).unwrap_or_default();
        marks[i] = guess == expected.to_string();
    }
    Score {
        correct: marks.iter().filter(|m| **m).count(),
        marks,
    }
}

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Unlocked {
        score: Score,
        /// Full reconstructed narrative as plain text.
        narrative: String,
    },
    TryAgain {
        score: Score,
        /// Failed attempts so far, this one included.
        attempt: u32,
        /// Failures before hints appear.
        limit: u32,
    },
    Hinted {
        score: Score,
        attempt: u32,
    },
}

impl Verdict {
    pub fn score(&self) -> &Score {
        match self {
            Verdict::Unlocked { score, .. }
            | Verdict::TryAgain { score, .. }
            | Verdict::Hinted { score, .. } => score,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, Verdict::Unlocked { .. })
    }

    /// The narrative ready for display, if unlocked.
    pub fn narrative_html(&self) -> Option<String> {
        match self {
            Verdict::Unlocked { narrative, .. } => Some(display_html(narrative)),
            _ => None,
        }
    }
}

pub struct PuzzleEngine {
    config: PuzzleConfig,
}

impl PuzzleEngine {
    pub fn new(config: PuzzleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Evaluate a submission. Failed submissions bump the persisted
    /// attempt counter; a failed write does not change the verdict.
    pub fn submit<S: AsRef<str>>(&self, inputs: &[S], repo: &dyn NarrativeStateRepository) -> Verdict {
        let score = score_guess(inputs);

        if score.accuracy() >= self.config.unlock_threshold {
            log::info!("puzzle: unlocked at {}%", score.percent());
            return Verdict::Unlocked {
                score,
                narrative: reconstruct(&repo.fragments()),
            };
        }

        let attempts = repo.attempts().incremented();
        if let Err(err) = repo.set_attempts(attempts) {
            log::warn!("puzzle: could not save attempt count: {err}");
        }
        let attempt = attempts.count();
        log::debug!("puzzle: attempt {attempt} failed at {}%", score.percent());

        if attempt < self.config.hint_after {
            Verdict::TryAgain {
                score,
                attempt,
                limit: self.config.hint_after,
            }
        } else {
            Verdict::Hinted { score, attempt }
        }
    }
}

impl Default for PuzzleEngine {
    fn default() -> Self {
        Self::new(PuzzleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::StoreKeys;
    use crate::api::types::Code;
    use crate::components::state::AttemptCounter;
    use crate::core::repository::StoreRepository;
    use crate::core::store::MemoryStorage;

    fn canonical() -> Vec<String> {
        CANONICAL_ORDER.iter().map(|c| c.to_string()).collect()
    }

    fn repo() -> StoreRepository<MemoryStorage> {
        StoreRepository::new(MemoryStorage::new(), StoreKeys::default())
    }

    #[test]
    fn unlock_boundary_is_eight_correct() {
        let mut guess = canonical();
        for slot in guess.iter_mut().take(5) {
            *slot = String::new();
        }
        let seven = score_guess(&guess);
        assert_eq!(seven.correct, 7);
        assert!(seven.accuracy() < 0.60);

        let mut guess = canonical();
        for slot in guess.iter_mut().take(4) {
            *slot = String::new();
        }
        let eight = score_guess(&guess);
        assert_eq!(eight.correct, 8);
        assert!(eight.accuracy() >= 0.60);
    }

    #[test]
    fn inputs_are_normalized() {
        let guess = ["5", " 10 ", "2", "07", "11", "4", "12", "8", "6", "1", "9", "3"];
        assert_eq!(score_guess(&guess).correct, 12);
    }

    #[test]
    fn invalid_and_duplicate_entries() {
        let guess = ["05", "05", "005", "x", "", "04", "04", "04", "04", "04", "04", "04"];
        let score = score_guess(&guess);
        assert_eq!(score.correct, 2);
        assert!(score.marks[0]);
        assert!(score.marks[5]);
        assert!(!score.marks[1]);
    }

    #[test]
    fn short_input_counts_as_blank() {
        let score = score_guess(&["05", "10"]);
        assert_eq!(score.correct, 2);
    }

    #[test]
    fn perfect_guess_unlocks_without_touching_attempts() {
        let repo = repo();
        repo.set_attempts(AttemptCounter::new(5)).unwrap();
        let verdict = PuzzleEngine::default().submit(&canonical(), &repo);
        assert!(verdict.is_unlocked());
        assert_eq!(verdict.score().percent(), 100);
        assert_eq!(repo.attempts().count(), 5);
    }

    #[test]
    fn hints_only_from_third_failure() {
        let repo = repo();
        let engine = PuzzleEngine::default();
        let blank = vec![String::new(); 12];

        let first = engine.submit(&blank, &repo);
        assert!(matches!(first, Verdict::TryAgain { attempt: 1, limit: 3, .. }));
        let second = engine.submit(&blank, &repo);
        assert!(matches!(second, Verdict::TryAgain { attempt: 2, .. }));
        let third = engine.submit(&blank, &repo);
        assert!(matches!(third, Verdict::Hinted { attempt: 3, .. }));
        let fourth = engine.submit(&blank, &repo);
        assert!(matches!(fourth, Verdict::Hinted { attempt: 4, .. }));
        assert_eq!(repo.attempts().count(), 4);
    }

    #[test]
    fn unlock_is_repeatable() {
        let repo = repo();
        let engine = PuzzleEngine::default();
        let a = engine.submit(&canonical(), &repo);
        let b = engine.submit(&canonical(), &repo);
        assert_eq!(a, b);
    }

    #[test]
    fn swapped_pair_still_unlocks_with_reconstruction() {
        let repo = repo();
        let mut frags = repo.fragments();
        frags.insert(Code::from_number(5).unwrap(), "Once.");
        repo.set_fragments(&frags).unwrap();

        let mut guess = canonical();
        guess.swap(2, 8);
        let verdict = PuzzleEngine::default().submit(&guess, &repo);
        assert_eq!(verdict.score().correct, 10);
        assert_eq!(verdict.score().percent(), 83);
        match verdict {
            Verdict::Unlocked { narrative, .. } => assert!(narrative.starts_with("Once.\n\n[MISSING 10")),
            other => panic!("expected unlock, got {other:?}"),
        }
    }

    #[test]
    fn failed_counter_write_still_reports() {
        let backend = MemoryStorage::new();
        backend.set_reject_writes(true);
        let repo = StoreRepository::new(backend, StoreKeys::default());
        let verdict = PuzzleEngine::default().submit(&[""; 12], &repo);
        assert!(matches!(verdict, Verdict::TryAgain { attempt: 1, .. }));
        assert_eq!(repo.attempts().count(), 0);
    }
}
