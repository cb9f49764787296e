use crate::api::types::Code;
use crate::core::repository::NarrativeStateRepository;
use crate::core::store::StoreError;

/// Record that the reader followed the choice for `code`.
pub fn mark_visited(repo: &dyn NarrativeStateRepository, code: Code) -> Result<(), StoreError> {
    let mut visited = repo.visited();
    visited.insert(code);
    repo.set_visited(&visited)
}

/// For each choice element (by its declared code), whether it should carry
/// the visited marker.
pub fn visited_flags(repo: &dyn NarrativeStateRepository, codes: &[Option<Code>]) -> Vec<bool> {
    let visited = repo.visited();
    codes
        .iter()
        .map(|code| code.is_some_and(|c| visited.contains(c)))
        .collect()
}
