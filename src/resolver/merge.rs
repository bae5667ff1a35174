//! Priority merge of same-named skill candidates.
//!
//! Multiple sources may declare a skill with the same name; exactly one entry
//! per name survives into the index. The winner is the candidate whose
//! [`SourceKind`] carries the higher priority; at equal priority the earlier
//! discovery wins. The merged list comes back in the winners' original
//! discovery order, not priority order.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use super::source::SourceKind;

/// One post-merge index record; names are unique within an index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexedSkillEntry {
    pub name: String,
    pub file_path: PathBuf,
    pub source: SourceKind,
    pub description: Option<String>,
    /// Discovery order of the winning candidate.
    pub order: u64,
}

/// Deduplicate classified candidates by name.
#[must_use]
pub fn merge_candidates(candidates: Vec<IndexedSkillEntry>) -> Vec<IndexedSkillEntry> {
    let mut winners: HashMap<String, IndexedSkillEntry> = HashMap::new();

    for candidate in candidates {
        let wins = match winners.get(&candidate.name) {
            Some(current) => outranks(&candidate, current),
            None => true,
        };
        if wins {
            winners.insert(candidate.name.clone(), candidate);
        }
    }

    let mut merged: Vec<IndexedSkillEntry> = winners.into_values().collect();
    merged.sort_by_key(|entry| entry.order);
    merged
}

/// Strictly-better test: higher priority, or equal priority found earlier.
fn outranks(challenger: &IndexedSkillEntry, incumbent: &IndexedSkillEntry) -> bool {
    let (cp, ip) = (challenger.source.priority(), incumbent.source.priority());
    cp > ip || (cp == ip && challenger.order < incumbent.order)
}
