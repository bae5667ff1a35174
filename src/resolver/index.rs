//! Time-boxed directory index cache.
//!
//! A full index build walks every search directory, so the result is held in
//! a single slot keyed by working directory and reused while fresh. A slot is
//! fresh while the cwd matches and less than the TTL has elapsed since the
//! build; anything else (TTL expiry, cwd switch, explicit clear) forces a
//! wholesale recompute. Interleaving calls for different cwds therefore
//! thrashes the slot; that trade-off keeps the cache a single slot.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

use super::merge::IndexedSkillEntry;

/// How long one index build stays authoritative.
const DEFAULT_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug)]
struct IndexSlot {
    cwd: PathBuf,
    entries: Vec<IndexedSkillEntry>,
    refreshed_at: Instant,
}

/// Single-slot index cache.
#[derive(Debug)]
pub struct DirectoryIndexCache {
    slot: Option<IndexSlot>,
    ttl: Duration,
}

impl Default for DirectoryIndexCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryIndexCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { slot: None, ttl }
    }

    /// Return the index for `cwd`, rebuilding through `rebuild` when the slot
    /// is stale, for a different cwd, or empty.
    pub fn entries(
        &mut self,
        cwd: &Path,
        rebuild: impl FnOnce() -> Vec<IndexedSkillEntry>,
    ) -> &[IndexedSkillEntry] {
        let fresh = self.slot.as_ref().is_some_and(|slot| {
            slot.cwd == cwd && slot.refreshed_at.elapsed() < self.ttl
        });

        if fresh {
            debug!(cwd = %cwd.display(), "index cache hit");
        } else {
            let entries = rebuild();
            debug!(cwd = %cwd.display(), count = entries.len(), "index rebuilt");
            self.slot = Some(IndexSlot {
                cwd: cwd.to_path_buf(),
                entries,
                refreshed_at: Instant::now(),
            });
        }

        self.slot
            .as_ref()
            .map(|slot| slot.entries.as_slice())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::source::SourceKind;

    fn entries(names: &[&str]) -> Vec<IndexedSkillEntry> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| IndexedSkillEntry {
                name: (*name).to_string(),
                file_path: PathBuf::from(format!("/s/{name}.md")),
                source: SourceKind::Project,
                description: None,
                order: i as u64,
            })
            .collect()
    }

    #[test]
    fn fresh_slot_skips_rebuild() {
        let mut cache = DirectoryIndexCache::new();
        let cwd = Path::new("/work/app");

        cache.entries(cwd, || entries(&["a"]));
        let got = cache.entries(cwd, || panic!("rebuild must not run on a fresh slot"));
        assert_eq!(got.len(), 1);
    }

    #[test]
    fn cwd_switch_forces_rebuild() {
        let mut cache = DirectoryIndexCache::new();

        cache.entries(Path::new("/work/a"), || entries(&["a"]));
        let got = cache.entries(Path::new("/work/b"), || entries(&["b", "c"]));
        assert_eq!(got.len(), 2);

        // Switching back also recomputes; only one cwd is retained.
        let got = cache.entries(Path::new("/work/a"), || entries(&["a"]));
        assert_eq!(got.len(), 1);
    }

    #[test]
    fn expired_ttl_forces_rebuild() {
        let mut cache = DirectoryIndexCache::with_ttl(Duration::ZERO);
        let cwd = Path::new("/work/app");

        cache.entries(cwd, || entries(&["a"]));
        let got = cache.entries(cwd, || entries(&["a", "b"]));
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn clear_discards_the_slot() {
        let mut cache = DirectoryIndexCache::new();
        let cwd = Path::new("/work/app");

        cache.entries(cwd, || entries(&["a"]));
        cache.clear();

        let mut rebuilt = false;
        cache.entries(cwd, || {
            rebuilt = true;
            entries(&["a"])
        });
        assert!(rebuilt);
    }
}
