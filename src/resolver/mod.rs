//! Layered skill resolution.
//!
//! Skills are named Markdown fragments discovered from ranked sources:
//! project files beat settings-declared directories beat package-declared
//! directories, project scope beats user scope, and extension/builtin skills
//! sit at the bottom. The pipeline runs PathCollector → raw scan → source
//! classification → priority merge, with two caches in front of the
//! filesystem: a TTL-boxed directory index and an mtime-validated content
//! cache.
//!
//! Everything here is synchronous and single-threaded; [`SkillResolver`] owns
//! all cache state and every operation takes `&mut self`.

pub mod content;
pub mod index;
pub mod input;
pub mod merge;
pub mod paths;
pub mod scan;
pub mod source;

use std::path::Path;
use std::time::Duration;

use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

pub use content::{ContentCache, ResolvedSkill, strip_frontmatter};
pub use index::DirectoryIndexCache;
pub use input::{SkillInput, SkillSelection, normalize_skill_input};
pub use merge::{IndexedSkillEntry, merge_candidates};
pub use paths::{PathCollector, SearchPath};
pub use scan::{FsScanner, RawSkill, SkillScanner};
pub use source::{SourceKind, classify, path_within};

/// Outcome of a [`SkillResolver::resolve`] call.
///
/// Requested names that match no index entry, or whose file has become
/// unreadable, land in `missing`; nothing in resolution is a hard error.
#[derive(Debug, Default, Serialize)]
pub struct ResolveOutcome {
    pub resolved: Vec<ResolvedSkill>,
    pub missing: Vec<String>,
}

/// Listing row for [`SkillResolver::discover`].
#[derive(Debug, Clone, Serialize)]
pub struct SkillSummary {
    pub name: String,
    pub source: SourceKind,
    pub description: Option<String>,
}

/// Facade over the whole pipeline, owning both caches and the scanner.
pub struct SkillResolver {
    collector: PathCollector,
    scanner: Box<dyn SkillScanner>,
    index: DirectoryIndexCache,
    content: ContentCache,
}

impl Default for SkillResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            collector: PathCollector::new(),
            scanner: Box::new(FsScanner::new()),
            index: DirectoryIndexCache::new(),
            content: ContentCache::new(),
        }
    }

    /// Resolver rooted at an explicit home directory instead of the real one.
    #[must_use]
    pub fn with_home(home: impl AsRef<Path>) -> Self {
        Self {
            collector: PathCollector::with_home(home.as_ref()),
            scanner: Box::new(FsScanner::with_home(home.as_ref())),
            index: DirectoryIndexCache::new(),
            content: ContentCache::new(),
        }
    }

    /// Swap in a custom scanner (tests use an in-memory one).
    #[must_use]
    pub fn with_scanner(scanner: Box<dyn SkillScanner>) -> Self {
        Self {
            collector: PathCollector::new(),
            scanner,
            index: DirectoryIndexCache::new(),
            content: ContentCache::new(),
        }
    }

    /// Override the index TTL (builder style).
    #[must_use]
    pub fn index_ttl(mut self, ttl: Duration) -> Self {
        self.index = DirectoryIndexCache::with_ttl(ttl);
        self
    }

    /// Resolve each requested name against the (possibly cached) index.
    ///
    /// Names are trimmed and blanks skipped. Duplicate requests are each
    /// processed independently and may yield duplicate resolved entries.
    pub fn resolve<S: AsRef<str>>(&mut self, names: &[S], cwd: &Path) -> ResolveOutcome {
        let Self {
            collector,
            scanner,
            index,
            content,
        } = self;

        let entries = index.entries(cwd, || build_index(collector, scanner.as_ref(), cwd));
        let by_name: std::collections::HashMap<&str, &IndexedSkillEntry> =
            entries.iter().map(|e| (e.name.as_str(), e)).collect();

        let mut outcome = ResolveOutcome::default();
        for requested in names {
            let requested = requested.as_ref().trim();
            if requested.is_empty() {
                continue;
            }
            let Some(entry) = by_name.get(requested) else {
                debug!(name = requested, "skill not in index");
                outcome.missing.push(requested.to_string());
                continue;
            };
            match content.read_skill(&entry.name, &entry.file_path, entry.source) {
                Some(skill) => outcome.resolved.push(skill),
                None => {
                    debug!(name = requested, path = %entry.file_path.display(), "skill file unreadable");
                    outcome.missing.push(requested.to_string());
                }
            }
        }
        outcome
    }

    /// Full index listing, sorted lexicographically by name.
    pub fn discover(&mut self, cwd: &Path) -> Vec<SkillSummary> {
        let Self {
            collector,
            scanner,
            index,
            ..
        } = self;

        let entries = index.entries(cwd, || build_index(collector, scanner.as_ref(), cwd));
        let mut summaries: Vec<SkillSummary> = entries
            .iter()
            .map(|e| SkillSummary {
                name: e.name.clone(),
                source: e.source,
                description: e.description.clone(),
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }

    /// The search paths a resolution for `cwd` would visit, in scan order.
    #[must_use]
    pub fn search_paths(&self, cwd: &Path) -> Vec<SearchPath> {
        self.collector.collect(cwd)
    }

    /// Drop both caches; the next access recomputes everything from disk.
    pub fn clear_cache(&mut self) {
        self.index.clear();
        self.content.clear();
    }
}

/// One full index build: collect paths, scan, classify, merge.
fn build_index(
    collector: &PathCollector,
    scanner: &dyn SkillScanner,
    cwd: &Path,
) -> Vec<IndexedSkillEntry> {
    let search_paths = collector.collect(cwd);
    // The collector already placed the defaults, so the scanner must not
    // add its own.
    let raw = scanner.scan(cwd, &search_paths, false);
    let user_dir = collector.user_dir();

    let candidates = raw
        .into_iter()
        .map(|skill| IndexedSkillEntry {
            source: classify(
                skill.source.as_deref(),
                &skill.file_path,
                cwd,
                user_dir.as_deref(),
            ),
            name: skill.name,
            file_path: skill.file_path,
            description: skill.description,
            order: skill.order,
        })
        .collect();
    merge_candidates(candidates)
}

/// Render resolved skills as injection blocks.
///
/// Each skill becomes `<skill name="NAME">\nCONTENT\n</skill>`; blocks are
/// joined by a blank line. Empty input renders as the empty string.
#[must_use]
pub fn build_skill_injection(skills: &[ResolvedSkill]) -> String {
    skills
        .iter()
        .map(|skill| {
            format!(
                "<skill name=\"{}\">\n{}\n</skill>",
                skill.name, skill.content
            )
        })
        .join("\n\n")
}
