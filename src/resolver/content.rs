//! Skill content loading and caching.
//!
//! Loaded file contents are cached per path and validated by the file's
//! modification time: a matching mtime returns the stored skill without
//! touching the file body, a changed mtime re-reads and refreshes the entry
//! in place. The cache is capacity-bounded with strict FIFO eviction: the
//! earliest-ever-inserted path goes first, and neither reads nor in-place
//! refreshes reorder the queue.
//!
//! Every filesystem failure in here means "skill not found", never an error.

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use tracing::debug;

use super::source::SourceKind;

/// Maximum number of cached skill bodies.
const DEFAULT_CAPACITY: usize = 50;

/// A skill ready for injection: frontmatter stripped, provenance attached.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSkill {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
    pub source: SourceKind,
}

#[derive(Debug, Clone)]
struct ContentEntry {
    mtime: SystemTime,
    skill: ResolvedSkill,
}

/// Path-keyed, mtime-validated content cache.
#[derive(Debug)]
pub struct ContentCache {
    entries: HashMap<PathBuf, ContentEntry>,
    insertion: VecDeque<PathBuf>,
    capacity: usize,
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            insertion: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Load a skill's content, through the cache.
    ///
    /// Returns `None` whenever the file cannot be stat'd or read.
    pub fn read_skill(
        &mut self,
        name: &str,
        path: &Path,
        source: SourceKind,
    ) -> Option<ResolvedSkill> {
        let mtime = fs::metadata(path).ok()?.modified().ok()?;

        if let Some(entry) = self.entries.get(path) {
            if entry.mtime == mtime {
                debug!(path = %path.display(), "content cache hit");
                return Some(entry.skill.clone());
            }
        }

        let raw = fs::read_to_string(path).ok()?;
        let skill = ResolvedSkill {
            name: name.to_string(),
            path: path.to_path_buf(),
            content: strip_frontmatter(&raw),
            source,
        };
        self.insert(path.to_path_buf(), ContentEntry {
            mtime,
            skill: skill.clone(),
        });
        Some(skill)
    }

    /// Insert or refresh an entry, evicting the oldest insertion at capacity.
    ///
    /// Refreshing an existing path keeps its original queue position.
    fn insert(&mut self, path: PathBuf, entry: ContentEntry) {
        if self.entries.insert(path.clone(), entry).is_none() {
            self.insertion.push_back(path);
            if self.insertion.len() > self.capacity {
                if let Some(oldest) = self.insertion.pop_front() {
                    debug!(path = %oldest.display(), "evicting oldest content entry");
                    self.entries.remove(&oldest);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a leading frontmatter block off `content`.
///
/// The block opens with a first line of exactly `---` and closes at the next
/// line *beginning* with `---` strictly after it. Returns the YAML between
/// the markers and the body after the closing line, or `None` when no
/// complete block exists.
pub(crate) fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let first_line_end = content.find('\n')?;
    if content[..first_line_end].trim_end_matches('\r') != "---" {
        return None;
    }

    let rest = &content[first_line_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.starts_with("---") {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// Strip at most one leading frontmatter block and trim the remainder.
///
/// Content without a complete block is returned unchanged.
#[must_use]
pub fn strip_frontmatter(content: &str) -> String {
    match split_frontmatter(content) {
        Some((_, body)) => body.trim().to_string(),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn strips_simple_frontmatter() {
        assert_eq!(strip_frontmatter("---\nkey: v\n---\nBODY"), "BODY");
    }

    #[test]
    fn content_without_frontmatter_is_unchanged() {
        assert_eq!(strip_frontmatter("plain text\n"), "plain text\n");
        assert_eq!(strip_frontmatter(" ---\nnot at start"), " ---\nnot at start");
    }

    #[test]
    fn unterminated_frontmatter_is_not_stripped() {
        let s = "---\nkey: v\nno closing marker";
        assert_eq!(strip_frontmatter(s), s);
    }

    #[test]
    fn closing_marker_may_carry_trailing_text() {
        assert_eq!(strip_frontmatter("---\nkey: v\n--- extra\nBODY\n"), "BODY");
    }

    #[test]
    fn only_the_first_block_is_stripped() {
        assert_eq!(
            strip_frontmatter("---\na: 1\n---\ntext\n---\nmore"),
            "text\n---\nmore"
        );
    }

    #[test]
    fn empty_frontmatter_block() {
        assert_eq!(strip_frontmatter("---\n---\nBODY"), "BODY");
    }

    #[test]
    fn read_skill_missing_file_is_none() {
        let mut cache = ContentCache::new();
        let got = cache.read_skill("x", Path::new("/no/such/file.md"), SourceKind::Project);
        assert!(got.is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn read_skill_caches_by_mtime() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.md");
        fs::write(&file, "---\nd: x\n---\nfirst").unwrap();

        let mut cache = ContentCache::new();
        let first = cache.read_skill("a", &file, SourceKind::User).unwrap();
        assert_eq!(first.content, "first");

        let second = cache.read_skill("a", &file, SourceKind::User).unwrap();
        assert_eq!(second.content, "first");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_mtime_refreshes_in_place() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.md");
        fs::write(&file, "old").unwrap();

        let mut cache = ContentCache::new();
        assert_eq!(
            cache.read_skill("a", &file, SourceKind::User).unwrap().content,
            "old"
        );

        fs::write(&file, "new").unwrap();
        bump_mtime(&file);
        let refreshed = cache.read_skill("a", &file, SourceKind::User).unwrap();
        assert_eq!(refreshed.content, "new");
        assert_eq!(cache.len(), 1);
    }

    /// Force an mtime visibly different from the previous write, independent
    /// of filesystem timestamp granularity.
    fn bump_mtime(path: &Path) {
        let handle = fs::File::options().write(true).open(path).unwrap();
        handle
            .set_modified(SystemTime::now() + std::time::Duration::from_secs(5))
            .unwrap();
    }

    #[test]
    fn eviction_is_strictly_fifo() {
        let dir = TempDir::new().unwrap();
        let mut cache = ContentCache::with_capacity(2);

        let mut path_for = |name: &str| {
            let p = dir.path().join(format!("{name}.md"));
            fs::write(&p, name).unwrap();
            p
        };
        let a = path_for("a");
        let b = path_for("b");
        let c = path_for("c");

        cache.read_skill("a", &a, SourceKind::Project);
        cache.read_skill("b", &b, SourceKind::Project);
        // Re-access `a`; FIFO must NOT treat this as a promotion.
        cache.read_skill("a", &a, SourceKind::Project);
        cache.read_skill("c", &c, SourceKind::Project);

        assert_eq!(cache.len(), 2);
        assert!(!cache.entries.contains_key(&a), "earliest insert evicted");
        assert!(cache.entries.contains_key(&b));
        assert!(cache.entries.contains_key(&c));
    }

    #[test]
    fn clear_empties_the_cache() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.md");
        fs::write(&file, "x").unwrap();

        let mut cache = ContentCache::new();
        cache.read_skill("a", &file, SourceKind::Project);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
