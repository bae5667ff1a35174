//! Raw skill discovery.
//!
//! [`SkillScanner`] is the seam between the resolution pipeline and whatever
//! actually enumerates skills on disk; tests swap in an in-memory impl. The
//! shipped [`FsScanner`] understands two layouts inside a search directory:
//! a subdirectory holding a `SKILL.md`, or a flat `*.md` file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use super::content::split_frontmatter;
use super::paths::{CONFIG_DIR, SKILLS_DIR, SearchPath};

/// Canonical per-skill file name for the directory layout.
pub const SKILL_FILE: &str = "SKILL.md";

/// A skill as found on disk, before provenance refinement and merging.
#[derive(Debug, Clone)]
pub struct RawSkill {
    pub name: String,
    pub file_path: PathBuf,
    pub description: Option<String>,
    /// Free-form origin tag stamped by the scanner; validated downstream.
    pub source: Option<String>,
    /// Monotonic position in the scan, used as the deterministic tie-break.
    pub order: u64,
}

/// Enumerates raw skills beneath an explicit list of search paths.
pub trait SkillScanner {
    /// Scan `search_paths` in order. When `include_defaults` is set the
    /// scanner prepends its own built-in default directories for `cwd`.
    fn scan(
        &self,
        cwd: &Path,
        search_paths: &[SearchPath],
        include_defaults: bool,
    ) -> Vec<RawSkill>;
}

/// Frontmatter fields the scanner cares about; everything else is ignored.
#[derive(Debug, Default, Deserialize)]
struct SkillMeta {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Filesystem-backed scanner.
#[derive(Debug, Clone, Default)]
pub struct FsScanner {
    home_override: Option<PathBuf>,
}

impl FsScanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home_override: Some(home.into()),
        }
    }

    fn default_paths(&self, cwd: &Path) -> Vec<SearchPath> {
        let mut defaults = vec![SearchPath {
            path: cwd.join(CONFIG_DIR).join(SKILLS_DIR),
            origin: "project",
        }];
        if let Some(home) = self.home_override.clone().or_else(dirs::home_dir) {
            defaults.push(SearchPath {
                path: home.join(CONFIG_DIR).join(SKILLS_DIR),
                origin: "user",
            });
        }
        defaults
    }
}

impl SkillScanner for FsScanner {
    fn scan(
        &self,
        cwd: &Path,
        search_paths: &[SearchPath],
        include_defaults: bool,
    ) -> Vec<RawSkill> {
        let mut all_paths = Vec::new();
        if include_defaults {
            all_paths.extend(self.default_paths(cwd));
        }
        all_paths.extend_from_slice(search_paths);

        let mut skills = Vec::new();
        let mut order = 0u64;

        for search in &all_paths {
            // One level deep only: a skill is a direct subdirectory holding a
            // SKILL.md or a flat *.md file. Unreadable roots yield no entries.
            let walker = WalkDir::new(&search.path)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name();

            for entry in walker.into_iter().filter_map(std::result::Result::ok) {
                let path = entry.into_path();
                let skill = if path.is_dir() {
                    scan_skill_file(&path.join(SKILL_FILE), &path)
                } else if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("md")) {
                    scan_skill_file(&path, &path)
                } else {
                    None
                };

                if let Some((name, description, file_path)) = skill {
                    skills.push(RawSkill {
                        name,
                        file_path,
                        description,
                        source: Some(search.origin.to_string()),
                        order,
                    });
                    order += 1;
                }
            }
        }

        debug!(count = skills.len(), "raw skill scan complete");
        skills
    }
}

/// Read one candidate skill file, deriving its name from frontmatter or from
/// `name_source` (the skill directory, or the file itself for flat layout).
fn scan_skill_file(file: &Path, name_source: &Path) -> Option<(String, Option<String>, PathBuf)> {
    let content = fs::read_to_string(file).ok()?;
    let meta = split_frontmatter(&content)
        .and_then(|(yaml, _)| serde_yaml::from_str::<SkillMeta>(yaml).ok())
        .unwrap_or_default();

    let fallback = name_source.file_stem()?.to_str()?.to_string();
    let name = meta.name.unwrap_or(fallback);
    Some((name, meta.description, file.to_path_buf()))
}
