//! Skill provenance classification.
//!
//! Every discovered skill carries a free-form source tag assigned by whatever
//! loader found it. That tag plus two path-containment tests (is the file
//! inside the project root? inside the user agent dir?) refine into the closed
//! [`SourceKind`] enum, which carries the fixed priority used when two sources
//! declare a skill with the same name.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Provenance category of a skill, ordered by resolution priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Project,
    ProjectSettings,
    ProjectPackage,
    User,
    UserSettings,
    UserPackage,
    Extension,
    Builtin,
    Unknown,
}

impl SourceKind {
    /// Fixed priority table; higher wins on name collision.
    #[must_use]
    pub fn priority(self) -> u32 {
        match self {
            Self::Project => 700,
            Self::ProjectSettings => 650,
            Self::ProjectPackage => 600,
            Self::User => 300,
            Self::UserSettings => 250,
            Self::UserPackage => 200,
            Self::Extension => 150,
            Self::Builtin => 100,
            Self::Unknown => 0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::ProjectSettings => "project-settings",
            Self::ProjectPackage => "project-package",
            Self::User => "user",
            Self::UserSettings => "user-settings",
            Self::UserPackage => "user-package",
            Self::Extension => "extension",
            Self::Builtin => "builtin",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Refine a raw source tag into a [`SourceKind`].
///
/// `project_root` is the working directory the resolution ran against and
/// `user_dir` is the user-level agent directory (normally `~/.skilldex`),
/// absent when no home directory is known. Tags that assert a scope the path
/// does not actually live in fall back to containment alone, and ultimately
/// to `Unknown`.
#[must_use]
pub fn classify(
    raw_tag: Option<&str>,
    file_path: &Path,
    project_root: &Path,
    user_dir: Option<&Path>,
) -> SourceKind {
    let in_project = path_within(file_path, project_root);
    let in_user = user_dir.is_some_and(|dir| path_within(file_path, dir));

    match raw_tag {
        Some("extension") => SourceKind::Extension,
        Some("builtin") => SourceKind::Builtin,
        Some("settings") if in_project => SourceKind::ProjectSettings,
        Some("settings") if in_user => SourceKind::UserSettings,
        Some("settings") => SourceKind::Unknown,
        Some("package") if in_project => SourceKind::ProjectPackage,
        Some("package") if in_user => SourceKind::UserPackage,
        Some("package") => SourceKind::Unknown,
        // `project`/`user` tags and unrecognized or absent tags all resolve
        // by containment, tried project-first.
        _ if in_project => SourceKind::Project,
        _ if in_user => SourceKind::User,
        _ => SourceKind::Unknown,
    }
}

/// Lexical containment test: `path` equals `dir` or is a strict descendant.
///
/// Both sides are normalized (`.` dropped, `..` collapsed) before comparison,
/// so a path that escapes through parent segments is not "within".
#[must_use]
pub fn path_within(path: &Path, dir: &Path) -> bool {
    let dir = normalize(dir);
    if dir.as_os_str().is_empty() {
        return false;
    }
    normalize(path).starts_with(dir)
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}
