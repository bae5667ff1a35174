//! Skill search path collection.
//!
//! Builds the ordered set of directories a scan will visit: the two built-in
//! defaults, then directories declared by package manifests, then directories
//! declared by settings files. Order matters downstream (it fixes discovery
//! order, which breaks priority ties), so collection is deterministic and
//! duplicates keep their first position.
//!
//! Every external input here is optional by contract: a missing, unreadable,
//! or malformed manifest or settings file contributes zero paths and never
//! aborts the collection.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

/// Project- and user-level config directory name.
pub const CONFIG_DIR: &str = ".skilldex";
/// Skills subdirectory inside a config directory.
pub const SKILLS_DIR: &str = "skills";
/// Settings file inside a config directory.
pub const SETTINGS_FILE: &str = "settings.json";
/// Package container directory scanned for skill-declaring packages.
pub const PACKAGE_CONTAINER: &str = "node_modules";
/// Manifest file read at each package root.
pub const PACKAGE_MANIFEST: &str = "package.json";
/// Manifest namespace holding the `skills` path list.
pub const MANIFEST_NAMESPACE: &str = "skilldex";
/// Leading character marking a scoped namespace directory inside a container.
const SCOPE_PREFIX: char = '@';

/// One directory to search for skills, tagged with the raw origin string the
/// scanner will stamp onto every skill found beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    pub path: PathBuf,
    pub origin: &'static str,
}

impl SearchPath {
    fn new(path: PathBuf, origin: &'static str) -> Self {
        Self { path, origin }
    }
}

/// Collects search paths for one working directory.
///
/// The user-level agent directory is derived from the home directory, which
/// tests inject via [`PathCollector::with_home`].
#[derive(Debug, Clone)]
pub struct PathCollector {
    home_override: Option<PathBuf>,
}

impl Default for PathCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl PathCollector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            home_override: None,
        }
    }

    #[must_use]
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home_override: Some(home.into()),
        }
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_override.clone().or_else(dirs::home_dir)
    }

    /// User-level agent directory (`~/.skilldex`), if a home dir is known.
    #[must_use]
    pub fn user_dir(&self) -> Option<PathBuf> {
        self.home_dir().map(|h| h.join(CONFIG_DIR))
    }

    /// Build the full, deduplicated search path list for `cwd`.
    #[must_use]
    pub fn collect(&self, cwd: &Path) -> Vec<SearchPath> {
        let project_dir = cwd.join(CONFIG_DIR);
        let user_dir = self.user_dir();

        let mut paths = Vec::new();

        // Fixed defaults, project before user.
        paths.push(SearchPath::new(project_dir.join(SKILLS_DIR), "project"));
        if let Some(ref user) = user_dir {
            paths.push(SearchPath::new(user.join(SKILLS_DIR), "user"));
        }

        // Package-declared directories, project container before user container.
        collect_package_paths(&cwd.join(PACKAGE_CONTAINER), &mut paths);
        if let Some(ref user) = user_dir {
            collect_package_paths(&user.join(PACKAGE_CONTAINER), &mut paths);
        }

        // Settings-declared directories, project before user.
        collect_settings_paths(
            &project_dir.join(SETTINGS_FILE),
            self.home_dir().as_deref(),
            &mut paths,
        );
        if let Some(ref user) = user_dir {
            collect_settings_paths(
                &user.join(SETTINGS_FILE),
                self.home_dir().as_deref(),
                &mut paths,
            );
        }

        dedup_first_wins(paths)
    }
}

/// Scan a package container for manifests declaring skill directories.
///
/// One level of `@scope` namespace directories is descended; anything deeper
/// is a package's own business.
fn collect_package_paths(container: &Path, out: &mut Vec<SearchPath>) {
    let Ok(entries) = fs::read_dir(container) else {
        return;
    };

    let mut package_roots = Vec::new();
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    for dir in dirs {
        let scoped = dir
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(SCOPE_PREFIX));
        if scoped {
            if let Ok(inner) = fs::read_dir(&dir) {
                let mut members: Vec<PathBuf> = inner
                    .filter_map(std::result::Result::ok)
                    .map(|e| e.path())
                    .filter(|p| p.is_dir())
                    .collect();
                members.sort();
                package_roots.extend(members);
            }
        } else {
            package_roots.push(dir);
        }
    }

    for root in package_roots {
        for declared in manifest_skill_paths(&root.join(PACKAGE_MANIFEST)) {
            out.push(SearchPath::new(root.join(declared), "package"));
        }
    }
}

/// Read a package manifest's declared skill paths; empty on any failure.
fn manifest_skill_paths(manifest: &Path) -> Vec<PathBuf> {
    let Ok(raw) = fs::read_to_string(manifest) else {
        return Vec::new();
    };
    let Ok(value) = serde_json::from_str::<Value>(&raw) else {
        debug!(path = %manifest.display(), "skipping unparseable package manifest");
        return Vec::new();
    };

    value
        .get(MANIFEST_NAMESPACE)
        .and_then(|ns| ns.get(SKILLS_DIR))
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(PathBuf::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Read a settings file's `skills` list and resolve each entry.
///
/// Entries starting with `~/` expand against the home directory; other
/// relative entries resolve against the settings file's own directory.
fn collect_settings_paths(settings: &Path, home: Option<&Path>, out: &mut Vec<SearchPath>) {
    let Ok(raw) = fs::read_to_string(settings) else {
        return;
    };
    let Ok(value) = serde_json::from_str::<Value>(&raw) else {
        debug!(path = %settings.display(), "skipping unparseable settings file");
        return;
    };

    let Some(entries) = value.get(SKILLS_DIR).and_then(Value::as_array) else {
        return;
    };
    let base = settings.parent().unwrap_or(Path::new("."));

    for entry in entries.iter().filter_map(Value::as_str) {
        let resolved = if let Some(rest) = entry.strip_prefix("~/") {
            match home {
                Some(home) => home.join(rest),
                None => continue,
            }
        } else {
            base.join(entry)
        };
        out.push(SearchPath::new(resolved, "settings"));
    }
}

/// Drop later duplicates, keeping the first occurrence's position and origin.
fn dedup_first_wins(paths: Vec<SearchPath>) -> Vec<SearchPath> {
    let mut seen = std::collections::HashSet::new();
    paths
        .into_iter()
        .filter(|sp| seen.insert(sp.path.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn defaults_come_first_in_fixed_order() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let collector = PathCollector::with_home(home.path());

        let paths = collector.collect(cwd.path());
        assert_eq!(paths[0].path, cwd.path().join(".skilldex/skills"));
        assert_eq!(paths[0].origin, "project");
        assert_eq!(paths[1].path, home.path().join(".skilldex/skills"));
        assert_eq!(paths[1].origin, "user");
    }

    #[test]
    fn package_manifest_paths_resolve_against_package_root() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let pkg = cwd.path().join("node_modules/toolkit");
        write(
            &pkg.join("package.json"),
            r#"{"name": "toolkit", "skilldex": {"skills": ["skills", "extra/more"]}}"#,
        );

        let paths = PathCollector::with_home(home.path()).collect(cwd.path());
        let declared: Vec<_> = paths.iter().filter(|p| p.origin == "package").collect();
        assert_eq!(declared.len(), 2);
        assert_eq!(declared[0].path, pkg.join("skills"));
        assert_eq!(declared[1].path, pkg.join("extra/more"));
    }

    #[test]
    fn scoped_namespace_packages_are_descended_one_level() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let pkg = cwd.path().join("node_modules/@acme/toolkit");
        write(
            &pkg.join("package.json"),
            r#"{"skilldex": {"skills": ["sk"]}}"#,
        );

        let paths = PathCollector::with_home(home.path()).collect(cwd.path());
        assert!(paths.iter().any(|p| p.path == pkg.join("sk")));
    }

    #[test]
    fn malformed_manifest_contributes_nothing() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        write(
            &cwd.path().join("node_modules/bad/package.json"),
            "{ not json",
        );

        let paths = PathCollector::with_home(home.path()).collect(cwd.path());
        assert!(paths.iter().all(|p| p.origin != "package"));
    }

    #[test]
    fn non_string_entries_are_ignored() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        write(
            &cwd.path().join(".skilldex/settings.json"),
            r#"{"skills": ["good", 42, null, {"x": 1}]}"#,
        );

        let paths = PathCollector::with_home(home.path()).collect(cwd.path());
        let settings: Vec<_> = paths.iter().filter(|p| p.origin == "settings").collect();
        assert_eq!(settings.len(), 1);
        assert_eq!(settings[0].path, cwd.path().join(".skilldex/good"));
    }

    #[test]
    fn settings_tilde_expands_to_home() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        write(
            &cwd.path().join(".skilldex/settings.json"),
            r#"{"skills": ["~/shared-skills"]}"#,
        );

        let paths = PathCollector::with_home(home.path()).collect(cwd.path());
        assert!(
            paths
                .iter()
                .any(|p| p.path == home.path().join("shared-skills"))
        );
    }

    #[test]
    fn duplicate_paths_collapse_to_first_occurrence() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        // Settings re-declares the default project skills dir.
        write(
            &cwd.path().join(".skilldex/settings.json"),
            r#"{"skills": ["skills"]}"#,
        );

        let paths = PathCollector::with_home(home.path()).collect(cwd.path());
        let project_skills = cwd.path().join(".skilldex/skills");
        let hits: Vec<_> = paths.iter().filter(|p| p.path == project_skills).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].origin, "project");
    }
}
