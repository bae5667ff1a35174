//! Requested-skill input normalization.
//!
//! Callers configure skills as a bool, a comma-separated string, or a list,
//! and may omit the field entirely. The three outcomes are deliberately
//! distinct: an explicit `false` opts out, absence (or `true`) means "use the
//! defaults", and anything else names specific skills.

use itertools::Itertools;
use serde::Deserialize;

/// Loosely-typed skill configuration as it appears in config files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SkillInput {
    Toggle(bool),
    Csv(String),
    List(Vec<String>),
}

/// Normalized selection. `Disabled` and `Defaults` are different signals and
/// callers must treat them differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillSelection {
    /// Explicit opt-out (`false`).
    Disabled,
    /// Use defaults (`true` or field absent).
    Defaults,
    /// Explicit skill names, trimmed, deduplicated, first-seen order.
    Named(Vec<String>),
}

#[must_use]
pub fn normalize_skill_input(input: Option<&SkillInput>) -> SkillSelection {
    match input {
        None | Some(SkillInput::Toggle(true)) => SkillSelection::Defaults,
        Some(SkillInput::Toggle(false)) => SkillSelection::Disabled,
        Some(SkillInput::Csv(raw)) => {
            SkillSelection::Named(clean_names(raw.split(',').map(str::to_string)))
        }
        Some(SkillInput::List(items)) => SkillSelection::Named(clean_names(items.iter().cloned())),
    }
}

fn clean_names(names: impl Iterator<Item = String>) -> Vec<String> {
    names
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unique()
        .collect()
}
