//! skilldex - layered skill resolution and caching.
//!
//! Skills are named, reusable Markdown fragments injected into an agent's
//! task description. This crate discovers them across ranked sources
//! (project, user, settings-declared, package-declared, extension, builtin),
//! merges name collisions by source priority, and serves parsed content
//! through a pair of caches. See [`resolver`] for the core pipeline.

pub mod app;
pub mod cli;
pub mod error;
pub mod resolver;
pub mod test_utils;

pub use error::{Result, SkillError};
pub use resolver::{
    ResolveOutcome, ResolvedSkill, SkillResolver, SkillSelection, SourceKind,
    build_skill_injection, normalize_skill_input,
};
