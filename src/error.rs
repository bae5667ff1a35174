//! Crate-wide error type.
//!
//! Resolution itself almost never fails: unreadable manifests, settings, and
//! skill files degrade to "this source contributes nothing" by contract. The
//! variants here cover the cases that do surface, mostly at the CLI boundary.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SkillError>;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid skill: {0}")]
    InvalidSkill(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
