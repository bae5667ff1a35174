use std::path::PathBuf;

use crate::error::{Result, SkillError};
use crate::resolver::SkillResolver;

pub struct AppContext {
    pub cwd: PathBuf,
    pub resolver: SkillResolver,
    pub json: bool,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let cwd = match &cli.cwd {
            Some(dir) => {
                if !dir.is_dir() {
                    return Err(SkillError::Config(format!(
                        "working directory {} does not exist",
                        dir.display()
                    )));
                }
                dir.clone()
            }
            None => std::env::current_dir()?,
        };

        Ok(Self {
            cwd,
            resolver: SkillResolver::new(),
            json: cli.json,
            verbosity: cli.verbose,
        })
    }
}
