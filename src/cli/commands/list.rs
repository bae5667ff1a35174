//! skilldex list - List all skills visible from the working directory

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by source kind: project, user, project-settings, ...
    #[arg(long)]
    pub source: Option<String>,
}

pub fn run(ctx: &mut AppContext, args: &ListArgs) -> Result<()> {
    let cwd = ctx.cwd.clone();
    let skills = ctx.resolver.discover(&cwd);
    debug!(count = skills.len(), "discovered skills");

    let skills: Vec<_> = match &args.source {
        Some(filter) => skills
            .into_iter()
            .filter(|s| s.source.as_str() == filter)
            .collect(),
        None => skills,
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&skills)?);
        return Ok(());
    }

    if skills.is_empty() {
        println!("No skills found.");
        return Ok(());
    }

    for skill in &skills {
        match &skill.description {
            Some(desc) => println!("{}  [{}]  {}", skill.name, skill.source, desc),
            None => println!("{}  [{}]", skill.name, skill.source),
        }
    }
    Ok(())
}
