//! skilldex resolve - Resolve named skills for the working directory

use clap::Args;

use crate::app::AppContext;
use crate::error::{Result, SkillError};
use crate::resolver::build_skill_injection;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Skill names to resolve (comma-free; repeat for multiple)
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Print the injection block instead of a summary
    #[arg(long)]
    pub inject: bool,

    /// Fail when any requested skill is missing
    #[arg(long)]
    pub strict: bool,
}

pub fn run(ctx: &mut AppContext, args: &ResolveArgs) -> Result<()> {
    let cwd = ctx.cwd.clone();
    let outcome = ctx.resolver.resolve(&args.names, &cwd);

    if args.strict && !outcome.missing.is_empty() {
        return Err(SkillError::InvalidSkill(format!(
            "missing skills: {}",
            outcome.missing.join(", ")
        )));
    }

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if args.inject {
        let block = build_skill_injection(&outcome.resolved);
        if !block.is_empty() {
            println!("{block}");
        }
    } else {
        for skill in &outcome.resolved {
            println!("{}  [{}]  {}", skill.name, skill.source, skill.path.display());
        }
    }

    for name in &outcome.missing {
        eprintln!("missing: {name}");
    }
    Ok(())
}
