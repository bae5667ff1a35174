//! skilldex paths - Show the search paths a resolution would visit

use clap::Args;
use serde_json::json;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Only show paths that exist on disk
    #[arg(long)]
    pub existing: bool,
}

pub fn run(ctx: &mut AppContext, args: &PathsArgs) -> Result<()> {
    let mut paths = ctx.resolver.search_paths(&ctx.cwd);
    if args.existing {
        paths.retain(|p| p.path.is_dir());
    }

    if ctx.json {
        let rows: Vec<_> = paths
            .iter()
            .map(|p| json!({"path": p.path, "origin": p.origin}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for p in &paths {
        println!("{}  [{}]", p.path.display(), p.origin);
    }
    Ok(())
}
