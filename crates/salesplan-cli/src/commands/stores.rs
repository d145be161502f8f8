//! Stores command - print the store directory grouped for display.

use std::path::PathBuf;

use clap::Args;
use console::style;

use salesplan_core::models::store::{group_stores, sort_directory};
use salesplan_core::Store;

/// Arguments for the stores command.
#[derive(Args)]
pub struct StoresArgs {
    /// Store list (JSON array of {id, name, group})
    #[arg(required = true)]
    input: PathBuf,

    /// Print the sorted list as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: StoresArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let content = std::fs::read_to_string(&args.input)?;
    let mut stores: Vec<Store> = serde_json::from_str(&content)?;
    if let Some(store) = stores
        .iter()
        .find(|s| s.name.trim().is_empty() || s.group.trim().is_empty())
    {
        anyhow::bail!("Store {} is missing a name or group", store.id);
    }

    sort_directory(&mut stores);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stores)?);
        return Ok(());
    }

    for (group, members) in group_stores(&stores) {
        println!("{}", style(&group).bold());
        for store in members {
            println!("  {:<12} {}", store.id, store.name);
        }
    }

    Ok(())
}
