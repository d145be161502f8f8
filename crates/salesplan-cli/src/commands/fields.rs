//! Fields command - list the plan field catalog.

use clap::Args;
use serde::Serialize;

use salesplan_core::{PlanField, PlanGroup};

/// Arguments for the fields command.
#[derive(Args)]
pub struct FieldsArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct FieldInfo {
    key: &'static str,
    label: &'static str,
    group: PlanGroup,
}

pub async fn run(args: FieldsArgs) -> anyhow::Result<()> {
    let fields: Vec<FieldInfo> = PlanField::ALL
        .into_iter()
        .map(|f| FieldInfo {
            key: f.key(),
            label: f.label(),
            group: f.group(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }

    for field in &fields {
        let group = match field.group {
            PlanGroup::Base => "base",
            PlanGroup::Additional => "additional",
        };
        println!("{:<10} {:<16} {}", field.key, field.label, group);
    }

    Ok(())
}
