//! Confirm command - review suggestions and fill a monthly plan.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use salesplan_core::matching::load_tokens;
use salesplan_core::{MatchCache, MonthlyPlan, ReviewRow, ReviewSession};

use super::{emit, load_config, resolve_catalog};

/// Arguments for the confirm command.
#[derive(Args)]
pub struct ConfirmArgs {
    /// Token file (JSON array of strings or OCR word records)
    #[arg(required = true)]
    input: PathBuf,

    /// Existing plan to update (JSON)
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Store identifier for a new plan
    #[arg(long, required_unless_present = "plan")]
    store_id: Option<String>,

    /// Month for a new plan (YYYY-MM)
    #[arg(long, required_unless_present = "plan")]
    month: Option<String>,

    /// Identifier for a new plan (default: <store-id>-<month>)
    #[arg(long)]
    id: Option<String>,

    /// Override a mapping: token=field, or token= to clear it
    #[arg(short, long = "assign", value_name = "TOKEN=FIELD")]
    assignments: Vec<String>,

    /// Restrict matching to these field keys (comma separated)
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the review table to stderr
    #[arg(long)]
    show_review: bool,
}

pub async fn run(args: ConfirmArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let mut plan = match &args.plan {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str::<MonthlyPlan>(&content)?
        }
        None => {
            // clap enforces both when --plan is absent
            let store_id = args.store_id.clone().unwrap_or_default();
            let month = args.month.clone().unwrap_or_default();
            let id = args
                .id
                .clone()
                .unwrap_or_else(|| format!("{}-{}", store_id, month));
            MonthlyPlan::new(id, store_id, month)
        }
    };

    let tokens = load_tokens(&args.input)?;
    let mut cache = MatchCache::new(resolve_catalog(&args.fields, &config)?);
    let mut session =
        ReviewSession::from_cache(tokens, &mut cache).with_config(config.review.clone());

    for assignment in &args.assignments {
        let (token, field) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid assignment '{}', expected TOKEN=FIELD", assignment))?;
        if field.trim().is_empty() {
            session.unassign(token)?;
        } else {
            session.assign(token, field.trim())?;
        }
    }

    if args.show_review {
        print_review(&session.rows());
    }

    let confirmation = session.confirm();
    let values = confirmation.plan_values()?;
    plan.apply(&values);
    plan.validate()?;

    info!(
        "Plan {} for {} ({}): {} fields updated",
        plan.id,
        plan.store_id,
        plan.month,
        values.len()
    );

    for token in &confirmation.unpaired {
        eprintln!("{} Value '{}' has no label", style("!").yellow(), token);
    }

    let output = serde_json::to_string_pretty(&plan)?;
    emit(&output, args.output.as_deref())?;

    Ok(())
}

fn print_review(rows: &[ReviewRow]) {
    eprintln!("{}", style("Review:").bold());
    for row in rows {
        let marker = if row.low_confidence {
            style("?").yellow().to_string()
        } else {
            " ".to_string()
        };

        let target = match (&row.assigned, &row.suggested) {
            _ if row.numeric && row.assigned.is_none() => "value".to_string(),
            (Some(assigned), Some(suggested)) if assigned != suggested => {
                format!("{} (suggested {})", assigned, suggested)
            }
            (Some(assigned), _) => assigned.clone(),
            (None, _) => "-".to_string(),
        };

        eprintln!(
            "{} {:<20} {:>5.1}%  {}",
            marker, row.text, row.confidence, target
        );
    }
    eprintln!();
}
