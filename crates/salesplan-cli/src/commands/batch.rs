//! Batch command - suggest plan fields for multiple token files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use salesplan_core::matching::load_tokens;
use salesplan_core::{FieldMatcher, Mapping};

use super::{load_config, resolve_catalog};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Token files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Directory for per-file mapping JSON
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Restrict matching to these field keys (comma separated)
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of matching a single file.
struct FileResult {
    path: PathBuf,
    tokens: usize,
    mapping: Option<Mapping>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("json")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} token files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let matcher = FieldMatcher::new(resolve_catalog(&args.fields, &config)?);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match match_file(&path, &matcher, args.output_dir.as_deref()) {
            Ok((tokens, mapping)) => results.push(FileResult {
                path,
                tokens,
                mapping: Some(mapping),
                error: None,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        tokens: 0,
                        mapping: None,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    pb.abandon();
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    print_summary(&results);

    eprintln!(
        "{} Processed {} files in {:.1}s",
        style("✓").green(),
        results.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn match_file(
    path: &Path,
    matcher: &FieldMatcher,
    output_dir: Option<&Path>,
) -> anyhow::Result<(usize, Mapping)> {
    let tokens = load_tokens(path)?;
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    let mapping = matcher.suggest(&texts);

    if let Some(dir) = output_dir {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("tokens");
        let out_path = dir.join(format!("{}.mapping.json", stem));
        fs::write(&out_path, serde_json::to_string_pretty(&mapping)?)?;
    }

    Ok((tokens.len(), mapping))
}

fn print_summary(results: &[FileResult]) {
    for result in results {
        match (&result.mapping, &result.error) {
            (Some(mapping), _) => println!(
                "{}\t{}/{} tokens matched",
                result.path.display(),
                mapping.len(),
                result.tokens
            ),
            (None, Some(error)) => println!(
                "{}\t{} {}",
                result.path.display(),
                style("error:").red(),
                error
            ),
            (None, None) => {}
        }
    }
}
