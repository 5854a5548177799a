//! `bmem diff ...` — compare two JSON documents with the field-level
//! change tracker.

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use browse_memory_core::change_tracker::{ChangeTracker, TrackChangesOptions, Value};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct DiffArgs {
    /// Path to the old JSON document.
    pub old: PathBuf,
    /// Path to the new JSON document.
    pub new: PathBuf,
    /// URL this comparison is for; when given, the result is recorded in
    /// the change history store.
    #[arg(long)]
    pub url: Option<String>,
    /// Language for category detection and duration parsing.
    #[arg(long)]
    pub language: Option<String>,
    /// Field paths to ignore (exact or prefix match).
    #[arg(long = "ignore-field")]
    pub ignore_fields: Vec<String>,
    /// Restrict comparison to these field paths.
    #[arg(long = "only-field")]
    pub only_fields: Vec<String>,
}

pub fn handle_diff_command(
    args: DiffArgs,
    tracker: &mut ChangeTracker,
    format: OutputFormat,
) -> Result<()> {
    let old = read_value(&args.old)?;
    let new = read_value(&args.new)?;

    let mut opts = TrackChangesOptions {
        url: args.url,
        ignore_fields: args.ignore_fields,
        only_fields: args.only_fields,
        ..TrackChangesOptions::default()
    };
    if let Some(language) = args.language {
        opts.language = language;
    }

    let report = tracker.track_changes(&old, &new, opts);
    tracker.save()?;

    match format {
        OutputFormat::Human => {
            if !report.has_changes {
                println!("no changes detected");
                return Ok(());
            }
            println!(
                "{} change(s): {} breaking, {} major, {} minor",
                report.changes.len(),
                report.breaking_count,
                report.major_count,
                report.minor_count
            );
            for change in &report.changes {
                println!(
                    "  [{:?}/{:?}] {} ({}): {} -> {}",
                    change.severity,
                    change.category,
                    change.field_name,
                    change.field_path,
                    change.old_value_formatted,
                    change.new_value_formatted
                );
                if let Some(impact) = &change.impact {
                    println!("      {impact}");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn read_value(path: &PathBuf) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
    Ok(json.into())
}
