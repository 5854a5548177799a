//! `bmem skill ...` — inspect and manage the procedural memory store.

use crate::output::{Output, OutputFormat};
use anyhow::{anyhow, Context, Result};
use browse_memory_core::procedural_memory::{MemoryStore, Rating};
use clap::Subcommand;
use serde::Serialize;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum SkillCommands {
    /// List all learned skills.
    List,
    /// Show full detail for one skill.
    Show {
        /// Skill UUID.
        id: Uuid,
    },
    /// Delete a skill.
    Delete {
        /// Skill UUID.
        id: Uuid,
    },
    /// Generate a natural-language explanation for a skill.
    Explain {
        /// Skill UUID.
        id: Uuid,
    },
    /// Show coverage statistics across visited domains and page types.
    Coverage,
    /// Record operator feedback for a skill.
    Feedback {
        /// Skill UUID.
        id: Uuid,
        /// Record a positive outcome instead of negative.
        #[arg(long)]
        positive: bool,
        /// Optional free-text note.
        #[arg(long)]
        note: Option<String>,
    },
    /// Dump the full memory store as JSON.
    Export,
}

#[derive(Serialize)]
struct SkillListItem {
    id: Uuid,
    name: String,
    domain: String,
    success_rate: f32,
    times_used: u32,
}

#[derive(Serialize)]
struct SkillList {
    skills: Vec<SkillListItem>,
}

impl Output for SkillList {
    fn write_human<W: std::io::Write>(&self, mut writer: W) -> anyhow::Result<()> {
        if self.skills.is_empty() {
            writeln!(writer, "no skills learned yet")?;
            return Ok(());
        }
        for skill in &self.skills {
            writeln!(
                writer,
                "{}  {:<28}  {:<20}  success={:.0}%  used={}",
                skill.id,
                skill.name,
                skill.domain,
                skill.success_rate * 100.0,
                skill.times_used
            )?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ExplanationOutput {
    id: Uuid,
    explanation: String,
}

impl Output for ExplanationOutput {
    fn write_human<W: std::io::Write>(&self, mut writer: W) -> anyhow::Result<()> {
        writeln!(writer, "{}", self.explanation)?;
        Ok(())
    }
}

pub fn handle_skill_command(
    command: SkillCommands,
    store: &mut MemoryStore,
    format: OutputFormat,
) -> Result<()> {
    match command {
        SkillCommands::List => {
            let skills = store
                .get_all_skills()
                .iter()
                .map(|s| SkillListItem {
                    id: s.id,
                    name: s.name.clone(),
                    domain: s.source_domain.clone(),
                    success_rate: s.metrics.success_rate() as f32,
                    times_used: s.metrics.times_used,
                })
                .collect();
            SkillList { skills }.print(format)
        }
        SkillCommands::Show { id } => {
            let skill = store
                .get_skill(id)
                .ok_or_else(|| anyhow!("no such skill: {id}"))?;
            match format {
                OutputFormat::Human => {
                    println!("{} ({})", skill.name, skill.id);
                    println!("  domain: {}", skill.source_domain);
                    println!("  description: {}", skill.description);
                    println!(
                        "  success rate: {:.0}% over {} uses",
                        skill.metrics.success_rate() * 100.0,
                        skill.metrics.times_used
                    );
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(skill)?);
                }
            }
            Ok(())
        }
        SkillCommands::Delete { id } => {
            store
                .delete_skill(id)
                .with_context(|| format!("failed to delete skill {id}"))?;
            store.save()?;
            println!("deleted {id}");
            Ok(())
        }
        SkillCommands::Explain { id } => {
            let explanation = store
                .generate_skill_explanation(id)
                .with_context(|| format!("failed to explain skill {id}"))?;
            ExplanationOutput { id, explanation }.print(format)
        }
        SkillCommands::Coverage => {
            let stats = store.get_coverage_stats();
            match format {
                OutputFormat::Human => {
                    println!("total skills: {}", stats.total_skills);
                    println!("visited domains: {}", stats.visited_domains);
                    println!("visited page types: {}", stats.visited_page_types);
                    println!("domains with skills: {}", stats.domains_with_skills);
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                }
            }
            Ok(())
        }
        SkillCommands::Feedback { id, positive, note } => {
            let domain = store
                .get_skill(id)
                .ok_or_else(|| anyhow!("no such skill: {id}"))?
                .source_domain
                .clone();
            let rating = if positive {
                Rating::Positive
            } else {
                Rating::Negative
            };
            store.record_feedback(id, rating, domain.clone(), domain, note);
            store.save()?;
            println!("recorded {rating:?} feedback for {id}");
            Ok(())
        }
        SkillCommands::Export => {
            let dump = store.export_memory();
            println!("{}", serde_json::to_string_pretty(&dump)?);
            Ok(())
        }
    }
}
