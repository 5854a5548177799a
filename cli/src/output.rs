//! Output rendering: human-readable or JSON (no YAML variant, since this
//! crate's dependency stack does not carry a YAML serializer).

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    Human,
    /// JSON output for scripting.
    Json,
}

pub trait Output: Serialize {
    fn write_human<W: Write>(&self, writer: W) -> anyhow::Result<()>;

    fn write_json<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    fn print(&self, format: OutputFormat) -> anyhow::Result<()> {
        let stdout = io::stdout();
        match format {
            OutputFormat::Human => self.write_human(stdout),
            OutputFormat::Json => self.write_json(stdout),
        }
    }
}
