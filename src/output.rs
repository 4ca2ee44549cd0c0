use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::percolation::MergePolicy;
use crate::types::{Communities, VertexList};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One `[v1 v2 ...]` line per community.
    #[default]
    Text,
    Json,
    Yaml
}

/// Result of a run, as handed to the writer.
#[derive(Debug, Serialize)]
pub struct Report<'a, V> {
    pub k: usize,
    pub policy: MergePolicy,
    pub clique_count: usize,
    pub communities: &'a Communities<V>
}

/// Write the communities in the requested format.
pub fn write_communities<W, V>(writer: &mut W, report: &Report<'_, V>, format: OutputFormat) -> Result<()>
where
    W: Write,
    V: Display + Serialize
{
    match format {
        OutputFormat::Text => {
            writeln!(writer, "=== Result ===")?;
            writeln!(writer, "k-cliques with k = {}:", report.k)?;
            for vertices in report.communities.values() {
                writeln!(writer, "{}", VertexList(vertices))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report).context("failed to encode json")?;
            writeln!(writer)?;
        }
        OutputFormat::Yaml => {
            serde_yaml::to_writer(&mut *writer, report).context("failed to encode yaml")?;
        }
    }
    writer.flush()?;
    Ok(())
}
