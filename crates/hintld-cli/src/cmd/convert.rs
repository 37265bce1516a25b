//! Convert subcommand - HiNT tables to JSON Lines or Turtle

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Args;
use hintld_core::{OrganismTables, SharedProgress, fmt_num, process_organism};
use hintld_export::Exporter;

use super::styled_table;
use crate::config::{Config, OrganismConfig};

#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Output file (overrides `output_file`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Convert only this organism (repeatable)
    #[arg(long = "organism", value_name = "NAME")]
    pub organisms: Vec<String>,
}

/// Per-organism counts for the closing summary
struct OrganismRow {
    name: String,
    binary: (usize, usize),
    co_complex: (usize, usize),
    publications: usize,
    evidence: usize,
}

pub fn run(args: ConvertArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let start = Instant::now();
    let selected = select_organisms(config, &args.organisms)?;
    let output = args.output.as_ref().unwrap_or(&config.output_file);
    let prefixes = config.read_prefixes()?;
    let options = config.pipeline_options();

    log::info!(
        "Converting {} organism(s) to {} ({})",
        selected.len(),
        output.display(),
        config.format.as_str()
    );

    let mut exporter = Exporter::create(
        output,
        config.format,
        config.context_path.as_str(),
        prefixes.as_deref(),
    )
    .with_context(|| format!("Failed to create {}", output.display()))?;

    let mut rows = Vec::with_capacity(selected.len());
    for (name, organism) in selected {
        let line = progress.stage_line(name);
        line.set_message("loading tables");
        let tables = OrganismTables::load(&config.table_paths(organism))
            .with_context(|| format!("{name}: failed to load tables"))?;

        line.set_message("reconciling");
        let result = process_organism(&tables, &options)
            .with_context(|| format!("{name}: failed to process publications"))?;
        drop(tables);

        line.set_message("writing");
        exporter
            .write_organism(&config.organism_context(name, organism), &result)
            .with_context(|| format!("{name}: failed to write {}", output.display()))?;

        log::info!(
            "{name}: binary {} high / {} low, co-complex {} high / {} low, {} publications, {} unique evidence",
            fmt_num(result.binary.high),
            fmt_num(result.binary.low),
            fmt_num(result.co_complex.high),
            fmt_num(result.co_complex.low),
            fmt_num(result.publication_count),
            fmt_num(result.evidence.len())
        );
        line.finish_with_message(format!("{} records", fmt_num(result.records.len())));

        rows.push(OrganismRow {
            name: name.to_string(),
            binary: (result.binary.high, result.binary.low),
            co_complex: (result.co_complex.high, result.co_complex.low),
            publications: result.publication_count,
            evidence: result.evidence.len(),
        });
    }

    let summary = exporter
        .finish()
        .with_context(|| format!("Failed to finalize {}", output.display()))?;
    let elapsed = start.elapsed();

    print_summary(&rows);
    log::info!(
        "Wrote {}: {} organisms, {} interactions, {} evidence in {:.1}s",
        summary.path.display(),
        summary.organisms,
        fmt_num(summary.interactions),
        fmt_num(summary.evidence),
        elapsed.as_secs_f64()
    );
    Ok(())
}

/// Configured organisms in name order, narrowed to `wanted` when non-empty.
fn select_organisms<'a>(
    config: &'a Config,
    wanted: &[String],
) -> Result<Vec<(&'a str, &'a OrganismConfig)>> {
    if let Some(unknown) = wanted.iter().find(|w| !config.organism.contains_key(*w)) {
        bail!("organism '{unknown}' is not in the config");
    }
    Ok(config
        .organism
        .iter()
        .filter(|(name, _)| wanted.is_empty() || wanted.contains(*name))
        .map(|(name, organism)| (name.as_str(), organism))
        .collect())
}

fn print_summary(rows: &[OrganismRow]) {
    let mut table = styled_table(&[
        "Organism",
        "Binary high",
        "Binary low",
        "Co-complex high",
        "Co-complex low",
        "Publications",
        "Evidence",
    ]);
    for row in rows {
        table.add_row(vec![
            row.name.clone(),
            fmt_num(row.binary.0),
            fmt_num(row.binary.1),
            fmt_num(row.co_complex.0),
            fmt_num(row.co_complex.1),
            fmt_num(row.publications),
            fmt_num(row.evidence),
        ]);
    }
    eprintln!("\n{table}");
}
