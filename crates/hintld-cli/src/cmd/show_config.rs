//! Config subcommand - print the effective configuration

use std::path::Path;

use anyhow::Result;

use super::styled_table;
use crate::config::Config;

fn or_none(path: Option<&Path>) -> String {
    path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}

pub fn run(config: &Config, source: &Path) -> Result<()> {
    let mut table = styled_table(&["Setting", "Value"]);
    table.add_row(vec!["Config file".to_string(), source.display().to_string()]);
    table.add_row(vec!["Data path".to_string(), config.data_path.display().to_string()]);
    table.add_row(vec!["Output file".to_string(), config.output_file.display().to_string()]);
    table.add_row(vec!["Format".to_string(), config.format.as_str().to_string()]);
    table.add_row(vec![
        "Context path".to_string(),
        if config.context_path.is_empty() {
            "-".to_string()
        } else {
            config.context_path.clone()
        },
    ]);
    table.add_row(vec![
        "Prefix file".to_string(),
        config
            .prefix_file
            .as_ref()
            .map_or_else(|| "built-in".to_string(), |p| p.display().to_string()),
    ]);
    table.add_row(vec![
        "Quality labels".to_string(),
        config.quality_labels.as_str().to_string(),
    ]);
    table.add_row(vec![
        "High-confidence fields".to_string(),
        config.high_confidence_fields.as_str().to_string(),
    ]);
    table.add_row(vec![
        "hq-only pairs".to_string(),
        config.hq_only_pairs.as_str().to_string(),
    ]);
    table.add_row(vec![
        "Malformed publication".to_string(),
        config.malformed_publication.as_str().to_string(),
    ]);
    table.add_row(vec!["Log file".to_string(), or_none(config.log_file.as_deref())]);
    match &config.fetch {
        Some(fetch) => {
            table.add_row(vec!["Fetch page".to_string(), fetch.page_url.clone()]);
            table.add_row(vec!["Fetch suffixes".to_string(), fetch.suffixes.join(", ")]);
            table.add_row(vec!["Fetch delay".to_string(), format!("{}ms", fetch.delay_ms)]);
        }
        None => {
            table.add_row(vec!["Fetch page".to_string(), "-".to_string()]);
        }
    }
    eprintln!("\n{table}");

    let mut organisms = styled_table(&[
        "Organism",
        "Taxon",
        "Binary all",
        "Binary hq",
        "Co-complex all",
        "Co-complex hq",
    ]);
    for (name, organism) in &config.organism {
        organisms.add_row(vec![
            name.clone(),
            organism.taxid.map_or_else(|| "-".to_string(), |t| t.to_string()),
            organism.binary_all.display().to_string(),
            or_none(organism.binary_hq.as_deref()),
            organism.cocomp_all.display().to_string(),
            or_none(organism.cocomp_hq.as_deref()),
        ]);
    }
    eprintln!("{organisms}");
    Ok(())
}
