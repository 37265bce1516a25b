//! Fetch subcommand - download the configured tables

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use hintld_core::SharedProgress;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Download even if the file already exists
    #[arg(long)]
    pub force: bool,

    /// List the matching links without downloading
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: FetchArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let Some(fetch) = &config.fetch else {
        bail!("no [fetch] section in config");
    };

    let all = wanted_files(config)?;
    let wanted: Vec<String> = all
        .into_iter()
        .filter(|name| {
            let exists = config.data_path.join(name).exists();
            if exists && !args.force {
                log::info!("{name}: already present, skipping");
            }
            args.force || !exists
        })
        .collect();
    if wanted.is_empty() {
        log::info!("All tables present in {}", config.data_path.display());
        return Ok(());
    }

    let links = hintld_fetch::fetch_links(&fetch.page_url, &fetch.suffixes)?;
    log::info!("{}: {} matching links", fetch.page_url, links.len());

    if args.dry_run {
        for name in &wanted {
            match links.iter().find(|l| &l.filename == name) {
                Some(link) => progress.println(format!("{name}\t{}", link.url)),
                None => progress.println(format!("{name}\t(not found)")),
            }
        }
        return Ok(());
    }

    let written = hintld_fetch::download_all(
        &links,
        &wanted,
        &config.data_path,
        &fetch.download_options(),
        progress,
    )
    .with_context(|| format!("Failed to fetch tables from {}", fetch.page_url))?;
    log::info!(
        "Downloaded {} file(s) into {}",
        written.len(),
        config.data_path.display()
    );
    Ok(())
}

/// File names of every configured table, deduplicated, in organism order.
///
/// Tables are downloaded straight into `data_path`, so names with a
/// directory part are rejected.
fn wanted_files(config: &Config) -> Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    for (organism, tables) in &config.organism {
        for path in tables.files() {
            let name = plain_file_name(path)
                .with_context(|| format!("{organism}: cannot fetch {}", path.display()))?;
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}

fn plain_file_name(path: &Path) -> Result<&str> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("not a file name")?;
    if path.as_os_str() != name {
        bail!("table names must not contain a directory");
    }
    Ok(name)
}
