//! Sequential file download with a fixed pause between requests.
//!
//! Each file streams to `<name>.tmp` and is renamed into place once
//! complete. There are no retries: the first failure ends the run.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use futures_util::StreamExt;
use hintld_core::{ProgressContext, fmt_num, tmp_path_for, upgrade_to_bar};
use indicatif::ProgressBar;
use tokio::io::AsyncWriteExt;

use crate::manifest::Link;
use crate::runtime::{FetchError, SHARED_RUNTIME, http_client};

/// Pause between requests when none is configured
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy)]
pub struct DownloadOptions {
    /// Wait before every request after the first
    pub delay: Duration,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }
}

/// Download `url` into `dest`, returning the number of bytes written.
pub fn download_file(url: &str, dest: &Path, pb: &ProgressBar) -> Result<u64, FetchError> {
    SHARED_RUNTIME
        .handle()
        .block_on(download_file_async(url, dest, pb))
}

async fn download_file_async(url: &str, dest: &Path, pb: &ProgressBar) -> Result<u64, FetchError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| FetchError::from_reqwest(url, &e))?;

    if let Some(total) = response.content_length() {
        upgrade_to_bar(pb, total);
    }

    let stream = response.bytes_stream().map(|chunk| {
        chunk
            .inspect(|bytes| pb.inc(bytes.len() as u64))
            .map_err(io::Error::other)
    });
    let mut reader = Box::pin(tokio_util::io::StreamReader::new(stream));

    let tmp_path = tmp_path_for(dest);
    let mut file = tokio::fs::File::create(&tmp_path).await?;
    let copied = match tokio::io::copy(&mut reader, &mut file).await {
        Ok(n) => n,
        Err(e) => {
            drop(file);
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
    };
    file.flush().await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(&tmp_path, dest).await?;
    Ok(copied)
}

/// Download every file in `wanted` from `links` into `dest_dir`.
///
/// All names are checked against the page before the first request.
pub fn download_all(
    links: &[Link],
    wanted: &[String],
    dest_dir: &Path,
    options: &DownloadOptions,
    progress: &ProgressContext,
) -> Result<Vec<PathBuf>> {
    let selected = select(links, wanted)?;
    std::fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create {}", dest_dir.display()))?;

    let mut written = Vec::with_capacity(selected.len());
    for (i, link) in selected.iter().enumerate() {
        if i > 0 && !options.delay.is_zero() {
            SHARED_RUNTIME
                .handle()
                .block_on(tokio::time::sleep(options.delay));
        }

        let dest = dest_dir.join(&link.filename);
        let pb = progress.download_bar(&link.filename);
        let bytes = download_file(&link.url, &dest, &pb)
            .with_context(|| format!("Failed to download {}", link.url))?;
        pb.finish_and_clear();

        log::info!(
            "[{}/{}] {} ({} bytes)",
            i + 1,
            selected.len(),
            link.filename,
            fmt_num(bytes as usize)
        );
        written.push(dest);
    }
    Ok(written)
}

/// Links for `wanted`, in `wanted` order.
fn select<'a>(links: &'a [Link], wanted: &[String]) -> Result<Vec<&'a Link>> {
    let mut selected = Vec::with_capacity(wanted.len());
    let mut missing = Vec::new();
    for name in wanted {
        match links.iter().find(|l| &l.filename == name) {
            Some(link) if !selected.iter().any(|s: &&Link| s.filename == link.filename) => {
                selected.push(link)
            }
            Some(_) => {}
            None => missing.push(name.as_str()),
        }
    }
    if !missing.is_empty() {
        bail!("not found on download page: {}", missing.join(", "));
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(name: &str) -> Link {
        Link {
            filename: name.to_string(),
            url: format!("http://host/{name}"),
        }
    }

    #[test]
    fn select_keeps_wanted_order() {
        let links = [link("a.txt"), link("b.txt"), link("c.txt")];
        let wanted = vec!["c.txt".to_string(), "a.txt".to_string()];
        let selected = select(&links, &wanted).unwrap();
        let names: Vec<&str> = selected.iter().map(|l| l.filename.as_str()).collect();
        assert_eq!(names, ["c.txt", "a.txt"]);
    }

    #[test]
    fn select_skips_repeated_names() {
        let links = [link("a.txt")];
        let wanted = vec!["a.txt".to_string(), "a.txt".to_string()];
        assert_eq!(select(&links, &wanted).unwrap().len(), 1);
    }

    #[test]
    fn select_reports_all_missing() {
        let links = [link("a.txt")];
        let wanted = vec!["x.txt".to_string(), "a.txt".to_string(), "y.txt".to_string()];
        let err = select(&links, &wanted).unwrap_err();
        assert_eq!(err.to_string(), "not found on download page: x.txt, y.txt");
    }

    #[test]
    fn default_delay_is_one_second() {
        assert_eq!(DownloadOptions::default().delay, Duration::from_secs(1));
    }
}
