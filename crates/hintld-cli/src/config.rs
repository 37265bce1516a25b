//! Configuration loading from JSON or TOML files

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use hintld_core::{
    FieldOrigin, HqOnlyPolicy, MalformedPolicy, PipelineOptions, PublicationParser, QualityPolicy,
    ReconcileOptions, TablePaths,
};
use hintld_export::{DEFAULT_DATA_SOURCE, OrganismContext, OutputFormat};
use hintld_fetch::DownloadOptions;
use serde::Deserialize;

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG: &str = "hintld.json";

/// Run configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    pub output_file: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub context_path: String,
    #[serde(default)]
    pub prefix_file: Option<PathBuf>,
    #[serde(default)]
    pub quality_labels: QualityPolicy,
    #[serde(default)]
    pub high_confidence_fields: FieldOrigin,
    #[serde(default)]
    pub hq_only_pairs: HqOnlyPolicy,
    #[serde(default)]
    pub malformed_publication: MalformedPolicy,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
    pub organism: BTreeMap<String, OrganismConfig>,
}

fn default_data_path() -> PathBuf {
    PathBuf::from(".")
}

/// Table file names of one organism, relative to `data_path`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganismConfig {
    #[serde(default)]
    pub taxid: Option<u32>,
    #[serde(default)]
    pub data_source: Option<String>,
    pub binary_all: PathBuf,
    #[serde(default)]
    pub binary_hq: Option<PathBuf>,
    pub cocomp_all: PathBuf,
    #[serde(default)]
    pub cocomp_hq: Option<PathBuf>,
}

impl OrganismConfig {
    /// Every configured table, "all" tiers first.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        [
            Some(&self.binary_all),
            Some(&self.cocomp_all),
            self.binary_hq.as_ref(),
            self.cocomp_hq.as_ref(),
        ]
        .into_iter()
        .flatten()
        .map(PathBuf::as_path)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    pub page_url: String,
    #[serde(default = "default_suffixes")]
    pub suffixes: Vec<String>,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_suffixes() -> Vec<String> {
    vec![".txt".to_string()]
}

fn default_delay_ms() -> u64 {
    1000
}

impl FetchConfig {
    pub fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            delay: Duration::from_millis(self.delay_ms),
        }
    }
}

impl Config {
    /// Load configuration from a specific file.
    ///
    /// `.toml` files are parsed as TOML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_toml = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        let config: Config = if is_toml {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.organism.is_empty() {
            bail!("no organism configured");
        }
        if let Some(fetch) = &self.fetch {
            if fetch.suffixes.is_empty() {
                bail!("fetch.suffixes is empty");
            }
        }
        Ok(())
    }

    /// Table paths of one organism, joined with `data_path`.
    pub fn table_paths(&self, organism: &OrganismConfig) -> TablePaths {
        let join = |p: &PathBuf| self.data_path.join(p);
        TablePaths {
            binary_all: join(&organism.binary_all),
            binary_hq: organism.binary_hq.as_ref().map(join),
            cocomp_all: join(&organism.cocomp_all),
            cocomp_hq: organism.cocomp_hq.as_ref().map(join),
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            reconcile: ReconcileOptions {
                high_confidence_fields: self.high_confidence_fields,
                hq_only_pairs: self.hq_only_pairs,
            },
            publications: PublicationParser::new(self.quality_labels, self.malformed_publication),
        }
    }

    /// Serializer context of one organism.
    pub fn organism_context<'a>(
        &'a self,
        name: &'a str,
        organism: &'a OrganismConfig,
    ) -> OrganismContext<'a> {
        OrganismContext {
            name,
            taxid: organism.taxid,
            data_source: organism.data_source.as_deref().unwrap_or(DEFAULT_DATA_SOURCE),
        }
    }

    /// Prefix block from `prefix_file`, if configured.
    pub fn read_prefixes(&self) -> Result<Option<String>> {
        self.prefix_file
            .as_ref()
            .map(|path| {
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read prefix file: {}", path.display()))
            })
            .transpose()
    }
}
