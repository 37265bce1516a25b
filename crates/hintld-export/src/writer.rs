//! Document writer: JSON Lines or Turtle over an atomic output file

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use hintld_core::OrganismOutput;
use serde::Deserialize;

use crate::iri::OrganismContext;
use crate::jsonld;
use crate::sink::AtomicFile;
use crate::turtle::{self, Namespaces, TurtleWriter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON-LD object per line
    #[default]
    Jsonl,
    Turtle,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jsonl => "jsonl",
            Self::Turtle => "turtle",
        }
    }
}

/// Counts of what was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub organisms: usize,
    pub interactions: usize,
    pub evidence: usize,
}

/// Where the document goes.
#[derive(Debug)]
enum Output {
    Jsonl(AtomicFile),
    Turtle(TurtleWriter<AtomicFile>),
}

/// Writes organisms one after another into a single document.
///
/// Per organism: its interactions, then its unique evidence entries.
#[derive(Debug)]
pub struct Exporter {
    out: Output,
    context_path: String,
    summary: ExportSummary,
}

impl Exporter {
    /// Open the output. Turtle output declares the namespaces of
    /// `prefixes` ([`turtle::DEFAULT_PREFIXES`] when `None`).
    pub fn create(
        path: &Path,
        format: OutputFormat,
        context_path: impl Into<String>,
        prefixes: Option<&str>,
    ) -> io::Result<Self> {
        let out = match format {
            OutputFormat::Jsonl => Output::Jsonl(AtomicFile::create(path)?),
            OutputFormat::Turtle => {
                let namespaces =
                    Namespaces::parse(prefixes.unwrap_or(turtle::DEFAULT_PREFIXES))?;
                Output::Turtle(TurtleWriter::new(AtomicFile::create(path)?, namespaces)?)
            }
        };
        Ok(Self {
            out,
            context_path: context_path.into(),
            summary: ExportSummary::default(),
        })
    }

    pub fn write_organism(
        &mut self,
        organism: &OrganismContext<'_>,
        output: &OrganismOutput,
    ) -> io::Result<()> {
        match &mut self.out {
            Output::Jsonl(out) => {
                for record in &output.records {
                    let value = jsonld::interaction_json(record, organism, &self.context_path);
                    serde_json::to_writer(&mut *out, &value)?;
                    out.write_all(b"\n")?;
                }
                for entry in &output.evidence {
                    let value = jsonld::evidence_json(entry, &self.context_path);
                    serde_json::to_writer(&mut *out, &value)?;
                    out.write_all(b"\n")?;
                }
            }
            Output::Turtle(out) => {
                for record in &output.records {
                    out.write_interaction(record, organism)?;
                }
                for entry in &output.evidence {
                    out.write_evidence(entry)?;
                }
            }
        }

        self.summary.organisms += 1;
        self.summary.interactions += output.records.len();
        self.summary.evidence += output.evidence.len();
        log::debug!(
            "{}: wrote {} interactions, {} evidence",
            organism.name,
            output.records.len(),
            output.evidence.len()
        );
        Ok(())
    }

    /// Flush and move the finished document into place.
    pub fn finish(self) -> io::Result<ExportSummary> {
        let file = match self.out {
            Output::Jsonl(file) => file,
            Output::Turtle(out) => out.finish()?,
        };
        let mut summary = self.summary;
        summary.path = file.finalize()?;
        Ok(summary)
    }
}
