//! Compound publication field parsing
//!
//! A HiNT row carries its literature and structure references in one
//! column, `identifier:method:quality` entries joined by `|`. The
//! identifier part may itself list several PubMed ids (`111;222` or
//! `111,222`) sharing the same method and quality.

use serde::Deserialize;

use crate::error::PublicationError;

/// Prefix marking a PDB structure identifier.
const PDB_PREFIX: &str = "PDB_";

/// Reference database of a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Db {
    Pdb,
    Pubmed,
}

impl Db {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdb => "pdb",
            Self::Pubmed => "pubmed",
        }
    }
}

impl std::fmt::Display for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the quality code of an entry is carried into `Publication::quality`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPolicy {
    /// `HT` → high-throughput, `LC` → literature-curated, else unknown
    #[default]
    Normalized,
    /// Raw code, unmodified
    Raw,
}

impl QualityPolicy {
    pub fn apply(self, code: &str) -> String {
        match self {
            Self::Raw => code.to_string(),
            Self::Normalized => match code {
                "HT" => "high-throughput",
                "LC" => "literature-curated",
                _ => "unknown",
            }
            .to_string(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normalized => "normalized",
            Self::Raw => "raw",
        }
    }
}

/// What to do with an entry that is not `identifier:method:quality`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail the organism
    #[default]
    Abort,
    /// Log a warning and drop the entry
    Skip,
}

impl MalformedPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        }
    }
}

/// A single literature or structure reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// Position within the record; not part of identity
    pub ordinal: usize,
    pub db: Db,
    pub id: String,
    pub method: String,
    pub quality: String,
}

/// Parser configured with the quality and malformed-entry policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicationParser {
    pub quality: QualityPolicy,
    pub on_malformed: MalformedPolicy,
}

impl PublicationParser {
    pub fn new(quality: QualityPolicy, on_malformed: MalformedPolicy) -> Self {
        Self {
            quality,
            on_malformed,
        }
    }

    /// Explode a compound publication field into publications.
    ///
    /// Empty entries (empty field, `||`) produce nothing.
    pub fn parse(&self, field: &str) -> Result<Vec<Publication>, PublicationError> {
        let mut out = Vec::new();
        for entry in field.split('|') {
            if entry.trim().is_empty() {
                continue;
            }
            match split_entry(entry) {
                Some((ids, method, code)) => {
                    let quality = self.quality.apply(code);
                    for id in split_identifiers(ids) {
                        let (db, id) = classify_identifier(id);
                        out.push(Publication {
                            ordinal: out.len(),
                            db,
                            id,
                            method: method.to_string(),
                            quality: quality.clone(),
                        });
                    }
                }
                None => {
                    let err = PublicationError {
                        entry: entry.to_string(),
                    };
                    match self.on_malformed {
                        MalformedPolicy::Abort => return Err(err),
                        MalformedPolicy::Skip => log::warn!("Skipping {err}"),
                    }
                }
            }
        }
        Ok(out)
    }
}

/// Parse with the given quality policy, aborting on malformed entries.
pub fn parse_publications(
    field: &str,
    quality: QualityPolicy,
) -> Result<Vec<Publication>, PublicationError> {
    PublicationParser::new(quality, MalformedPolicy::Abort).parse(field)
}

/// Split one entry into (identifiers, method, quality code).
///
/// Identifier ends at the first `:`, quality starts after the last one;
/// the method keeps any inner colons (`MI:0018`).
fn split_entry(entry: &str) -> Option<(&str, &str, &str)> {
    let (ids, rest) = entry.split_once(':')?;
    let (method, code) = rest.rsplit_once(':')?;
    let (ids, method, code) = (ids.trim(), method.trim(), code.trim());
    if method.is_empty() || split_identifiers(ids).next().is_none() {
        return None;
    }
    Some((ids, method, code))
}

/// Co-referenced identifiers: `;` takes precedence over `,`.
fn split_identifiers(ids: &str) -> impl Iterator<Item = &str> {
    let delim = if ids.contains(';') { ';' } else { ',' };
    ids.split(delim).map(str::trim).filter(|id| !id.is_empty())
}

fn classify_identifier(id: &str) -> (Db, String) {
    match id.strip_prefix(PDB_PREFIX) {
        Some(pdb) => (Db::Pdb, pdb.to_lowercase()),
        None => (Db::Pubmed, id.to_string()),
    }
}
