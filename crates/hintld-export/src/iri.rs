//! Identifiers shared by the JSON-LD and Turtle forms

use hintld_core::{AnnotatedRecord, Db, EvidenceEntry, Publication, RawInteractionRow};

/// `bp3:dataSource` when neither the row nor the organism names one.
pub const DEFAULT_DATA_SOURCE: &str = "http://identifiers.org/HINT";

/// Organism-level values stamped on every interaction.
#[derive(Debug, Clone, Copy)]
pub struct OrganismContext<'a> {
    pub name: &'a str,
    pub taxid: Option<u32>,
    pub data_source: &'a str,
}

impl<'a> OrganismContext<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            taxid: None,
            data_source: DEFAULT_DATA_SOURCE,
        }
    }

    /// Row-level provenance wins over the organism default.
    pub fn data_source_of<'r>(&self, record: &'r AnnotatedRecord) -> &'r str
    where
        'a: 'r,
    {
        record
            .record
            .row
            .data_source
            .as_deref()
            .unwrap_or(self.data_source)
    }
}

/// One interactor and the descriptive fields its row carries for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant<'r> {
    pub uniprot: &'r str,
    /// Gene symbol, emitted as `bp3:displayName`
    pub gene: Option<&'r str>,
    /// ORF name then alias, emitted as `bp3:name`
    pub names: Vec<&'r str>,
}

/// `-` marks an empty cell in the tables.
fn present(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != "-").then_some(value)
}

impl<'r> Participant<'r> {
    fn new(uniprot: &'r str, gene: &'r str, orf: &'r str, alias: &'r str) -> Self {
        Self {
            uniprot,
            gene: present(gene),
            names: [orf, alias].into_iter().filter_map(present).collect(),
        }
    }
}

/// Both participants of a row, A first.
pub fn participants(row: &RawInteractionRow) -> [Participant<'_>; 2] {
    [
        Participant::new(&row.uniprot_a, &row.gene_a, &row.orf_a, &row.alias_a),
        Participant::new(&row.uniprot_b, &row.gene_b, &row.orf_b, &row.alias_b),
    ]
}

/// PSI-MI code without its `MI:` prefix.
pub fn mi_code(method: &str) -> &str {
    method.strip_prefix("MI:").unwrap_or(method)
}

/// Local part of an evidence identifier: `evidence-<db>_<id>-MI_<code>-<quality>`.
pub fn evidence_local(db: Db, id: &str, method: &str, quality: &str) -> String {
    format!("evidence-{db}_{id}-MI_{}-{quality}", mi_code(method))
}

pub fn evidence_id(entry: &EvidenceEntry) -> String {
    format!(
        "pint:{}",
        evidence_local(entry.db, &entry.id, &entry.method, &entry.quality)
    )
}

pub fn publication_evidence_id(publication: &Publication) -> String {
    format!(
        "pint:{}",
        evidence_local(
            publication.db,
            &publication.id,
            &publication.method,
            &publication.quality
        )
    )
}

pub fn reference_url(db: Db, id: &str) -> String {
    format!("http://identifiers.org/{db}/{id}")
}
