//! Per-organism pass: reconcile, explode publications, collect evidence

use crate::error::PublicationError;
use crate::evidence::{EvidenceEntry, EvidenceSet};
use crate::merge::{OrganismTables, merge_categories};
use crate::model::ReconciledRecord;
use crate::publication::{Publication, PublicationParser};
use crate::reconcile::{ReconcileOptions, ReconcileStats};

/// Everything that shapes one organism pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub reconcile: ReconcileOptions,
    pub publications: PublicationParser,
}

/// A reconciled record with its exploded publications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRecord {
    pub record: ReconciledRecord,
    pub publications: Vec<Publication>,
}

/// Normalized record stream plus the unique evidence of one organism.
#[derive(Debug, Default)]
pub struct OrganismOutput {
    pub records: Vec<AnnotatedRecord>,
    pub evidence: Vec<EvidenceEntry>,
    pub binary: ReconcileStats,
    pub co_complex: ReconcileStats,
    /// Publications across all records, before deduplication
    pub publication_count: usize,
}

/// Run the core over already loaded tables.
///
/// Fails on the first malformed publication entry unless the parser is
/// configured to skip them.
pub fn process_organism(
    tables: &OrganismTables,
    options: &PipelineOptions,
) -> Result<OrganismOutput, PublicationError> {
    let merged = merge_categories(tables, &options.reconcile);

    let mut evidence = EvidenceSet::new();
    let mut records = Vec::with_capacity(merged.records.len());
    let mut publication_count = 0;

    for record in merged.records {
        let publications = options.publications.parse(&record.row.publications)?;
        publication_count += publications.len();
        evidence.extend(&publications);
        records.push(AnnotatedRecord {
            record,
            publications,
        });
    }

    log::debug!(
        "{} records, {} publications, {} unique evidence",
        records.len(),
        publication_count,
        evidence.len()
    );

    Ok(OrganismOutput {
        records,
        evidence: evidence.into_vec(),
        binary: merged.binary,
        co_complex: merged.co_complex,
        publication_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Confidence, RawInteractionRow};
    use crate::publication::{Db, MalformedPolicy, QualityPolicy};
    use crate::table::Table;

    fn row(a: &str, b: &str, publications: &str) -> RawInteractionRow {
        RawInteractionRow {
            uniprot_a: a.into(),
            uniprot_b: b.into(),
            publications: publications.into(),
            ..Default::default()
        }
    }

    #[test]
    fn end_to_end_scenario() {
        let tables = OrganismTables {
            binary_all: Table::from_rows(vec![
                row("A", "B", "111:0018:HT"),
                row("C", "D", "222:0018:LC"),
            ]),
            binary_hq: Some(Table::from_rows(vec![row("A", "B", "111:0018:HT")])),
            ..Default::default()
        };
        let out = process_organism(&tables, &PipelineOptions::default()).unwrap();

        let labels: Vec<(String, Confidence)> = out
            .records
            .iter()
            .map(|r| (r.record.display_name(), r.record.confidence))
            .collect();
        assert_eq!(
            labels,
            [
                ("A-B".to_string(), Confidence::High),
                ("C-D".to_string(), Confidence::Low)
            ]
        );
        assert_eq!(out.evidence.len(), 2);
        assert_eq!(out.publication_count, 2);
    }

    #[test]
    fn evidence_shared_across_records_and_categories() {
        let tables = OrganismTables {
            binary_all: Table::from_rows(vec![
                row("A", "B", "111:0018:HT|PDB_1ABC:0019:LC"),
                row("C", "D", "111:0018:HT"),
            ]),
            cocomp_all: Table::from_rows(vec![row("E", "F", "111;222:0018:HT")]),
            ..Default::default()
        };
        let out = process_organism(&tables, &PipelineOptions::default()).unwrap();
        assert_eq!(out.publication_count, 5);
        assert_eq!(out.evidence.len(), 3);
        assert!(
            out.evidence
                .iter()
                .any(|e| e.db == Db::Pdb && e.id == "1abc" && e.quality == "literature-curated")
        );
    }

    #[test]
    fn quality_policy_changes_evidence_identity() {
        let tables = OrganismTables {
            binary_all: Table::from_rows(vec![row("A", "B", "111:0018:XX|111:0018:YY")]),
            ..Default::default()
        };
        let normalized = process_organism(&tables, &PipelineOptions::default()).unwrap();
        assert_eq!(normalized.evidence.len(), 1);

        let raw = PipelineOptions {
            publications: PublicationParser::new(QualityPolicy::Raw, MalformedPolicy::Abort),
            ..Default::default()
        };
        assert_eq!(process_organism(&tables, &raw).unwrap().evidence.len(), 2);
    }

    #[test]
    fn malformed_publication_aborts_or_skips() {
        let tables = OrganismTables {
            binary_all: Table::from_rows(vec![row("A", "B", "oops|111:0018:HT")]),
            ..Default::default()
        };
        assert!(process_organism(&tables, &PipelineOptions::default()).is_err());

        let skip = PipelineOptions {
            publications: PublicationParser::new(QualityPolicy::Normalized, MalformedPolicy::Skip),
            ..Default::default()
        };
        let out = process_organism(&tables, &skip).unwrap();
        assert_eq!(out.records[0].publications.len(), 1);
    }
}
