//! JSON-LD objects, one per interaction and one per evidence entry

use hintld_core::{AnnotatedRecord, EvidenceEntry};
use serde_json::{Value, json};

use crate::iri::{
    OrganismContext, Participant, evidence_id, mi_code, participants, publication_evidence_id,
    reference_url,
};

/// Build the `bp3:MolecularInteraction` object of one record.
pub fn interaction_json(
    record: &AnnotatedRecord,
    organism: &OrganismContext<'_>,
    context_path: &str,
) -> Value {
    let name = record.record.display_name();
    let evidence: Vec<Value> = record
        .publications
        .iter()
        .map(|p| json!({ "@id": publication_evidence_id(p) }))
        .collect();

    let mut object = json!({
        "@context": context_path,
        "@id": format!("hnt:{name}"),
        "@type": "bp3:MolecularInteraction",
        "bp3:dataSource": organism.data_source_of(record),
        "bp3:displayName": &name,
        "bp3:evidence": evidence,
        "bp3:name": &name,
        "bp3:participant": {
            "obo:BFO_0000051": participants(&record.record.row).map(|p| participant_json(&p)),
        },
        "pint:networkVariety": record.record.category.as_str(),
        "pint:accuracy": record.record.confidence.as_str(),
    });
    if let Some(taxid) = organism.taxid {
        object["bp3:organism"] = json!({ "@id": format!("taxon:{taxid}") });
    }
    object
}

/// `{"@id": "uni:..."}` plus whatever gene, ORF and alias the row has.
fn participant_json(participant: &Participant<'_>) -> Value {
    let mut object = json!({ "@id": format!("uni:{}", participant.uniprot) });
    if let Some(gene) = participant.gene {
        object["bp3:displayName"] = json!(gene);
    }
    if !participant.names.is_empty() {
        object["bp3:name"] = json!(participant.names);
    }
    object
}

/// Build the `bp3:Evidence` object of one unique evidence entry.
pub fn evidence_json(entry: &EvidenceEntry, context_path: &str) -> Value {
    json!({
        "@context": context_path,
        "@id": evidence_id(entry),
        "@type": "bp3:Evidence",
        "bp3:evidenceCode": format!("obo:MI_{}", mi_code(&entry.method)),
        "dcterms:references": reference_url(entry.db, &entry.id),
        "pint:dataSourceType": entry.quality,
    })
}
