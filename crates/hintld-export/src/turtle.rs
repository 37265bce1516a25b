//! Turtle triples for interactions and evidence

use std::collections::BTreeMap;
use std::io::{self, Write};

use hintld_core::{AnnotatedRecord, EvidenceEntry};
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, Literal, NamedNode, Subject, Term, Triple};
use oxrdfio::{RdfFormat, RdfParser, RdfSerializer, WriterQuadSerializer};

use crate::iri::{OrganismContext, evidence_local, mi_code, participants, reference_url};

/// Prefix block used when no prefix file is configured.
pub const DEFAULT_PREFIXES: &str = "\
@prefix bp3: <http://www.biopax.org/release/biopax-level3.owl#> .
@prefix dcterms: <http://purl.org/dc/terms/> .
@prefix hnt: <http://hint.yulab.org/interaction/> .
@prefix obo: <http://purl.obolibrary.org/obo/> .
@prefix pint: <http://purl.jp/bio/10/pint/> .
@prefix taxon: <http://identifiers.org/taxonomy/> .
@prefix uni: <http://identifiers.org/uniprot/> .
";

/// Prefixes every document uses.
const REQUIRED: [&str; 7] = ["bp3", "dcterms", "hnt", "obo", "pint", "taxon", "uni"];

fn invalid(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

/// Prefix name to namespace IRI, read from a Turtle prefix block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces(BTreeMap<String, String>);

impl Namespaces {
    /// Parse `@prefix` / `PREFIX` declarations. Any triples in the block are ignored.
    pub fn parse(block: &str) -> io::Result<Self> {
        let mut parser = RdfParser::from_format(RdfFormat::Turtle).for_reader(block.as_bytes());
        for quad in parser.by_ref() {
            quad.map_err(invalid)?;
        }
        let map: BTreeMap<String, String> = parser
            .prefixes()
            .map(|(name, iri)| (name.to_string(), iri.to_string()))
            .collect();

        let missing: Vec<&str> = REQUIRED
            .into_iter()
            .filter(|name| !map.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(invalid(format!(
                "prefix block does not declare {}",
                missing.join(", ")
            )));
        }
        Ok(Self(map))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, iri)| (name.as_str(), iri.as_str()))
    }

    /// Full IRI of `prefix:local`.
    pub fn iri(&self, prefix: &str, local: &str) -> io::Result<NamedNode> {
        let namespace = self
            .0
            .get(prefix)
            .ok_or_else(|| invalid(format!("undeclared prefix {prefix}:")))?;
        NamedNode::new(format!("{namespace}{local}")).map_err(invalid)
    }

    /// Expand a compact `prefix:local` name as used in the JSON-LD form.
    pub fn expand(&self, compact: &str) -> io::Result<NamedNode> {
        let (prefix, local) = compact
            .split_once(':')
            .ok_or_else(|| invalid(format!("not a prefixed name: {compact}")))?;
        self.iri(prefix, local)
    }
}

/// Turtle serializer over `W` that knows the document's namespaces.
///
/// Participant groups are blank nodes numbered in write order, so the
/// same input always gives the same document.
pub struct TurtleWriter<W: Write> {
    out: WriterQuadSerializer<W>,
    namespaces: Namespaces,
    next_blank: u128,
}

impl<W: Write> std::fmt::Debug for TurtleWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurtleWriter")
            .field("namespaces", &self.namespaces)
            .field("next_blank", &self.next_blank)
            .finish_non_exhaustive()
    }
}

impl<W: Write> TurtleWriter<W> {
    pub fn new(writer: W, namespaces: Namespaces) -> io::Result<Self> {
        let mut serializer = RdfSerializer::from_format(RdfFormat::Turtle);
        for (name, iri) in namespaces.iter() {
            serializer = serializer.with_prefix(name, iri).map_err(invalid)?;
        }
        Ok(Self {
            out: serializer.for_writer(writer),
            namespaces,
            next_blank: 1,
        })
    }

    fn triple(
        &mut self,
        subject: impl Into<Subject>,
        predicate: &str,
        object: impl Into<Term>,
    ) -> io::Result<()> {
        let predicate = self.namespaces.expand(predicate)?;
        self.out
            .serialize_triple(&Triple::new(subject, predicate, object))
    }

    /// Write the `bp3:MolecularInteraction` of one record, then its participants.
    pub fn write_interaction(
        &mut self,
        record: &AnnotatedRecord,
        organism: &OrganismContext<'_>,
    ) -> io::Result<()> {
        let ns = &self.namespaces;
        let name = record.record.display_name();
        let subject = ns.iri("hnt", &name)?;
        let data_source = NamedNode::new(organism.data_source_of(record)).map_err(invalid)?;
        let evidence = record
            .publications
            .iter()
            .map(|p| ns.iri("pint", &evidence_local(p.db, &p.id, &p.method, &p.quality)))
            .collect::<io::Result<Vec<_>>>()?;
        let organism_iri = organism
            .taxid
            .map(|taxid| ns.iri("taxon", &taxid.to_string()))
            .transpose()?;
        let group = BlankNode::new_from_unique_id(self.next_blank);
        self.next_blank += 1;

        self.out.serialize_triple(&Triple::new(
            subject.clone(),
            rdf::TYPE,
            self.namespaces.expand("bp3:MolecularInteraction")?,
        ))?;
        self.triple(subject.clone(), "bp3:dataSource", data_source)?;
        self.triple(subject.clone(), "bp3:displayName", Literal::new_simple_literal(&name))?;
        self.triple(subject.clone(), "bp3:name", Literal::new_simple_literal(&name))?;
        self.triple(subject.clone(), "bp3:participant", group.clone())?;
        for iri in evidence {
            self.triple(subject.clone(), "bp3:evidence", iri)?;
        }
        if let Some(iri) = organism_iri {
            self.triple(subject.clone(), "bp3:organism", iri)?;
        }
        self.triple(
            subject.clone(),
            "pint:networkVariety",
            Literal::new_simple_literal(record.record.category.as_str()),
        )?;
        self.triple(
            subject,
            "pint:accuracy",
            Literal::new_simple_literal(record.record.confidence.as_str()),
        )?;

        let participants = participants(&record.record.row);
        let proteins = participants
            .iter()
            .map(|p| self.namespaces.iri("uni", p.uniprot))
            .collect::<io::Result<Vec<_>>>()?;
        for protein in &proteins {
            self.triple(group.clone(), "obo:BFO_0000051", protein.clone())?;
        }
        for (protein, participant) in proteins.into_iter().zip(&participants) {
            if let Some(gene) = participant.gene {
                self.triple(protein.clone(), "bp3:displayName", Literal::new_simple_literal(gene))?;
            }
            for name in &participant.names {
                self.triple(protein.clone(), "bp3:name", Literal::new_simple_literal(*name))?;
            }
        }
        Ok(())
    }

    /// Write the `bp3:Evidence` of one unique evidence entry.
    pub fn write_evidence(&mut self, entry: &EvidenceEntry) -> io::Result<()> {
        let ns = &self.namespaces;
        let local = evidence_local(entry.db, &entry.id, &entry.method, &entry.quality);
        let subject = ns.iri("pint", &local)?;
        let code = ns.iri("obo", &format!("MI_{}", mi_code(&entry.method)))?;
        let reference = NamedNode::new(reference_url(entry.db, &entry.id)).map_err(invalid)?;

        self.out.serialize_triple(&Triple::new(
            subject.clone(),
            rdf::TYPE,
            self.namespaces.expand("bp3:Evidence")?,
        ))?;
        self.triple(subject.clone(), "bp3:evidenceCode", code)?;
        self.triple(subject.clone(), "dcterms:references", reference)?;
        self.triple(
            subject,
            "pint:dataSourceType",
            Literal::new_simple_literal(&entry.quality),
        )
    }

    /// Flush pending triples and hand back the underlying writer.
    pub fn finish(self) -> io::Result<W> {
        self.out.finish()
    }
}
