//! hintld Export - JSON-LD lines and Turtle output for reconciled HiNT data
//!
//! Pure mappings from the normalized record stream and the unique evidence
//! set to text, plus an output file that only appears once complete.

pub mod iri;
pub mod jsonld;
pub mod sink;
pub mod turtle;
pub mod writer;

pub use iri::{DEFAULT_DATA_SOURCE, OrganismContext};
pub use sink::AtomicFile;
pub use turtle::{DEFAULT_PREFIXES, Namespaces};
pub use writer::{ExportSummary, Exporter, OutputFormat};
