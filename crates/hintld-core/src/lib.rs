//! hintld Core - HiNT interaction tables to normalized records
//!
//! Loads the tab-separated HiNT tables of one organism, reconciles the
//! "all" and "high-quality" tiers per interaction category, explodes the
//! compound publication field and collects the unique evidence set.
//!
//! # Example
//!
//! ```ignore
//! use hintld_core::{OrganismTables, PipelineOptions, TablePaths, process_organism};
//!
//! let tables = OrganismTables::load(&paths)?;
//! let output = process_organism(&tables, &PipelineOptions::default())?;
//! println!("{} interactions, {} evidence", output.records.len(), output.evidence.len());
//! ```

pub mod error;
pub mod evidence;
pub mod logging;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod progress;
pub mod publication;
pub mod reconcile;
pub mod table;
pub mod tmp;

// Re-exports for convenience
pub use error::{PublicationError, TableError};
pub use evidence::{EvidenceEntry, EvidenceSet};
pub use logging::{IndicatifLogger, init_logging};
pub use merge::{MergedRecords, OrganismTables, TablePaths, merge_categories};
pub use model::{Category, Confidence, PairKey, RawInteractionRow, ReconciledRecord};
pub use pipeline::{AnnotatedRecord, OrganismOutput, PipelineOptions, process_organism};
pub use progress::{ProgressContext, SharedProgress, fmt_num, upgrade_to_bar};
pub use publication::{
    Db, MalformedPolicy, Publication, PublicationParser, QualityPolicy, parse_publications,
};
pub use reconcile::{FieldOrigin, HqOnlyPolicy, ReconcileOptions, ReconcileStats, reconcile};
pub use table::Table;
pub use tmp::tmp_path_for;
