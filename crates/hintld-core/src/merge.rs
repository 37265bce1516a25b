//! Category merger: binary + co-complex reconciliation for one organism

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::{Category, ReconciledRecord};
use crate::reconcile::{ReconcileOptions, ReconcileStats, reconcile};
use crate::table::Table;

/// Input files of one organism. Missing hq tiers are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePaths {
    pub binary_all: PathBuf,
    pub binary_hq: Option<PathBuf>,
    pub cocomp_all: PathBuf,
    pub cocomp_hq: Option<PathBuf>,
}

/// The four tables of one organism, loaded in memory.
#[derive(Debug, Clone, Default)]
pub struct OrganismTables {
    pub binary_all: Table,
    pub binary_hq: Option<Table>,
    pub cocomp_all: Table,
    pub cocomp_hq: Option<Table>,
}

impl OrganismTables {
    /// Load all tables; the first unreadable or malformed file aborts.
    pub fn load(paths: &TablePaths) -> Result<Self> {
        Ok(Self {
            binary_all: load_table(&paths.binary_all)?,
            binary_hq: paths.binary_hq.as_deref().map(load_table).transpose()?,
            cocomp_all: load_table(&paths.cocomp_all)?,
            cocomp_hq: paths.cocomp_hq.as_deref().map(load_table).transpose()?,
        })
    }

    /// (all, hq) inputs of a category.
    pub fn tiers(&self, category: Category) -> (&Table, Option<&Table>) {
        match category {
            Category::Binary => (&self.binary_all, self.binary_hq.as_ref()),
            Category::CoComplex => (&self.cocomp_all, self.cocomp_hq.as_ref()),
        }
    }
}

fn load_table(path: &Path) -> Result<Table> {
    let table =
        Table::from_path(path).with_context(|| format!("Failed to load {}", path.display()))?;
    log::info!("Loaded {} ({} rows)", path.display(), table.len());
    Ok(table)
}

/// Reconciled stream of one organism, binary partition first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedRecords {
    pub records: Vec<ReconciledRecord>,
    pub binary: ReconcileStats,
    pub co_complex: ReconcileStats,
}

impl MergedRecords {
    pub fn stats(&self, category: Category) -> &ReconcileStats {
        match category {
            Category::Binary => &self.binary,
            Category::CoComplex => &self.co_complex,
        }
    }
}

/// Reconcile each category independently and concatenate.
///
/// No cross-category deduplication: a pair may appear in both.
pub fn merge_categories(tables: &OrganismTables, options: &ReconcileOptions) -> MergedRecords {
    let mut merged = MergedRecords::default();
    for category in Category::ALL {
        let (all, hq) = tables.tiers(category);
        if hq.is_none() {
            log::info!("{category}: no hq table, all pairs are low confidence");
        }
        let (mut records, stats) = reconcile(all, hq, category, options);
        log::info!(
            "{category}: {} high, {} low ({} mismatched, {} hq-only dropped, {} hq-only promoted)",
            stats.high,
            stats.low,
            stats.mismatched,
            stats.hq_only_dropped,
            stats.hq_only_promoted
        );
        match category {
            Category::Binary => merged.binary = stats,
            Category::CoComplex => merged.co_complex = stats,
        }
        merged.records.append(&mut records);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Confidence, RawInteractionRow};

    fn row(a: &str, b: &str, publications: &str) -> RawInteractionRow {
        RawInteractionRow {
            uniprot_a: a.into(),
            uniprot_b: b.into(),
            publications: publications.into(),
            ..Default::default()
        }
    }

    #[test]
    fn binary_partition_precedes_co_complex() {
        let tables = OrganismTables {
            binary_all: Table::from_rows(vec![row("A", "B", "1:0018:HT")]),
            binary_hq: None,
            cocomp_all: Table::from_rows(vec![row("C", "D", "2:0019:HT")]),
            cocomp_hq: Some(Table::from_rows(vec![row("C", "D", "2:0019:HT")])),
        };
        let merged = merge_categories(&tables, &ReconcileOptions::default());
        let got: Vec<(String, Category, Confidence)> = merged
            .records
            .iter()
            .map(|r| (r.display_name(), r.category, r.confidence))
            .collect();
        assert_eq!(
            got,
            [
                ("A-B".to_string(), Category::Binary, Confidence::Low),
                ("C-D".to_string(), Category::CoComplex, Confidence::High),
            ]
        );
        assert_eq!(merged.stats(Category::Binary).low, 1);
        assert_eq!(merged.stats(Category::CoComplex).high, 1);
    }

    #[test]
    fn same_pair_in_both_categories_is_kept_twice() {
        let tables = OrganismTables {
            binary_all: Table::from_rows(vec![row("A", "B", "1:0018:HT")]),
            cocomp_all: Table::from_rows(vec![row("A", "B", "1:0018:HT")]),
            ..Default::default()
        };
        let merged = merge_categories(&tables, &ReconcileOptions::default());
        assert_eq!(merged.records.len(), 2);
        assert_eq!(merged.records[0].category, Category::Binary);
        assert_eq!(merged.records[1].category, Category::CoComplex);
    }

    #[test]
    fn load_reports_missing_file() {
        let paths = TablePaths {
            binary_all: PathBuf::from("/nonexistent/binary_all.txt"),
            binary_hq: None,
            cocomp_all: PathBuf::from("/nonexistent/cocomp_all.txt"),
            cocomp_hq: None,
        };
        let err = OrganismTables::load(&paths).unwrap_err();
        assert!(format!("{err:#}").contains("binary_all.txt"));
    }
}
