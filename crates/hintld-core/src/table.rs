//! Tab-separated HiNT table loading

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::TableError;
use crate::model::{DATA_SOURCE_COLUMN, REQUIRED_COLUMNS, RawInteractionRow};

/// In-memory HiNT table, rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<RawInteractionRow>,
}

impl Table {
    /// Table with no rows (stands in for an omitted hq tier).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<RawInteractionRow>) -> Self {
        Self { rows }
    }

    /// Load a table from disk.
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Parse a table from any reader; `path` is only used in errors.
    ///
    /// Columns are located by header name, so extra or reordered columns
    /// are accepted. Ragged rows and invalid UTF-8 are errors.
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self, TableError> {
        let read_err = |source: csv::Error| TableError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers().map_err(read_err)?.clone();
        let mut idx = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, column) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| TableError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })?;
        }
        let source_idx = headers.iter().position(|h| h.trim() == DATA_SOURCE_COLUMN);

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(read_err)?;
            let field = |i: usize| record.get(i).unwrap_or_default().to_string();
            rows.push(RawInteractionRow {
                uniprot_a: field(idx[0]),
                uniprot_b: field(idx[1]),
                gene_a: field(idx[2]),
                gene_b: field(idx[3]),
                orf_a: field(idx[4]),
                orf_b: field(idx[5]),
                alias_a: field(idx[6]),
                alias_b: field(idx[7]),
                publications: field(idx[8]),
                data_source: source_idx
                    .and_then(|i| record.get(i))
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            });
        }

        log::debug!("{}: {} rows", path.display(), rows.len());
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[RawInteractionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
