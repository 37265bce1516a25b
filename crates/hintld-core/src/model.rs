//! Interaction rows and the labels reconciliation attaches to them

use std::fmt;

/// Header of the compound publication column (wire-format contract).
pub const PUBLICATION_COLUMN: &str = "pmid:method:quality";

/// Optional provenance column.
pub const DATA_SOURCE_COLUMN: &str = "Data_Source";

/// Columns every HiNT table must carry, in file order.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Uniprot_A",
    "Uniprot_B",
    "Gene_A",
    "Gene_B",
    "ORF_A",
    "ORF_B",
    "Alias_A",
    "Alias_B",
    PUBLICATION_COLUMN,
];

/// Ordered protein pair identifying one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey<'a> {
    pub uniprot_a: &'a str,
    pub uniprot_b: &'a str,
}

impl fmt::Display for PairKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.uniprot_a, self.uniprot_b)
    }
}

/// One line of an input table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawInteractionRow {
    pub uniprot_a: String,
    pub uniprot_b: String,
    pub gene_a: String,
    pub gene_b: String,
    pub orf_a: String,
    pub orf_b: String,
    pub alias_a: String,
    pub alias_b: String,
    /// Raw `pmid:method:quality` entries joined by `|`
    pub publications: String,
    pub data_source: Option<String>,
}

impl RawInteractionRow {
    pub fn pair_key(&self) -> PairKey<'_> {
        PairKey {
            uniprot_a: &self.uniprot_a,
            uniprot_b: &self.uniprot_b,
        }
    }
}

/// Confidence label derived from tier membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    High,
    Low,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interaction category (HiNT "network variety").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Binary,
    CoComplex,
}

impl Category {
    /// Merge order of the category partitions.
    pub const ALL: [Category; 2] = [Category::Binary, Category::CoComplex];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::CoComplex => "co-complex",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row after tier reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledRecord {
    pub row: RawInteractionRow,
    pub confidence: Confidence,
    pub category: Category,
}

impl ReconciledRecord {
    pub fn pair_key(&self) -> PairKey<'_> {
        self.row.pair_key()
    }

    /// `UniprotA-UniprotB`, used for names and identifiers downstream.
    pub fn display_name(&self) -> String {
        self.pair_key().to_string()
    }
}
