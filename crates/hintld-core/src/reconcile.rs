//! Quality-tier reconciliation
//!
//! Full outer join of the "all" and "hq" tables of one category on the
//! ordered pair `(Uniprot_A, Uniprot_B)`, followed by labelling:
//!
//! | all side | hq side | result |
//! |---|---|---|
//! | present | absent | low, all-origin fields |
//! | present | present, same publication field | high, origin per [`FieldOrigin`] |
//! | present | present, different publication field | low, all-origin fields |
//! | absent | present | dropped or promoted, per [`HqOnlyPolicy`] |
//!
//! Absence is `None`, never the empty string, so a genuinely empty
//! publication field still compares equal only to another empty field.
//!
//! Output: high-confidence rows first, then low-confidence rows, each in
//! join order ("all" table order, then hq-only pairs in hq order).

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::model::{Category, Confidence, PairKey, RawInteractionRow, ReconciledRecord};
use crate::table::Table;

/// Which side's descriptive fields a high-confidence row takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrigin {
    /// "all" table for every category
    #[default]
    All,
    /// "hq" table for every category
    Hq,
    /// "all" for binary, "hq" for co-complex
    Legacy,
}

impl FieldOrigin {
    fn prefers_hq(self, category: Category) -> bool {
        match self {
            Self::All => false,
            Self::Hq => true,
            Self::Legacy => category == Category::CoComplex,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Hq => "hq",
            Self::Legacy => "legacy",
        }
    }
}

/// Handling of pairs found only in the hq table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HqOnlyPolicy {
    #[default]
    Drop,
    /// Emit as high confidence with hq-origin fields
    Promote,
}

impl HqOnlyPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Promote => "promote",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub high_confidence_fields: FieldOrigin,
    pub hq_only_pairs: HqOnlyPolicy,
}

/// Counters from one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub high: usize,
    pub low: usize,
    /// Pairs in both tiers whose publication fields differ (labelled low)
    pub mismatched: usize,
    pub hq_only_dropped: usize,
    pub hq_only_promoted: usize,
    /// Repeated pair keys ignored (first row wins)
    pub duplicate_all: usize,
    pub duplicate_hq: usize,
}

impl ReconcileStats {
    pub fn total(&self) -> usize {
        self.high + self.low
    }
}

/// Joined row slots for one pair key.
#[derive(Default)]
struct Slots<'a> {
    all: Option<&'a RawInteractionRow>,
    hq: Option<&'a RawInteractionRow>,
}

/// Reconcile one category. `hq = None` behaves as an empty hq table.
pub fn reconcile(
    all: &Table,
    hq: Option<&Table>,
    category: Category,
    options: &ReconcileOptions,
) -> (Vec<ReconciledRecord>, ReconcileStats) {
    let mut stats = ReconcileStats::default();

    let capacity = all.len() + hq.map_or(0, Table::len);
    let mut index: FxHashMap<PairKey<'_>, usize> = FxHashMap::default();
    index.reserve(capacity);
    let mut joined: Vec<Slots<'_>> = Vec::with_capacity(capacity);

    for row in all.rows() {
        let slot = *index.entry(row.pair_key()).or_insert_with(|| {
            joined.push(Slots::default());
            joined.len() - 1
        });
        if joined[slot].all.is_some() {
            stats.duplicate_all += 1;
            log::warn!("{category}: duplicate pair {} in all table, keeping first", row.pair_key());
            continue;
        }
        joined[slot].all = Some(row);
    }

    for row in hq.map(Table::rows).unwrap_or_default() {
        let slot = *index.entry(row.pair_key()).or_insert_with(|| {
            joined.push(Slots::default());
            joined.len() - 1
        });
        if joined[slot].hq.is_some() {
            stats.duplicate_hq += 1;
            log::warn!("{category}: duplicate pair {} in hq table, keeping first", row.pair_key());
            continue;
        }
        joined[slot].hq = Some(row);
    }

    let prefers_hq = options.high_confidence_fields.prefers_hq(category);
    let label = |row: &RawInteractionRow, confidence| ReconciledRecord {
        row: row.clone(),
        confidence,
        category,
    };

    let mut high = Vec::new();
    let mut low = Vec::new();
    for slots in &joined {
        match (slots.all, slots.hq) {
            (Some(a), None) => low.push(label(a, Confidence::Low)),
            (Some(a), Some(h)) if a.publications == h.publications => {
                let origin = if prefers_hq { h } else { a };
                high.push(label(origin, Confidence::High));
            }
            (Some(a), Some(h)) => {
                stats.mismatched += 1;
                log::debug!(
                    "{category}: {} publication fields differ between tiers ({:?} vs {:?})",
                    a.pair_key(),
                    a.publications,
                    h.publications
                );
                low.push(label(a, Confidence::Low));
            }
            (None, Some(h)) => match options.hq_only_pairs {
                HqOnlyPolicy::Drop => {
                    stats.hq_only_dropped += 1;
                    log::warn!("{category}: pair {} only in hq table, dropped", h.pair_key());
                }
                HqOnlyPolicy::Promote => {
                    stats.hq_only_promoted += 1;
                    high.push(label(h, Confidence::High));
                }
            },
            // Every slot is created while filling one of its sides
            (None, None) => {}
        }
    }

    stats.high = high.len();
    stats.low = low.len();
    high.append(&mut low);
    (high, stats)
}
