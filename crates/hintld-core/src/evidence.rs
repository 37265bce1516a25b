//! Evidence deduplication

use rustc_hash::FxHashSet;

use crate::publication::{Db, Publication};

/// Identity of a publication as evidence: `(db, id, method, quality)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EvidenceEntry {
    pub db: Db,
    pub id: String,
    pub method: String,
    pub quality: String,
}

impl From<&Publication> for EvidenceEntry {
    fn from(p: &Publication) -> Self {
        Self {
            db: p.db,
            id: p.id.clone(),
            method: p.method.clone(),
            quality: p.quality.clone(),
        }
    }
}

/// Unique evidence entries in first-seen order.
#[derive(Debug, Default)]
pub struct EvidenceSet {
    seen: FxHashSet<EvidenceEntry>,
    entries: Vec<EvidenceEntry>,
}

impl EvidenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a publication; returns false if its tuple was already present.
    pub fn insert(&mut self, publication: &Publication) -> bool {
        let entry = EvidenceEntry::from(publication);
        if self.seen.contains(&entry) {
            return false;
        }
        self.seen.insert(entry.clone());
        self.entries.push(entry);
        true
    }

    pub fn extend<'a>(&mut self, publications: impl IntoIterator<Item = &'a Publication>) {
        for publication in publications {
            self.insert(publication);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EvidenceEntry> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<EvidenceEntry> {
        self.entries
    }
}
