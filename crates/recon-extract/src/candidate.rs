//! Unvalidated candidate sets.

use indexmap::IndexSet;
use recon_core::ContactKind;

/// Raw candidate strings of one contact kind.
///
/// Deduplicated by exact string equality, in first-seen order. Because
/// candidates are normalized before insertion (lower-cased emails, digit
/// strings for phones, `+`-prefixed when written internationally), equality
/// here is equality of the normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    kind: ContactKind,
    values: IndexSet<String>,
}

impl CandidateSet {
    /// Create an empty set for a contact kind.
    #[must_use]
    pub fn new(kind: ContactKind) -> Self {
        Self {
            kind,
            values: IndexSet::new(),
        }
    }

    /// Create a set from already-normalized values.
    pub fn from_values<I, S>(kind: ContactKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new(kind);
        for value in values {
            set.insert(value);
        }
        set
    }

    /// The contact kind of every candidate in the set.
    #[must_use]
    pub fn kind(&self) -> ContactKind {
        self.kind
    }

    /// Insert a candidate, returning `false` if it was already present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        self.values.insert(value.into())
    }

    /// Exact string membership.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in first-seen order.
    pub fn iter(&self) -> indexmap::set::Iter<'_, String> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
