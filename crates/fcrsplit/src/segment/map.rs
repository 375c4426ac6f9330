use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::identifier::Identifier;

use super::range::PageRange;

/// Identifier → page range, iterated in order of first appearance.
///
/// Re-inserting an identifier replaces its range but keeps its original
/// position, so a receipt number that shows up again later in the document
/// ends up mapped to its last occurrence only.
#[derive(Debug, Clone, Default)]
pub struct RangeMap {
    entries: IndexMap<Identifier, PageRange>,
}

impl RangeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the range previously stored for `identifier`, if any.
    pub fn insert(&mut self, identifier: Identifier, range: PageRange) -> Option<PageRange> {
        self.entries.insert(identifier, range)
    }

    pub fn get(&self, identifier: &Identifier) -> Option<PageRange> {
        self.entries.get(identifier).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, PageRange)> {
        self.entries.iter().map(|(id, range)| (id, *range))
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.keys()
    }

    /// Every page index assigned to some range, ascending.
    pub fn covered_pages(&self) -> Vec<usize> {
        let mut pages: Vec<usize> = self.entries.values().flat_map(|r| r.iter()).collect();
        pages.sort_unstable();
        pages
    }
}

// Order-sensitive, unlike IndexMap's own equality.
impl PartialEq for RangeMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for RangeMap {}

impl<'a> IntoIterator for &'a RangeMap {
    type Item = (&'a Identifier, PageRange);
    type IntoIter = Box<dyn Iterator<Item = (&'a Identifier, PageRange)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for RangeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, range) in &self.entries {
            map.serialize_entry(id, range)?;
        }
        map.end()
    }
}
