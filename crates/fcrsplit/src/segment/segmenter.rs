use tracing::{debug, warn};

use crate::identifier::Identifier;

use super::map::RangeMap;
use super::range::PageRange;

/// Streaming state machine turning per-page observations into ranges.
///
/// Pages without an identifier are absorbed into whichever range is open.
/// Pages seen before the first identifier belong to no range.
#[derive(Debug, Default)]
pub struct RangeSegmenter {
    open: Option<(Identifier, usize)>,
    last_page: Option<usize>,
    ranges: RangeMap,
}

impl RangeSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next page. Indices must be strictly increasing; anything else
    /// is dropped.
    pub fn observe(&mut self, page_index: usize, identifier: Option<&Identifier>) {
        if let Some(last) = self.last_page {
            if page_index <= last {
                warn!(
                    page = page_index,
                    last_page = last,
                    "Ignoring out-of-order page observation"
                );
                return;
            }
        }
        self.last_page = Some(page_index);

        let Some(identifier) = identifier else {
            return;
        };

        if matches!(&self.open, Some((current, _)) if current == identifier) {
            return;
        }

        if let Some((previous, start)) = self.open.take() {
            // page_index > start here, so the range is never inverted
            self.close(previous, start, page_index - 1);
        }

        debug!(page = page_index, identifier = %identifier, "Opening range");
        self.open = Some((identifier.clone(), page_index));
    }

    /// Identifier of the range currently being extended, if any.
    pub fn current(&self) -> Option<&Identifier> {
        self.open.as_ref().map(|(id, _)| id)
    }

    /// Closes any open range at the last observed page and returns the map.
    pub fn finish(mut self) -> RangeMap {
        if let (Some((identifier, start)), Some(last)) = (self.open.take(), self.last_page) {
            self.close(identifier, start, last);
        }
        self.ranges
    }

    fn close(&mut self, identifier: Identifier, start: usize, end: usize) {
        let Some(range) = PageRange::new(start, end) else {
            return;
        };
        debug!(identifier = %identifier, start, end, "Closing range");
        if let Some(previous) = self.ranges.insert(identifier.clone(), range) {
            warn!(
                identifier = %identifier,
                previous = %previous,
                current = %range,
                "Identifier reappeared; earlier range replaced"
            );
        }
    }
}

/// Runs a whole observation sequence through a fresh [`RangeSegmenter`].
pub fn segment<'a, I>(observations: I) -> RangeMap
where
    I: IntoIterator<Item = (usize, Option<&'a Identifier>)>,
{
    let mut segmenter = RangeSegmenter::new();
    for (page, identifier) in observations {
        segmenter.observe(page, identifier);
    }
    segmenter.finish()
}
