use std::cell::OnceCell;

use lopdf::ObjectId;

use crate::processor::PageText;

#[derive(Debug)]
pub struct Page {
    index: usize,
    number: u32,
    object_id: ObjectId,
    text: OnceCell<PageText>,
}

impl Page {
    pub(crate) fn new(index: usize, number: u32, object_id: ObjectId) -> Self {
        Self {
            index,
            number,
            object_id,
            text: OnceCell::new(),
        }
    }

    /// Zero-based position in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    /// lopdf's 1-based page number.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub(crate) fn object_id(&self) -> ObjectId {
        self.object_id
    }

    pub fn cached_text(&self) -> Option<&PageText> {
        self.text.get()
    }

    /// Runs `extract` on first access only; later calls return the cached text.
    pub fn text_or_extract<F>(&self, extract: F) -> &PageText
    where
        F: FnOnce() -> PageText,
    {
        self.text.get_or_init(extract)
    }
}
