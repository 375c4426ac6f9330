//! Read-only view over a loaded PDF plus page-subset extraction.

pub mod page;

use std::collections::BTreeSet;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

use crate::error::DocumentError;
use crate::segment::PageRange;

pub use page::Page;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITED_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against cyclic `/Parent` chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// A newly built PDF holding a contiguous slice of the source's pages.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

pub struct PdfDocument {
    inner: Document,
    pages: Vec<Page>,
}

impl PdfDocument {
    pub fn load(bytes: &[u8]) -> Result<Self, DocumentError> {
        let inner = Document::load_mem(bytes).map_err(|e| {
            // lopdf may refuse an encrypted file outright instead of loading it
            if declares_encryption(bytes) {
                DocumentError::Encrypted
            } else {
                DocumentError::Parse(e)
            }
        })?;
        if inner.is_encrypted() {
            return Err(DocumentError::Encrypted);
        }

        // get_pages() is keyed by 1-based page number, already in document order
        let pages = inner
            .get_pages()
            .into_iter()
            .enumerate()
            .map(|(index, (number, object_id))| Page::new(index, number, object_id))
            .collect();

        Ok(Self { inner, pages })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn page_or_err(&self, index: usize) -> Result<&Page, DocumentError> {
        self.page(index).ok_or(DocumentError::PageOutOfRange {
            index,
            count: self.pages.len(),
        })
    }

    /// Embedded text layer of one page, without any OCR.
    pub fn direct_text(&self, index: usize) -> Result<String, DocumentError> {
        let page = self.page_or_err(index)?;
        self.inner
            .extract_text(&[page.number()])
            .map_err(|source| DocumentError::TextLayer { index, source })
    }

    /// Builds a new document containing exactly the pages in `range`, in
    /// original order. Only objects reachable from those pages are copied.
    pub fn extract_pages(&self, range: PageRange) -> Result<OutputDocument, DocumentError> {
        self.page_or_err(range.end())?;

        let mut doc = Document::with_version(self.inner.version.clone());
        doc.max_id = self.inner.max_id;
        let pages_id = doc.new_object_id();

        let mut copied: BTreeSet<ObjectId> = BTreeSet::new();
        let mut pending: Vec<ObjectId> = Vec::new();
        let mut kids: Vec<Object> = Vec::with_capacity(range.page_count());

        for page in &self.pages[range.start()..=range.end()] {
            let mut dict = self.flattened_page(page.object_id())?;
            push_dictionary_references(&dict, &mut pending);
            dict.set("Parent", pages_id);

            copied.insert(page.object_id());
            doc.objects.insert(page.object_id(), Object::Dictionary(dict));
            kids.push(page.object_id().into());
        }

        while let Some(id) = pending.pop() {
            if !copied.insert(id) {
                continue;
            }
            if let Ok(object) = self.inner.get_object(id) {
                push_references(object, &mut pending);
                doc.objects.insert(id, object.clone());
            }
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => kids.len() as i64,
                "Kids" => kids,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| DocumentError::Serialize(e.to_string()))?;

        Ok(OutputDocument {
            bytes,
            page_count: range.page_count(),
        })
    }

    /// The page dictionary with inherited attributes copied in.
    fn flattened_page(&self, page_id: ObjectId) -> Result<Dictionary, DocumentError> {
        let mut dict = self
            .inner
            .get_dictionary(page_id)
            .map_err(DocumentError::Parse)?
            .clone();

        let mut parent = dict.get(b"Parent").and_then(Object::as_reference).ok();
        for _ in 0..MAX_TREE_DEPTH {
            let Some(node) = parent.and_then(|id| self.inner.get_dictionary(id).ok()) else {
                break;
            };
            for key in INHERITED_KEYS {
                if !dict.has(key) {
                    if let Ok(value) = node.get(key) {
                        dict.set(key.to_vec(), value.clone());
                    }
                }
            }
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        }

        Ok(dict)
    }
}

fn declares_encryption(bytes: &[u8]) -> bool {
    const KEY: &[u8] = b"/Encrypt";
    bytes.windows(KEY.len()).any(|w| w == KEY)
}

fn push_references(object: &Object, pending: &mut Vec<ObjectId>) {
    match object {
        Object::Reference(id) => pending.push(*id),
        Object::Array(items) => {
            for item in items {
                push_references(item, pending);
            }
        }
        Object::Dictionary(dict) => push_dictionary_references(dict, pending),
        Object::Stream(stream) => push_dictionary_references(&stream.dict, pending),
        _ => {}
    }
}

/// `/Parent` links lead back into the source page tree and are not followed.
fn push_dictionary_references(dict: &Dictionary, pending: &mut Vec<ObjectId>) {
    for (key, value) in dict.iter() {
        if key.as_slice() != b"Parent" {
            push_references(value, pending);
        }
    }
}
