use anyhow::Error;

use crate::error::IngestError;

/// Lazy, page-ordered text extraction over a parsed PDF.
///
/// Yields `(page_number, text)` pairs with `page_number` starting at 1 and
/// increasing by 1. Concatenating the yielded texts in order reconstructs
/// the document text; nothing is inserted between pages beyond what
/// extraction itself yields.
pub struct PdfPages {
    doc: lopdf::Document,
    page_numbers: Vec<u32>,
    next: usize,
}

impl PdfPages {
    /// Parse PDF bytes. Fails with [`IngestError::DocumentOpen`] on
    /// malformed input, before any page is extracted.
    pub fn open(bytes: &[u8]) -> Result<Self, IngestError> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| IngestError::DocumentOpen(Error::new(e).context("failed to parse PDF")))?;

        let mut page_numbers: Vec<u32> = doc.get_pages().keys().cloned().collect();
        page_numbers.sort_unstable();

        Ok(Self {
            doc,
            page_numbers,
            next: 0,
        })
    }

    /// Total number of pages, known up front so callers can scale progress.
    pub fn page_count(&self) -> usize {
        self.page_numbers.len()
    }
}

impl Iterator for PdfPages {
    type Item = (usize, String);

    fn next(&mut self) -> Option<Self::Item> {
        let page = *self.page_numbers.get(self.next)?;
        self.next += 1;

        // A page that fails text extraction contributes an empty fragment
        // rather than aborting the document.
        let text = self.doc.extract_text(&[page]).unwrap_or_default();
        Some((self.next, text))
    }
}
