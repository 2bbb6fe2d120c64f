//! PDF text extraction (lopdf).

mod extractor;

pub use extractor::PdfPages;
