//! Debounced parse-tree ownership (§4.2) and a position-aware cursor over
//! a document's tree, symbol table, and reference table (§4.8).

mod cursor;
mod parsed_document;

pub use cursor::DocumentCursor;
pub use parsed_document::{ParsedDocument, DEFAULT_DEBOUNCE};
