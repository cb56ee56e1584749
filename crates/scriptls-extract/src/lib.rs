//! Parse-tree to symbol/reference-table extraction (§4.4).

mod doc_comment;
mod extractor;

pub use doc_comment::{parse_doc_tags, DocTags, MagicMethod, MagicProperty};
pub use extractor::SymbolExtractor;
