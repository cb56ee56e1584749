//! Parse-tree types, traversal, and a structural cursor.
//!
//! This crate has no opinion on the subject language's grammar beyond the
//! vocabulary in [`node`] — the [`parser::Parser`] trait is the seam where a
//! host process plugs in its own tokenizer/parser.

mod cursor;
mod location;
mod node;
mod parser;
mod visitor;

pub use cursor::TreeCursor;
pub use location::{create_anonymous_name, node_location, node_range, node_text, Location};
pub use node::{Node, Phrase, PhraseKind, Token, TokenKind};
pub use parser::{ParseDiagnostic, ParseTree, Parser};
pub use visitor::{traverse, FnVisitor, Visitor};
