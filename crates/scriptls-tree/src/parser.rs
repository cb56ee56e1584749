//! The seam between this crate and the external tokenizer/parser for the
//! subject language. Parsing the language's grammar is out of scope here —
//! this trait is the pluggable interface a host process wires to its own
//! parser implementation.

use crate::node::Node;

/// A successful or partial parse. The external parser is expected to
/// recover from syntax errors by emitting `PhraseKind::ErrorNode` nodes
/// rather than failing outright, so `root` is always present even when
/// `diagnostics` is non-empty.
#[derive(Debug, Clone)]
pub struct ParseTree {
    pub root: Node,
    pub diagnostics: Vec<ParseDiagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub message: String,
    pub offset: usize,
}

/// Implemented by the host's tokenizer/parser for the subject language.
/// The core only ever calls `parse`; it has no opinion on lexical or
/// grammatical detail beyond the `Node` vocabulary in this crate.
pub trait Parser: Send + Sync {
    fn parse(&self, text: &str) -> ParseTree;
}
