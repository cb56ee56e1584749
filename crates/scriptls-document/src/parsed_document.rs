//! Owns a [`TextModel`] and the parse tree derived from it, with a
//! debounced reparse schedule (§4.2).

use parking_lot::Mutex;
use scriptls_extract::SymbolExtractor;
use scriptls_position::{Position, TextChange, TextModel};
use scriptls_symbols::{ReferenceTable, SymbolTable};
use scriptls_tree::{Node, ParseDiagnostic, Parser};
use scriptls_uri::DocumentUri;
use std::sync::Arc;
use std::time::Duration;

/// The default reparse debounce window (§4.2).
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

struct Inner {
    uri: DocumentUri,
    model: TextModel,
    parser: Arc<dyn Parser>,
    tree: Arc<Node>,
    diagnostics: Vec<ParseDiagnostic>,
    symbols: SymbolTable,
    references: ReferenceTable,
}

impl Inner {
    fn reparse(&mut self) {
        let text = self.model.text();
        let parsed = self.parser.parse(&text);
        let (symbols, references) = SymbolExtractor::new(&text, self.uri.clone()).extract(&parsed.root);
        self.tree = Arc::new(parsed.root);
        self.diagnostics = parsed.diagnostics;
        self.symbols = symbols;
        self.references = references;
        tracing::debug!(uri = %self.uri, diagnostics = self.diagnostics.len(), "reparsed document");
    }
}

/// A document under management: a [`TextModel`] plus the parse/symbol/
/// reference state derived from it, kept in sync by debounced reparses.
///
/// Cloning a `ParsedDocument` clones the handle, not the document — all
/// clones share the same underlying state, which is how the pending
/// reparse task reaches back into it after `apply_changes` returns.
#[derive(Clone)]
pub struct ParsedDocument {
    inner: Arc<Mutex<Inner>>,
    debounce: Duration,
    pending: Arc<Mutex<Option<tokio::task::JoinHandle<()>>>>,
}

impl ParsedDocument {
    pub fn open(uri: DocumentUri, text: impl Into<String>, parser: Arc<dyn Parser>) -> Self {
        Self::with_debounce(uri, text, parser, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(uri: DocumentUri, text: impl Into<String>, parser: Arc<dyn Parser>, debounce: Duration) -> Self {
        let text = text.into();
        let parsed = parser.parse(&text);
        let (symbols, references) = SymbolExtractor::new(&text, uri.clone()).extract(&parsed.root);
        let model = TextModel::new(uri.as_str(), text);
        let inner = Inner {
            uri,
            model,
            parser,
            tree: Arc::new(parsed.root),
            diagnostics: parsed.diagnostics,
            symbols,
            references,
        };
        Self { inner: Arc::new(Mutex::new(inner)), debounce, pending: Arc::new(Mutex::new(None)) }
    }

    pub fn uri(&self) -> DocumentUri {
        self.inner.lock().uri.clone()
    }

    pub fn text(&self) -> String {
        self.inner.lock().model.text()
    }

    pub fn tree(&self) -> Arc<Node> {
        self.inner.lock().tree.clone()
    }

    pub fn diagnostics(&self) -> Vec<ParseDiagnostic> {
        self.inner.lock().diagnostics.clone()
    }

    pub fn symbols(&self) -> SymbolTable {
        self.inner.lock().symbols.clone()
    }

    pub fn references(&self) -> ReferenceTable {
        self.inner.lock().references.clone()
    }

    pub fn word_at_offset(&self, offset: usize) -> Option<scriptls_position::PositionRange> {
        self.inner.lock().model.word_at_offset(offset)
    }

    pub fn position_at_offset(&self, offset: usize) -> Position {
        self.inner.lock().model.position_at_offset(offset)
    }

    pub fn offset_at_position(&self, pos: Position) -> usize {
        self.inner.lock().model.offset_at_position(pos)
    }

    /// Apply a batch of content changes (already sorted or not — the
    /// underlying `TextModel` sorts them by descending end position) and
    /// schedule a debounced reparse. Any reparse scheduled by an earlier
    /// call that has not fired yet is cancelled, so only the last call
    /// within a quiet window ever reparses, and it always sees the final
    /// text.
    pub fn apply_changes(&self, changes: &[TextChange]) {
        {
            let mut inner = self.inner.lock();
            inner.model.apply_changes(changes);
        }
        self.schedule_reparse();
    }

    fn schedule_reparse(&self) {
        let mut pending = self.pending.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        let inner = self.inner.clone();
        let debounce = self.debounce;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            inner.lock().reparse();
        }));
    }

    /// Cancel any pending debounced reparse and run it synchronously now.
    pub fn flush(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
        self.inner.lock().reparse();
    }

    pub fn traverse(&self, visitor: &mut dyn scriptls_tree::Visitor) {
        scriptls_tree::traverse(&self.tree(), visitor);
    }

    pub fn node_range(&self, node: &Node) -> scriptls_position::ByteSpan {
        scriptls_tree::node_range(node)
    }

    pub fn node_text(&self, node: &Node) -> String {
        let text = self.text();
        scriptls_tree::node_text(node, &text).to_string()
    }

    pub fn node_location(&self, node: &Node) -> scriptls_tree::Location {
        scriptls_tree::node_location(node, &self.uri())
    }

    pub fn create_anonymous_name(&self, kind_tag: &str, node: &Node) -> String {
        scriptls_tree::create_anonymous_name(kind_tag, node.span())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use scriptls_tree::ParseTree;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Splits the text on whitespace into `Identifier` tokens wrapped in a
    /// `SourceFile` phrase — just enough of a stand-in parser to exercise
    /// debouncing and the document-level accessors without depending on
    /// the real subject-language grammar.
    struct CountingParser {
        calls: Arc<AtomicUsize>,
    }

    impl Parser for CountingParser {
        fn parse(&self, text: &str) -> ParseTree {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ParseTree { root: Node::token(scriptls_tree::TokenKind::Identifier, 0, text.len()), diagnostics: vec![] }
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn flush_forces_synchronous_reparse() {
        let calls = Arc::new(AtomicUsize::new(0));
        let parser = Arc::new(CountingParser { calls: calls.clone() });
        let doc = ParsedDocument::with_debounce(
            DocumentUri::parse("file:///a.src"),
            "hello",
            parser,
            Duration::from_secs(60),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        doc.apply_changes(&[TextChange { start: Position::new(0, 5), end: Position::new(0, 5), text: " world".to_string() }]);
        doc.flush();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(doc.text(), "hello world");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn rapid_edits_within_the_window_coalesce_into_one_reparse() {
        let calls = Arc::new(AtomicUsize::new(0));
        let parser = Arc::new(CountingParser { calls: calls.clone() });
        let doc = ParsedDocument::with_debounce(
            DocumentUri::parse("file:///a.src"),
            "a",
            parser,
            Duration::from_millis(40),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for _ in 0..5 {
            doc.apply_changes(&[TextChange { start: Position::new(0, 1), end: Position::new(0, 1), text: "b".to_string() }]);
        }
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(doc.text(), "abbbbb");
    }
}
