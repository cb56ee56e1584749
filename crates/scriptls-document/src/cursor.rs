//! A [`TreeCursor`] paired with the owning document's symbol and reference
//! tables, giving position-based queries a single entry point (§4.8).

use scriptls_position::ByteSpan;
use scriptls_symbols::{NameResolver, Reference, ReferenceTable, Symbol, SymbolTable};
use scriptls_tree::{Node, TreeCursor};
use std::sync::Arc;

/// A structural cursor over a document's parse tree, with derived views
/// into its symbol and reference tables at the current position.
#[derive(Clone)]
pub struct DocumentCursor {
    cursor: TreeCursor,
    symbols: SymbolTable,
    references: ReferenceTable,
}

impl DocumentCursor {
    pub fn new(root: Arc<Node>, symbols: SymbolTable, references: ReferenceTable) -> Self {
        Self { cursor: TreeCursor::new(root), symbols, references }
    }

    pub fn current(&self) -> &Node {
        self.cursor.current()
    }

    pub fn root(&self) -> &Node {
        self.cursor.root()
    }

    pub fn path(&self) -> &[usize] {
        self.cursor.path()
    }

    pub fn position(&mut self, offset: usize) {
        self.cursor.position(offset);
    }

    pub fn parent(&mut self) -> bool {
        self.cursor.parent()
    }

    pub fn child(&mut self, i: usize) -> bool {
        self.cursor.child(i)
    }

    pub fn nth_child(&mut self, pred: impl Fn(&Node) -> bool) -> bool {
        self.cursor.nth_child(pred)
    }

    pub fn ancestor(&mut self, pred: impl Fn(&Node) -> bool) -> bool {
        self.cursor.ancestor(pred)
    }

    pub fn spine(&self) -> Vec<&Node> {
        self.cursor.spine()
    }

    /// The symbol declared by the node currently under the cursor, if its
    /// span exactly matches a symbol's location.
    pub fn node_symbol(&self) -> Option<&Symbol> {
        let span = self.current().span();
        find_symbol_with_span(self.symbols.root(), span)
    }

    /// The reference recorded at the current node's span, if any.
    pub fn node_reference(&self) -> Option<&Reference> {
        let span = self.current().span();
        self.references.all_references().into_iter().find(|r| r.location.span == span)
    }

    /// The innermost function/method/closure/class/namespace/file symbol
    /// containing the cursor's current position (§4.5).
    pub fn scope(&self) -> &Symbol {
        let offset = self.current().span().start;
        self.symbols.scope(offset)
    }

    /// The name resolver state as of the cursor's current position (§4.5).
    pub fn name_resolver(&self) -> NameResolver {
        let offset = self.current().span().start;
        self.symbols.name_resolver_at(offset)
    }
}

fn find_symbol_with_span(symbol: &Symbol, span: ByteSpan) -> Option<&Symbol> {
    if symbol.location.span == span {
        return Some(symbol);
    }
    symbol.children.iter().find_map(|c| find_symbol_with_span(c, span))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use scriptls_extract::SymbolExtractor;
    use scriptls_tree::{Node as TNode, PhraseKind, TokenKind};
    use scriptls_uri::DocumentUri;

    fn sample() -> (Arc<Node>, SymbolTable, ReferenceTable) {
        let class = TNode::phrase(
            PhraseKind::ClassDeclaration,
            vec![TNode::token(TokenKind::Class, 0, 5), TNode::token(TokenKind::Identifier, 6, 1)],
        );
        let tree = TNode::phrase(PhraseKind::SourceFile, vec![class]);
        let (symbols, references) = SymbolExtractor::new("class A", DocumentUri::parse("file:///a.src")).extract(&tree);
        (Arc::new(tree), symbols, references)
    }

    #[test]
    fn node_symbol_finds_the_declaration_at_the_cursor() {
        let (root, symbols, references) = sample();
        let mut cursor = DocumentCursor::new(root, symbols, references);
        cursor.child(0);
        assert_eq!(cursor.node_symbol().map(|s| s.name.as_str()), Some("A"));
    }

    #[test]
    fn scope_delegates_to_the_symbol_table_at_the_cursor_position() {
        let (root, symbols, references) = sample();
        let mut cursor = DocumentCursor::new(root, symbols, references);
        cursor.position(6);
        assert_eq!(cursor.scope().kind, scriptls_symbols::SymbolKind::Class);
    }
}
