//! Document-anchored spans and deterministic anonymous naming.

use crate::node::Node;
use scriptls_position::ByteSpan;
use scriptls_uri::DocumentUri;
use serde::{Deserialize, Serialize};

/// A byte span anchored to the document it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub uri: DocumentUri,
    pub span: ByteSpan,
}

impl Location {
    pub fn new(uri: DocumentUri, span: ByteSpan) -> Self {
        Self { uri, span }
    }
}

/// The byte span a node covers — a thin alias kept for symmetry with
/// [`node_text`] and [`node_location`] so callers don't reach into `Node`
/// directly.
pub fn node_range(node: &Node) -> ByteSpan {
    node.span()
}

pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.text(source)
}

pub fn node_location(node: &Node, uri: &DocumentUri) -> Location {
    Location::new(uri.clone(), node.span())
}

/// A deterministic name for an unnamed declaration (an anonymous class or
/// closure), derived from the declaration's own span so that re-parsing
/// identical source always reproduces the same name, and two anonymous
/// declarations at different positions in the same document never collide.
/// The exact shape only needs to be stable and collision-free within one
/// document, not human-friendly.
pub fn create_anonymous_name(kind_tag: &str, span: ByteSpan) -> String {
    format!("#anonymous:{kind_tag}@{}-{}", span.start, span.end)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::node::{PhraseKind, TokenKind};

    #[test]
    fn anonymous_name_is_deterministic() {
        let node = Node::phrase(PhraseKind::AnonymousClassDeclaration, vec![Node::token(TokenKind::Class, 10, 5)]);
        let a = create_anonymous_name("class", node.span());
        let b = create_anonymous_name("class", node.span());
        assert_eq!(a, b);
        assert_eq!(a, "#anonymous:class@10-15");
    }

    #[test]
    fn anonymous_name_differs_by_position() {
        let first = Node::token(TokenKind::Class, 0, 5);
        let second = Node::token(TokenKind::Class, 20, 5);
        assert_ne!(create_anonymous_name("class", first.span()), create_anonymous_name("class", second.span()));
    }

    #[test]
    fn node_location_carries_the_document_uri() {
        let uri = DocumentUri::parse("file:///a/b.src");
        let node = Node::token(TokenKind::Identifier, 3, 4);
        let loc = node_location(&node, &uri);
        assert_eq!(loc.uri, uri);
        assert_eq!(loc.span, ByteSpan::new(3, 7));
    }
}
