//! Per-document reference store: a spatial partition of nested scopes
//! whose leaves are usage-site records (§4.5 "ReferenceTable").

use crate::symbol::Reference;
use scriptls_position::ByteSpan;
use scriptls_uri::DocumentUri;

/// A nested scope range. Ranges are a spatial partition: a child scope's
/// range always falls inside its parent's.
#[derive(Debug, Clone)]
pub struct ReferenceScope {
    pub range: ByteSpan,
    pub references: Vec<Reference>,
    pub children: Vec<ReferenceScope>,
}

impl ReferenceScope {
    pub fn new(range: ByteSpan) -> Self {
        Self { range, references: Vec::new(), children: Vec::new() }
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceTable {
    uri: DocumentUri,
    root: ReferenceScope,
}

impl ReferenceTable {
    pub fn new(uri: DocumentUri, root: ReferenceScope) -> Self {
        Self { uri, root }
    }

    pub fn uri(&self) -> &DocumentUri {
        &self.uri
    }

    pub fn root(&self) -> &ReferenceScope {
        &self.root
    }

    /// All references whose location falls at or immediately before
    /// `offset`, innermost scope first — the shape `referenceAtPosition`
    /// and `referenceToTypeString` (§4.6) query against.
    pub fn references_at(&self, offset: usize) -> Vec<&Reference> {
        let mut out = Vec::new();
        collect_at(&self.root, offset, &mut out);
        out
    }

    pub fn all_references(&self) -> Vec<&Reference> {
        let mut out = Vec::new();
        collect_all(&self.root, &mut out);
        out
    }
}

fn collect_at<'a>(scope: &'a ReferenceScope, offset: usize, out: &mut Vec<&'a Reference>) {
    if !scope.range.contains_span(ByteSpan::empty(offset)) {
        return;
    }
    for child in &scope.children {
        collect_at(child, offset, out);
    }
    for reference in &scope.references {
        if reference.location.span.contains(offset) || reference.location.span.end == offset {
            out.push(reference);
        }
    }
}

fn collect_all<'a>(scope: &'a ReferenceScope, out: &mut Vec<&'a Reference>) {
    out.extend(scope.references.iter());
    for child in &scope.children {
        collect_all(child, out);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::kind::SymbolKind;
    use scriptls_tree::Location;

    fn reference(name: &str, start: usize, end: usize) -> Reference {
        Reference::new(SymbolKind::Variable, name, Location::new(DocumentUri::parse("file:///a.src"), ByteSpan::new(start, end)))
    }

    #[test]
    fn references_at_prefers_inner_scope() {
        let mut inner = ReferenceScope::new(ByteSpan::new(10, 20));
        inner.references.push(reference("x", 12, 13));
        let mut root = ReferenceScope::new(ByteSpan::new(0, 30));
        root.references.push(reference("y", 1, 2));
        root.children.push(inner);

        let table = ReferenceTable::new(DocumentUri::parse("file:///a.src"), root);
        let found = table.references_at(12);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "x");
    }

    #[test]
    fn all_references_walks_every_scope() {
        let mut inner = ReferenceScope::new(ByteSpan::new(10, 20));
        inner.references.push(reference("x", 12, 13));
        let mut root = ReferenceScope::new(ByteSpan::new(0, 30));
        root.references.push(reference("y", 1, 2));
        root.children.push(inner);

        let table = ReferenceTable::new(DocumentUri::parse("file:///a.src"), root);
        assert_eq!(table.all_references().len(), 2);
    }
}
