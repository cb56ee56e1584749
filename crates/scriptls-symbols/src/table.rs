//! Per-document symbol tree (§4.5).

use crate::resolver::{ImportRule, NameResolver};
use crate::symbol::Symbol;
use scriptls_position::ByteSpan;
use scriptls_uri::DocumentUri;

/// A namespace-definition or namespace-use-declaration observed during
/// extraction, recorded with its byte offset so [`SymbolTable::name_resolver_at`]
/// can replay only the events preceding a query position.
#[derive(Debug, Clone)]
pub enum NamespaceEvent {
    SetNamespace { offset: usize, namespace: String },
    AddImport { offset: usize, rule: ImportRule },
}

impl NamespaceEvent {
    fn offset(&self) -> usize {
        match self {
            NamespaceEvent::SetNamespace { offset, .. } => *offset,
            NamespaceEvent::AddImport { offset, .. } => *offset,
        }
    }
}

/// A per-URI tree of symbols rooted at a synthetic file node, plus the
/// ordered namespace/import events needed to reconstruct resolver state
/// at an arbitrary position.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    uri: DocumentUri,
    root: Symbol,
    events: Vec<NamespaceEvent>,
}

impl SymbolTable {
    pub fn new(root: Symbol, events: Vec<NamespaceEvent>) -> Self {
        let uri = root.location.uri.clone();
        Self { uri, root, events }
    }

    pub fn uri(&self) -> &DocumentUri {
        &self.uri
    }

    pub fn root(&self) -> &Symbol {
        &self.root
    }

    /// Flatten the tree for indexing/search; order is document order.
    pub fn all_symbols(&self) -> Vec<&Symbol> {
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    /// The innermost symbol whose location contains `offset`, preferring
    /// the tightest (most deeply nested) match.
    pub fn symbols_in(&self, at: usize) -> Option<&Symbol> {
        find_innermost(&self.root, at)
    }

    /// The innermost function/method/closure/class/namespace/file symbol
    /// containing `at` — identical search to `symbols_in` restricted to
    /// scope-introducing kinds, falling back to the file root.
    pub fn scope(&self, at: usize) -> &Symbol {
        find_innermost_scope(&self.root, at).unwrap_or(&self.root)
    }

    /// Replay namespace-definition and namespace-use events up to `at`
    /// and return the resulting resolver. Linear in the number of
    /// namespace-related declarations preceding the position, per §4.5.
    pub fn name_resolver_at(&self, at: usize) -> NameResolver {
        let mut resolver = NameResolver::new();
        for event in &self.events {
            if event.offset() > at {
                break;
            }
            match event {
                NamespaceEvent::SetNamespace { namespace, .. } => resolver.set_namespace(namespace.clone()),
                NamespaceEvent::AddImport { rule, .. } => resolver.add_import(rule.clone()),
            }
        }
        resolver
    }
}

fn collect<'a>(symbol: &'a Symbol, out: &mut Vec<&'a Symbol>) {
    out.push(symbol);
    for child in &symbol.children {
        collect(child, out);
    }
}

fn find_innermost(symbol: &Symbol, at: usize) -> Option<&Symbol> {
    if !contains_offset(symbol.location.span, at) {
        return None;
    }
    for child in &symbol.children {
        if let Some(found) = find_innermost(child, at) {
            return Some(found);
        }
    }
    Some(symbol)
}

fn find_innermost_scope(symbol: &Symbol, at: usize) -> Option<&Symbol> {
    use crate::kind::SymbolKind;
    if !contains_offset(symbol.location.span, at) {
        return None;
    }
    let mut best: Option<&Symbol> = None;
    for child in &symbol.children {
        if let Some(found) = find_innermost_scope(child, at) {
            best = Some(found);
        }
    }
    if let Some(found) = best {
        return Some(found);
    }
    let is_scope = matches!(
        symbol.kind,
        SymbolKind::Function
            | SymbolKind::Method
            | SymbolKind::Constructor
            | SymbolKind::Class
            | SymbolKind::Interface
            | SymbolKind::Trait
            | SymbolKind::Namespace
            | SymbolKind::File
    );
    if is_scope {
        Some(symbol)
    } else {
        None
    }
}

fn contains_offset(span: ByteSpan, at: usize) -> bool {
    span.start <= at && at <= span.end
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::kind::SymbolKind;
    use crate::resolver::ImportKind;
    use scriptls_tree::Location;

    fn loc(start: usize, end: usize) -> Location {
        Location::new(DocumentUri::parse("file:///a.src"), ByteSpan::new(start, end))
    }

    fn sample_table() -> SymbolTable {
        let method = Symbol::new(SymbolKind::Method, "m", loc(20, 30), "A");
        let mut class = Symbol::new(SymbolKind::Class, "A", loc(0, 40), "");
        class.children.push(method);
        let mut file = Symbol::new(SymbolKind::File, "a.src", loc(0, 40), "");
        file.children.push(class);
        SymbolTable::new(
            file,
            vec![
                NamespaceEvent::SetNamespace { offset: 0, namespace: "App".to_string() },
                NamespaceEvent::AddImport {
                    offset: 5,
                    rule: ImportRule { kind: ImportKind::Default, alias: "B".to_string(), target_fqn: "Other\\B".to_string() },
                },
            ],
        )
    }

    #[test]
    fn symbols_in_returns_the_innermost_match() {
        let table = sample_table();
        let found = table.symbols_in(25).unwrap();
        assert_eq!(found.name, "m");
    }

    #[test]
    fn scope_falls_back_to_file_root_outside_any_declaration() {
        let table = sample_table();
        assert_eq!(table.scope(25).name, "m");
        assert_eq!(table.scope(1000).name, "a.src");
    }

    #[test]
    fn name_resolver_at_replays_only_preceding_events() {
        let table = sample_table();
        let before_import = table.name_resolver_at(2);
        assert_eq!(before_import.namespace(), "App");
        assert!(before_import.imports().is_empty());

        let after_import = table.name_resolver_at(10);
        assert_eq!(after_import.imports().len(), 1);
    }

    #[test]
    fn all_symbols_is_document_order() {
        let table = sample_table();
        let names: Vec<&str> = table.all_symbols().into_iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a.src", "A", "m"]);
    }
}
