//! The `(name, kind, location, container)` view `documentSymbols` and
//! `workspaceSymbols` return (§6) — a flattened projection of [`Symbol`]
//! that doesn't expose its children or cross-table stubs to callers.

use scriptls_symbols::{Symbol, SymbolKind};
use scriptls_tree::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: String,
    pub kind: SymbolKind,
    pub location: Location,
    /// The FQN of the enclosing named declaration, or `None` for a
    /// top-level symbol (the synthetic file scope has no name of its own).
    pub container: Option<String>,
}

impl SymbolInfo {
    pub fn from_symbol(symbol: &Symbol) -> Self {
        Self {
            name: symbol.name.clone(),
            kind: symbol.kind,
            location: symbol.location.clone(),
            container: if symbol.scope.is_empty() { None } else { Some(symbol.scope.clone()) },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use scriptls_position::ByteSpan;
    use scriptls_uri::DocumentUri;

    #[test]
    fn file_scoped_symbol_has_no_container() {
        let loc = Location::new(DocumentUri::parse("file:///a.src"), ByteSpan::new(0, 5));
        let symbol = Symbol::new(SymbolKind::Class, "A", loc, "");
        let info = SymbolInfo::from_symbol(&symbol);
        assert_eq!(info.container, None);
    }

    #[test]
    fn member_symbol_reports_its_owner_as_container() {
        let loc = Location::new(DocumentUri::parse("file:///a.src"), ByteSpan::new(10, 20));
        let symbol = Symbol::new(SymbolKind::Method, "f", loc, "A");
        let info = SymbolInfo::from_symbol(&symbol);
        assert_eq!(info.container.as_deref(), Some("A"));
    }
}
