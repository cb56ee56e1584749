//! The symbol and reference record types.

use crate::kind::{Modifiers, SymbolKind};
use scriptls_tree::Location;
use serde::{Deserialize, Serialize};

/// A single declaration, record-style per the design: no subclass
/// hierarchy, just a kind tag and a modifier bitset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    /// Fully qualified where the kind allows it (namespace/class/
    /// interface/trait/function); bare for members, parameters, and
    /// variables, which are qualified only by `scope`.
    pub name: String,
    pub modifiers: Modifiers,
    pub location: Location,
    /// The fully qualified name of the nearest enclosing named ancestor,
    /// or empty for the synthetic file root.
    pub scope: String,
    pub doc: Option<String>,
    pub declared_type: Option<String>,
    pub value: Option<String>,
    pub children: Vec<Symbol>,
    /// Stub references this symbol is associated with: base classes,
    /// implemented interfaces, used traits. Resolved against the
    /// workspace index at query time, never held as owning links.
    pub associated: Vec<AssociatedReference>,
}

impl Symbol {
    pub fn new(kind: SymbolKind, name: impl Into<String>, location: Location, scope: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: Modifiers::NONE,
            location,
            scope: scope.into(),
            doc: None,
            declared_type: None,
            value: None,
            children: Vec::new(),
            associated: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_declared_type(mut self, type_expr: impl Into<String>) -> Self {
        self.declared_type = Some(type_expr.into());
        self
    }

    /// The short name: the segment after the last namespace separator.
    /// Used for the `notFqn(name)` completion label per §4.9.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('\\').next().unwrap_or(&self.name)
    }

    /// `true` when `other`'s location lies entirely inside this symbol's
    /// location, used by `symbols_in` to find the tightest-containing
    /// scope.
    pub fn strictly_contains(&self, other: &Symbol) -> bool {
        self.location.uri == other.location.uri
            && self.location.span.contains_span(other.location.span)
            && self.location.span != other.location.span
    }
}

/// A name stub on a class-like symbol's `extends`/`implements`/`use`
/// clause, resolved against the workspace index at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedReference {
    pub kind: SymbolKind,
    pub fqn: String,
}

/// A usage site: a name occurrence that is not itself a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub kind: SymbolKind,
    pub name: String,
    pub location: Location,
    pub resolved_type: Option<String>,
    /// The local alias this reference was written under, if it differs
    /// from `name` (e.g. an imported short name).
    pub alternate_name: Option<String>,
}

impl Reference {
    pub fn new(kind: SymbolKind, name: impl Into<String>, location: Location) -> Self {
        Self { kind, name: name.into(), location, resolved_type: None, alternate_name: None }
    }
}
