//! Name resolution against a namespace + import context (§4.3).

use crate::kind::SymbolKind;
use serde::{Deserialize, Serialize};

const SEPARATOR: char = '\\';

/// Which alias table an unqualified lookup consults. Imports for
/// functions and constants live apart from the default table shared by
/// classes, interfaces, traits, and namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Default,
    Function,
    Constant,
}

impl LookupKind {
    pub fn for_symbol_kind(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Function => LookupKind::Function,
            SymbolKind::Constant => LookupKind::Constant,
            _ => LookupKind::Default,
        }
    }
}

/// One `use` clause: an alias valid for a specific lookup kind, mapping to
/// a fully qualified target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRule {
    pub kind: ImportKind,
    pub alias: String,
    pub target_fqn: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportKind {
    Default,
    Function,
    Constant,
}

impl ImportKind {
    fn matches(self, lookup: LookupKind) -> bool {
        match (self, lookup) {
            (ImportKind::Default, LookupKind::Default) => true,
            (ImportKind::Function, LookupKind::Function) => true,
            (ImportKind::Constant, LookupKind::Constant) => true,
            // The default import table also satisfies a default-kind
            // lookup for class/interface/trait/namespace references even
            // when no kind was given explicitly on the use-clause.
            _ => false,
        }
    }
}

/// Resolution state for a single document traversal: current namespace
/// plus accumulated import rules.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    namespace: String,
    imports: Vec<ImportRule>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = namespace.into();
    }

    pub fn add_import(&mut self, rule: ImportRule) {
        self.imports.push(rule);
    }

    pub fn imports(&self) -> &[ImportRule] {
        &self.imports
    }

    /// Resolve `name` under the current state for the given lookup kind.
    /// `name` may carry a leading separator (fully qualified), a leading
    /// relative-namespace marker handled by the caller stripping it before
    /// calling `resolve_relative`, or be a bare unqualified name.
    pub fn resolve(&self, name: &str, lookup: LookupKind) -> String {
        if let Some(stripped) = name.strip_prefix(SEPARATOR) {
            return stripped.to_string();
        }
        let (head, tail) = split_first_segment(name);
        for rule in &self.imports {
            if rule.alias == head && rule.kind.matches(lookup) {
                return if tail.is_empty() {
                    rule.target_fqn.clone()
                } else {
                    format!("{}{SEPARATOR}{}", rule.target_fqn, tail)
                };
            }
        }
        self.resolve_relative(name)
    }

    /// `current_namespace + separator + name`, or `name` alone when the
    /// current namespace is empty. Used directly for relative-qualified
    /// names (the `namespace\tail` form) and as the fallback unqualified
    /// path.
    pub fn resolve_relative(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}{SEPARATOR}{}", self.namespace, name)
        }
    }
}

fn split_first_segment(name: &str) -> (&str, &str) {
    match name.find(SEPARATOR) {
        Some(idx) => (&name[..idx], &name[idx + 1..]),
        None => (name, ""),
    }
}
