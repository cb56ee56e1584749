//! Workspace-wide symbol index: owns every open or cached document's
//! [`SymbolTable`], and the name/fuzzy indices derived from them (§4.6).

use crate::index::{fuzzy_matches, NameIndex, SymbolSummary};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use scriptls_symbols::{Symbol, SymbolKind, SymbolTable};
use scriptls_uri::DocumentUri;

/// URI→table map plus both indices, behind one lock. `add`/`remove` must
/// be observed atomically by concurrent readers (partial states are not
/// observable per the data model), which a single lock gives for free —
/// per-field locking would need an explicit protocol to match that.
#[derive(Default)]
struct Inner {
    tables: FxHashMap<DocumentUri, SymbolTable>,
    index: NameIndex,
}

#[derive(Default)]
pub struct SymbolStore {
    inner: RwLock<Inner>,
}

impl SymbolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any existing entry for `table`'s URI and rebuild its
    /// summary entries, all under one write lock.
    pub fn add(&self, table: SymbolTable) {
        let uri = table.uri().clone();
        let mut inner = self.inner.write();
        inner.index.remove_uri(&uri);
        for symbol in table.all_symbols() {
            if symbol.kind == SymbolKind::File {
                continue;
            }
            inner.index.insert(SymbolSummary { uri: uri.clone(), kind: symbol.kind, fqn: symbol.name.clone() });
        }
        inner.tables.insert(uri, table);
    }

    /// Remove `uri`'s table and its index entries. The cache purge this
    /// operation can additionally trigger (§4.6) is the caller's
    /// responsibility — the store itself holds no `Cache` handle.
    pub fn remove(&self, uri: &DocumentUri) {
        let mut inner = self.inner.write();
        inner.index.remove_uri(uri);
        inner.tables.remove(uri);
    }

    pub fn table(&self, uri: &DocumentUri) -> Option<SymbolTable> {
        self.inner.read().tables.get(uri).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().tables.is_empty()
    }

    /// Exact FQN lookup, honoring each kind's case sensitivity (§4.6).
    /// Returns a clone since a `&Symbol` can't outlive the read guard.
    pub fn find(&self, fqn: &str, predicate: impl Fn(&Symbol) -> bool) -> Option<Symbol> {
        let inner = self.inner.read();
        for table in inner.tables.values() {
            for symbol in table.all_symbols() {
                if !predicate(symbol) {
                    continue;
                }
                let matches = if symbol.kind.is_case_sensitive() {
                    symbol.name == fqn
                } else {
                    symbol.name.eq_ignore_ascii_case(fqn)
                };
                if matches {
                    return Some(symbol.clone());
                }
            }
        }
        None
    }

    /// Fuzzy/prefix search over every indexed summary (§4.6), deduplicated
    /// by FQN.
    pub fn fuzzy_match(&self, query: &str, predicate: impl Fn(&SymbolSummary) -> bool) -> Vec<SymbolSummary> {
        let inner = self.inner.read();
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for summary in inner.index.all_live() {
            if !predicate(summary) {
                continue;
            }
            if !fuzzy_matches(query, &summary.fqn) {
                continue;
            }
            if seen.insert(summary.fqn.clone()) {
                out.push(summary.clone());
            }
        }
        out
    }
}
