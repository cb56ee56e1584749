//! Flattening a class/interface/trait hierarchy into a merged member view
//! (§4.7).

use crate::store::SymbolStore;
use scriptls_symbols::{Modifiers, Symbol, SymbolKind};
use serde::{Deserialize, Serialize};

/// Policy for deduplicating inherited members that share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MergeStrategy {
    /// Concatenation: every member from every associated symbol, in BFS
    /// order, duplicates and all. Useful for diagnostics.
    None,
    /// Keep the earliest occurrence of each name.
    #[default]
    First,
    /// Like `First`, but a later duplicate that carries documentation
    /// where the earlier one didn't replaces the earlier entry.
    Documented,
}

fn member_key(member: &Symbol) -> String {
    if member.kind.is_callable() {
        member.name.to_ascii_lowercase()
    } else {
        member.name.clone()
    }
}

/// Breadth-first walk of `root.associated`, resolving each stub through
/// `store`. Stops at cycles and duplicate symbols via a visited set keyed
/// by `(kind, fqn)` — symbols never hold owning cross-table links, so
/// there is nothing to free on a cycle, only a flag to check. Resolved
/// symbols are cloned out of the store rather than borrowed, since they
/// can't outlive the store's internal read lock.
fn resolve_hierarchy(store: &SymbolStore, root: &Symbol) -> Vec<Symbol> {
    let mut visited = std::collections::HashSet::new();
    visited.insert((root.kind, root.name.clone()));
    let mut order = vec![root.clone()];
    let mut queue: std::collections::VecDeque<(SymbolKind, String)> = std::collections::VecDeque::new();
    for stub in &root.associated {
        queue.push_back((stub.kind, stub.fqn.clone()));
    }
    while let Some((kind, fqn)) = queue.pop_front() {
        let key = (kind, fqn.clone());
        if visited.contains(&key) {
            continue;
        }
        visited.insert(key);
        let Some(resolved) = store.find(&fqn, |s| s.kind == kind) else {
            continue;
        };
        for stub in &resolved.associated {
            queue.push_back((stub.kind, stub.fqn.clone()));
        }
        order.push(resolved);
    }
    order
}

/// Whether `member`, declared on `owner`, is visible from `root`'s member
/// list under class-inheritance visibility rules (§4.7 step 2).
fn passes_visibility(owner: &Symbol, member: &Symbol, root: &Symbol) -> bool {
    if owner.name == root.name && owner.kind == root.kind {
        return true;
    }
    match owner.kind {
        SymbolKind::Class => !member.modifiers.contains(Modifiers::PRIVATE),
        SymbolKind::Interface | SymbolKind::Trait => true,
        _ => true,
    }
}

/// Flatten `root`'s hierarchy into an ordered member list per `strategy`.
pub fn aggregate(store: &SymbolStore, root: &Symbol, strategy: MergeStrategy) -> Vec<Symbol> {
    let hierarchy = resolve_hierarchy(store, root);
    let mut flat = Vec::new();
    for owner in &hierarchy {
        for member in &owner.children {
            if passes_visibility(owner, member, root) {
                flat.push(member.clone());
            }
        }
    }
    match strategy {
        MergeStrategy::None => flat,
        MergeStrategy::First => dedup_first(flat),
        MergeStrategy::Documented => dedup_documented(flat),
    }
}

fn dedup_first(flat: Vec<Symbol>) -> Vec<Symbol> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for member in flat {
        if seen.insert(member_key(&member)) {
            out.push(member);
        }
    }
    out
}

fn dedup_documented(flat: Vec<Symbol>) -> Vec<Symbol> {
    let mut order: Vec<String> = Vec::new();
    let mut by_key: std::collections::HashMap<String, Symbol> = std::collections::HashMap::new();
    for member in flat {
        let key = member_key(&member);
        match by_key.get(&key) {
            None => {
                order.push(key.clone());
                by_key.insert(key, member);
            }
            Some(existing) => {
                if existing.doc.is_none() && member.doc.is_some() {
                    by_key.insert(key, member);
                }
            }
        }
    }
    order.into_iter().filter_map(|key| by_key.remove(&key)).collect()
}
