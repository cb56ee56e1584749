//! The name and fuzzy indices SymbolStore maintains over every table it
//! owns (§3, §4.6).

use rustc_hash::FxHashMap;
use scriptls_symbols::SymbolKind;
use scriptls_uri::DocumentUri;

/// One summary record in the name/fuzzy indices: enough to answer a
/// lookup without touching the owning `SymbolTable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSummary {
    pub uri: DocumentUri,
    pub kind: SymbolKind,
    pub fqn: String,
}

/// Case-folded leading-identifier index plus a trigram-accelerated fuzzy
/// index, rebuilt per-URI whenever that URI's table is added or removed.
#[derive(Debug, Default)]
pub struct NameIndex {
    /// Case-folded leading identifier (the portion up to the first
    /// namespace separator) → summaries sharing it.
    by_leading_identifier: FxHashMap<String, Vec<SymbolSummary>>,
    /// Trigram (lowercased 3-byte window of a summary's FQN) → indices
    /// into `all`. Used only to narrow candidates before the authoritative
    /// `matches` predicate runs.
    trigrams: FxHashMap<[u8; 3], Vec<usize>>,
    all: Vec<SymbolSummary>,
    /// Which slots in `all` belong to a given URI, for O(matches) removal.
    by_uri: FxHashMap<DocumentUri, Vec<usize>>,
}

fn leading_identifier(fqn: &str) -> String {
    fqn.split('\\').next().unwrap_or(fqn).to_ascii_lowercase()
}

fn trigrams(name_lower: &str) -> Vec<[u8; 3]> {
    let bytes = name_lower.as_bytes();
    if bytes.len() < 3 {
        return Vec::new();
    }
    bytes.windows(3).map(|w| [w[0], w[1], w[2]]).collect()
}

/// Characters, besides an uppercase letter, that start a new "word" for
/// acronym purposes: the subject language's property sigil and its
/// conventional word-boundary underscore, plus the namespace separator so
/// FQNs acronym across namespace segments too.
const ACRONYM_BOUNDARIES: [char; 3] = ['_', '$', '\\'];

/// The candidate's acronym signature: every uppercase letter, plus every
/// character immediately following a boundary character, lowercased.
pub fn acronym_signature(name: &str) -> String {
    let mut out = String::new();
    let mut after_boundary = true;
    for c in name.chars() {
        if c.is_uppercase() || (after_boundary && c.is_alphanumeric()) {
            out.push(c.to_ascii_lowercase());
        }
        after_boundary = ACRONYM_BOUNDARIES.contains(&c);
    }
    out
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, summary: SymbolSummary) {
        let key = leading_identifier(&summary.fqn);
        let name_lower = summary.fqn.to_ascii_lowercase();
        let slot = self.all.len();
        self.by_uri.entry(summary.uri.clone()).or_default().push(slot);
        for tri in trigrams(&name_lower) {
            self.trigrams.entry(tri).or_default().push(slot);
        }
        self.by_leading_identifier.entry(key).or_default().push(summary.clone());
        self.all.push(summary);
    }

    /// Remove every summary that came from `uri`. Leaves tombstoned slots
    /// in `all`/`trigrams` (cheap: they're just skipped by the `None`
    /// sentinel) rather than compacting — compaction would renumber every
    /// other URI's slots for no benefit here.
    pub fn remove_uri(&mut self, uri: &DocumentUri) {
        let Some(slots) = self.by_uri.remove(uri) else { return };
        let removed: std::collections::HashSet<usize> = slots.into_iter().collect();
        for bucket in self.by_leading_identifier.values_mut() {
            bucket.retain(|s| &s.uri != uri);
        }
        self.by_leading_identifier.retain(|_, bucket| !bucket.is_empty());
        for bucket in self.trigrams.values_mut() {
            bucket.retain(|slot| !removed.contains(slot));
        }
        // `all` keeps its slots so trigram indices stay valid; callers
        // only ever see summaries through `find`/`fuzzy_match`, both of
        // which already filter by URI membership via `by_leading_identifier`
        // or live trigram buckets, so stale `all` entries are never surfaced.
    }

    pub fn find_by_leading_identifier(&self, leading: &str) -> &[SymbolSummary] {
        self.by_leading_identifier.get(&leading.to_ascii_lowercase()).map_or(&[], |v| v.as_slice())
    }

    /// All live summaries (i.e. still reachable from `by_leading_identifier`),
    /// for a full fuzzy scan.
    pub fn all_live(&self) -> impl Iterator<Item = &SymbolSummary> {
        self.by_leading_identifier.values().flatten()
    }
}

/// `SymbolStore::match`'s predicate, independent of `NameIndex` so it can
/// be unit tested against plain strings.
pub fn fuzzy_matches(query: &str, candidate_fqn: &str) -> bool {
    let query = query.to_ascii_lowercase();
    if query.is_empty() {
        return true;
    }
    let candidate_lower = candidate_fqn.to_ascii_lowercase();
    let prefix_match = candidate_lower.split('\\').any(|segment| segment.starts_with(&query));
    let substring_match = candidate_lower.contains(&query);
    let acronym_match = acronym_signature(candidate_fqn) == query;
    prefix_match || substring_match || acronym_match
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn summary(uri: &str, fqn: &str) -> SymbolSummary {
        SymbolSummary { uri: DocumentUri::parse(uri), kind: SymbolKind::Class, fqn: fqn.to_string() }
    }

    #[test]
    fn leading_identifier_lookup_is_case_folded() {
        let mut idx = NameIndex::new();
        idx.insert(summary("file:///a.src", "Foo\\Bar"));
        assert_eq!(idx.find_by_leading_identifier("foo").len(), 1);
        assert_eq!(idx.find_by_leading_identifier("FOO").len(), 1);
        assert!(idx.find_by_leading_identifier("bar").is_empty());
    }

    #[test]
    fn remove_uri_drops_its_summaries_atomically() {
        let mut idx = NameIndex::new();
        idx.insert(summary("file:///a.src", "Foo"));
        idx.insert(summary("file:///b.src", "Foo"));
        idx.remove_uri(&DocumentUri::parse("file:///a.src"));
        assert_eq!(idx.find_by_leading_identifier("foo").len(), 1);
    }

    #[test]
    fn acronym_signature_takes_uppercase_and_post_boundary_letters() {
        assert_eq!(acronym_signature("FooBar"), "fb");
        assert_eq!(acronym_signature("foo_bar"), "b");
        assert_eq!(acronym_signature("Foo\\Bar\\Baz"), "fbb");
    }

    #[test]
    fn fuzzy_matches_by_segment_prefix_substring_or_acronym() {
        assert!(fuzzy_matches("baz", "Foo\\Bar\\Baz"));
        assert!(fuzzy_matches("bar", "Foo\\Bar\\Baz"));
        assert!(fuzzy_matches("fbb", "Foo\\Bar\\Baz"));
        assert!(!fuzzy_matches("xyz", "Foo\\Bar\\Baz"));
    }
}
