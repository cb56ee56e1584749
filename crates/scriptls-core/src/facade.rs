//! [`ScriptlsCore`]: the editor-facing facade (§6). Every method here is a
//! plain synchronous call — wiring a transport's async request loop to it
//! is a front-end concern this crate doesn't take on.

use crate::config::CoreConfig;
use crate::symbol_info::SymbolInfo;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use scriptls_completion::{CompletionContext, CompletionDispatcher, CompletionResult};
use scriptls_document::{DocumentCursor, ParsedDocument};
use scriptls_error::{or_log_default, CoreError, CoreResult};
use scriptls_extract::SymbolExtractor;
use scriptls_position::{Position, TextChange};
use scriptls_store::{Cache, MergeStrategy, NullCache, SymbolStore};
use scriptls_symbols::SymbolKind;
use scriptls_tree::Parser;
use scriptls_uri::DocumentUri;
use std::sync::Arc;

/// Everything the facade needs to track about a document beyond what
/// `SymbolStore` already holds: the live, debounced [`ParsedDocument`] for
/// editing, and the reference count `forget` must be able to report without
/// re-extracting (the store itself only ever holds symbol tables, per
/// §9's "shared resources" note).
struct OpenDocuments {
    live: FxHashMap<DocumentUri, ParsedDocument>,
    reference_counts: FxHashMap<DocumentUri, usize>,
}

impl OpenDocuments {
    fn new() -> Self {
        Self { live: FxHashMap::default(), reference_counts: FxHashMap::default() }
    }
}

/// The editor RPC surface of §6, minus wire encoding: `openDocument`,
/// `closeDocument`, `editDocument`, `documentSymbols`, `workspaceSymbols`,
/// `provideCompletions`, `discover`, `forget`. A transport crate owns
/// turning JSON-RPC requests into calls on this struct.
pub struct ScriptlsCore {
    parser: Arc<dyn Parser>,
    cache: Arc<dyn Cache>,
    config: CoreConfig,
    store: SymbolStore,
    dispatcher: CompletionDispatcher,
    documents: RwLock<OpenDocuments>,
}

impl ScriptlsCore {
    pub fn new(parser: Arc<dyn Parser>) -> Self {
        Self::with_config(parser, CoreConfig::default())
    }

    pub fn with_config(parser: Arc<dyn Parser>, config: CoreConfig) -> Self {
        Self::with_cache(parser, config, Arc::new(NullCache))
    }

    pub fn with_cache(parser: Arc<dyn Parser>, config: CoreConfig, cache: Arc<dyn Cache>) -> Self {
        Self {
            parser,
            cache,
            config,
            store: SymbolStore::new(),
            dispatcher: CompletionDispatcher::new(),
            documents: RwLock::new(OpenDocuments::new()),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// `openDocument`. Parses `text`, indexes its symbols into the
    /// workspace store, and keeps a live, debounced handle for subsequent
    /// edits.
    pub fn open_document(&self, uri: DocumentUri, text: impl Into<String>) {
        let doc = ParsedDocument::with_debounce(uri.clone(), text, self.parser.clone(), self.config.debounce());
        self.store.add(doc.symbols());
        let mut documents = self.documents.write();
        documents.reference_counts.insert(uri.clone(), doc.references().all_references().len());
        documents.live.insert(uri, doc);
    }

    /// `closeDocument`. Drops the live editing handle; the document's last
    /// indexed symbols remain searchable until an explicit `forget` (the
    /// file may still exist on disk, just no longer open for editing).
    pub fn close_document(&self, uri: &DocumentUri) {
        self.documents.write().live.remove(uri);
    }

    /// `editDocument`. Applies `changes` in submission order and schedules
    /// a debounced reparse (§4.2, §5). A request naming an unknown URI is a
    /// no-op per §7.
    pub fn edit_document(&self, uri: &DocumentUri, changes: &[TextChange]) {
        let doc = self.documents.read().live.get(uri).cloned();
        match doc {
            Some(doc) => doc.apply_changes(changes),
            None => tracing::debug!(uri = %uri, "editDocument on unknown uri, ignored"),
        }
    }

    /// Cancel any pending debounced reparse for `uri` and run it
    /// synchronously now. Not part of §6's request table, but required by
    /// §5's ordering guarantee ("callers requiring post-edit semantics must
    /// flush") and exercised directly by §8 scenario 3 — a transport would
    /// call this right before a query that must observe the latest edit.
    pub fn flush_document(&self, uri: &DocumentUri) {
        if let Some(doc) = self.documents.read().live.get(uri).cloned() {
            doc.flush();
        }
    }

    /// `documentSymbols`. Re-syncs the store from the document's current
    /// (last completed reparse) state before answering, so a query right
    /// after `flush` observes it.
    pub fn document_symbols(&self, uri: &DocumentUri) -> Vec<SymbolInfo> {
        or_log_default("document_symbols", self.try_document_symbols(uri))
    }

    fn try_document_symbols(&self, uri: &DocumentUri) -> CoreResult<Vec<SymbolInfo>> {
        let doc = self.documents.read().live.get(uri).cloned().ok_or_else(|| CoreError::not_found(uri.as_str()))?;
        let table = doc.symbols();
        self.store.add(table.clone());
        Ok(table.all_symbols().into_iter().filter(|s| s.kind != SymbolKind::File).map(SymbolInfo::from_symbol).collect())
    }

    /// `workspaceSymbols`. Fuzzy-matches `query` against every indexed
    /// table (§4.6) and resolves each surviving summary back to its full
    /// symbol for the location/container a caller needs.
    pub fn workspace_symbols(&self, query: &str) -> Vec<SymbolInfo> {
        self.store
            .fuzzy_match(query, |_| true)
            .into_iter()
            .filter_map(|summary| {
                let table = self.store.table(&summary.uri)?;
                let symbol = table.all_symbols().into_iter().find(|s| s.kind == summary.kind && s.name == summary.fqn)?;
                Some(SymbolInfo::from_symbol(symbol))
            })
            .collect()
    }

    /// `provideCompletions`. Builds a [`CompletionContext`] at `position`
    /// over the document's current parse/symbol/reference state and
    /// dispatches it (§4.9).
    pub fn provide_completions(&self, uri: &DocumentUri, position: Position) -> CompletionResult {
        or_log_default("provide_completions", self.try_provide_completions(uri, position))
    }

    fn try_provide_completions(&self, uri: &DocumentUri, position: Position) -> CoreResult<CompletionResult> {
        let doc = self.documents.read().live.get(uri).cloned().ok_or_else(|| CoreError::not_found(uri.as_str()))?;
        self.store.add(doc.symbols());
        let offset = doc.offset_at_position(position);
        let text = doc.text();
        let cursor = DocumentCursor::new(doc.tree(), doc.symbols(), doc.references());
        let ctx = CompletionContext::new(cursor, offset, &text, &self.store, &self.config.completion);
        Ok(self.dispatcher.complete(&ctx))
    }

    /// `discover`. Indexes `text` into the workspace store without opening
    /// it for live editing — the shape a workspace-wide initial scan or a
    /// file-watcher event uses, as distinct from an editor's `openDocument`.
    /// Returns the count of symbols indexed (the synthetic file root
    /// excluded, matching `documentSymbols`' view).
    pub fn discover(&self, uri: DocumentUri, text: &str) -> usize {
        let parsed = self.parser.parse(text);
        let (symbols, references) = SymbolExtractor::new(text, uri.clone()).extract(&parsed.root);
        let count = symbols.all_symbols().iter().filter(|s| s.kind != SymbolKind::File).count();
        self.documents.write().reference_counts.insert(uri, references.all_references().len());
        self.store.add(symbols);
        count
    }

    /// `forget`. Removes `uri` from the workspace index (and its live
    /// editing handle, if still open) and reports how much was removed.
    /// Leaves any persisted cache entry for `uri` in place; use
    /// [`Self::forget_and_purge`] to also delete that.
    pub fn forget(&self, uri: &DocumentUri) -> (usize, usize) {
        self.forget_local(uri)
    }

    /// `forget` with purge (§4.6): removes `uri` from the workspace index
    /// exactly as [`Self::forget`] does, and also deletes its persisted
    /// cache entry through the configured [`Cache`], so a later `restore`
    /// can't resurrect what this call removed.
    pub async fn forget_and_purge(&self, uri: &DocumentUri) -> CoreResult<(usize, usize)> {
        let counts = self.forget_local(uri);
        self.cache.delete(uri.as_str()).await?;
        Ok(counts)
    }

    fn forget_local(&self, uri: &DocumentUri) -> (usize, usize) {
        let symbol_count = self.store.table(uri).map_or(0, |t| t.all_symbols().iter().filter(|s| s.kind != SymbolKind::File).count());
        let mut documents = self.documents.write();
        let reference_count = documents.reference_counts.remove(uri).unwrap_or(0);
        documents.live.remove(uri);
        drop(documents);
        self.store.remove(uri);
        (symbol_count, reference_count)
    }

    /// Flatten `root`'s class/interface/trait hierarchy per this core's
    /// configured default [`MergeStrategy`] (§4.7).
    pub fn aggregate_members(&self, root: &scriptls_symbols::Symbol) -> Vec<scriptls_symbols::Symbol> {
        scriptls_store::aggregate(&self.store, root, self.merge_strategy())
    }

    fn merge_strategy(&self) -> MergeStrategy {
        self.config.merge_strategy
    }

    /// Persist `uri`'s currently indexed symbol table through the
    /// configured [`Cache`] (§6), for later `restore`. The event history
    /// needed to replay `NameResolver` state isn't persisted — only the
    /// symbol tree itself — so a restored table answers `documentSymbols`/
    /// `workspaceSymbols` queries but not completion's namespace-aware
    /// resolution; that's rebuilt fresh the next time the document is
    /// actually opened.
    pub async fn persist(&self, uri: &DocumentUri) -> CoreResult<()> {
        let table = self.store.table(uri).ok_or_else(|| CoreError::not_found(uri.as_str()))?;
        let value = serde_json::to_value(table.root()).map_err(|e| CoreError::cache_io(e))?;
        self.cache.write(uri.as_str(), value).await
    }

    /// Restore a previously `persist`ed table for a known-but-unopened
    /// document into the workspace index. Returns `false` on a cache miss.
    pub async fn restore(&self, uri: &DocumentUri) -> CoreResult<bool> {
        let Some(value) = self.cache.read(uri.as_str()).await? else {
            return Ok(false);
        };
        let root: scriptls_symbols::Symbol = serde_json::from_value(value).map_err(|e| CoreError::cache_io(e))?;
        self.store.add(scriptls_symbols::SymbolTable::new(root, Vec::new()));
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use scriptls_tree::{Node, ParseTree, PhraseKind, TokenKind};

    /// Recognizes `class Name { function name(){} ... }` well enough to
    /// exercise the facade without depending on the real subject-language
    /// grammar — the same shape the extraction crate's own fixtures use
    /// (`MethodDeclaration(MethodDeclarationHeader(...), CompoundStatement)`
    /// nested in a `ClassMembers` list), just built from a scan of the text
    /// instead of hand-written per test.
    struct ToyParser;

    impl Parser for ToyParser {
        fn parse(&self, text: &str) -> ParseTree {
            ParseTree { root: toy_parse(text), diagnostics: vec![] }
        }
    }

    fn matching_brace(text: &str, open: usize) -> usize {
        let mut depth = 0i32;
        for (i, b) in text.bytes().enumerate().skip(open) {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return i + 1;
                    }
                }
                _ => {}
            }
        }
        text.len()
    }

    fn identifier_len(text: &str, start: usize) -> usize {
        text[start..].find(|c: char| !c.is_alphanumeric() && c != '_').unwrap_or(text.len() - start)
    }

    fn toy_parse(text: &str) -> Node {
        let mut classes = Vec::new();
        let mut search = 0;
        while let Some(rel) = text[search..].find("class ") {
            let class_kw = search + rel;
            let name_start = class_kw + "class ".len();
            let name_len = identifier_len(text, name_start);
            let name_end = name_start + name_len;
            let body_start = text[name_end..].find('{').map_or(name_end, |i| name_end + i);
            let body_end = matching_brace(text, body_start);

            let mut members = Vec::new();
            let mut msearch = body_start;
            while let Some(mrel) = text[msearch..body_end].find("function ") {
                let fn_kw = msearch + mrel;
                let mname_start = fn_kw + "function ".len();
                let mname_len = identifier_len(text, mname_start);
                let header = Node::phrase(
                    PhraseKind::MethodDeclarationHeader,
                    vec![
                        Node::token(TokenKind::Function, fn_kw, "function".len()),
                        Node::token(TokenKind::Identifier, mname_start, mname_len),
                        Node::phrase(PhraseKind::ParameterDeclarationList, vec![]),
                    ],
                );
                members.push(Node::phrase(
                    PhraseKind::MethodDeclaration,
                    vec![header, Node::phrase(PhraseKind::CompoundStatement, vec![])],
                ));
                msearch = mname_start + mname_len;
            }

            classes.push(Node::phrase(
                PhraseKind::ClassDeclaration,
                vec![
                    Node::token(TokenKind::Class, class_kw, "class".len()),
                    Node::token(TokenKind::Identifier, name_start, name_len),
                    Node::phrase(PhraseKind::ClassMembers, members),
                ],
            ));
            search = body_end.max(body_start + 1);
        }
        Node::phrase(PhraseKind::SourceFile, classes)
    }

    fn core() -> ScriptlsCore {
        ScriptlsCore::new(Arc::new(ToyParser))
    }

    #[test]
    fn open_document_then_document_symbols_reports_class_and_method() {
        let core = core();
        let uri = DocumentUri::parse("file:///a.src");
        core.open_document(uri.clone(), "class A { function f(){} }");
        let symbols = core.document_symbols(&uri);
        let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"A"));
        assert!(names.contains(&"f"));
        let method = symbols.iter().find(|s| s.name == "f").unwrap();
        assert_eq!(method.container.as_deref(), Some("A"));
    }

    #[test]
    fn document_symbols_on_unknown_uri_returns_empty() {
        let core = core();
        assert!(core.document_symbols(&DocumentUri::parse("file:///missing.src")).is_empty());
    }

    #[test]
    fn workspace_symbols_finds_across_documents_by_acronym() {
        let core = core();
        core.open_document(DocumentUri::parse("file:///a.src"), "class FooBar { }");
        core.open_document(DocumentUri::parse("file:///b.src"), "class Qux { }");
        let found = core.workspace_symbols("fb");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "FooBar");
    }

    #[test]
    fn forget_reports_removed_counts_and_drops_the_table() {
        let core = core();
        let uri = DocumentUri::parse("file:///a.src");
        core.open_document(uri.clone(), "class A { function f(){} }");
        let (symbols, _references) = core.forget(&uri);
        assert_eq!(symbols, 2);
        assert!(core.document_symbols(&uri).is_empty());
        assert!(core.workspace_symbols("A").is_empty());
    }

    #[test]
    fn discover_indexes_without_opening_for_editing() {
        let core = core();
        let uri = DocumentUri::parse("file:///a.src");
        let count = core.discover(uri.clone(), "class A { function f(){} }");
        assert_eq!(count, 2);
        // Not open for editing: edit_document is a no-op.
        core.edit_document(&uri, &[TextChange { start: Position::new(0, 0), end: Position::new(0, 0), text: "x".to_string() }]);
        assert!(!core.workspace_symbols("A").is_empty());
    }

    /// An in-process [`Cache`] backing `persist`/`restore`'s round trip in
    /// tests — `NullCache` always misses by design, so exercising the
    /// actual seam needs a cache that remembers what it's given.
    #[derive(Default)]
    struct InMemoryCache {
        entries: parking_lot::Mutex<FxHashMap<String, serde_json::Value>>,
    }

    impl Cache for InMemoryCache {
        fn init(&self) -> scriptls_store::CacheFuture<'_, ()> {
            Box::pin(async { Ok(()) })
        }

        fn read(&self, key: &str) -> scriptls_store::CacheFuture<'_, Option<serde_json::Value>> {
            let value = self.entries.lock().get(key).cloned();
            Box::pin(async move { Ok(value) })
        }

        fn write(&self, key: &str, value: serde_json::Value) -> scriptls_store::CacheFuture<'_, ()> {
            self.entries.lock().insert(key.to_string(), value);
            Box::pin(async { Ok(()) })
        }

        fn delete(&self, key: &str) -> scriptls_store::CacheFuture<'_, ()> {
            self.entries.lock().remove(key);
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn forget_and_purge_deletes_the_persisted_cache_entry() {
        let core = ScriptlsCore::with_cache(Arc::new(ToyParser), CoreConfig::default(), Arc::new(InMemoryCache::default()));
        let uri = DocumentUri::parse("file:///a.src");
        core.open_document(uri.clone(), "class A { function f(){} }");
        core.persist(&uri).await.unwrap();

        core.forget_and_purge(&uri).await.unwrap();

        assert!(core.document_symbols(&uri).is_empty());
        let restored = core.restore(&uri).await.unwrap();
        assert!(!restored);
    }

    #[tokio::test]
    async fn persist_then_restore_round_trips_the_table() {
        let core = ScriptlsCore::with_cache(Arc::new(ToyParser), CoreConfig::default(), Arc::new(InMemoryCache::default()));
        let uri = DocumentUri::parse("file:///a.src");
        core.open_document(uri.clone(), "class A { function f(){} }");
        core.persist(&uri).await.unwrap();
        core.forget(&uri);
        assert!(core.document_symbols(&uri).is_empty());
        let restored = core.restore(&uri).await.unwrap();
        assert!(restored);
        assert!(!core.workspace_symbols("A").is_empty());
    }
}
