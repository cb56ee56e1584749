//! The thirteen context-recognizing strategies consulted in declaration
//! order by [`crate::dispatcher::CompletionDispatcher`] (§4.9).

use crate::context::CompletionContext;
use crate::item::{CompletionItem, CompletionItemKind};
use crate::naming::item_for_symbol;
use crate::receiver;
use crate::strategy::Strategy;
use scriptls_store::MergeStrategy;
use scriptls_symbols::SymbolKind;
use scriptls_tree::PhraseKind;

const MAGIC_CONSTANTS: &[&str] =
    &["__LINE__", "__FILE__", "__DIR__", "__FUNCTION__", "__CLASS__", "__METHOD__", "__NAMESPACE__"];

const MEMBER_MODIFIER_KEYWORDS: &[&str] =
    &["public", "protected", "private", "static", "abstract", "final", "readonly", "function", "const", "var"];

fn keyword_item(keyword: &str) -> CompletionItem {
    CompletionItem::new(CompletionItemKind::Keyword, keyword, keyword)
}

fn importable_items(ctx: &CompletionContext, predicate: impl Fn(SymbolKind) -> bool) -> Vec<CompletionItem> {
    ctx.store
        .fuzzy_match(ctx.current_prefix(), |s| predicate(s.kind))
        .into_iter()
        .filter_map(|summary| ctx.store.find(&summary.fqn, |s| s.kind == summary.kind))
        .map(|symbol| item_for_symbol(ctx, &symbol))
        .collect()
}

/// `$x->foo` / `$x->bar()` — instance members of the receiver's resolved
/// type.
pub struct ObjectAccessCompletion;

impl Strategy for ObjectAccessCompletion {
    fn name(&self) -> &'static str {
        "ObjectAccessCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        ctx.is_inside(&[PhraseKind::PropertyAccessExpression, PhraseKind::MethodCallExpression])
    }

    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem> {
        let Some(access) = ctx.ancestor_of_kind(&[PhraseKind::PropertyAccessExpression, PhraseKind::MethodCallExpression]) else {
            return Vec::new();
        };
        let Some(type_name) = receiver::resolve_receiver_type(ctx, &access) else { return Vec::new() };
        let Some(root) = ctx.store.find(&type_name, |s| s.kind.is_type_declaration()) else { return Vec::new() };
        scriptls_store::aggregate(ctx.store, &root, MergeStrategy::default())
            .into_iter()
            .filter(|m| matches!(m.kind, SymbolKind::Property | SymbolKind::Method | SymbolKind::Constructor))
            .filter(|m| !m.modifiers.is_static())
            .map(|m| item_for_symbol(ctx, &m))
            .collect()
    }
}

/// `T::CONST` / `T::$prop` / `T::method()` — static members and class
/// constants of the receiver's resolved type.
pub struct ScopedAccessCompletion;

impl Strategy for ScopedAccessCompletion {
    fn name(&self) -> &'static str {
        "ScopedAccessCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        ctx.is_inside(&[PhraseKind::ScopedPropertyAccessExpression, PhraseKind::ScopedCallExpression])
    }

    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem> {
        let Some(access) = ctx.ancestor_of_kind(&[PhraseKind::ScopedPropertyAccessExpression, PhraseKind::ScopedCallExpression]) else {
            return Vec::new();
        };
        let Some(type_name) = receiver::resolve_receiver_type(ctx, &access) else { return Vec::new() };
        let Some(root) = ctx.store.find(&type_name, |s| s.kind.is_type_declaration()) else { return Vec::new() };
        scriptls_store::aggregate(ctx.store, &root, MergeStrategy::default())
            .into_iter()
            .filter(|m| m.kind == SymbolKind::ClassConstant || (m.modifiers.is_static() && matches!(m.kind, SymbolKind::Property | SymbolKind::Method)))
            .map(|m| item_for_symbol(ctx, &m))
            .collect()
    }
}

/// `new T(...)` — class names only; interfaces and traits cannot be
/// instantiated.
pub struct ClassTypeDesignatorCompletion;

impl Strategy for ClassTypeDesignatorCompletion {
    fn name(&self) -> &'static str {
        "ClassTypeDesignatorCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        ctx.is_inside(&[PhraseKind::ObjectCreationExpression])
    }

    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem> {
        importable_items(ctx, |kind| kind == SymbolKind::Class)
    }
}

/// `$v` — in-scope variables and parameters.
pub struct SimpleVariableCompletion;

impl Strategy for SimpleVariableCompletion {
    fn name(&self) -> &'static str {
        "SimpleVariableCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        ctx.is_inside(&[PhraseKind::SimpleVariable])
    }

    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem> {
        let prefix = ctx.current_prefix().trim_start_matches('$').to_ascii_lowercase();
        ctx.scope
            .children
            .iter()
            .filter(|s| matches!(s.kind, SymbolKind::Variable | SymbolKind::Parameter))
            .filter(|s| s.name.trim_start_matches('$').to_ascii_lowercase().starts_with(&prefix))
            .map(|s| item_for_symbol(ctx, s))
            .collect()
    }
}

/// A parameter, return, or property type declaration position.
pub struct TypeDeclarationCompletion;

impl Strategy for TypeDeclarationCompletion {
    fn name(&self) -> &'static str {
        "TypeDeclarationCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        ctx.is_inside(&[PhraseKind::TypeDeclaration])
    }

    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem> {
        importable_items(ctx, |kind| kind.is_type_declaration())
    }
}

/// `class Foo extends |` — classes only, a type cannot extend an interface
/// or trait.
pub struct ClassBaseClauseCompletion;

impl Strategy for ClassBaseClauseCompletion {
    fn name(&self) -> &'static str {
        "ClassBaseClauseCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        ctx.is_inside(&[PhraseKind::ClassBaseClause])
    }

    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem> {
        importable_items(ctx, |kind| kind == SymbolKind::Class)
    }
}

/// `implements |` on a class, or an interface's own `extends` list —
/// interfaces only.
pub struct InterfaceClauseCompletion;

impl Strategy for InterfaceClauseCompletion {
    fn name(&self) -> &'static str {
        "InterfaceClauseCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        ctx.is_inside(&[PhraseKind::ClassInterfaceClause])
    }

    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem> {
        importable_items(ctx, |kind| kind == SymbolKind::Interface)
    }
}

/// `use T;` inside a class body — traits only.
pub struct TraitUseClauseCompletion;

impl Strategy for TraitUseClauseCompletion {
    fn name(&self) -> &'static str {
        "TraitUseClauseCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        ctx.is_inside(&[PhraseKind::TraitUseClause])
    }

    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem> {
        importable_items(ctx, |kind| kind == SymbolKind::Trait)
    }
}

/// `namespace |` — no workspace-wide namespace directory is indexed, so
/// this strategy only claims the position; it has nothing to offer beyond
/// what the editor's own keyword list already suggests.
pub struct NamespaceDefinitionCompletion;

impl Strategy for NamespaceDefinitionCompletion {
    fn name(&self) -> &'static str {
        "NamespaceDefinitionCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        ctx.is_inside(&[PhraseKind::NamespaceDefinition])
    }

    fn suggest(&self, _ctx: &CompletionContext) -> Vec<CompletionItem> {
        Vec::new()
    }
}

/// `use |` / `use Vendor\{|}` — anything importable: types, functions, and
/// constants.
pub struct NamespaceUseClauseCompletion;

impl Strategy for NamespaceUseClauseCompletion {
    fn name(&self) -> &'static str {
        "NamespaceUseClauseCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        ctx.is_inside(&[PhraseKind::NamespaceUseClause, PhraseKind::NamespaceUseGroupClause])
    }

    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem> {
        importable_items(ctx, |kind| kind.is_type_declaration() || matches!(kind, SymbolKind::Function | SymbolKind::Constant))
    }
}

/// A method header identifier inside a class with ancestors — offers
/// inherited methods not yet overridden, as override stubs.
pub struct MethodDeclarationHeaderCompletion;

impl Strategy for MethodDeclarationHeaderCompletion {
    fn name(&self) -> &'static str {
        "MethodDeclarationHeaderCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        ctx.is_inside(&[PhraseKind::MethodDeclarationHeader]) && ctx.scope.kind.is_type_declaration() && !ctx.scope.associated.is_empty()
    }

    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem> {
        let own: std::collections::HashSet<String> =
            ctx.scope.children.iter().filter(|m| m.kind.is_callable()).map(|m| m.name.to_ascii_lowercase()).collect();
        scriptls_store::aggregate(ctx.store, &ctx.scope, MergeStrategy::default())
            .into_iter()
            .filter(|m| m.kind == SymbolKind::Method && !own.contains(&m.name.to_ascii_lowercase()))
            .map(|m| item_for_symbol(ctx, &m))
            .collect()
    }
}

/// Top of a class/interface/trait body — only declaration keywords, no
/// symbol lookups.
pub struct DeclarationBodyCompletion;

impl Strategy for DeclarationBodyCompletion {
    fn name(&self) -> &'static str {
        "DeclarationBodyCompletion"
    }

    fn can_suggest(&self, ctx: &CompletionContext) -> bool {
        // The nearest ancestor among these must be `ClassMembers` itself —
        // if a more specific member production (a header, a property, a
        // trait-use list) is closer, the cursor is inside a declaration,
        // not at the top of the body.
        let kinds = [
            PhraseKind::ClassMembers,
            PhraseKind::MethodDeclarationHeader,
            PhraseKind::MethodDeclaration,
            PhraseKind::PropertyDeclaration,
            PhraseKind::ClassConstDeclaration,
            PhraseKind::TraitUseClause,
        ];
        matches!(ctx.ancestor_of_kind(&kinds).and_then(|n| n.phrase_kind()), Some(PhraseKind::ClassMembers))
    }

    fn suggest(&self, _ctx: &CompletionContext) -> Vec<CompletionItem> {
        MEMBER_MODIFIER_KEYWORDS.iter().map(|kw| keyword_item(kw)).collect()
    }
}

/// Fallback: a general name expression. Magic constants when the typed
/// prefix looks like one, otherwise any importable symbol.
pub struct NameCompletion;

impl Strategy for NameCompletion {
    fn name(&self) -> &'static str {
        "NameCompletion"
    }

    fn can_suggest(&self, _ctx: &CompletionContext) -> bool {
        true
    }

    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem> {
        let prefix = ctx.current_prefix();
        let mut items: Vec<CompletionItem> = MAGIC_CONSTANTS
            .iter()
            .filter(|m| m.starts_with(prefix))
            .map(|m| CompletionItem::new(CompletionItemKind::Constant, *m, *m))
            .collect();
        items.extend(importable_items(ctx, |kind| {
            kind.is_type_declaration() || matches!(kind, SymbolKind::Function | SymbolKind::Constant)
        }));
        items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CompletionConfig;
    use scriptls_document::{DocumentCursor, ParsedDocument, DEFAULT_DEBOUNCE};
    use scriptls_extract::SymbolExtractor;
    use scriptls_store::SymbolStore;
    use scriptls_symbols::{AssociatedReference, Modifiers, Symbol};
    use scriptls_tree::{Location, Node, ParseTree, Parser, TokenKind};
    use scriptls_uri::DocumentUri;
    use std::sync::Arc;

    struct EmptyParser;
    impl Parser for EmptyParser {
        fn parse(&self, text: &str) -> ParseTree {
            ParseTree { root: Node::token(TokenKind::Eof, 0, text.len()), diagnostics: vec![] }
        }
    }

    fn loc(start: usize, end: usize) -> Location {
        Location::new(DocumentUri::parse("file:///a.src"), scriptls_position::ByteSpan::new(start, end))
    }

    fn ctx_over<'a>(source: &'a str, tree: Node, offset: usize, store: &'a SymbolStore, config: &'a CompletionConfig) -> CompletionContext<'a> {
        let (symbols, references) = SymbolExtractor::new(source, DocumentUri::parse("file:///a.src")).extract(&tree);
        let cursor = DocumentCursor::new(Arc::new(tree), symbols, references);
        CompletionContext::new(cursor, offset, source, store, config)
    }

    fn bare_ctx<'a>(store: &'a SymbolStore, config: &'a CompletionConfig) -> CompletionContext<'a> {
        let doc = ParsedDocument::with_debounce(DocumentUri::parse("file:///a.src"), "x", Arc::new(EmptyParser), DEFAULT_DEBOUNCE);
        let cursor = DocumentCursor::new(doc.tree(), doc.symbols(), doc.references());
        CompletionContext::new(cursor, 0, "x", store, config)
    }

    fn identifier(offset: usize, text: &str) -> Node {
        Node::token(TokenKind::Identifier, offset, text.len())
    }

    fn qualified(offset: usize, text: &str) -> Node {
        Node::phrase(PhraseKind::QualifiedName, vec![identifier(offset, text)])
    }

    fn variable_node(offset: usize, text: &str) -> Node {
        Node::phrase(PhraseKind::SimpleVariable, vec![Node::token(TokenKind::Variable, offset, text.len())])
    }

    #[test]
    fn object_access_suggests_members_of_the_resolved_receiver_type() {
        let store = SymbolStore::new();
        let mut class_b = Symbol::new(SymbolKind::Class, "B", loc(0, 40), "");
        let greet = Symbol::new(SymbolKind::Method, "greet", loc(5, 15), "B");
        class_b.children.push(greet);
        let mut file = Symbol::new(SymbolKind::File, "f", loc(0, 40), "");
        file.children.push(class_b);
        store.add(scriptls_symbols::SymbolTable::new(file, Vec::new()));

        let config = CompletionConfig::default();
        let source = "$b = new B(); $b->";
        let creation = Node::phrase(PhraseKind::ObjectCreationExpression, vec![qualified(9, "B")]);
        let assignment = Node::phrase(PhraseKind::AssignmentExpression, vec![variable_node(0, "$b"), creation]);
        let access = Node::phrase(PhraseKind::PropertyAccessExpression, vec![variable_node(14, "$b")]);
        let tree = Node::phrase(PhraseKind::SourceFile, vec![assignment, access]);

        let ctx = ctx_over(source, tree, source.len(), &store, &config);
        let strategy = ObjectAccessCompletion;
        assert!(strategy.can_suggest(&ctx));
        let items = strategy.suggest(&ctx);
        assert!(items.iter().any(|i| i.label == "greet"));
    }

    #[test]
    fn class_type_designator_offers_only_classes() {
        let store = SymbolStore::new();
        let class = Symbol::new(SymbolKind::Class, "Widget", loc(0, 10), "");
        let iface = Symbol::new(SymbolKind::Interface, "Renderable", loc(0, 10), "");
        let mut file = Symbol::new(SymbolKind::File, "f", loc(0, 20), "");
        file.children.push(class);
        file.children.push(iface);
        store.add(scriptls_symbols::SymbolTable::new(file, Vec::new()));

        let config = CompletionConfig::default();
        let ctx = bare_ctx(&store, &config);
        let labels: Vec<String> = importable_items(&ctx, |k| k == SymbolKind::Class).into_iter().map(|i| i.label).collect();
        assert!(labels.contains(&"Widget".to_string()));
        assert!(!labels.contains(&"Renderable".to_string()));
    }

    #[test]
    fn method_declaration_header_excludes_already_declared_overrides() {
        let store = SymbolStore::new();
        let mut base = Symbol::new(SymbolKind::Class, "Base", loc(0, 40), "");
        base.children.push(Symbol::new(SymbolKind::Method, "run", loc(5, 15), "Base"));
        base.children.push(Symbol::new(SymbolKind::Method, "stop", loc(20, 30), "Base"));
        let mut base_file = Symbol::new(SymbolKind::File, "base", loc(0, 40), "");
        base_file.children.push(base);
        store.add(scriptls_symbols::SymbolTable::new(base_file, Vec::new()));

        let mut derived = Symbol::new(SymbolKind::Class, "Derived", loc(0, 40), "");
        derived.associated.push(AssociatedReference { kind: SymbolKind::Class, fqn: "Base".to_string() });
        derived.children.push(Symbol::new(SymbolKind::Method, "run", loc(5, 15), "Derived").with_modifiers(Modifiers::NONE));

        let config = CompletionConfig::default();
        let mut ctx = bare_ctx(&store, &config);
        ctx.scope = derived;
        let strategy = MethodDeclarationHeaderCompletion;
        let items = strategy.suggest(&ctx);
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert!(labels.contains(&"stop"));
        assert!(!labels.contains(&"run"));
    }

    #[test]
    fn declaration_body_completion_offers_member_keywords_only() {
        let store = SymbolStore::new();
        let config = CompletionConfig::default();
        let ctx = bare_ctx(&store, &config);
        let items = DeclarationBodyCompletion.suggest(&ctx);
        assert!(items.iter().all(|i| i.kind == CompletionItemKind::Keyword));
        assert!(items.iter().any(|i| i.label == "function"));
    }

    #[test]
    fn name_completion_matches_magic_constants_by_prefix() {
        let store = SymbolStore::new();
        let config = CompletionConfig::default();
        let source = "__DIR";
        let tree = Node::token(TokenKind::Identifier, 0, source.len());
        let ctx = ctx_over(source, tree, source.len(), &store, &config);
        let items = NameCompletion.suggest(&ctx);
        assert!(items.iter().any(|i| i.label == "__DIR__"));
    }
}
