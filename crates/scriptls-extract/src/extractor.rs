//! The tree walker that mines declarations from a parse tree (§4.4).
//!
//! A single fused visitor plays both roles the design describes —
//! `NameResolverVisitor` (keeping namespace/import state current) and
//! `SymbolVisitor` (emitting declarations) — backed by an explicit stack
//! of accumulator frames rather than return-value threading through
//! recursive calls. Each phrase kind pushes one frame on entry and
//! consumes it on exit; frames are a single generic shape reused across
//! phrase kinds, since the alternative (one struct per phrase) is mostly
//! duplication for a tree this shallow in practice.

use crate::doc_comment::parse_doc_tags;
use scriptls_position::ByteSpan;
use scriptls_symbols::{
    AssociatedReference, ImportKind, ImportRule, LookupKind, Modifiers, NameResolver, NamespaceEvent, Reference,
    Symbol, SymbolKind, SymbolTable,
};
use scriptls_symbols::{ReferenceScope, ReferenceTable};
use scriptls_tree::{Node, PhraseKind, TokenKind, Visitor};
use scriptls_uri::DocumentUri;

/// A method or function named with this identifier is surfaced as
/// `SymbolKind::Constructor`; its storage kind is still `Method`.
const CONSTRUCTOR_NAME: &str = "__construct";
/// The call target that marks a runtime-constant declaration.
const RUNTIME_CONSTANT_BUILTIN: &str = "define";

#[derive(Debug, Default)]
struct Frame {
    kind_tag: FrameKind,
    start_offset: usize,
    symbols: Vec<Symbol>,
    name_parts: Vec<String>,
    modifiers: Modifiers,
    associated: Vec<AssociatedReference>,
    doc: Option<String>,
    text: Option<String>,
    declared_type: Option<String>,
    use_kind: Option<ImportKind>,
    use_alias: Option<String>,
    saw_as: bool,
    raw_args: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    #[default]
    Generic,
    Phrase(PhraseKind),
}

impl Frame {
    fn new(kind: PhraseKind, start_offset: usize) -> Self {
        Self { kind_tag: FrameKind::Phrase(kind), start_offset, ..Default::default() }
    }

    fn kind(&self) -> Option<PhraseKind> {
        match self.kind_tag {
            FrameKind::Phrase(k) => Some(k),
            FrameKind::Generic => None,
        }
    }
}

enum ChildResult {
    None,
    Name(String),
    Symbol(Symbol),
    Symbols(Vec<Symbol>),
    Args(Vec<String>),
}

/// Push a variable symbol, deduplicating by name within the same
/// accumulator — the rule for variable uses discovered in assignment,
/// foreach, and list-destructuring contexts (§4.4).
fn push_deduped(symbols: &mut Vec<Symbol>, symbol: Symbol) {
    if symbol.kind == SymbolKind::Variable && symbols.iter().any(|s| s.kind == SymbolKind::Variable && s.name == symbol.name) {
        return;
    }
    symbols.push(symbol);
}

const SCOPE_KINDS: &[PhraseKind] = &[
    PhraseKind::ClassDeclaration,
    PhraseKind::InterfaceDeclaration,
    PhraseKind::TraitDeclaration,
    PhraseKind::AnonymousClassDeclaration,
    PhraseKind::MethodDeclaration,
    PhraseKind::FunctionDeclaration,
    PhraseKind::AnonymousFunctionCreationExpression,
    PhraseKind::NamespaceDefinition,
];

fn is_declaration_kind(kind: PhraseKind) -> bool {
    matches!(
        kind,
        PhraseKind::NamespaceDefinition
            | PhraseKind::ClassDeclaration
            | PhraseKind::InterfaceDeclaration
            | PhraseKind::TraitDeclaration
            | PhraseKind::AnonymousClassDeclaration
            | PhraseKind::MethodDeclaration
            | PhraseKind::FunctionDeclaration
            | PhraseKind::AnonymousFunctionCreationExpression
            | PhraseKind::PropertyDeclaration
            | PhraseKind::ClassConstDeclaration
            | PhraseKind::ConstDeclaration
    )
}

pub struct SymbolExtractor<'a> {
    source: &'a str,
    uri: DocumentUri,
    resolver: NameResolver,
    events: Vec<NamespaceEvent>,
    stack: Vec<Frame>,
    ref_stack: Vec<ReferenceScope>,
    pending_doc: Option<String>,
}

impl<'a> SymbolExtractor<'a> {
    pub fn new(source: &'a str, uri: DocumentUri) -> Self {
        let file_span = ByteSpan::whole(source);
        Self {
            source,
            uri,
            resolver: NameResolver::new(),
            events: Vec::new(),
            stack: vec![Frame::new(PhraseKind::SourceFile, file_span.start)],
            ref_stack: vec![ReferenceScope::new(file_span)],
            pending_doc: None,
        }
    }

    /// Run extraction over `root` and produce the document's symbol and
    /// reference tables.
    pub fn extract(mut self, root: &Node) -> (SymbolTable, ReferenceTable) {
        scriptls_tree::traverse(root, &mut self);
        let root_frame = self.stack.pop().unwrap_or_default();
        let file_span = ByteSpan::whole(self.source);
        let mut file_symbol = Symbol::new(
            SymbolKind::File,
            self.uri.as_str().to_string(),
            scriptls_tree::Location::new(self.uri.clone(), file_span),
            "",
        );
        file_symbol.children = root_frame.symbols;
        let table = SymbolTable::new(file_symbol, self.events);
        let ref_root = self.ref_stack.pop().unwrap_or_else(|| ReferenceScope::new(file_span));
        let ref_table = ReferenceTable::new(self.uri, ref_root);
        (table, ref_table)
    }

    fn top(&mut self) -> &mut Frame {
        self.stack.last_mut().unwrap_or_else(|| unreachable!("frame stack is never empty during traversal"))
    }

    fn location(&self, span: ByteSpan) -> scriptls_tree::Location {
        scriptls_tree::Location::new(self.uri.clone(), span)
    }

    /// Record a name occurrence into the innermost open reference scope.
    /// Declarations end up recorded at their own name token as a side
    /// effect — harmless, and consistent with how the spatial scope tree
    /// is queried (a reference at a declaration's own offset is still a
    /// legitimate hit for "what does this name mean here").
    fn record_reference(&mut self, kind: SymbolKind, name: String, span: ByteSpan) {
        let location = self.location(span);
        let reference = Reference::new(kind, name, location);
        if let Some(scope) = self.ref_stack.last_mut() {
            scope.references.push(reference);
        }
    }

    fn handle_token(&mut self, kind: TokenKind, text: &str) {
        if kind == TokenKind::RightBrace {
            self.pending_doc = None;
        }
        if kind == TokenKind::DocComment {
            self.pending_doc = Some(text.to_string());
            return;
        }
        let parent_kind = self.top().kind();
        match (parent_kind, kind) {
            (Some(PhraseKind::NamePart), TokenKind::Identifier) => self.top().text = Some(text.to_string()),
            (Some(PhraseKind::NamespaceDefinition), TokenKind::Identifier) => {
                let frame = self.top();
                frame.name_parts.push(text.to_string());
                let joined = frame.name_parts.join("\\");
                self.resolver.set_namespace(joined);
            }
            (
                Some(
                    PhraseKind::ClassDeclaration
                    | PhraseKind::InterfaceDeclaration
                    | PhraseKind::TraitDeclaration
                    | PhraseKind::AnonymousClassDeclaration
                    | PhraseKind::FunctionDeclaration
                    | PhraseKind::MethodDeclarationHeader
                    | PhraseKind::ParameterDeclaration
                    | PhraseKind::PropertyElement
                    | PhraseKind::ConstElement
                    | PhraseKind::ClassConstElement,
                ),
                TokenKind::Identifier,
            ) => {
                let frame = self.top();
                if frame.text.is_none() {
                    frame.text = Some(text.to_string());
                }
            }
            (Some(PhraseKind::NamespaceUseClause | PhraseKind::NamespaceUseGroupClause), TokenKind::Function) => {
                self.top().use_kind = Some(ImportKind::Function)
            }
            (Some(PhraseKind::NamespaceUseClause | PhraseKind::NamespaceUseGroupClause), TokenKind::Const) => {
                self.top().use_kind = Some(ImportKind::Constant)
            }
            (Some(PhraseKind::NamespaceUseClause), TokenKind::As) => self.top().saw_as = true,
            (Some(PhraseKind::NamespaceUseClause), TokenKind::Identifier) if self.top().saw_as => {
                let frame = self.top();
                frame.use_alias = Some(text.to_string());
                frame.saw_as = false;
            }
            (Some(PhraseKind::SimpleVariable), TokenKind::Variable) => self.top().text = Some(text.to_string()),
            (
                Some(PhraseKind::ClassDeclaration | PhraseKind::AnonymousClassDeclaration),
                TokenKind::Abstract,
            ) => self.top().modifiers.insert(Modifiers::ABSTRACT),
            (
                Some(PhraseKind::ClassDeclaration | PhraseKind::AnonymousClassDeclaration),
                TokenKind::Final,
            ) => self.top().modifiers.insert(Modifiers::FINAL),
            (Some(PhraseKind::MethodDeclarationHeader | PhraseKind::PropertyDeclaration | PhraseKind::ClassConstDeclaration), _) => {
                apply_visibility_token(self.top(), kind)
            }
            (Some(PhraseKind::ParameterDeclaration), TokenKind::Ampersand) => {
                self.top().modifiers.insert(Modifiers::REFERENCE)
            }
            (Some(PhraseKind::ParameterDeclaration), TokenKind::Ellipsis) => {
                self.top().modifiers.insert(Modifiers::VARIADIC)
            }
            (Some(PhraseKind::ArgumentExpressionList), TokenKind::StringLiteral) => {
                self.top().raw_args.push(strip_quotes(text).to_string())
            }
            _ => {}
        }
    }

    fn apply_name(&mut self, name: String) {
        let parent_kind = self.top().kind();
        match parent_kind {
            Some(PhraseKind::QualifiedName | PhraseKind::RelativeQualifiedName | PhraseKind::FullyQualifiedName) => {
                self.top().name_parts.push(name)
            }
            Some(PhraseKind::ClassBaseClause) => {
                let fqn = name;
                self.top().associated.push(AssociatedReference { kind: SymbolKind::Class, fqn });
            }
            Some(PhraseKind::ClassInterfaceClause) => {
                self.top().associated.push(AssociatedReference { kind: SymbolKind::Interface, fqn: name });
            }
            Some(PhraseKind::TraitUseClause) => {
                self.top().associated.push(AssociatedReference { kind: SymbolKind::Trait, fqn: name });
            }
            Some(PhraseKind::TypeDeclaration) => self.top().text = Some(name),
            Some(
                PhraseKind::ParameterDeclaration | PhraseKind::FunctionDeclaration | PhraseKind::MethodDeclarationHeader,
            ) => self.top().declared_type = Some(name),
            Some(PhraseKind::NamespaceUseClause | PhraseKind::NamespaceUseGroupClause) => {
                self.top().text = Some(name)
            }
            Some(
                PhraseKind::AssignmentExpression | PhraseKind::ForeachStatement | PhraseKind::ListIntrinsic,
            ) => {
                let start_offset = self.top().start_offset;
                let loc = self.location(ByteSpan::empty(start_offset));
                let symbol = Symbol::new(SymbolKind::Variable, name, loc, "");
                push_deduped(&mut self.top().symbols, symbol);
            }
            Some(PhraseKind::FunctionCallExpression) => self.top().text = Some(name),
            _ => {}
        }
    }

    fn finalize(&mut self, frame: Frame, span: ByteSpan) -> ChildResult {
        let Some(kind) = frame.kind() else { return ChildResult::Symbols(frame.symbols) };
        match kind {
            PhraseKind::SourceFile | PhraseKind::ClassMembers | PhraseKind::CompoundStatement => {
                ChildResult::Symbols(frame.symbols)
            }
            PhraseKind::NamePart => ChildResult::Name(frame.text.unwrap_or_default()),
            PhraseKind::QualifiedName => {
                let raw = frame.name_parts.join("\\");
                let resolved = self.resolver.resolve(&raw, LookupKind::Default);
                self.record_reference(SymbolKind::Class, resolved.clone(), span);
                ChildResult::Name(resolved)
            }
            PhraseKind::RelativeQualifiedName => {
                let raw = frame.name_parts.join("\\");
                let resolved = self.resolver.resolve_relative(&raw);
                self.record_reference(SymbolKind::Class, resolved.clone(), span);
                ChildResult::Name(resolved)
            }
            PhraseKind::FullyQualifiedName => {
                let resolved = frame.name_parts.join("\\");
                self.record_reference(SymbolKind::Class, resolved.clone(), span);
                ChildResult::Name(resolved)
            }
            PhraseKind::NamespaceDefinition => {
                let namespace = frame.name_parts.join("\\");
                self.events.push(NamespaceEvent::SetNamespace { offset: frame.start_offset, namespace });
                ChildResult::Symbols(frame.symbols)
            }
            PhraseKind::NamespaceUseClause => {
                let Some(target) = frame.text else { return ChildResult::None };
                let alias = frame.use_alias.unwrap_or_else(|| short_segment(&target).to_string());
                let use_kind = frame.use_kind.unwrap_or(ImportKind::Default);
                let rule = ImportRule { kind: use_kind, alias, target_fqn: target };
                self.resolver.add_import(rule.clone());
                self.events.push(NamespaceEvent::AddImport { offset: frame.start_offset, rule });
                ChildResult::None
            }
            PhraseKind::NamespaceUseGroupClause => ChildResult::None,
            PhraseKind::ClassBaseClause | PhraseKind::ClassInterfaceClause | PhraseKind::TraitUseClause => {
                ChildResult::None
            }
            PhraseKind::TypeDeclaration => ChildResult::Name(frame.text.unwrap_or_default()),
            PhraseKind::ParameterDeclaration => {
                let name = frame.text.unwrap_or_default();
                let loc = self.location(span);
                let mut symbol = Symbol::new(SymbolKind::Parameter, name, loc, "").with_modifiers(frame.modifiers);
                symbol.declared_type = frame.declared_type;
                ChildResult::Symbol(symbol)
            }
            PhraseKind::ParameterDeclarationList => ChildResult::Symbols(frame.symbols),
            PhraseKind::MethodDeclarationHeader => {
                let name = frame.text.unwrap_or_default();
                ChildResult::Symbol(build_callable(
                    self,
                    name,
                    frame.modifiers,
                    frame.symbols,
                    frame.doc,
                    frame.declared_type,
                    span,
                ))
            }
            PhraseKind::MethodDeclaration => ChildResult::Symbols(frame.symbols),
            PhraseKind::FunctionDeclaration | PhraseKind::AnonymousFunctionCreationExpression => {
                let name = frame.text.unwrap_or_else(|| scriptls_tree::create_anonymous_name("function", span));
                ChildResult::Symbol(build_callable(
                    self,
                    name,
                    frame.modifiers,
                    frame.symbols,
                    frame.doc,
                    frame.declared_type,
                    span,
                ))
            }
            PhraseKind::PropertyElement => {
                let name = frame.text.unwrap_or_default();
                ChildResult::Symbol(Symbol::new(SymbolKind::Property, name, self.location(span), ""))
            }
            PhraseKind::PropertyDeclaration => {
                let doc = frame.doc.clone();
                let tags = doc.as_deref().map(parse_doc_tags);
                let mut elements = frame.symbols;
                for el in &mut elements {
                    el.modifiers = frame.modifiers;
                    if let Some(d) = &doc {
                        el.doc = Some(d.clone());
                    }
                    if let Some(t) = tags.as_ref().and_then(|t| t.var_type.clone()) {
                        el.declared_type = Some(t);
                    }
                }
                ChildResult::Symbols(elements)
            }
            PhraseKind::ClassConstElement => {
                let name = frame.text.unwrap_or_default();
                ChildResult::Symbol(Symbol::new(SymbolKind::ClassConstant, name, self.location(span), ""))
            }
            PhraseKind::ClassConstDeclaration => {
                let mut modifiers = frame.modifiers;
                if modifiers.visibility_bits() == Modifiers::NONE {
                    modifiers.insert(Modifiers::PUBLIC);
                }
                let mut elements = frame.symbols;
                for el in &mut elements {
                    el.modifiers = modifiers;
                }
                ChildResult::Symbols(elements)
            }
            PhraseKind::ConstElement => {
                let name = frame.text.unwrap_or_default();
                ChildResult::Symbol(Symbol::new(SymbolKind::Constant, name, self.location(span), ""))
            }
            PhraseKind::ConstDeclaration => ChildResult::Symbols(frame.symbols),
            PhraseKind::ClassDeclaration | PhraseKind::InterfaceDeclaration | PhraseKind::TraitDeclaration => {
                let kind_for_symbol = match kind {
                    PhraseKind::InterfaceDeclaration => SymbolKind::Interface,
                    PhraseKind::TraitDeclaration => SymbolKind::Trait,
                    _ => SymbolKind::Class,
                };
                ChildResult::Symbol(build_class_like(self, kind_for_symbol, frame, span))
            }
            PhraseKind::AnonymousClassDeclaration => {
                ChildResult::Symbol(build_class_like(self, SymbolKind::Class, frame, span))
            }
            PhraseKind::SimpleVariable => {
                let name = frame.text.unwrap_or_default();
                self.record_reference(SymbolKind::Variable, name.clone(), span);
                ChildResult::Name(name)
            }
            PhraseKind::AssignmentExpression | PhraseKind::ForeachStatement | PhraseKind::ListIntrinsic => {
                ChildResult::Symbols(frame.symbols)
            }
            PhraseKind::FunctionCallExpression => {
                if frame.text.as_deref() == Some(RUNTIME_CONSTANT_BUILTIN) && !frame.raw_args.is_empty() {
                    let mut constant = Symbol::new(SymbolKind::Constant, frame.raw_args[0].clone(), self.location(span), "");
                    constant.value = frame.raw_args.get(1).cloned();
                    ChildResult::Symbol(constant)
                } else {
                    ChildResult::Symbols(frame.symbols)
                }
            }
            PhraseKind::ArgumentExpressionList => ChildResult::Args(frame.raw_args),
            _ => ChildResult::Symbols(frame.symbols),
        }
    }
}

fn short_segment(fqn: &str) -> &str {
    fqn.rsplit('\\').next().unwrap_or(fqn)
}

fn strip_quotes(text: &str) -> &str {
    text.trim_matches(|c| c == '\'' || c == '"')
}

fn apply_visibility_token(frame: &mut Frame, kind: TokenKind) {
    match kind {
        TokenKind::Public => frame.modifiers.insert(Modifiers::PUBLIC),
        TokenKind::Protected => frame.modifiers.insert(Modifiers::PROTECTED),
        TokenKind::Private => frame.modifiers.insert(Modifiers::PRIVATE),
        TokenKind::Static => frame.modifiers.insert(Modifiers::STATIC),
        TokenKind::Abstract => frame.modifiers.insert(Modifiers::ABSTRACT),
        TokenKind::Final => frame.modifiers.insert(Modifiers::FINAL),
        TokenKind::Readonly => frame.modifiers.insert(Modifiers::READONLY),
        _ => {}
    }
}

fn build_callable(
    extractor: &mut SymbolExtractor,
    name: String,
    modifiers: Modifiers,
    params: Vec<Symbol>,
    doc: Option<String>,
    declared_type: Option<String>,
    span: ByteSpan,
) -> Symbol {
    let surface_kind = if name.eq_ignore_ascii_case(CONSTRUCTOR_NAME) { SymbolKind::Constructor } else { SymbolKind::Method };
    let mut symbol = Symbol::new(surface_kind, name, extractor.location(span), "").with_modifiers(modifiers);
    symbol.children = params;
    symbol.declared_type = declared_type;
    if let Some(d) = doc {
        let tags = parse_doc_tags(&d);
        for param in &mut symbol.children {
            if let Some((_, ty)) = tags.params.iter().find(|(n, _)| n == &param.name) {
                param.declared_type = Some(ty.clone());
            }
        }
        if symbol.declared_type.is_none() {
            symbol.declared_type = tags.return_type;
        }
        symbol.doc = Some(d);
    }
    symbol
}

fn build_class_like(extractor: &mut SymbolExtractor, kind: SymbolKind, frame: Frame, span: ByteSpan) -> Symbol {
    let name = frame.text.unwrap_or_else(|| scriptls_tree::create_anonymous_name("class", span));
    let location = extractor.location(span);
    let fqn = if frame.modifiers.contains(Modifiers::ANONYMOUS) {
        name.clone()
    } else {
        extractor.resolver.resolve_relative(&name)
    };
    let mut symbol = Symbol::new(kind, fqn, location.clone(), "").with_modifiers(frame.modifiers);
    symbol.associated = frame.associated;
    symbol.children = frame.symbols;
    for child in &mut symbol.children {
        child.scope = symbol.name.clone();
    }
    if let Some(doc) = frame.doc {
        let tags = parse_doc_tags(&doc);
        for prop in tags.magic_properties {
            let mut modifiers = Modifiers::MAGIC;
            if prop.write_only {
                modifiers.insert(Modifiers::WRITEONLY);
            }
            let mut magic = Symbol::new(SymbolKind::Property, prop.name, location.clone(), symbol.name.clone())
                .with_modifiers(modifiers);
            magic.declared_type = prop.type_expr;
            symbol.children.push(magic);
        }
        for method in tags.magic_methods {
            let mut magic =
                Symbol::new(SymbolKind::Method, method.name, location.clone(), symbol.name.clone()).with_modifiers(Modifiers::MAGIC);
            magic.declared_type = method.return_type;
            symbol.children.push(magic);
        }
        symbol.doc = Some(doc);
    }
    symbol
}

impl Visitor for SymbolExtractor<'_> {
    fn preorder(&mut self, node: &Node, _spine: &[&Node]) -> bool {
        match node {
            Node::Token(token) => {
                self.handle_token(token.kind, token.text(self.source));
                true
            }
            Node::Phrase(phrase) => {
                if phrase.kind == PhraseKind::ErrorNode {
                    return false;
                }
                let span = node.span();
                let mut frame = Frame::new(phrase.kind, span.start);
                if is_declaration_kind(phrase.kind) {
                    frame.doc = self.pending_doc.take();
                }
                if phrase.kind == PhraseKind::AnonymousClassDeclaration
                    || phrase.kind == PhraseKind::AnonymousFunctionCreationExpression
                {
                    frame.modifiers.insert(Modifiers::ANONYMOUS);
                }
                self.stack.push(frame);
                if SCOPE_KINDS.contains(&phrase.kind) {
                    self.ref_stack.push(ReferenceScope::new(span));
                }
                true
            }
        }
    }

    fn postorder(&mut self, node: &Node, _spine: &[&Node]) {
        let Node::Phrase(phrase) = node else { return };
        if phrase.kind == PhraseKind::ErrorNode {
            return;
        }
        let span = node.span();
        let frame = match self.stack.pop() {
            Some(f) => f,
            None => return,
        };
        if SCOPE_KINDS.contains(&phrase.kind) {
            if let Some(scope) = self.ref_stack.pop() {
                if let Some(parent) = self.ref_stack.last_mut() {
                    parent.children.push(scope);
                } else {
                    self.ref_stack.push(scope);
                }
            }
        }
        let result = self.finalize(frame, span);
        match result {
            ChildResult::None => {}
            ChildResult::Name(name) => self.apply_name(name),
            ChildResult::Symbol(symbol) => self.top().symbols.push(symbol),
            ChildResult::Symbols(symbols) => {
                for s in symbols {
                    push_deduped(&mut self.top().symbols, s);
                }
            }
            ChildResult::Args(args) => self.top().raw_args = args,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identifier(offset: usize, text: &str) -> Node {
        Node::token(TokenKind::Identifier, offset, text.len())
    }

    fn name_part(offset: usize, text: &str) -> Node {
        Node::phrase(PhraseKind::NamePart, vec![identifier(offset, text)])
    }

    fn qualified_name(offset: usize, text: &str) -> Node {
        Node::phrase(PhraseKind::QualifiedName, vec![name_part(offset, text)])
    }

    /// `class A { function f(){} }`
    fn class_with_method() -> Node {
        let method_header = Node::phrase(
            PhraseKind::MethodDeclarationHeader,
            vec![Node::token(TokenKind::Function, 10, 8), identifier(19, "f"), Node::phrase(PhraseKind::ParameterDeclarationList, vec![])],
        );
        let method = Node::phrase(
            PhraseKind::MethodDeclaration,
            vec![method_header, Node::phrase(PhraseKind::CompoundStatement, vec![])],
        );
        let members = Node::phrase(PhraseKind::ClassMembers, vec![method]);
        let class = Node::phrase(
            PhraseKind::ClassDeclaration,
            vec![Node::token(TokenKind::Class, 0, 5), identifier(6, "A"), members],
        );
        Node::phrase(PhraseKind::SourceFile, vec![class])
    }

    #[test]
    fn extracts_class_and_method() {
        let tree = class_with_method();
        let extractor = SymbolExtractor::new("class A { function f(){} }", DocumentUri::parse("file:///a.src"));
        let (table, _refs) = extractor.extract(&tree);
        let class = &table.root().children[0];
        assert_eq!(class.kind, SymbolKind::Class);
        assert_eq!(class.name, "A");
        assert_eq!(class.children.len(), 1);
        assert_eq!(class.children[0].kind, SymbolKind::Method);
        assert_eq!(class.children[0].name, "f");
    }

    #[test]
    fn constructor_identifier_gets_surface_kind_constructor() {
        let method_header = Node::phrase(
            PhraseKind::MethodDeclarationHeader,
            vec![
                Node::token(TokenKind::Function, 10, 8),
                identifier(19, CONSTRUCTOR_NAME),
                Node::phrase(PhraseKind::ParameterDeclarationList, vec![]),
            ],
        );
        let method = Node::phrase(PhraseKind::MethodDeclaration, vec![method_header]);
        let members = Node::phrase(PhraseKind::ClassMembers, vec![method]);
        let class = Node::phrase(
            PhraseKind::ClassDeclaration,
            vec![Node::token(TokenKind::Class, 0, 5), identifier(6, "A"), members],
        );
        let tree = Node::phrase(PhraseKind::SourceFile, vec![class]);
        let extractor = SymbolExtractor::new("class A { function __construct(){} }", DocumentUri::parse("file:///a.src"));
        let (table, _) = extractor.extract(&tree);
        let method_symbol = &table.root().children[0].children[0];
        assert_eq!(method_symbol.kind, SymbolKind::Constructor);
    }

    #[test]
    fn namespace_definition_emits_event_and_resolves_top_level_names() {
        let namespace = Node::phrase(PhraseKind::NamespaceDefinition, vec![Node::token(TokenKind::Namespace, 0, 9), identifier(10, "App")]);
        let class = Node::phrase(
            PhraseKind::ClassDeclaration,
            vec![Node::token(TokenKind::Class, 15, 5), identifier(21, "Widget")],
        );
        let tree = Node::phrase(PhraseKind::SourceFile, vec![namespace, class]);
        let extractor = SymbolExtractor::new("namespace App; class Widget {}", DocumentUri::parse("file:///a.src"));
        let (table, _) = extractor.extract(&tree);
        let class_symbol = table.root().children.iter().find(|s| s.kind == SymbolKind::Class).unwrap();
        assert_eq!(class_symbol.name, "App\\Widget");
    }

    #[test]
    fn use_clause_registers_import_available_to_later_declarations() {
        let use_clause = Node::phrase(PhraseKind::NamespaceUseClause, vec![qualified_name(4, "Other")]);
        let use_decl = Node::phrase(PhraseKind::NamespaceUseDeclaration, vec![Node::token(TokenKind::Use, 0, 3), use_clause]);
        let tree = Node::phrase(PhraseKind::SourceFile, vec![use_decl]);
        let extractor = SymbolExtractor::new("use Other;", DocumentUri::parse("file:///a.src"));
        let (table, _) = extractor.extract(&tree);
        assert!(table.name_resolver_at(100).imports().iter().any(|r| r.alias == "Other"));
    }

    #[test]
    fn error_nodes_are_skipped() {
        let error = Node::phrase(PhraseKind::ErrorNode, vec![identifier(0, "garbage")]);
        let class = Node::phrase(
            PhraseKind::ClassDeclaration,
            vec![Node::token(TokenKind::Class, 8, 5), identifier(14, "A")],
        );
        let tree = Node::phrase(PhraseKind::SourceFile, vec![error, class]);
        let extractor = SymbolExtractor::new("garbage class A {}", DocumentUri::parse("file:///a.src"));
        let (table, _) = extractor.extract(&tree);
        assert_eq!(table.root().children.len(), 1);
        assert_eq!(table.root().children[0].name, "A");
    }

    #[test]
    fn variable_assignment_produces_deduplicated_variable_symbol() {
        let var = Node::phrase(PhraseKind::SimpleVariable, vec![Node::token(TokenKind::Variable, 0, 6)]);
        let assignment = Node::phrase(PhraseKind::AssignmentExpression, vec![var]);
        let tree = Node::phrase(PhraseKind::SourceFile, vec![assignment]);
        let extractor = SymbolExtractor::new("$hello = 1;", DocumentUri::parse("file:///a.src"));
        let (table, _) = extractor.extract(&tree);
        let vars: Vec<_> = table.root().children.iter().filter(|s| s.kind == SymbolKind::Variable).collect();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name, "$hello");
    }

    #[test]
    fn variable_occurrence_is_also_recorded_as_a_reference() {
        let var = Node::phrase(PhraseKind::SimpleVariable, vec![Node::token(TokenKind::Variable, 0, 6)]);
        let assignment = Node::phrase(PhraseKind::AssignmentExpression, vec![var]);
        let tree = Node::phrase(PhraseKind::SourceFile, vec![assignment]);
        let extractor = SymbolExtractor::new("$hello = 1;", DocumentUri::parse("file:///a.src"));
        let (_, refs) = extractor.extract(&tree);
        let found = refs.all_references();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, SymbolKind::Variable);
        assert_eq!(found[0].name, "$hello");
    }

    #[test]
    fn class_base_clause_name_is_recorded_as_a_class_reference() {
        let base = Node::phrase(PhraseKind::ClassBaseClause, vec![qualified_name(16, "Base")]);
        let class = Node::phrase(
            PhraseKind::ClassDeclaration,
            vec![Node::token(TokenKind::Class, 0, 5), identifier(6, "A"), base],
        );
        let tree = Node::phrase(PhraseKind::SourceFile, vec![class]);
        let extractor = SymbolExtractor::new("class A extends Base {}", DocumentUri::parse("file:///a.src"));
        let (table, refs) = extractor.extract(&tree);
        assert_eq!(table.root().children[0].associated[0].fqn, "Base");
        assert!(refs.all_references().iter().any(|r| r.name == "Base" && r.kind == SymbolKind::Class));
    }
}
