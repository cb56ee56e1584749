//! Receiver-type resolution for member-access and scoped-access completion
//! (§4.9's "walk up the receiver chain... ask the reference table for the
//! resolved type").
//!
//! Extraction records a `Variable` symbol's name on assignment but never
//! the type of its right-hand side, so there is no `declared_type` to read
//! back for a pattern like `$b = new B; $b->`. Rather than teach the
//! extractor a general expression-typing pass, this module recovers that
//! one case directly: it re-scans the document's tree for an assignment to
//! the same variable whose right-hand side is an object-creation
//! expression. It does not model control flow — the first such assignment
//! found wins, even if a later one in the same scope assigns a different
//! type.
//!
//! A chained receiver (`$a->foo()->bar`, `$a->prop->`) is resolved the same
//! way §4.7 resolves inheritance: recursively resolve the inner access's
//! own receiver, run it through [`scriptls_store::aggregate`], and read the
//! matched member's `declared_type` — the type a call or property access
//! yields is just that member's declared type, the same value
//! `ObjectAccessCompletion` already reads off every member it lists.

use crate::context::CompletionContext;
use scriptls_store::MergeStrategy;
use scriptls_symbols::LookupKind;
use scriptls_tree::{Node, PhraseKind, TokenKind};

const CHAINED_ACCESS_PHRASES: [PhraseKind; 4] = [
    PhraseKind::PropertyAccessExpression,
    PhraseKind::MethodCallExpression,
    PhraseKind::ScopedPropertyAccessExpression,
    PhraseKind::ScopedCallExpression,
];

const NAME_PHRASES: [PhraseKind; 3] =
    [PhraseKind::QualifiedName, PhraseKind::RelativeQualifiedName, PhraseKind::FullyQualifiedName];

/// The class/interface/trait name a member-access or scoped-access
/// receiver resolves to, if it can be determined at all.
pub fn resolve_receiver_type(ctx: &CompletionContext, access: &Node) -> Option<String> {
    let receiver = access.children().first()?;
    match receiver.phrase_kind() {
        Some(PhraseKind::ObjectCreationExpression) => class_name_from_creation(ctx, receiver),
        Some(PhraseKind::SimpleVariable) => {
            let name = variable_name(receiver, ctx.source)?;
            infer_variable_type(ctx, name)
        }
        Some(k) if NAME_PHRASES.contains(&k) => Some(resolve_name_node(ctx, receiver)),
        Some(k) if CHAINED_ACCESS_PHRASES.contains(&k) => resolve_member_declared_type(ctx, receiver),
        // A subscript receiver's element type isn't tracked anywhere.
        _ => None,
    }
}

/// The declared type of the member a nested access (`$a->foo()` inside
/// `$a->foo()->bar`) reads or calls: resolve that access's own receiver,
/// aggregate the resolved type's hierarchy, and find the member by name.
fn resolve_member_declared_type(ctx: &CompletionContext, access: &Node) -> Option<String> {
    let base_type = resolve_receiver_type(ctx, access)?;
    let member_name = member_name(access, ctx.source)?;
    let root = ctx.store.find(&base_type, |s| s.kind.is_type_declaration())?;
    scriptls_store::aggregate(ctx.store, &root, MergeStrategy::default())
        .into_iter()
        .find(|m| m.name.eq_ignore_ascii_case(member_name))
        .and_then(|m| m.declared_type)
}

/// The member name an access node reads or calls — the first identifier
/// among its children after the receiver (index 0). Member names are
/// recorded without a `$` sigil (see `PropertyElement`/callable extraction),
/// matching `Symbol::name` for properties and methods alike.
fn member_name<'a>(access: &'a Node, source: &'a str) -> Option<&'a str> {
    access.children().iter().skip(1).find_map(|c| find_first(c, is_identifier_token)).map(|n| n.text(source))
}

fn is_identifier_token(node: &Node) -> bool {
    matches!(node, Node::Token(t) if t.kind == TokenKind::Identifier)
}

fn variable_name<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    node.children().iter().find_map(|c| match c {
        Node::Token(t) if t.kind == TokenKind::Variable => Some(t.text(source)),
        _ => None,
    })
}

fn class_name_from_creation(ctx: &CompletionContext, creation: &Node) -> Option<String> {
    let name_node = find_first(creation, |n| matches!(n.phrase_kind(), Some(k) if NAME_PHRASES.contains(&k)))?;
    Some(resolve_name_node(ctx, name_node))
}

fn resolve_name_node(ctx: &CompletionContext, name_node: &Node) -> String {
    let raw = collect_identifiers(name_node, ctx.source).join("\\");
    match name_node.phrase_kind() {
        Some(PhraseKind::FullyQualifiedName) => raw,
        Some(PhraseKind::RelativeQualifiedName) => ctx.resolver.resolve_relative(&raw),
        _ => ctx.resolver.resolve(&raw, LookupKind::Default),
    }
}

fn collect_identifiers<'a>(node: &'a Node, source: &'a str) -> Vec<&'a str> {
    let mut out = Vec::new();
    collect_identifiers_into(node, source, &mut out);
    out
}

fn collect_identifiers_into<'a>(node: &'a Node, source: &'a str, out: &mut Vec<&'a str>) {
    match node {
        Node::Token(t) if t.kind == TokenKind::Identifier => out.push(t.text(source)),
        _ => {
            for child in node.children() {
                collect_identifiers_into(child, source, out);
            }
        }
    }
}

fn find_first<'a>(node: &'a Node, pred: impl Fn(&Node) -> bool + Copy) -> Option<&'a Node> {
    if pred(node) {
        return Some(node);
    }
    node.children().iter().find_map(|c| find_first(c, pred))
}

fn infer_variable_type(ctx: &CompletionContext, name: &str) -> Option<String> {
    find_assignment_type(ctx, ctx.cursor.root(), name)
}

fn find_assignment_type(ctx: &CompletionContext, node: &Node, name: &str) -> Option<String> {
    if let Node::Phrase(p) = node {
        if p.kind == PhraseKind::AssignmentExpression {
            if let [lhs, rhs, ..] = p.children.as_slice() {
                let is_target = matches!(lhs.phrase_kind(), Some(PhraseKind::SimpleVariable)) && variable_name(lhs, ctx.source) == Some(name);
                if is_target {
                    if let Some(found) = class_name_from_creation(ctx, rhs) {
                        return Some(found);
                    }
                }
            }
        }
    }
    node.children().iter().find_map(|child| find_assignment_type(ctx, child, name))
}
