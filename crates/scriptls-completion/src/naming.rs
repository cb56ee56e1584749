//! Completion-item label/insert-text rules (§4.9).

use crate::context::CompletionContext;
use crate::item::{CompletionItem, CompletionItemKind, TextEdit};
use scriptls_position::ByteSpan;
use scriptls_symbols::{NameResolver, Symbol, SymbolKind};

fn namespace_of(fqn: &str) -> &str {
    fqn.rsplit_once('\\').map_or("", |(ns, _)| ns)
}

/// An import alias whose target equals `fqn`, if the document imports one.
fn existing_alias<'a>(resolver: &'a NameResolver, fqn: &str) -> Option<&'a str> {
    resolver.imports().iter().find(|rule| rule.target_fqn == fqn).map(|rule| rule.alias.as_str())
}

/// Build a completion item for a declared symbol, applying the insert-text
/// rules: imported symbols use their alias, type names already in the
/// current namespace use their short name, and type names neither local
/// nor imported get a short-name insert plus a synthesized `use` edit.
pub fn item_for_symbol(ctx: &CompletionContext, symbol: &Symbol) -> CompletionItem {
    let label = symbol.short_name().to_string();
    let kind = CompletionItemKind::from(symbol.kind);
    let mut item = CompletionItem::new(kind, label.clone(), label.clone()).with_detail(symbol.name.clone());
    if let Some(doc) = &symbol.doc {
        item = item.with_documentation(doc.clone());
    }

    if symbol.kind.is_type_declaration() {
        if let Some(alias) = existing_alias(&ctx.resolver, &symbol.name) {
            item.insert_text = alias.to_string();
        } else if namespace_of(&symbol.name) == ctx.resolver.namespace() {
            item.insert_text = label;
        } else {
            item.insert_text = label;
            let edit_offset = ctx.use_insertion_offset();
            item = item.with_additional_edit(TextEdit {
                span: ByteSpan::empty(edit_offset),
                new_text: format!("\nuse {};", symbol.name),
            });
        }
        return item;
    }

    if symbol.kind.is_callable() {
        return callable_item(item, symbol);
    }

    item
}

fn callable_item(mut item: CompletionItem, symbol: &Symbol) -> CompletionItem {
    let params: Vec<&str> = symbol.children.iter().filter(|c| c.kind == SymbolKind::Parameter).map(|p| p.name.as_str()).collect();
    if params.is_empty() {
        item.insert_text = format!("{}()", item.label);
        item
    } else {
        item.insert_text = format!("{}($0)", item.label);
        let detail = format!("{}({})", item.label, params.join(", "));
        item.with_detail(detail).as_snippet(crate::item::Command::TriggerParameterHints)
    }
}
