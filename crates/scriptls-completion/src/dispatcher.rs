//! Strategy dispatch: first match wins, then truncate to `maxItems` (§4.9).

use crate::context::CompletionContext;
use crate::item::CompletionResult;
use crate::strategies::{
    ClassBaseClauseCompletion, ClassTypeDesignatorCompletion, DeclarationBodyCompletion, InterfaceClauseCompletion,
    MethodDeclarationHeaderCompletion, NameCompletion, NamespaceDefinitionCompletion, NamespaceUseClauseCompletion,
    ObjectAccessCompletion, ScopedAccessCompletion, SimpleVariableCompletion, TraitUseClauseCompletion, TypeDeclarationCompletion,
};
use crate::strategy::Strategy;

pub struct CompletionDispatcher {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Default for CompletionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionDispatcher {
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(ObjectAccessCompletion),
                Box::new(ScopedAccessCompletion),
                Box::new(ClassTypeDesignatorCompletion),
                Box::new(SimpleVariableCompletion),
                Box::new(TypeDeclarationCompletion),
                Box::new(ClassBaseClauseCompletion),
                Box::new(InterfaceClauseCompletion),
                Box::new(TraitUseClauseCompletion),
                Box::new(NamespaceDefinitionCompletion),
                Box::new(NamespaceUseClauseCompletion),
                Box::new(MethodDeclarationHeaderCompletion),
                Box::new(DeclarationBodyCompletion),
                Box::new(NameCompletion),
            ],
        }
    }

    /// Consult strategies in declaration order; the first whose
    /// `can_suggest` claims the position handles the whole request.
    pub fn complete(&self, ctx: &CompletionContext) -> CompletionResult {
        for strategy in &self.strategies {
            if !strategy.can_suggest(ctx) {
                continue;
            }
            tracing::debug!(strategy = strategy.name(), offset = ctx.offset, "completion strategy matched");
            let mut items = strategy.suggest(ctx);
            let is_incomplete = items.len() > ctx.config.max_items;
            items.truncate(ctx.config.max_items);
            return CompletionResult { items, is_incomplete };
        }
        CompletionResult::default()
    }
}
