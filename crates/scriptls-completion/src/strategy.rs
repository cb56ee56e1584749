//! The context-recognizing strategy interface (§4.9): a gate plus a
//! suggestion function, consulted in declaration order.

use crate::context::CompletionContext;
use crate::item::CompletionItem;

pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this strategy claims the cursor position. Dispatch stops at
    /// the first strategy that answers `true`.
    fn can_suggest(&self, ctx: &CompletionContext) -> bool;

    /// Candidate items for a context this strategy has already claimed.
    fn suggest(&self, ctx: &CompletionContext) -> Vec<CompletionItem>;
}
