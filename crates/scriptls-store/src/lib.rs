//! Workspace-wide symbol index (§4.6), type aggregation (§4.7), and the
//! cache seam (§6).

mod aggregate;
mod cache;
mod index;
mod store;

pub use aggregate::{aggregate, MergeStrategy};
pub use cache::{Cache, CacheFuture, NullCache};
pub use index::{acronym_signature, fuzzy_matches, SymbolSummary};
pub use store::SymbolStore;
